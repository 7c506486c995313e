mod heuristic;
mod random;

pub use heuristic::HeuristicAgent;
pub use random::RandomAgent;
