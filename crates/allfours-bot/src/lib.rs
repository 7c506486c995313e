pub mod bot;
pub mod policy;

pub use bot::{BegPlanner, BotDifficulty, PlayPlanner};
pub use policy::{HeuristicAgent, RandomAgent};
