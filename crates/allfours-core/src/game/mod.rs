pub mod agent;
pub mod begging;
pub mod events;
pub mod match_state;
pub mod play;
pub mod round;
pub mod scoring;
