//! Rules engine for All Fours (Pitch): dealing, kicking for trump, begging,
//! running the pack, trick play and chalk scoring.

pub mod game;
pub mod model;
