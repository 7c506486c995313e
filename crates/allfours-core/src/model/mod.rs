pub mod card;
pub mod deck;
pub mod hand;
pub mod legality;
pub mod player;
pub mod rank;
pub mod score;
pub mod suit;
pub mod team;
pub mod trick;
