use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn is_trump(self, trump: Suit) -> bool {
        self.suit == trump
    }

    pub fn is_jack_of(self, trump: Suit) -> bool {
        self.suit == trump && self.rank == Rank::Jack
    }

    pub const fn game_points(self) -> u32 {
        self.rank.game_points()
    }

    pub const fn kick_chalk(self) -> u32 {
        self.rank.kick_chalk()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};

    #[test]
    fn jack_of_trump_identified() {
        let card = Card::new(Rank::Jack, Suit::Spades);
        assert!(card.is_jack_of(Suit::Spades));
        assert!(!card.is_jack_of(Suit::Hearts));
        assert_eq!(card.kick_chalk(), 3);
        assert_eq!(card.game_points(), 1);
    }

    #[test]
    fn ten_is_worth_ten_game_points() {
        let card = Card::new(Rank::Ten, Suit::Clubs);
        assert_eq!(card.game_points(), 10);
        assert!(card.is_trump(Suit::Clubs));
    }

    #[test]
    fn display_is_rank_then_suit() {
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).to_string(), "AH");
    }
}
