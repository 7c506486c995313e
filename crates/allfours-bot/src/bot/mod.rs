mod beg;
mod play;

pub use beg::BegPlanner;
pub use play::{PlayPlanner, PlayReason};

use allfours_core::model::card::Card;
use allfours_core::model::hand::Hand;
use allfours_core::model::rank::Rank;
use allfours_core::model::suit::Suit;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotDifficulty {
    /// First legal card; always stands and always runs the pack.
    Easy,
    #[default]
    Normal,
}

impl BotDifficulty {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" | "legacy" => Some(BotDifficulty::Easy),
            "normal" | "default" | "heuristic" => Some(BotDifficulty::Normal),
            _ => None,
        }
    }

    pub fn from_env() -> Self {
        static CACHED: OnceLock<BotDifficulty> = OnceLock::new();
        *CACHED.get_or_init(|| {
            std::env::var("ALLFOURS_BOT_DIFFICULTY")
                .ok()
                .and_then(|raw| Self::parse(&raw))
                .unwrap_or_default()
        })
    }
}

/// Rough value of a holding in `trump`: one point per trump plus a bonus for
/// each of the cards that score on their own.
pub(crate) fn trump_strength(hand: &Hand, trump: Suit) -> u32 {
    hand.trumps(trump)
        .map(|card| match card.rank {
            Rank::Ace => 4,
            Rank::King | Rank::Jack => 3,
            Rank::Queen | Rank::Two => 2,
            _ => 1,
        })
        .sum()
}

/// Ordering key for throwing a card away: cheap, low, non-trump cards first.
pub(crate) fn discard_key(card: Card, trump: Suit) -> (bool, u32, u8) {
    (card.is_trump(trump), card.game_points(), card.rank.value())
}
