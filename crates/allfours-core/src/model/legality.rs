//! Which cards a seat may play into a trick.
//!
//! The checks here are pure: they see the candidate, the acting hand and the
//! cards already on the table, and never solicit anything. Driving a seat until
//! it proposes an acceptable card is the trick engine's job.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use serde::Serialize;
use thiserror::Error;

/// Why a proposed card was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum IllegalPlay {
    #[error("must follow {lead} or play trump while holding {lead}")]
    MustFollowSuit { lead: Suit },
    #[error("cannot undertrump {highest} while holding a non-trump card")]
    IllegalUndertrump { highest: Card },
    #[error("{card} is not in hand")]
    CardNotInHand { card: Card },
}

/// Checks `candidate` against the follow-suit and undertrump rules.
///
/// `hand` is the acting seat's full hand, candidate included. `played` holds
/// the cards already in the trick, in play order.
pub fn check_play(
    candidate: Card,
    lead: Option<Suit>,
    trump: Suit,
    hand: &Hand,
    played: &[Card],
) -> Result<(), IllegalPlay> {
    let Some(lead) = lead else {
        return Ok(());
    };

    if candidate.suit != lead && candidate.suit != trump && hand.has_suit(lead) {
        return Err(IllegalPlay::MustFollowSuit { lead });
    }

    if lead != trump && candidate.suit == trump {
        let highest = played
            .iter()
            .copied()
            .filter(|c| c.suit == trump)
            .max_by_key(|c| c.rank);
        if let Some(highest) = highest {
            if candidate.rank < highest.rank && hand.has_non_trump(trump) {
                return Err(IllegalPlay::IllegalUndertrump { highest });
            }
        }
    }

    Ok(())
}

/// Every card in `hand` that `check_play` accepts, in hand order.
pub fn legal_cards(hand: &Hand, lead: Option<Suit>, trump: Suit, played: &[Card]) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|&card| check_play(card, lead, trump, hand, played).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{IllegalPlay, check_play, legal_cards};
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn opening_play_is_always_legal() {
        let hand = Hand::with_cards(vec![c(Rank::Two, Suit::Hearts), c(Rank::Ace, Suit::Clubs)]);
        assert_eq!(legal_cards(&hand, None, Suit::Spades, &[]).len(), 2);
    }

    #[test]
    fn must_follow_lead_suit_when_holding_it() {
        let hand = Hand::with_cards(vec![
            c(Rank::Two, Suit::Hearts),
            c(Rank::Ace, Suit::Clubs),
            c(Rank::Three, Suit::Spades),
        ]);
        let played = [c(Rank::Ten, Suit::Hearts)];
        assert_eq!(
            check_play(c(Rank::Ace, Suit::Clubs), Some(Suit::Hearts), Suit::Spades, &hand, &played),
            Err(IllegalPlay::MustFollowSuit { lead: Suit::Hearts })
        );
        // Trumping is allowed even while holding the lead suit.
        assert!(
            check_play(c(Rank::Three, Suit::Spades), Some(Suit::Hearts), Suit::Spades, &hand, &played)
                .is_ok()
        );
    }

    #[test]
    fn void_in_lead_suit_may_discard_anything() {
        let hand = Hand::with_cards(vec![c(Rank::Ace, Suit::Clubs), c(Rank::Two, Suit::Diamonds)]);
        let played = [c(Rank::Ten, Suit::Hearts)];
        assert_eq!(legal_cards(&hand, Some(Suit::Hearts), Suit::Spades, &played).len(), 2);
    }

    #[test]
    fn undertrump_rejected_while_holding_other_suits() {
        let hand = Hand::with_cards(vec![c(Rank::Two, Suit::Spades), c(Rank::Five, Suit::Diamonds)]);
        let played = [c(Rank::Ten, Suit::Hearts), c(Rank::Nine, Suit::Spades)];
        assert_eq!(
            check_play(c(Rank::Two, Suit::Spades), Some(Suit::Hearts), Suit::Spades, &hand, &played),
            Err(IllegalPlay::IllegalUndertrump {
                highest: c(Rank::Nine, Suit::Spades)
            })
        );
    }

    #[test]
    fn forced_undertrump_is_legal_with_only_trump_left() {
        let hand = Hand::with_cards(vec![c(Rank::Two, Suit::Spades), c(Rank::Four, Suit::Spades)]);
        let played = [c(Rank::Ten, Suit::Hearts), c(Rank::Nine, Suit::Spades)];
        assert!(
            check_play(c(Rank::Two, Suit::Spades), Some(Suit::Hearts), Suit::Spades, &hand, &played)
                .is_ok()
        );
    }

    #[test]
    fn overtrumping_is_fine() {
        let hand = Hand::with_cards(vec![c(Rank::King, Suit::Spades), c(Rank::Five, Suit::Diamonds)]);
        let played = [c(Rank::Ten, Suit::Hearts), c(Rank::Nine, Suit::Spades)];
        assert!(
            check_play(c(Rank::King, Suit::Spades), Some(Suit::Hearts), Suit::Spades, &hand, &played)
                .is_ok()
        );
    }

    #[test]
    fn undertrump_rule_ignored_when_trump_was_led() {
        let hand = Hand::with_cards(vec![c(Rank::Two, Suit::Spades), c(Rank::Five, Suit::Diamonds)]);
        let played = [c(Rank::Nine, Suit::Spades)];
        assert_eq!(
            legal_cards(&hand, Some(Suit::Spades), Suit::Spades, &played),
            vec![c(Rank::Two, Suit::Spades)]
        );
    }
}
