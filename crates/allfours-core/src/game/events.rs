use crate::game::begging::ForcedRun;
use crate::game::scoring::{ChalkAward, JackOutcome, TrumpHolder};
use crate::model::card::Card;
use crate::model::legality::IllegalPlay;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::team::TeamId;
use serde::Serialize;

/// Notifications raised while a hand is played, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HandEvent {
    Dealt { dealer: Seat, cards_each: usize },
    Kicked { card: Card },
    ChalkAwarded { award: ChalkAward },
    Stood { seat: Seat },
    ForcedToBeg { seat: Seat },
    Begged { seat: Seat },
    GaveOne { dealer: Seat },
    DealerForcedToRun { dealer: Seat, reason: ForcedRun },
    RanPack { run: u32, remaining: usize },
    TrumpSettled { trump: Suit },
    HighLow { high: TrumpHolder, low: TrumpHolder },
    PlayRejected { seat: Seat, card: Card, reason: IllegalPlay },
    CardPlayed { seat: Seat, card: Card },
    TrickCompleted { number: usize, winner: Seat, points: u32 },
    Jack { outcome: JackOutcome },
    MatchClinched { team: TeamId },
}

/// Presentation side channel. Nothing it does feeds back into the rules.
pub trait HandObserver {
    fn on_event(&mut self, event: &HandEvent);
}

impl HandObserver for Vec<HandEvent> {
    fn on_event(&mut self, event: &HandEvent) {
        self.push(event.clone());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl HandObserver for NullObserver {
    fn on_event(&mut self, _event: &HandEvent) {}
}

#[cfg(test)]
mod tests {
    use super::HandEvent;
    use crate::game::begging::ForcedRun;
    use crate::model::card::Card;
    use crate::model::legality::IllegalPlay;
    use crate::model::player::Seat;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn events_serialize_with_a_tag() {
        let event = HandEvent::PlayRejected {
            seat: Seat::East,
            card: Card::new(Rank::Two, Suit::Clubs),
            reason: IllegalPlay::MustFollowSuit { lead: Suit::Hearts },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "play_rejected");
        assert_eq!(json["seat"], "East");
        assert_eq!(json["reason"]["rule"], "must_follow_suit");
    }

    #[test]
    fn forced_run_carries_its_reason() {
        let event = HandEvent::DealerForcedToRun {
            dealer: Seat::North,
            reason: ForcedRun::DealerHoldsNoTrump,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "dealer_forced_to_run");
        assert_eq!(json["reason"], "dealer_holds_no_trump");
    }
}
