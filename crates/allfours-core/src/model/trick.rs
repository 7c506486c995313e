use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use serde::Serialize;
use thiserror::Error;

/// One trick in progress. The trump suit is copied in when the trick opens and
/// cannot change afterwards.
#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    trump: Suit,
    plays: Vec<Play>,
    best: Option<Play>,
    jack_player: Option<Seat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("{0} has already played this trick")]
    AlreadyPlayed(Seat),
}

impl Trick {
    pub fn new(leader: Seat, trump: Suit) -> Self {
        Self {
            leader,
            trump,
            plays: Vec::with_capacity(4),
            best: None,
            jack_player: None,
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn trump(&self) -> Suit {
        self.trump
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn cards(&self) -> Vec<Card> {
        self.plays.iter().map(|play| play.card).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    /// Seat due to play next, or `None` once all four have played.
    pub fn expected_seat(&self) -> Option<Seat> {
        if self.is_complete() {
            return None;
        }
        Some(
            self.plays
                .last()
                .map(|play| play.seat.next())
                .unwrap_or(self.leader),
        )
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.seat == seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }

        let expected = self.expected_seat().unwrap_or(self.leader);
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        let play = Play { seat, card };
        self.plays.push(play);

        if card.is_jack_of(self.trump) {
            self.jack_player = Some(seat);
        }

        let lead = self.lead_suit().unwrap_or(card.suit);
        let takes_lead = match self.best {
            None => true,
            Some(best) => is_better(card, best.card, lead, self.trump),
        };
        if takes_lead {
            self.best = Some(play);
        }
        Ok(())
    }

    /// The play currently taking the trick.
    pub fn winning_play(&self) -> Option<Play> {
        self.best
    }

    pub fn winner(&self) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        self.best.map(|play| play.seat)
    }

    /// Game points in the trick, all of which go to the winner's team.
    pub fn points(&self) -> u32 {
        self.plays.iter().map(|play| play.card.game_points()).sum()
    }

    pub fn jack_player(&self) -> Option<Seat> {
        self.jack_player
    }
}

/// Whether `candidate` takes the trick away from `best`.
pub fn is_better(candidate: Card, best: Card, lead: Suit, trump: Suit) -> bool {
    let candidate_trump = candidate.suit == trump;
    let best_trump = best.suit == trump;
    if candidate_trump != best_trump {
        return candidate_trump;
    }

    if !candidate_trump {
        let candidate_lead = candidate.suit == lead;
        let best_lead = best.suit == lead;
        if candidate_lead != best_lead {
            return candidate_lead;
        }
    }

    candidate.rank > best.rank
}
