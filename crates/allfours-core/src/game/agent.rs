use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::legality::{IllegalPlay, legal_cards};
use crate::model::player::Seat;
use crate::model::score::ScoreBoard;
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use serde::Serialize;
use std::collections::VecDeque;

/// What a seat sees when asked for a card.
pub struct PlayContext<'a> {
    pub seat: Seat,
    pub dealer: Seat,
    pub hand: &'a Hand,
    pub trick: &'a Trick,
    pub trick_number: usize,
    pub scores: &'a ScoreBoard,
}

impl PlayContext<'_> {
    pub fn trump(&self) -> Suit {
        self.trick.trump()
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.trick.lead_suit()
    }

    pub fn legal_cards(&self) -> Vec<Card> {
        legal_cards(
            self.hand,
            self.trick.lead_suit(),
            self.trick.trump(),
            &self.trick.cards(),
        )
    }
}

/// The yes/no questions of the begging phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Asked of the seat right of the dealer: beg (yes) or stand (no).
    Beg,
    /// Asked of the dealer after a beg: give one chalk (yes) or run the pack (no).
    GiveOne,
}

pub struct DecisionContext<'a> {
    pub seat: Seat,
    pub dealer: Seat,
    pub decision: Decision,
    pub hand: &'a Hand,
    pub kicked: Card,
    pub scores: &'a ScoreBoard,
}

impl DecisionContext<'_> {
    pub fn trump(&self) -> Suit {
        self.kicked.suit
    }
}

/// Input provider for one seat.
///
/// Card proposals are validated by the engine and re-requested after a
/// rejection, without limit. Returning `None` means the provider has nothing
/// more to offer, which ends the hand with an error.
pub trait Agent: Send {
    fn choose_card(&mut self, ctx: &PlayContext<'_>) -> Option<Card>;

    fn choose_yes_no(&mut self, ctx: &DecisionContext<'_>) -> bool;

    /// Called when a proposed card was turned away.
    fn play_rejected(&mut self, _card: Card, _reason: IllegalPlay) {}
}

/// Replays queued proposals and answers.
///
/// Once the card queue is empty the agent either gives up or, when built with
/// `with_fallback`, plays its first legal card. Unanswered questions get `false`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    cards: VecDeque<Card>,
    answers: VecDeque<bool>,
    fallback: bool,
    rejections: Vec<(Card, IllegalPlay)>,
}

impl ScriptedAgent {
    pub fn new(cards: Vec<Card>, answers: Vec<bool>) -> Self {
        Self {
            cards: cards.into(),
            answers: answers.into(),
            fallback: false,
            rejections: Vec::new(),
        }
    }

    pub fn with_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    /// An agent that only ever plays its first legal card and answers `answers` in turn.
    pub fn first_legal(answers: Vec<bool>) -> Self {
        Self::new(Vec::new(), answers).with_fallback()
    }

    pub fn rejections(&self) -> &[(Card, IllegalPlay)] {
        &self.rejections
    }
}

impl Agent for ScriptedAgent {
    fn choose_card(&mut self, ctx: &PlayContext<'_>) -> Option<Card> {
        if let Some(card) = self.cards.pop_front() {
            return Some(card);
        }
        if self.fallback {
            return ctx.legal_cards().first().copied();
        }
        None
    }

    fn choose_yes_no(&mut self, _ctx: &DecisionContext<'_>) -> bool {
        self.answers.pop_front().unwrap_or(false)
    }

    fn play_rejected(&mut self, card: Card, reason: IllegalPlay) {
        self.rejections.push((card, reason));
    }
}

#[cfg(test)]
mod tests {
    use super::{Agent, PlayContext, ScriptedAgent};
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::player::Seat;
    use crate::model::rank::Rank;
    use crate::model::score::ScoreBoard;
    use crate::model::suit::Suit;
    use crate::model::trick::Trick;

    #[test]
    fn scripted_agent_falls_back_to_first_legal_card() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::Five, Suit::Clubs),
        ]);
        let mut trick = Trick::new(Seat::North, Suit::Spades);
        trick
            .play(Seat::North, Card::new(Rank::Nine, Suit::Clubs))
            .unwrap();
        let scores = ScoreBoard::new();
        let ctx = PlayContext {
            seat: Seat::West,
            dealer: Seat::East,
            hand: &hand,
            trick: &trick,
            trick_number: 1,
            scores: &scores,
        };

        let mut queued = ScriptedAgent::new(vec![Card::new(Rank::Two, Suit::Hearts)], vec![]);
        assert_eq!(queued.choose_card(&ctx), Some(Card::new(Rank::Two, Suit::Hearts)));
        assert_eq!(queued.choose_card(&ctx), None);

        let mut fallback = ScriptedAgent::first_legal(vec![]);
        assert_eq!(fallback.choose_card(&ctx), Some(Card::new(Rank::Five, Suit::Clubs)));
    }
}
