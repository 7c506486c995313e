use crate::game::agent::Agent;
use crate::game::begging::{self, TrumpOutcome, TrumpResolution};
use crate::game::events::{HandEvent, HandObserver};
use crate::game::play;
use crate::game::scoring::{self, AwardReason, ChalkAward, HandTally, JackOutcome, TrumpHolder};
use crate::model::card::Card;
use crate::model::deck::{Shoe, ShoeError};
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::score::ScoreBoard;
use crate::model::suit::Suit;
use crate::model::team::TeamId;
use crate::model::trick::{Play, TrickError};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

/// Cards dealt to each seat before the first kick.
pub const INITIAL_HAND_SIZE: usize = 6;
/// Cards added to each seat every time the pack is run.
pub const RUN_PACK_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("cannot deal the hand: {0}")]
    InsufficientCards(ShoeError),
    #[error("the pack ran out after {runs} run(s)")]
    RoundAborted { runs: u32 },
    #[error("nobody holds a {trump} trump")]
    NoTrumpInPlay { trump: Suit },
    #[error("no seat holds {card}")]
    CardOwnerNotFound { card: Card },
    #[error("{seat} has no more cards to propose")]
    AgentExhausted { seat: Seat },
    #[error("trick {number} finished without a winner")]
    TrickIncomplete { number: usize },
    #[error(transparent)]
    Trick(#[from] TrickError),
}

impl HandError {
    /// Aborts that are resolved by shuffling and dealing again with the same dealer.
    pub fn requires_redeal(&self) -> bool {
        matches!(
            self,
            HandError::InsufficientCards(_)
                | HandError::RoundAborted { .. }
                | HandError::NoTrumpInPlay { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandOutcome {
    /// Every trick was played and the hand was scored.
    Completed,
    /// A team reached the target during the begging phase; no tricks were played.
    Clinched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickSummary {
    pub number: usize,
    pub leader: Seat,
    pub plays: Vec<Play>,
    pub winner: Seat,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandReport {
    pub dealer: Seat,
    pub trump: Suit,
    pub kicks: Vec<Card>,
    pub resolution: Option<TrumpResolution>,
    pub outcome: HandOutcome,
    pub high: Option<TrumpHolder>,
    pub low: Option<TrumpHolder>,
    pub jack: Option<JackOutcome>,
    pub game_points: [u32; 2],
    pub tricks: Vec<TrickSummary>,
    pub awards: Vec<ChalkAward>,
    pub chalk: [u32; 2],
}

impl HandReport {
    pub fn chalk_won(&self, team: TeamId) -> u32 {
        self.awards
            .iter()
            .filter(|award| award.team == team)
            .map(|award| award.chalk)
            .sum()
    }
}

/// Routes agent calls, chalk awards and notifications for one hand.
pub(crate) struct HandDriver<'a> {
    pub(crate) agents: &'a mut [Box<dyn Agent>; 4],
    pub(crate) scores: &'a mut ScoreBoard,
    observer: &'a mut dyn HandObserver,
    awards: Vec<ChalkAward>,
}

impl<'a> HandDriver<'a> {
    pub(crate) fn new(
        agents: &'a mut [Box<dyn Agent>; 4],
        scores: &'a mut ScoreBoard,
        observer: &'a mut dyn HandObserver,
    ) -> Self {
        Self {
            agents,
            scores,
            observer,
            awards: Vec::new(),
        }
    }

    pub(crate) fn emit(&mut self, hand_event: HandEvent) {
        event!(
            target: "allfours_core::hand",
            Level::DEBUG,
            kind = ?hand_event,
        );
        self.observer.on_event(&hand_event);
    }

    /// Adds chalk and reports whether the match is now decided.
    pub(crate) fn award(&mut self, team: TeamId, chalk: u32, reason: AwardReason) -> bool {
        self.scores.add_chalk(team, chalk);
        self.record(ChalkAward {
            team,
            chalk,
            reason,
        });
        self.check_clinch()
    }

    fn record(&mut self, award: ChalkAward) {
        event!(
            target: "allfours_core::hand",
            Level::INFO,
            team = %award.team,
            chalk = award.chalk,
            reason = ?award.reason,
            total = self.scores.chalk(award.team),
            "chalk awarded"
        );
        self.awards.push(award);
        self.emit(HandEvent::ChalkAwarded { award });
    }

    /// Emits `MatchClinched` once a team has reached the target.
    pub(crate) fn check_clinch(&mut self) -> bool {
        match self.scores.winner() {
            Some(team) => {
                event!(
                    target: "allfours_core::match",
                    Level::INFO,
                    team = %team,
                    chalk = ?self.scores.standings(),
                    "match clinched"
                );
                self.emit(HandEvent::MatchClinched { team });
                true
            }
            None => false,
        }
    }
}

/// One deal: the shoe, the four hands and the trump history.
#[derive(Debug, Clone)]
pub struct RoundState {
    shoe: Shoe,
    hands: [Hand; 4],
    dealer: Seat,
    trump: Option<Suit>,
    kicks: Vec<Card>,
    runs: u32,
}

impl RoundState {
    pub fn new(dealer: Seat, shoe: Shoe) -> Self {
        Self {
            shoe,
            hands: Default::default(),
            dealer,
            trump: None,
            kicks: Vec::new(),
            runs: 0,
        }
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    /// The seat to the dealer's right: first to receive cards, asked to beg, leads the first trick.
    pub fn begging_seat(&self) -> Seat {
        self.dealer.next()
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn kicks(&self) -> &[Card] {
        &self.kicks
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn shoe_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    /// Deals `per_seat` cards to every seat starting right of the dealer.
    pub(crate) fn deal(&mut self, per_seat: usize) -> Result<(), ShoeError> {
        let order = self.begging_seat().rotation();
        self.shoe.deal(&mut self.hands, &order, per_seat)
    }

    pub(crate) fn kick(&mut self) -> Result<Card, ShoeError> {
        let card = self.shoe.kick()?;
        self.kicks.push(card);
        Ok(card)
    }

    pub(crate) fn set_trump(&mut self, trump: Suit) {
        self.trump = Some(trump);
    }

    pub(crate) fn record_run(&mut self) -> u32 {
        self.runs += 1;
        self.runs
    }

    /// Plays the hand through to scoring.
    ///
    /// Game points are cleared first. Chalk awarded before an abort stays on the board.
    pub fn play(
        mut self,
        agents: &mut [Box<dyn Agent>; 4],
        scores: &mut ScoreBoard,
        observer: &mut dyn HandObserver,
    ) -> Result<HandReport, HandError> {
        scores.reset_game_points();
        let mut driver = HandDriver::new(agents, scores, observer);

        self.deal(INITIAL_HAND_SIZE)
            .map_err(HandError::InsufficientCards)?;
        event!(
            target: "allfours_core::hand",
            Level::DEBUG,
            dealer = ?self.dealer,
            "dealt"
        );
        driver.emit(HandEvent::Dealt {
            dealer: self.dealer,
            cards_each: INITIAL_HAND_SIZE,
        });

        let (trump, resolution) = match begging::establish_trump(&mut self, &mut driver)? {
            TrumpOutcome::Settled { trump, resolution } => (trump, resolution),
            TrumpOutcome::Clinched { trump } => {
                let awards = std::mem::take(&mut driver.awards);
                return Ok(self.report(trump, None, HandOutcome::Clinched, awards, driver.scores));
            }
        };

        let (high, low) = scoring::high_low(&self.hands, trump)?;
        driver.emit(HandEvent::HighLow { high, low });

        let trick_count = self.hands[self.begging_seat().index()].len();
        let mut leader = self.begging_seat();
        let mut tricks = Vec::with_capacity(trick_count);
        let mut jack = None;
        for number in 1..=trick_count {
            let trick = play::play_trick(&mut self.hands, trump, leader, number, self.dealer, &mut driver)?;
            let winner = trick
                .winner()
                .ok_or(HandError::TrickIncomplete { number })?;
            let points = trick.points();
            driver.scores.add_game_points(winner.team(), points);
            event!(
                target: "allfours_core::trick",
                Level::DEBUG,
                number,
                winner = ?winner,
                points,
                "trick completed"
            );
            driver.emit(HandEvent::TrickCompleted {
                number,
                winner,
                points,
            });
            if let Some(jack_player) = trick.jack_player() {
                let outcome = JackOutcome::from_trick(jack_player, winner);
                driver.emit(HandEvent::Jack { outcome });
                jack = Some(outcome);
            }
            tricks.push(TrickSummary {
                number,
                leader,
                plays: trick.plays().to_vec(),
                winner,
                points,
            });
            leader = winner;
        }

        let tally = HandTally {
            dealer: self.dealer,
            high,
            low,
            jack,
        };
        for award in scoring::allocate(&tally, driver.scores) {
            driver.record(award);
        }
        driver.check_clinch();

        let awards = std::mem::take(&mut driver.awards);
        let mut report = self.report(
            trump,
            Some(resolution),
            HandOutcome::Completed,
            awards,
            driver.scores,
        );
        report.high = Some(high);
        report.low = Some(low);
        report.jack = jack;
        report.tricks = tricks;
        Ok(report)
    }

    fn report(
        &self,
        trump: Suit,
        resolution: Option<TrumpResolution>,
        outcome: HandOutcome,
        awards: Vec<ChalkAward>,
        scores: &ScoreBoard,
    ) -> HandReport {
        HandReport {
            dealer: self.dealer,
            trump,
            kicks: self.kicks.clone(),
            resolution,
            outcome,
            high: None,
            low: None,
            jack: None,
            game_points: [
                scores.game_points(TeamId::NorthSouth),
                scores.game_points(TeamId::EastWest),
            ],
            tricks: Vec::new(),
            awards,
            chalk: *scores.standings(),
        }
    }
}
