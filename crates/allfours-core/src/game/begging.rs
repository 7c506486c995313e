use crate::game::agent::{Decision, DecisionContext};
use crate::game::events::HandEvent;
use crate::game::round::{HandDriver, HandError, RUN_PACK_SIZE, RoundState};
use crate::game::scoring::AwardReason;
use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use serde::Serialize;
use tracing::{Level, event};

/// How trump was fixed for the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrumpResolution {
    Stood,
    GaveOne,
    RanPack { runs: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrumpOutcome {
    Settled {
        trump: Suit,
        resolution: TrumpResolution,
    },
    /// A kick bonus decided the match.
    Clinched { trump: Suit },
}

/// Why the dealer ran the pack without being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcedRun {
    /// One chalk would carry the begging team to the target.
    BeggarsOneShort,
    /// The dealer holds no card of the kicked suit.
    DealerHoldsNoTrump,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Kick,
    AwardKick(Card),
    Beg(Card),
    DealerResponds(Card),
    RunPack,
    Done(TrumpOutcome),
}

/// Runs the kick / beg / run-the-pack sequence until trump is settled.
pub(crate) fn establish_trump(
    round: &mut RoundState,
    driver: &mut HandDriver<'_>,
) -> Result<TrumpOutcome, HandError> {
    let dealer = round.dealer();
    let begging_seat = round.begging_seat();
    let mut step = Step::Kick;

    loop {
        step = match step {
            Step::Kick => {
                let card = round.kick().map_err(|err| {
                    if round.runs() == 0 {
                        HandError::InsufficientCards(err)
                    } else {
                        HandError::RoundAborted { runs: round.runs() }
                    }
                })?;
                event!(
                    target: "allfours_core::hand",
                    Level::DEBUG,
                    card = %card,
                    run = round.runs(),
                    "kicked"
                );
                driver.emit(HandEvent::Kicked { card });
                Step::AwardKick(card)
            }
            Step::AwardKick(card) => {
                let bonus = card.kick_chalk();
                let clinched = if bonus > 0 {
                    driver.award(dealer.team(), bonus, AwardReason::Kick { card })
                } else {
                    driver.check_clinch()
                };
                if clinched {
                    round.set_trump(card.suit);
                    Step::Done(TrumpOutcome::Clinched { trump: card.suit })
                } else {
                    match round.trump() {
                        None => {
                            round.set_trump(card.suit);
                            Step::Beg(card)
                        }
                        Some(previous) if previous != card.suit => {
                            round.set_trump(card.suit);
                            Step::Done(TrumpOutcome::Settled {
                                trump: card.suit,
                                resolution: TrumpResolution::RanPack { runs: round.runs() },
                            })
                        }
                        Some(_) => Step::RunPack,
                    }
                }
            }
            // Standing needs at least one trump.
            Step::Beg(kicked) if !holds_trump(round, begging_seat, kicked.suit) => {
                driver.emit(HandEvent::ForcedToBeg { seat: begging_seat });
                driver.emit(HandEvent::Begged { seat: begging_seat });
                Step::DealerResponds(kicked)
            }
            Step::Beg(kicked) => {
                let ctx = DecisionContext {
                    seat: begging_seat,
                    dealer,
                    decision: Decision::Beg,
                    hand: round.hand(begging_seat),
                    kicked,
                    scores: &*driver.scores,
                };
                if driver.agents[begging_seat.index()].choose_yes_no(&ctx) {
                    driver.emit(HandEvent::Begged { seat: begging_seat });
                    Step::DealerResponds(kicked)
                } else {
                    driver.emit(HandEvent::Stood { seat: begging_seat });
                    Step::Done(TrumpOutcome::Settled {
                        trump: kicked.suit,
                        resolution: TrumpResolution::Stood,
                    })
                }
            }
            Step::DealerResponds(kicked) => {
                let begging_team = begging_seat.team();
                let forced = if driver.scores.chalk(begging_team) + 1 >= driver.scores.target() {
                    Some(ForcedRun::BeggarsOneShort)
                } else if !holds_trump(round, dealer, kicked.suit) {
                    Some(ForcedRun::DealerHoldsNoTrump)
                } else {
                    None
                };
                if let Some(reason) = forced {
                    driver.emit(HandEvent::DealerForcedToRun { dealer, reason });
                    Step::RunPack
                } else if ask_dealer(round, driver, dealer, kicked) {
                    driver.emit(HandEvent::GaveOne { dealer });
                    // The gift leaves the beggars short of the target, so it never clinches.
                    driver.award(begging_team, 1, AwardReason::Begged);
                    Step::Done(TrumpOutcome::Settled {
                        trump: kicked.suit,
                        resolution: TrumpResolution::GaveOne,
                    })
                } else {
                    Step::RunPack
                }
            }
            Step::RunPack => {
                let run = round.record_run();
                if round.deal(RUN_PACK_SIZE).is_err() {
                    event!(
                        target: "allfours_core::hand",
                        Level::WARN,
                        runs = run,
                        remaining = round.shoe_remaining(),
                        "pack exhausted"
                    );
                    return Err(HandError::RoundAborted { runs: run });
                }
                driver.emit(HandEvent::RanPack {
                    run,
                    remaining: round.shoe_remaining(),
                });
                Step::Kick
            }
            Step::Done(outcome) => {
                if let TrumpOutcome::Settled { trump, .. } = outcome {
                    driver.emit(HandEvent::TrumpSettled { trump });
                }
                return Ok(outcome);
            }
        };
    }
}

fn holds_trump(round: &RoundState, seat: Seat, trump: Suit) -> bool {
    round.hand(seat).trumps(trump).next().is_some()
}

fn ask_dealer(round: &RoundState, driver: &mut HandDriver<'_>, dealer: Seat, kicked: Card) -> bool {
    let ctx = DecisionContext {
        seat: dealer,
        dealer,
        decision: Decision::GiveOne,
        hand: round.hand(dealer),
        kicked,
        scores: &*driver.scores,
    };
    driver.agents[dealer.index()].choose_yes_no(&ctx)
}
