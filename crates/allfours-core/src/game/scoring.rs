use crate::game::round::HandError;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::score::ScoreBoard;
use crate::model::suit::Suit;
use crate::model::team::TeamId;
use serde::Serialize;

/// A trump card together with the seat it was dealt to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrumpHolder {
    pub card: Card,
    pub seat: Seat,
}

impl TrumpHolder {
    pub fn team(&self) -> TeamId {
        self.seat.team()
    }
}

/// What became of the Jack of trumps, if it was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JackOutcome {
    /// The Jack's own team won the trick containing it.
    Ran { seat: Seat },
    /// An opponent captured the Jack.
    Hung { seat: Seat, by: Seat },
}

impl JackOutcome {
    pub fn from_trick(jack_player: Seat, winner: Seat) -> Self {
        if jack_player.team() == winner.team() {
            JackOutcome::Ran { seat: jack_player }
        } else {
            JackOutcome::Hung {
                seat: jack_player,
                by: winner,
            }
        }
    }

    pub fn beneficiary(&self) -> TeamId {
        match *self {
            JackOutcome::Ran { seat } => seat.team(),
            JackOutcome::Hung { by, .. } => by.team(),
        }
    }

    pub fn chalk(&self) -> u32 {
        match self {
            JackOutcome::Ran { .. } => 1,
            JackOutcome::Hung { .. } => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AwardReason {
    Kick { card: Card },
    Begged,
    High { card: Card },
    Low { card: Card },
    RanJack,
    HungJack,
    Game { points: u32, tied: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChalkAward {
    pub team: TeamId,
    pub chalk: u32,
    pub reason: AwardReason,
}

/// Everything the end-of-hand allocation needs beyond the score board.
#[derive(Debug, Clone, Copy)]
pub struct HandTally {
    pub dealer: Seat,
    pub high: TrumpHolder,
    pub low: TrumpHolder,
    pub jack: Option<JackOutcome>,
}

/// Finds the highest and lowest trump dealt this hand.
///
/// Must run before the first card is played, while every dealt card is still
/// held.
pub fn high_low(hands: &[Hand; 4], trump: Suit) -> Result<(TrumpHolder, TrumpHolder), HandError> {
    let mut trumps = hands.iter().flat_map(|hand| hand.trumps(trump));
    let Some(first) = trumps.next() else {
        return Err(HandError::NoTrumpInPlay { trump });
    };
    let (high, low) = trumps.fold((first, first), |(high, low), card| {
        (
            if card.rank > high.rank { card } else { high },
            if card.rank < low.rank { card } else { low },
        )
    });

    Ok((
        TrumpHolder {
            card: high,
            seat: owner_of(hands, high)?,
        },
        TrumpHolder {
            card: low,
            seat: owner_of(hands, low)?,
        },
    ))
}

pub fn owner_of(hands: &[Hand; 4], card: Card) -> Result<Seat, HandError> {
    Seat::LOOP
        .iter()
        .copied()
        .find(|seat| hands[seat.index()].contains(card))
        .ok_or(HandError::CardOwnerNotFound { card })
}

/// Awards High, Low, Jack and Game in that order, stopping as soon as either
/// team reaches the target. Game points are read from the score board.
pub fn allocate(tally: &HandTally, scores: &mut ScoreBoard) -> Vec<ChalkAward> {
    let mut steps = vec![
        ChalkAward {
            team: tally.high.team(),
            chalk: 1,
            reason: AwardReason::High {
                card: tally.high.card,
            },
        },
        ChalkAward {
            team: tally.low.team(),
            chalk: 1,
            reason: AwardReason::Low {
                card: tally.low.card,
            },
        },
    ];
    if let Some(jack) = tally.jack {
        steps.push(ChalkAward {
            team: jack.beneficiary(),
            chalk: jack.chalk(),
            reason: match jack {
                JackOutcome::Ran { .. } => AwardReason::RanJack,
                JackOutcome::Hung { .. } => AwardReason::HungJack,
            },
        });
    }
    steps.push(game_award(tally.dealer, scores));

    let mut awarded = Vec::with_capacity(steps.len());
    for award in steps {
        if scores.is_clinched() {
            break;
        }
        scores.add_chalk(award.team, award.chalk);
        awarded.push(award);
    }
    awarded
}

/// Game is worth two chalk to the side with more game points; a tie, 0-0
/// included, goes to the team that did not deal.
fn game_award(dealer: Seat, scores: &ScoreBoard) -> ChalkAward {
    let dealer_team = dealer.team();
    let opponents = dealer_team.other();
    let dealer_points = scores.game_points(dealer_team);
    let opponent_points = scores.game_points(opponents);
    let (team, points) = if dealer_points > opponent_points {
        (dealer_team, dealer_points)
    } else {
        (opponents, opponent_points)
    };
    ChalkAward {
        team,
        chalk: 2,
        reason: AwardReason::Game {
            points,
            tied: dealer_points == opponent_points,
        },
    }
}
