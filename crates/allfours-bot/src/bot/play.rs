use super::discard_key;
use allfours_core::game::agent::PlayContext;
use allfours_core::model::card::Card;
use allfours_core::model::player::Seat;
use allfours_core::model::rank::Rank;
use allfours_core::model::trick::is_better;

/// Why the planner picked a card; carried into decision logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayReason {
    OnlyCard,
    PullTrumps,
    LeadLow,
    FeedPartner,
    CheapestWinner,
    Discard,
}

impl PlayReason {
    pub fn label(self) -> &'static str {
        match self {
            PlayReason::OnlyCard => "only_card",
            PlayReason::PullTrumps => "pull_trumps",
            PlayReason::LeadLow => "lead_low",
            PlayReason::FeedPartner => "feed_partner",
            PlayReason::CheapestWinner => "cheapest_winner",
            PlayReason::Discard => "discard",
        }
    }
}

pub struct PlayPlanner;

impl PlayPlanner {
    pub fn choose(legal: &[Card], ctx: &PlayContext<'_>) -> Option<(Card, PlayReason)> {
        match legal {
            [] => None,
            [only] => Some((*only, PlayReason::OnlyCard)),
            _ => Some(match ctx.trick.winning_play() {
                None => Self::lead(legal, ctx),
                Some(best) => Self::follow(legal, ctx, best.seat, best.card),
            }),
        }
    }

    /// Leads the top trump when it is the Ace or King, otherwise the cheapest card.
    fn lead(legal: &[Card], ctx: &PlayContext<'_>) -> (Card, PlayReason) {
        let trump = ctx.trump();
        let top_trump = legal
            .iter()
            .copied()
            .filter(|card| card.is_trump(trump))
            .max_by_key(|card| card.rank);
        if let Some(card) = top_trump {
            if matches!(card.rank, Rank::Ace | Rank::King) {
                return (card, PlayReason::PullTrumps);
            }
        }
        (cheapest(legal, ctx), PlayReason::LeadLow)
    }

    fn follow(
        legal: &[Card],
        ctx: &PlayContext<'_>,
        best_seat: Seat,
        best_card: Card,
    ) -> (Card, PlayReason) {
        let trump = ctx.trump();
        let lead = ctx.lead_suit().unwrap_or(best_card.suit);
        let last_to_play = ctx.trick.plays().len() == 3;

        if best_seat == ctx.seat.partner() && (last_to_play || best_card.is_trump(trump)) {
            let gift = legal
                .iter()
                .copied()
                .filter(|card| !card.is_jack_of(trump))
                .max_by_key(|card| (!card.is_trump(trump), card.game_points(), std::cmp::Reverse(card.rank)));
            if let Some(card) = gift {
                return (card, PlayReason::FeedPartner);
            }
        }

        let on_table: u32 = ctx.trick.points();
        let winner = legal
            .iter()
            .copied()
            .filter(|&card| is_better(card, best_card, lead, trump))
            // The Jack only goes in when it cannot be overtaken or the trick is worth it.
            .filter(|card| !card.is_jack_of(trump) || last_to_play || on_table >= 10)
            .min_by_key(|&card| (card.is_trump(trump), card.rank));
        if let Some(card) = winner {
            return (card, PlayReason::CheapestWinner);
        }

        (cheapest(legal, ctx), PlayReason::Discard)
    }
}

fn cheapest(legal: &[Card], ctx: &PlayContext<'_>) -> Card {
    let trump = ctx.trump();
    legal
        .iter()
        .copied()
        .min_by_key(|&card| discard_key(card, trump))
        .unwrap_or(legal[0])
}
