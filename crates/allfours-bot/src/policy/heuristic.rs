use crate::bot::{BegPlanner, BotDifficulty, PlayPlanner};
use allfours_core::game::agent::{Agent, Decision, DecisionContext, PlayContext};
use allfours_core::model::card::Card;
use allfours_core::model::legality::IllegalPlay;
use tracing::{Level, event};

/// Seat driven by the rule-of-thumb planners.
pub struct HeuristicAgent {
    difficulty: BotDifficulty,
}

impl HeuristicAgent {
    pub fn new(difficulty: BotDifficulty) -> Self {
        Self { difficulty }
    }

    pub fn easy() -> Self {
        Self::new(BotDifficulty::Easy)
    }

    pub fn normal() -> Self {
        Self::new(BotDifficulty::Normal)
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.difficulty
    }
}

impl Default for HeuristicAgent {
    fn default() -> Self {
        Self::new(BotDifficulty::from_env())
    }
}

impl Agent for HeuristicAgent {
    fn choose_card(&mut self, ctx: &PlayContext<'_>) -> Option<Card> {
        let legal = ctx.legal_cards();
        let (card, reason) = match self.difficulty {
            BotDifficulty::Easy => (*legal.first()?, "easy_first_legal"),
            BotDifficulty::Normal => {
                let (card, reason) = PlayPlanner::choose(&legal, ctx)?;
                (card, reason.label())
            }
        };
        log_play_decision(ctx, self.difficulty, &legal, card, reason);
        Some(card)
    }

    fn choose_yes_no(&mut self, ctx: &DecisionContext<'_>) -> bool {
        let answer = match ctx.decision {
            Decision::Beg => BegPlanner::should_beg(ctx, self.difficulty),
            Decision::GiveOne => BegPlanner::should_give_one(ctx, self.difficulty),
        };
        event!(
            target: "allfours_bot::beg",
            Level::INFO,
            seat = ?ctx.seat,
            difficulty = ?self.difficulty,
            decision = ?ctx.decision,
            kicked = %ctx.kicked,
            trumps = ctx.hand.trumps(ctx.trump()).count(),
            answer,
        );
        answer
    }

    fn play_rejected(&mut self, card: Card, reason: IllegalPlay) {
        event!(
            target: "allfours_bot::play",
            Level::WARN,
            card = %card,
            %reason,
            "planner proposed an illegal card"
        );
    }
}

fn log_play_decision(
    ctx: &PlayContext<'_>,
    difficulty: BotDifficulty,
    legal: &[Card],
    chosen: Card,
    reason: &str,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let legal_preview = if legal.len() <= 6 {
        legal
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal.len())
    };

    event!(
        target: "allfours_bot::play",
        Level::INFO,
        seat = ?ctx.seat,
        difficulty = ?difficulty,
        trump = %ctx.trump(),
        trick = ctx.trick_number,
        legal_count = legal.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        trick_cards = ctx.trick.plays().len(),
        reason,
    );
}
