use super::{BotDifficulty, trump_strength};
use allfours_core::game::agent::DecisionContext;

/// Holding needed in the kicked suit before the begging seat will stand.
const STAND_THRESHOLD: u32 = 5;
/// Holding the dealer needs to prefer giving a chalk over running the pack.
const GIVE_THRESHOLD: u32 = 6;

pub struct BegPlanner;

impl BegPlanner {
    /// True to beg, false to stand.
    pub fn should_beg(ctx: &DecisionContext<'_>, difficulty: BotDifficulty) -> bool {
        if difficulty == BotDifficulty::Easy {
            return false;
        }
        trump_strength(ctx.hand, ctx.trump()) < STAND_THRESHOLD
    }

    /// True to give one chalk, false to run the pack.
    pub fn should_give_one(ctx: &DecisionContext<'_>, difficulty: BotDifficulty) -> bool {
        if difficulty == BotDifficulty::Easy {
            return false;
        }
        let begging_team = ctx.dealer.next().team();
        let target = ctx.scores.target();
        // Gifts are cheap early on, not when the beggars are closing in.
        if ctx.scores.chalk(begging_team) + 3 >= target {
            return false;
        }
        trump_strength(ctx.hand, ctx.trump()) >= GIVE_THRESHOLD
    }
}
