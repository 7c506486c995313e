use allfours_core::game::agent::{Agent, DecisionContext, PlayContext};
use allfours_core::model::card::Card;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Picks uniformly among legal cards and answers every question with a coin flip.
pub struct RandomAgent {
    rng: SmallRng,
}

impl RandomAgent {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_card(&mut self, ctx: &PlayContext<'_>) -> Option<Card> {
        ctx.legal_cards().choose(&mut self.rng).copied()
    }

    fn choose_yes_no(&mut self, _ctx: &DecisionContext<'_>) -> bool {
        self.rng.gen_bool(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomAgent;
    use allfours_core::game::agent::Agent;
    use allfours_core::game::events::HandEvent;
    use allfours_core::game::match_state::MatchState;

    fn play(seed: u64) -> Vec<HandEvent> {
        let mut agents: [Box<dyn Agent>; 4] =
            std::array::from_fn(|i| Box::new(RandomAgent::with_seed(seed + i as u64)) as Box<dyn Agent>);
        let mut events = Vec::new();
        MatchState::with_seed(seed)
            .play_match(&mut agents, &mut events)
            .unwrap();
        events
    }

    #[test]
    fn random_agents_never_trip_the_rules() {
        let events = play(11);
        assert!(!events.iter().any(|e| matches!(e, HandEvent::PlayRejected { .. })));
        assert!(matches!(events.last(), Some(HandEvent::MatchClinched { .. })));
    }

    #[test]
    fn seeded_matches_replay_identically() {
        assert_eq!(play(3), play(3));
    }
}
