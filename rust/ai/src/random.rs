use holdem_engine::engine::GameEngine;
use holdem_engine::player::ActionKind;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::{Decision, SeatAgent};

/// Picks uniformly among the legal actions. Raises land in
/// `[min, min(max, 3 * min)]`; when the minimum raise exceeds the stack the
/// raise becomes an all-in.
///
/// Seeded agents replay the same choices given the same sequence of spots.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: ChaCha20Rng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha20Rng::seed_from_u64(s),
            None => ChaCha20Rng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }

    fn raise_amount(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return max;
        }
        let upper = max.min(min.saturating_mul(3));
        self.rng.random_range(min..=upper)
    }
}

impl SeatAgent for RandomAgent {
    fn decide(&mut self, engine: &GameEngine, seat: usize) -> Decision {
        let valid = engine.get_valid_actions(seat).unwrap_or_default();
        let Some(&kind) = valid.choose(&mut self.rng) else {
            return Decision::fold();
        };
        match kind {
            ActionKind::Raise => {
                let min = engine.get_min_raise_to(seat).unwrap_or(0);
                let max = engine.get_max_raise_to(seat).unwrap_or(0);
                Decision::raise_to(self.raise_amount(min, max))
            }
            ActionKind::Check => Decision::check(),
            ActionKind::Call => Decision::call(),
            ActionKind::Fold | ActionKind::PostBlind => Decision::fold(),
        }
    }

    fn name(&self) -> &str {
        "RandomAgent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_stays_within_three_times_minimum() {
        let mut agent = RandomAgent::new(Some(1));
        for _ in 0..200 {
            let r = agent.raise_amount(40, 1000);
            assert!((40..=120).contains(&r), "{r}");
        }
    }

    #[test]
    fn raise_is_capped_by_stack() {
        let mut agent = RandomAgent::new(Some(2));
        for _ in 0..50 {
            assert!((40..=70).contains(&agent.raise_amount(40, 70)));
        }
    }

    #[test]
    fn short_stack_raise_is_all_in() {
        let mut agent = RandomAgent::new(Some(3));
        assert_eq!(agent.raise_amount(40, 25), 25);
        assert_eq!(agent.raise_amount(40, 40), 40);
    }
}
