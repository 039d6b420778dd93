//! Seeded stochastic policy.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use utm_events::{History, Move};

use super::Policy;
use crate::error::{Result, UtmError};

/// Cooperates with probability `p` each round.
///
/// The RNG is reseeded on [`Policy::reset`], so every match replays the
/// same sequence for a given seed.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    cooperate_prob: f64,
    seed: u64,
    rng: SmallRng,
}

impl RandomPolicy {
    pub fn new(cooperate_prob: f64, seed: u64) -> Result<Self> {
        if !(0.0..=1.0).contains(&cooperate_prob) {
            return Err(UtmError::invalid(format!(
                "cooperation probability must be in [0, 1], got {}",
                cooperate_prob
            )));
        }
        Ok(Self {
            cooperate_prob,
            seed,
            rng: SmallRng::seed_from_u64(seed),
        })
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "Random"
    }

    fn decide(&mut self, _history: &History) -> Result<Move> {
        if self.rng.gen::<f64>() < self.cooperate_prob {
            Ok(Move::Cooperate)
        } else {
            Ok(Move::Defect)
        }
    }

    fn reset(&mut self) {
        self.rng = SmallRng::seed_from_u64(self.seed);
    }
}
