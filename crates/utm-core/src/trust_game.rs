//! Investment Trust Game
//!
//! An investor sends a fixed amount each round while its trust is at or
//! above the threshold. The trustee triples what it receives and returns a
//! share of it, unless it betrays that round. The investor observes +1 for
//! a non-negative payoff and -1 otherwise.
//!
//! Unrelated to the Prisoner's Dilemma; it exercises the estimator against
//! a stochastic environment with a seeded RNG.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, UtmError};
use crate::estimator::{TrustEstimator, TrustParams};

/// Multiplier applied to the amount sent
pub const INVESTMENT_MULTIPLIER: f64 = 3.0;

/// Upper bound on the rounds reserved up front; longer games grow as they go.
const PREALLOCATED_ROUNDS: usize = 4096;

/// Environment and investor parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustGameParams {
    pub rounds: usize,
    /// Amount sent when the investor trusts
    pub send: f64,
    /// Share of the tripled amount returned on a good round
    pub return_good: f64,
    /// Chance that the trustee betrays in a round
    pub betray_prob: f64,
    /// Share returned on a betrayal round
    pub return_bad: f64,
    /// Investor's estimator
    pub trust: TrustParams,
    /// Investor sends only while trust >= threshold
    pub threshold: f64,
    pub seed: u64,
}

impl Default for TrustGameParams {
    fn default() -> Self {
        Self {
            rounds: 50,
            send: 5.0,
            return_good: 0.5,
            betray_prob: 0.0,
            return_bad: 0.0,
            trust: TrustParams::new(0.5, 0.05, 0.5, 0.55),
            threshold: 0.45,
            seed: 42,
        }
    }
}

impl TrustGameParams {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("return_good", self.return_good),
            ("betray_prob", self.betray_prob),
            ("return_bad", self.return_bad),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(UtmError::invalid(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if !self.send.is_finite() || self.send < 0.0 {
            return Err(UtmError::invalid(format!(
                "send must be a finite value >= 0, got {}",
                self.send
            )));
        }
        Ok(())
    }
}

/// Outcome of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustGameReport {
    /// Trust after each round
    pub trust: Vec<f64>,
    /// Investor payoff for each round
    pub payoffs: Vec<f64>,
    /// Rounds in which the trustee betrayed
    pub betrayals: usize,
}

impl TrustGameReport {
    pub fn final_trust(&self) -> Option<f64> {
        self.trust.last().copied()
    }

    pub fn cumulative_payoff(&self) -> f64 {
        self.payoffs.iter().sum()
    }

    /// Fraction of rounds with a non-negative payoff.
    pub fn cooperation_rate(&self) -> f64 {
        if self.payoffs.is_empty() {
            return 0.0;
        }
        let ok = self.payoffs.iter().filter(|p| **p >= 0.0).count();
        ok as f64 / self.payoffs.len() as f64
    }
}

/// Runs the game.
pub fn run(params: &TrustGameParams) -> Result<TrustGameReport> {
    params.validate()?;
    let mut investor = TrustEstimator::new(params.trust)?;
    let mut rng = SmallRng::seed_from_u64(params.seed);

    let mut report = TrustGameReport {
        trust: Vec::with_capacity(params.rounds.min(PREALLOCATED_ROUNDS)),
        payoffs: Vec::with_capacity(params.rounds.min(PREALLOCATED_ROUNDS)),
        betrayals: 0,
    };

    for _ in 0..params.rounds {
        let betrayed = rng.gen::<f64>() < params.betray_prob;
        if betrayed {
            report.betrayals += 1;
        }

        let sent = if investor.value() >= params.threshold {
            params.send
        } else {
            0.0
        };
        let share = if betrayed {
            params.return_bad
        } else {
            params.return_good
        };
        let payoff = sent * INVESTMENT_MULTIPLIER * share - sent;

        investor.update(if payoff >= 0.0 { 1.0 } else { -1.0 })?;

        report.trust.push(investor.value());
        report.payoffs.push(payoff);
    }

    tracing::debug!(
        rounds = params.rounds,
        final_trust = report.final_trust(),
        cumulative_payoff = report.cumulative_payoff(),
        "trust game finished"
    );
    Ok(report)
}
