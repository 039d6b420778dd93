//! Trust Estimator
//!
//! Online estimate of trust in a single counterpart. Each observed event
//! carries a signed reward; trust moves toward it with an asymmetric
//! learning rate, amplified by the number of betrayals seen so far:
//!
//! ```text
//! alpha  = alpha_pos if reward > trust else alpha_neg
//! n     += 1        if reward < trust
//! trust += alpha * severity * (1 + n * delta) * (reward - trust)
//! trust  = clamp(trust, 0, 1)
//! ```
//!
//! Trust has no time decay. It only moves when an event is observed.
//!
//! Lifecycle: construct, then `update` once per round, then `reset` before
//! the next match. An estimator must not be shared between matches.

use serde::{Deserialize, Serialize};
use utm_events::Move;

use crate::error::{Result, UtmError};
use crate::reward::map_to_reward;

/// Default hyper-parameters for a bare estimator
pub mod defaults {
    /// Initial trust (baseline θ)
    pub const THETA: f64 = 0.5;
    /// Learning rate for positive surprises (α⁺)
    pub const ALPHA_POS: f64 = 0.05;
    /// Learning rate for negative surprises (α⁻)
    pub const ALPHA_NEG: f64 = 0.50;
    /// Betrayal ramp coefficient (δ)
    pub const DELTA: f64 = 0.30;
}

/// Construction parameters for a [`TrustEstimator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustParams {
    /// Initial and reset trust value, in [0, 1]
    pub theta: f64,
    /// Learning rate when reward > trust, in [0, 1]
    pub alpha_pos: f64,
    /// Learning rate when reward <= trust, in [0, 1]
    pub alpha_neg: f64,
    /// Per-betrayal amplification, >= 0
    pub delta: f64,
}

impl Default for TrustParams {
    fn default() -> Self {
        Self {
            theta: defaults::THETA,
            alpha_pos: defaults::ALPHA_POS,
            alpha_neg: defaults::ALPHA_NEG,
            delta: defaults::DELTA,
        }
    }
}

impl TrustParams {
    pub fn new(theta: f64, alpha_pos: f64, alpha_neg: f64, delta: f64) -> Self {
        Self {
            theta,
            alpha_pos,
            alpha_neg,
            delta,
        }
    }

    /// Checks every parameter against its allowed range.
    pub fn validate(&self) -> Result<()> {
        check_unit("theta", self.theta)?;
        check_unit("alpha_pos", self.alpha_pos)?;
        check_unit("alpha_neg", self.alpha_neg)?;
        if !self.delta.is_finite() || self.delta < 0.0 {
            return Err(UtmError::invalid(format!(
                "delta must be a finite value >= 0, got {}",
                self.delta
            )));
        }
        Ok(())
    }
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(UtmError::invalid(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )))
    }
}

/// Direction of an observed event relative to current trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surprise {
    /// reward > trust
    Positive,
    /// reward <= trust; equality falls here
    Negative,
}

/// Bounded online trust estimator for one counterpart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrustEstimator {
    params: TrustParams,
    trust: f64,
    betrayals: u32,
}

impl Default for TrustEstimator {
    fn default() -> Self {
        let params = TrustParams::default();
        Self {
            trust: params.theta,
            params,
            betrayals: 0,
        }
    }
}

impl TrustEstimator {
    /// Creates an estimator with `trust = theta` and no betrayals.
    pub fn new(params: TrustParams) -> Result<Self> {
        params.validate()?;
        tracing::debug!(
            theta = params.theta,
            alpha_pos = params.alpha_pos,
            alpha_neg = params.alpha_neg,
            delta = params.delta,
            "trust estimator created"
        );
        Ok(Self {
            trust: params.theta,
            params,
            betrayals: 0,
        })
    }

    /// Current trust, always in [0, 1].
    pub fn value(&self) -> f64 {
        self.trust
    }

    /// The baseline θ this estimator resets to.
    pub fn baseline(&self) -> f64 {
        self.params.theta
    }

    /// Betrayals observed since the last reset.
    pub fn betrayals(&self) -> u32 {
        self.betrayals
    }

    pub fn params(&self) -> &TrustParams {
        &self.params
    }

    /// Applies one update step with unit severity.
    pub fn update(&mut self, reward: f64) -> Result<Surprise> {
        self.update_with_severity(reward, 1.0)
    }

    /// Applies one update step.
    ///
    /// `reward` must be non-zero and finite. `severity` scales the whole
    /// step; use values below 1 for minor events. A betrayal is counted
    /// before the amplification factor is computed, so it amplifies its
    /// own update.
    pub fn update_with_severity(&mut self, reward: f64, severity: f64) -> Result<Surprise> {
        if reward == 0.0 {
            return Err(UtmError::invalid("reward must be non-zero"));
        }
        if !reward.is_finite() {
            return Err(UtmError::invalid(format!("reward must be finite, got {}", reward)));
        }
        if !severity.is_finite() {
            return Err(UtmError::invalid(format!(
                "severity must be finite, got {}",
                severity
            )));
        }

        let before = self.trust;
        let surprise = if reward > before {
            Surprise::Positive
        } else {
            Surprise::Negative
        };

        if reward < before {
            self.betrayals += 1;
        }

        let alpha = match surprise {
            Surprise::Positive => self.params.alpha_pos,
            Surprise::Negative => self.params.alpha_neg,
        };
        let factor = severity * (1.0 + self.betrayals as f64 * self.params.delta);
        let change = alpha * factor * (reward - before);
        self.trust = (before + change).clamp(0.0, 1.0);

        tracing::trace!(
            reward,
            severity,
            before,
            after = self.trust,
            betrayals = self.betrayals,
            "trust updated"
        );
        Ok(surprise)
    }

    /// Maps a round to its reward and observes it.
    pub fn observe_outcome(&mut self, own: Move, opponent: Move, severity: f64) -> Result<Surprise> {
        self.update_with_severity(map_to_reward(own, opponent), severity)
    }

    /// Restores `trust = theta` and clears the betrayal counter.
    pub fn reset(&mut self) {
        self.trust = self.params.theta;
        self.betrayals = 0;
    }
}
