//! Phase-switching hybrid strategy.
//!
//! Plays a cautious policy while trust is forming and switches, once and
//! for good, to a graduated policy the first round trust exceeds
//! `promote_at`. The threshold override applies in both phases.

use utm_events::{History, Move};

use super::gated::{check_threshold, gate, observe_last_round, GateMode};
use crate::error::{Result, UtmError};
use crate::estimator::{TrustEstimator, TrustParams};
use crate::policy::Policy;

/// Which inner policy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initial phase, cautious policy active
    Cautious,
    /// Terminal phase, graduated policy active
    Graduated,
}

/// Two-phase trust-gated strategy.
#[derive(Debug, Clone)]
pub struct HybridStrategy<A, B> {
    name: String,
    estimator: TrustEstimator,
    threshold: f64,
    promote_at: f64,
    cautious: A,
    graduated: B,
    phase: Phase,
    promoted_at_round: Option<usize>,
    mode: GateMode,
}

impl<A: Policy, B: Policy> HybridStrategy<A, B> {
    /// `promote_at` is normally above `threshold`; a lower value is
    /// accepted but makes promotion fire while the gate still overrides.
    pub fn new(
        params: TrustParams,
        threshold: f64,
        promote_at: f64,
        cautious: A,
        graduated: B,
    ) -> Result<Self> {
        check_threshold(threshold)?;
        if !promote_at.is_finite() {
            return Err(UtmError::invalid(format!(
                "promote_at must be finite, got {}",
                promote_at
            )));
        }
        let estimator = TrustEstimator::new(params)?;
        let name = format!("UTM-{}->{}", cautious.name(), graduated.name());
        tracing::debug!(name = %name, threshold, promote_at, "hybrid strategy created");
        Ok(Self {
            name,
            estimator,
            threshold,
            promote_at,
            cautious,
            graduated,
            phase: Phase::Cautious,
            promoted_at_round: None,
            mode: GateMode::Defer,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn estimator(&self) -> &TrustEstimator {
        &self.estimator
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn promote_at(&self) -> f64 {
        self.promote_at
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// One-based round in which the switch to the graduated policy fired.
    pub fn promoted_at_round(&self) -> Option<usize> {
        self.promoted_at_round
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    /// Name of the inner policy currently in charge.
    pub fn active_policy(&self) -> &str {
        match self.phase {
            Phase::Cautious => self.cautious.name(),
            Phase::Graduated => self.graduated.name(),
        }
    }
}

impl<A: Policy, B: Policy> Policy for HybridStrategy<A, B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, history: &History) -> Result<Move> {
        observe_last_round(&mut self.estimator, history)?;
        let trust = self.estimator.value();
        let round = history.len() + 1;

        if self.phase == Phase::Cautious && trust > self.promote_at {
            self.phase = Phase::Graduated;
            self.promoted_at_round = Some(round);
            self.graduated.reset();
            tracing::debug!(
                round,
                trust,
                promote_at = self.promote_at,
                from = self.cautious.name(),
                to = self.graduated.name(),
                "trust above promotion threshold, switching policy"
            );
        }

        let proposed = match self.phase {
            Phase::Cautious => self.cautious.decide(history)?,
            Phase::Graduated => self.graduated.decide(history)?,
        };
        let (decision, mode) = gate(trust, self.threshold, proposed);
        self.mode = mode;

        if mode == GateMode::Override {
            tracing::debug!(
                round,
                trust,
                threshold = self.threshold,
                %proposed,
                "trust below threshold, forcing defect"
            );
        }
        Ok(decision)
    }

    fn reset(&mut self) {
        self.estimator.reset();
        self.cautious.reset();
        self.graduated.reset();
        self.phase = Phase::Cautious;
        self.promoted_at_round = None;
        self.mode = GateMode::Defer;
        tracing::debug!(name = %self.name, "hybrid strategy reset");
    }

    fn trust(&self) -> Option<f64> {
        Some(self.estimator.value())
    }
}
