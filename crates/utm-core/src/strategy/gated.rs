//! Trust-gated strategy.
//!
//! Wraps an inner policy and lets it play only while trust is at or above
//! the threshold. Below it, the gate overrides with Defect.
//!
//! ```text
//! last outcome ─▶ reward ─▶ estimator.update ─▶ inner.decide ─▶ trust < τ ? ─▶ Defect
//!                                                                   └─ else ─▶ inner move
//! ```

use utm_events::{History, Move};

use crate::error::{Result, UtmError};
use crate::estimator::{TrustEstimator, TrustParams};
use crate::policy::Policy;
use crate::reward::map_to_reward;

/// Which side of the threshold the last decision fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// trust >= τ: the inner policy's move was played
    Defer,
    /// trust < τ: Defect was forced
    Override,
}

/// A classic policy gated by a trust estimator.
#[derive(Debug, Clone)]
pub struct GatedStrategy<P> {
    name: String,
    estimator: TrustEstimator,
    threshold: f64,
    inner: P,
    mode: GateMode,
}

impl<P: Policy> GatedStrategy<P> {
    pub fn new(params: TrustParams, threshold: f64, inner: P) -> Result<Self> {
        check_threshold(threshold)?;
        let estimator = TrustEstimator::new(params)?;
        let name = format!("UTM-{}", inner.name());
        tracing::debug!(name = %name, threshold, "gated strategy created");
        Ok(Self {
            name,
            estimator,
            threshold,
            inner,
            mode: GateMode::Defer,
        })
    }

    /// Replaces the display name.
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

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Mode of the most recent decision. `Defer` before the first one.
    pub fn mode(&self) -> GateMode {
        self.mode
    }
}

/// Rejects a threshold the gate could never compare against.
pub(crate) fn check_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() {
        return Err(UtmError::invalid(format!(
            "threshold must be finite, got {}",
            threshold
        )));
    }
    Ok(())
}

/// Feeds the previous round, if any, into the estimator.
pub(crate) fn observe_last_round(estimator: &mut TrustEstimator, history: &History) -> Result<()> {
    if let Some((own, opponent)) = history.last() {
        let round = history.len();
        let before = estimator.value();
        estimator.update(map_to_reward(own, opponent))?;
        tracing::trace!(
            round,
            before,
            after = estimator.value(),
            betrayals = estimator.betrayals(),
            %own,
            %opponent,
            "observed previous round"
        );
    }
    Ok(())
}

/// Applies the threshold override to a proposed move.
pub(crate) fn gate(trust: f64, threshold: f64, proposed: Move) -> (Move, GateMode) {
    if trust < threshold {
        (Move::Defect, GateMode::Override)
    } else {
        (proposed, GateMode::Defer)
    }
}

impl<P: Policy> Policy for GatedStrategy<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, history: &History) -> Result<Move> {
        observe_last_round(&mut self.estimator, history)?;

        let proposed = self.inner.decide(history)?;
        let trust = self.estimator.value();
        let (decision, mode) = gate(trust, self.threshold, proposed);
        self.mode = mode;

        if mode == GateMode::Override {
            tracing::debug!(
                round = history.len() + 1,
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
        self.inner.reset();
        self.mode = GateMode::Defer;
        tracing::debug!(name = %self.name, "gated strategy reset");
    }

    fn trust(&self) -> Option<f64> {
        Some(self.estimator.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Cooperator, TitForTat};

    fn params() -> TrustParams {
        TrustParams::new(0.45, 0.05, 0.5, 0.6)
    }

    #[test]
    fn test_first_move_is_inner_move() {
        let mut s = GatedStrategy::new(params(), 0.45, TitForTat).unwrap();
        assert_eq!(s.decide(&History::new()).unwrap(), Move::Cooperate);
        assert_eq!(s.mode(), GateMode::Defer);
        // No update happened on round one
        assert_eq!(s.estimator().value(), 0.45);
    }

    #[test]
    fn test_override_forces_defect() {
        let mut s = GatedStrategy::new(params(), 0.45, Cooperator).unwrap();
        let h = History::from_symbols("C", "D").unwrap();
        assert_eq!(s.decide(&h).unwrap(), Move::Defect);
        assert_eq!(s.mode(), GateMode::Override);
        assert!(s.estimator().value() < 0.45);
    }

    #[test]
    fn test_gate_boundary_is_inclusive() {
        assert_eq!(gate(0.45, 0.45, Move::Cooperate), (Move::Cooperate, GateMode::Defer));
        assert_eq!(gate(0.4499, 0.45, Move::Cooperate), (Move::Defect, GateMode::Override));
    }

    #[test]
    fn test_reset_restores_estimator_and_mode() {
        let mut s = GatedStrategy::new(params(), 0.45, Cooperator).unwrap();
        s.decide(&History::from_symbols("C", "D").unwrap()).unwrap();
        s.reset();
        assert_eq!(s.estimator().value(), 0.45);
        assert_eq!(s.estimator().betrayals(), 0);
        assert_eq!(s.mode(), GateMode::Defer);
    }

    #[test]
    fn test_default_name() {
        let s = GatedStrategy::new(params(), 0.45, TitForTat).unwrap();
        assert_eq!(s.name(), "UTM-TitForTat");
        let s = s.with_name("custom");
        assert_eq!(s.name(), "custom");
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(GatedStrategy::new(TrustParams::new(2.0, 0.05, 0.5, 0.6), 0.45, TitForTat).is_err());
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        for threshold in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = GatedStrategy::new(params(), threshold, Cooperator).unwrap_err();
            assert!(matches!(err, UtmError::InvalidArgument(_)));
        }
    }
}
