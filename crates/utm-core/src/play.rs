//! Single-match executor.
//!
//! Plays one repeated Prisoner's Dilemma match between two policies. Each
//! side sees the history from its own seat. Both players are reset before
//! the first round.

use serde::{Deserialize, Serialize};
use utm_events::{History, MatchTrace, Move, RoundRecord};

use crate::error::Result;
use crate::policy::Policy;

/// Per-round Prisoner's Dilemma payoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffMatrix {
    /// Reward for mutual cooperation (R)
    pub reward: f64,
    /// Temptation to defect against a cooperator (T)
    pub temptation: f64,
    /// Sucker's payoff for cooperating against a defector (S)
    pub sucker: f64,
    /// Punishment for mutual defection (P)
    pub punishment: f64,
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self {
            reward: 3.0,
            temptation: 5.0,
            sucker: 0.0,
            punishment: 1.0,
        }
    }
}

impl PayoffMatrix {
    /// Payoffs `(a, b)` for one round.
    pub fn score(&self, a: Move, b: Move) -> (f64, f64) {
        match (a, b) {
            (Move::Cooperate, Move::Cooperate) => (self.reward, self.reward),
            (Move::Cooperate, Move::Defect) => (self.sucker, self.temptation),
            (Move::Defect, Move::Cooperate) => (self.temptation, self.sucker),
            (Move::Defect, Move::Defect) => (self.punishment, self.punishment),
        }
    }
}

/// Plays `rounds` rounds between `a` and `b` and returns the trace.
///
/// Any error from either player aborts the match and is returned as is.
pub fn play_match(
    a: &mut dyn Policy,
    b: &mut dyn Policy,
    rounds: usize,
    payoffs: &PayoffMatrix,
) -> Result<MatchTrace> {
    a.reset();
    b.reset();

    let mut trace = MatchTrace::new(a.name(), b.name());
    let mut history_a = History::new();
    let mut history_b = History::new();

    tracing::debug!(player_a = a.name(), player_b = b.name(), rounds, "match started");

    for round in 0..rounds {
        let move_a = a.decide(&history_a)?;
        let move_b = b.decide(&history_b)?;
        let (payoff_a, payoff_b) = payoffs.score(move_a, move_b);

        trace.rounds.push(RoundRecord {
            round,
            move_a,
            move_b,
            payoff_a,
            payoff_b,
            trust_a: a.trust(),
            trust_b: b.trust(),
        });

        history_a.push(move_a, move_b);
        history_b.push(move_b, move_a);
    }

    tracing::debug!(
        score_a = trace.score_a(),
        score_b = trace.score_b(),
        "match finished"
    );
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Cooperator, Defector, TitForTat};

    #[test]
    fn test_payoff_matrix_default() {
        let p = PayoffMatrix::default();
        assert_eq!(p.score(Move::Cooperate, Move::Cooperate), (3.0, 3.0));
        assert_eq!(p.score(Move::Cooperate, Move::Defect), (0.0, 5.0));
        assert_eq!(p.score(Move::Defect, Move::Cooperate), (5.0, 0.0));
        assert_eq!(p.score(Move::Defect, Move::Defect), (1.0, 1.0));
    }

    #[test]
    fn test_tit_for_tat_vs_defector() {
        let mut a = TitForTat;
        let mut b = Defector;
        let trace = play_match(&mut a, &mut b, 5, &PayoffMatrix::default()).unwrap();
        assert_eq!(trace.rounds.len(), 5);
        assert_eq!(trace.rounds[0].move_a, Move::Cooperate);
        assert!(trace.rounds[1..].iter().all(|r| r.move_a == Move::Defect));
        // 0 + 4 * 1
        assert_eq!(trace.score_a(), 4.0);
        assert_eq!(trace.score_b(), 9.0);
        assert_eq!(trace.rounds[0].trust_a, None);
    }

    #[test]
    fn test_zero_rounds() {
        let mut a = Cooperator;
        let mut b = Cooperator;
        let trace = play_match(&mut a, &mut b, 0, &PayoffMatrix::default()).unwrap();
        assert!(trace.rounds.is_empty());
        assert_eq!(trace.player_a, "Cooperator");
    }
}
