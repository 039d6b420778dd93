//! Outcome to Reward Mapping
//!
//! Converts one Prisoner's Dilemma round into the signed event reward the
//! estimator consumes. The values are not game payoffs. They are a scale in
//! (-1, 1], never zero, chosen so that:
//! - mutual cooperation is maximally positive
//! - being betrayed is maximally negative
//! - mutual defection is a mild penalty
//! - exploiting a cooperating opponent still reads as positive
//!
//! This is the only game-specific piece of the trust layer. Retargeting the
//! estimator to another repeated interaction means replacing this module.

use utm_events::Move;

use crate::error::{Result, UtmError};

/// Constants for the IPD reward table
pub mod rewards {
    /// (Cooperate, Cooperate)
    pub const MUTUAL_COOPERATION: f64 = 1.0;
    /// (Defect, Cooperate): I defected, they cooperated
    pub const EXPLOITATION: f64 = 0.5;
    /// (Defect, Defect)
    pub const MUTUAL_DEFECTION: f64 = -0.2;
    /// (Cooperate, Defect): sucker's outcome
    pub const BETRAYED: f64 = -1.0;
}

/// Signed reward for a round, from the point of view of `own`.
pub fn map_to_reward(own: Move, opponent: Move) -> f64 {
    let reward = match (own, opponent) {
        (Move::Cooperate, Move::Cooperate) => rewards::MUTUAL_COOPERATION,
        (Move::Defect, Move::Cooperate) => rewards::EXPLOITATION,
        (Move::Defect, Move::Defect) => rewards::MUTUAL_DEFECTION,
        (Move::Cooperate, Move::Defect) => rewards::BETRAYED,
    };
    tracing::trace!(%own, %opponent, reward, "mapped round to reward");
    reward
}

/// Signed reward for a round given as raw move symbols.
///
/// Fails with `InvalidArgument` unless both symbols are "C" or "D".
pub fn reward_for_symbols(own: &str, opponent: &str) -> Result<f64> {
    let (own, opponent) = match (own.parse::<Move>(), opponent.parse::<Move>()) {
        (Ok(o), Ok(p)) => (o, p),
        _ => {
            tracing::error!(own, opponent, "invalid move pair");
            return Err(UtmError::invalid("move must be 'C' or 'D'"));
        }
    };
    Ok(map_to_reward(own, opponent))
}
