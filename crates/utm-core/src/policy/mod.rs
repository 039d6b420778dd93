//! Repeated-game policies.
//!
//! A [`Policy`] picks the next move from the match history. Classic
//! policies live in [`classic`] and [`random`]; the trust-gated strategies
//! implement the same trait so an executor can drive either kind.

pub mod classic;
pub mod random;

pub use classic::{Alternator, Cooperator, Defector, Grudger, TitForTat, WinStayLoseShift};
pub use random::RandomPolicy;

use utm_events::{History, Move};

use crate::error::Result;

/// The single capability a trust gate depends on: decide a move.
///
/// `history` is seen from the deciding player: `own()` are its moves,
/// `opponent()` the counterpart's.
pub trait Policy: std::fmt::Debug {
    /// Display name.
    fn name(&self) -> &str;

    /// Chooses the next move.
    fn decide(&mut self, history: &History) -> Result<Move>;

    /// Restores the initial state before a new match.
    fn reset(&mut self) {}

    /// Current trust in the counterpart, for policies that track one.
    fn trust(&self) -> Option<f64> {
        None
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn decide(&mut self, history: &History) -> Result<Move> {
        (**self).decide(history)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn trust(&self) -> Option<f64> {
        (**self).trust()
    }
}
