//! Shared repeated-game data types for the trust model.
//!
//! This crate contains pure data structures with no trust logic.
//! It is a dependency for all other crates in the workspace.

pub mod history;
pub mod moves;
pub mod trace;

pub use history::History;
pub use moves::{Move, ParseMoveError};
pub use trace::{MatchTrace, RoundRecord};
