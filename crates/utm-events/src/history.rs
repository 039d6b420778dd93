//! Match History
//!
//! Append-only record of the rounds played so far, seen from one player.

use serde::{Deserialize, Serialize};

use crate::moves::{Move, ParseMoveError};

/// The rounds of one match from a single player's point of view.
///
/// `own[i]` and `opponent[i]` are the moves made in round `i`. Both lists
/// always have the same length; rounds can only be appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct History {
    own: Vec<Move>,
    opponent: Vec<Move>,
}

/// Unchecked wire form of [`History`].
#[derive(Deserialize)]
struct RawHistory {
    own: Vec<Move>,
    opponent: Vec<Move>,
}

impl TryFrom<RawHistory> for History {
    type Error = ParseMoveError;

    fn try_from(raw: RawHistory) -> Result<Self, Self::Error> {
        History::from_moves(raw.own, raw.opponent)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from two equal-length symbol strings like "CCD".
    pub fn from_symbols(own: &str, opponent: &str) -> Result<Self, ParseMoveError> {
        let own: Vec<Move> = own.chars().map(Move::try_from).collect::<Result<_, _>>()?;
        let opponent: Vec<Move> = opponent
            .chars()
            .map(Move::try_from)
            .collect::<Result<_, _>>()?;
        Self::from_moves(own, opponent)
    }

    /// Pairs two move lists round by round. They must be the same length.
    pub fn from_moves(own: Vec<Move>, opponent: Vec<Move>) -> Result<Self, ParseMoveError> {
        if own.len() != opponent.len() {
            return Err(ParseMoveError(format!(
                "length mismatch: {} own moves vs {} opponent moves",
                own.len(),
                opponent.len()
            )));
        }
        Ok(Self { own, opponent })
    }

    /// Appends one completed round.
    pub fn push(&mut self, own: Move, opponent: Move) {
        self.own.push(own);
        self.opponent.push(opponent);
    }

    /// Number of completed rounds.
    pub fn len(&self) -> usize {
        self.own.len()
    }

    pub fn is_empty(&self) -> bool {
        self.own.is_empty()
    }

    /// The most recent round as `(own, opponent)`, if any.
    pub fn last(&self) -> Option<(Move, Move)> {
        Some((*self.own.last()?, *self.opponent.last()?))
    }

    pub fn own(&self) -> &[Move] {
        &self.own
    }

    pub fn opponent(&self) -> &[Move] {
        &self.opponent
    }

    /// Number of rounds in which the opponent defected.
    pub fn opponent_defections(&self) -> usize {
        self.opponent.iter().filter(|m| m.is_defect()).count()
    }
}
