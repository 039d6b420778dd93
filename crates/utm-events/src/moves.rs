//! Repeated-game moves.
//!
//! A move is a binary tag: cooperate or defect. The textual form is the
//! single letter used by most repeated-game tooling.
//!
//! # Example
//!
//! ```
//! use utm_events::Move;
//!
//! let m: Move = "D".parse().unwrap();
//! assert_eq!(m, Move::Defect);
//! assert_eq!(m.to_string(), "D");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One player's action in a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    #[serde(rename = "C")]
    Cooperate,
    #[serde(rename = "D")]
    Defect,
}

impl Move {
    /// Single-letter symbol for this move.
    pub fn symbol(self) -> char {
        match self {
            Move::Cooperate => 'C',
            Move::Defect => 'D',
        }
    }

    pub fn is_cooperate(self) -> bool {
        matches!(self, Move::Cooperate)
    }

    pub fn is_defect(self) -> bool {
        matches!(self, Move::Defect)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Error type for parsing a Move from text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseMoveError(pub String);

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid move: '{}', expected 'C' or 'D'", self.0)
    }
}

impl std::error::Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts exactly "C" or "D". Lowercase and long forms are rejected
    /// so a malformed opponent record surfaces instead of being guessed at.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(Move::Cooperate),
            "D" => Ok(Move::Defect),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

impl TryFrom<char> for Move {
    type Error = ParseMoveError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'C' => Ok(Move::Cooperate),
            'D' => Ok(Move::Defect),
            other => Err(ParseMoveError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display() {
        assert_eq!(Move::Cooperate.to_string(), "C");
        assert_eq!(Move::Defect.to_string(), "D");
    }

    #[test]
    fn test_move_parse() {
        assert_eq!("C".parse::<Move>().unwrap(), Move::Cooperate);
        assert_eq!("D".parse::<Move>().unwrap(), Move::Defect);
        assert!("c".parse::<Move>().is_err());
        assert!("X".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn test_move_from_char() {
        assert_eq!(Move::try_from('C').unwrap(), Move::Cooperate);
        assert_eq!(Move::try_from('D').unwrap(), Move::Defect);
        assert_eq!(Move::try_from('?'), Err(ParseMoveError("?".to_string())));
    }

    #[test]
    fn test_move_serialization() {
        assert_eq!(serde_json::to_string(&Move::Cooperate).unwrap(), r#""C""#);
        assert_eq!(serde_json::to_string(&Move::Defect).unwrap(), r#""D""#);
        let parsed: Move = serde_json::from_str(r#""D""#).unwrap();
        assert_eq!(parsed, Move::Defect);
    }

    #[test]
    fn test_parse_error_message() {
        let err = "Q".parse::<Move>().unwrap_err();
        assert_eq!(err.to_string(), "invalid move: 'Q', expected 'C' or 'D'");
    }
}
