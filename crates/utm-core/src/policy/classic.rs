//! Classic deterministic IPD policies.

use utm_events::{History, Move};

use super::Policy;
use crate::error::Result;

/// Cooperates first, then copies the opponent's last move.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitForTat;

impl Policy for TitForTat {
    fn name(&self) -> &str {
        "TitForTat"
    }

    fn decide(&mut self, history: &History) -> Result<Move> {
        Ok(history.last().map_or(Move::Cooperate, |(_, opp)| opp))
    }
}

/// Pavlov: cooperates first, then cooperates iff both players made the
/// same move last round (stay after a win, shift after a loss).
#[derive(Debug, Clone, Copy, Default)]
pub struct WinStayLoseShift;

impl Policy for WinStayLoseShift {
    fn name(&self) -> &str {
        "WinStayLoseShift"
    }

    fn decide(&mut self, history: &History) -> Result<Move> {
        Ok(match history.last() {
            None => Move::Cooperate,
            Some((own, opp)) if own == opp => Move::Cooperate,
            Some(_) => Move::Defect,
        })
    }
}

/// Always cooperates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cooperator;

impl Policy for Cooperator {
    fn name(&self) -> &str {
        "Cooperator"
    }

    fn decide(&mut self, _history: &History) -> Result<Move> {
        Ok(Move::Cooperate)
    }
}

/// Always defects.
#[derive(Debug, Clone, Copy, Default)]
pub struct Defector;

impl Policy for Defector {
    fn name(&self) -> &str {
        "Defector"
    }

    fn decide(&mut self, _history: &History) -> Result<Move> {
        Ok(Move::Defect)
    }
}

/// Cooperates until the opponent defects once, then defects forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grudger;

impl Policy for Grudger {
    fn name(&self) -> &str {
        "Grudger"
    }

    fn decide(&mut self, history: &History) -> Result<Move> {
        if history.opponent_defections() > 0 {
            Ok(Move::Defect)
        } else {
            Ok(Move::Cooperate)
        }
    }
}

/// Cooperates on even rounds and defects on odd ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alternator;

impl Policy for Alternator {
    fn name(&self) -> &str {
        "Alternator"
    }

    fn decide(&mut self, history: &History) -> Result<Move> {
        if history.len() % 2 == 0 {
            Ok(Move::Cooperate)
        } else {
            Ok(Move::Defect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(own: &str, opp: &str) -> History {
        History::from_symbols(own, opp).unwrap()
    }

    #[test]
    fn test_tit_for_tat() {
        let mut p = TitForTat;
        assert_eq!(p.decide(&History::new()).unwrap(), Move::Cooperate);
        assert_eq!(p.decide(&h("C", "D")).unwrap(), Move::Defect);
        assert_eq!(p.decide(&h("CD", "DC")).unwrap(), Move::Cooperate);
    }

    #[test]
    fn test_win_stay_lose_shift() {
        let mut p = WinStayLoseShift;
        assert_eq!(p.decide(&History::new()).unwrap(), Move::Cooperate);
        assert_eq!(p.decide(&h("C", "C")).unwrap(), Move::Cooperate);
        assert_eq!(p.decide(&h("C", "D")).unwrap(), Move::Defect);
        assert_eq!(p.decide(&h("D", "C")).unwrap(), Move::Defect);
        assert_eq!(p.decide(&h("D", "D")).unwrap(), Move::Cooperate);
    }

    #[test]
    fn test_grudger_never_forgives() {
        let mut p = Grudger;
        assert_eq!(p.decide(&h("CC", "CC")).unwrap(), Move::Cooperate);
        assert_eq!(p.decide(&h("CCD", "CDC")).unwrap(), Move::Defect);
    }

    #[test]
    fn test_alternator() {
        let mut p = Alternator;
        assert_eq!(p.decide(&History::new()).unwrap(), Move::Cooperate);
        assert_eq!(p.decide(&h("C", "C")).unwrap(), Move::Defect);
        assert_eq!(p.decide(&h("CD", "CC")).unwrap(), Move::Cooperate);
    }

    #[test]
    fn test_constant_policies() {
        assert_eq!(Cooperator.decide(&h("D", "D")).unwrap(), Move::Cooperate);
        assert_eq!(Defector.decide(&History::new()).unwrap(), Move::Defect);
        assert_eq!(Cooperator.trust(), None);
    }
}
