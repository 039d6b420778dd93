//! Match Trace Records
//!
//! Serializable per-round records produced by a match executor. One JSON
//! object per round, so a trace can be streamed as JSONL.

use serde::{Deserialize, Serialize};

use crate::moves::Move;

/// One round of a two-player match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Zero-based round index.
    pub round: usize,
    /// Move played by the first player.
    pub move_a: Move,
    /// Move played by the second player.
    pub move_b: Move,
    /// Payoff earned by the first player this round.
    pub payoff_a: f64,
    /// Payoff earned by the second player this round.
    pub payoff_b: f64,
    /// First player's trust after deciding this round, if it tracks trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_a: Option<f64>,
    /// Second player's trust after deciding this round, if it tracks trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_b: Option<f64>,
}

impl RoundRecord {
    /// Serializes the record as a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a record from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Full record of one match between two named players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTrace {
    pub player_a: String,
    pub player_b: String,
    pub rounds: Vec<RoundRecord>,
}

impl MatchTrace {
    pub fn new(player_a: impl Into<String>, player_b: impl Into<String>) -> Self {
        Self {
            player_a: player_a.into(),
            player_b: player_b.into(),
            rounds: Vec::new(),
        }
    }

    /// Total payoff of the first player.
    pub fn score_a(&self) -> f64 {
        self.rounds.iter().map(|r| r.payoff_a).sum()
    }

    /// Total payoff of the second player.
    pub fn score_b(&self) -> f64 {
        self.rounds.iter().map(|r| r.payoff_b).sum()
    }

    /// Fraction of rounds in which the first player cooperated.
    pub fn cooperation_rate_a(&self) -> f64 {
        if self.rounds.is_empty() {
            return 0.0;
        }
        let coop = self.rounds.iter().filter(|r| r.move_a.is_cooperate()).count();
        coop as f64 / self.rounds.len() as f64
    }

    /// Trust trajectory of the first player, skipping rounds without a value.
    pub fn trust_trajectory_a(&self) -> Vec<f64> {
        self.rounds.iter().filter_map(|r| r.trust_a).collect()
    }

    /// Renders every round as JSONL, one record per line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for record in &self.rounds {
            out.push_str(&record.to_jsonl()?);
            out.push('\n');
        }
        Ok(out)
    }
}
