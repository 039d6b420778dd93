//! Trust-gated repeated-game strategies.
//!
//! A [`TrustEstimator`] tracks how much an agent trusts its counterpart.
//! Gated strategies feed it the previous round each turn and let a classic
//! policy play only while trust stays above a threshold.
//!
//! # Architecture
//!
//! ```text
//! executor ──history──▶ GatedStrategy ──reward──▶ TrustEstimator
//!     ▲                      │
//!     └──────── move ────────┴──▶ inner Policy (TitForTat, WSLS, ...)
//! ```
//!
//! # Modules
//!
//! - [`estimator`]: bounded online trust update with betrayal amplification
//! - [`reward`]: Prisoner's Dilemma outcome to signed reward
//! - [`policy`]: the `Policy` capability and classic policies
//! - [`strategy`]: gated and hybrid strategies, presets
//! - [`play`]: single-match executor
//! - [`trust_game`]: investment game driven by the estimator
//! - [`config`]: TOML configuration
//!
//! # Lifecycle
//!
//! Construct, call `decide` once per round, call `reset` before the next
//! match. Instances hold per-match state and must not be shared between
//! concurrent matches; build one per pairing.

pub mod config;
pub mod error;
pub mod estimator;
pub mod play;
pub mod policy;
pub mod reward;
pub mod strategy;
pub mod trust_game;

pub use config::{default_config_toml, ConfigError, StrategyKind, TrustConfig, UtmConfig};
pub use error::{Result, UtmError};
pub use estimator::{Surprise, TrustEstimator, TrustParams};
pub use play::{play_match, PayoffMatrix};
pub use policy::{
    Alternator, Cooperator, Defector, Grudger, Policy, RandomPolicy, TitForTat, WinStayLoseShift,
};
pub use reward::{map_to_reward, reward_for_symbols};
pub use strategy::{
    utm_tft_wsls, utm_tit_for_tat, utm_win_stay_lose_shift, GateMode, GatedStrategy,
    HybridStrategy, Phase,
};

pub use utm_events::{History, MatchTrace, Move, RoundRecord};
