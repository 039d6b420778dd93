//! Trust-gated strategies.
//!
//! - [`GatedStrategy`]: one inner policy, overridden with Defect when trust is low
//! - [`HybridStrategy`]: cautious policy promoted to a second one once trust is solid
//! - [`presets`]: tuned constructors

pub mod gated;
pub mod hybrid;
pub mod presets;

pub use gated::{GateMode, GatedStrategy};
pub use hybrid::{HybridStrategy, Phase};
pub use presets::{utm_tft_wsls, utm_tit_for_tat, utm_win_stay_lose_shift};
