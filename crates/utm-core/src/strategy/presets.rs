//! Tuned strategy presets.

use crate::error::Result;
use crate::estimator::TrustParams;
use crate::policy::{TitForTat, WinStayLoseShift};

use super::{GatedStrategy, HybridStrategy};

/// Constants shared by the presets
pub mod preset_constants {
    pub const THETA: f64 = 0.45;
    pub const ALPHA_POS: f64 = 0.05;
    pub const ALPHA_NEG: f64 = 0.50;
    /// Betrayal ramp for the Tit-for-Tat preset
    pub const TFT_DELTA: f64 = 0.60;
    /// Betrayal ramp for the WSLS and hybrid presets
    pub const WSLS_DELTA: f64 = 0.55;
    pub const THRESHOLD: f64 = 0.45;
    pub const PROMOTE_AT: f64 = 0.55;
}

use preset_constants::*;

/// Tit-for-Tat behind a trust gate.
pub fn utm_tit_for_tat() -> Result<GatedStrategy<TitForTat>> {
    let params = TrustParams::new(THETA, ALPHA_POS, ALPHA_NEG, TFT_DELTA);
    Ok(GatedStrategy::new(params, THRESHOLD, TitForTat)?.with_name("UTM-TitForTat"))
}

/// Win-Stay-Lose-Shift behind a trust gate.
pub fn utm_win_stay_lose_shift() -> Result<GatedStrategy<WinStayLoseShift>> {
    let params = TrustParams::new(THETA, ALPHA_POS, ALPHA_NEG, WSLS_DELTA);
    Ok(GatedStrategy::new(params, THRESHOLD, WinStayLoseShift)?.with_name("UTM-WSLS"))
}

/// Tit-for-Tat until trust passes 0.55, then Win-Stay-Lose-Shift.
pub fn utm_tft_wsls() -> Result<HybridStrategy<TitForTat, WinStayLoseShift>> {
    let params = TrustParams::new(THETA, ALPHA_POS, ALPHA_NEG, WSLS_DELTA);
    Ok(
        HybridStrategy::new(params, THRESHOLD, PROMOTE_AT, TitForTat, WinStayLoseShift)?
            .with_name("UTM-TFT->WSLS"),
    )
}
