//! Per-instance payout calculation

use crate::contract::ContractParameters;
use crate::rainfall::CumulativeRainfall;
use crate::series::InstanceSeries;

/// Payout each historical instance would have triggered
pub type PayoutSeries = InstanceSeries;

/// Payout for a season with cumulative rainfall `rainfall`
///
/// - `exit < r <= trigger`: `min_payout + (trigger - r) * tick`
/// - `r <= exit`: `max_payout`
/// - `r > trigger`: 0
pub fn payout_for_rainfall(rainfall: f64, params: &ContractParameters) -> f64 {
    let trigger = params.trigger_threshold();
    let exit = params.exit_threshold();

    if rainfall > exit && rainfall <= trigger {
        // Capped so rounding in tick can never lift the band above full payout
        let interpolated = params.min_payout() + (trigger - rainfall) * params.tick();
        interpolated.min(params.max_payout())
    } else if rainfall <= exit {
        // min_payout + (trigger - exit) * tick, without the rounding error
        params.max_payout()
    } else {
        0.0
    }
}

/// Payout series for every instance, in the order of `cumulative`
pub fn compute_payouts(cumulative: &CumulativeRainfall, params: &ContractParameters) -> PayoutSeries {
    cumulative.map_values(|rainfall| payout_for_rainfall(rainfall, params))
}
