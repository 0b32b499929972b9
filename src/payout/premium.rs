//! Premium from historical payouts
//!
//! The premium is the mean historical payout rounded to three significant
//! figures. Rounding is ties-to-even on the exact decimal digits, the same
//! result `printf("%.3g")` gives.

use serde::{Deserialize, Serialize};

use super::{PayoutSeries, PREMIUM_SIGNIFICANT_FIGURES};
use crate::contract::ContractParameters;
use crate::error::{PricingError, Result};

/// How the mean payout is turned into a premium
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumPolicy {
    /// Truncate the mean toward zero to a whole number, then round to
    /// significant figures. Reproduces the quotes issued so far.
    #[default]
    TruncateThenRound,
    /// Round the mean to significant figures directly
    RoundOnly,
}

/// Premium under the default policy
pub fn compute_premium(payouts: &PayoutSeries) -> Result<f64> {
    compute_premium_with(payouts, PremiumPolicy::default())
}

/// Premium under an explicit policy
///
/// # Errors
/// `Range` when the series is empty: there is no history to average.
pub fn compute_premium_with(payouts: &PayoutSeries, policy: PremiumPolicy) -> Result<f64> {
    let mean = payouts
        .mean()
        .ok_or_else(|| PricingError::range("no historical instances to average"))?;

    let base = match policy {
        PremiumPolicy::TruncateThenRound => mean.trunc(),
        PremiumPolicy::RoundOnly => mean,
    };
    Ok(round_to_significant(base, PREMIUM_SIGNIFICANT_FIGURES))
}

/// Premium for a priced contract
///
/// Same as [`compute_premium_with`], capped at the contract's maximum payout.
/// Rounding can otherwise lift the premium above the full payout when that
/// payout needs more than three significant figures (e.g. area 1.002 insures
/// 3006, and 3006 rounds to 3010).
pub fn compute_contract_premium(
    payouts: &PayoutSeries,
    params: &ContractParameters,
    policy: PremiumPolicy,
) -> Result<f64> {
    let premium = compute_premium_with(payouts, policy)?;
    Ok(premium.min(params.max_payout()))
}

/// Every finite f64 has at most 767 significant decimal digits, so formatting
/// with this many fractional digits prints the exact binary value
const EXACT_DIGITS: usize = 800;

/// Round `value` to `digits` significant figures, ties to even
///
/// Works on the exact decimal expansion of the stored double, as
/// `printf("%.3g")` does: 1.725 is stored slightly above the tie and gives
/// 1.73, 9.295 is stored slightly below and gives 9.29. Zero, NaN and
/// infinities are returned unchanged; negative values round symmetrically
/// with positive ones.
pub fn round_to_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }
    let digits = (digits as usize).min(EXACT_DIGITS);

    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return value;
    };
    let Ok(mut exponent) = exponent.parse::<i32>() else {
        return value;
    };

    let mut kept: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    let rest = kept.split_off(digits);

    let round_up = match rest.split_first() {
        Some((&first, _)) if first > 5 => true,
        Some((&5, tail)) => tail.iter().any(|&d| d != 0) || kept[digits - 1] % 2 == 1,
        _ => false,
    };

    if round_up {
        let mut idx = digits;
        loop {
            if idx == 0 {
                // 9.99 -> 10.0
                kept.insert(0, 1);
                kept.truncate(digits);
                exponent += 1;
                break;
            }
            idx -= 1;
            if kept[idx] == 9 {
                kept[idx] = 0;
            } else {
                kept[idx] += 1;
                break;
            }
        }
    }

    let mut text = String::with_capacity(digits + 8);
    text.push(char::from(b'0' + kept[0]));
    if digits > 1 {
        text.push('.');
        text.extend(kept[1..].iter().map(|&d| char::from(b'0' + d)));
    }
    text.push_str(&format!("e{}", exponent));

    match text.parse::<f64>() {
        Ok(rounded) => rounded.copysign(value),
        Err(_) => value,
    }
}
