//! Product terms and contract parameters

mod terms;
mod parameters;

pub use terms::ProductTerms;
pub use parameters::ContractParameters;

/// Sum insured per unit of cultivated area
pub const DEFAULT_BASE_PAYOUT_PER_UNIT: f64 = 3000.0;

/// Payout when cumulative rainfall sits exactly at the trigger
pub const DEFAULT_MIN_PAYOUT: f64 = 300.0;
