//! Historical payouts and premium

mod engine;
mod premium;

pub use engine::{compute_payouts, payout_for_rainfall, PayoutSeries};
pub use premium::{
    compute_contract_premium, compute_premium, compute_premium_with, round_to_significant,
    PremiumPolicy,
};

/// Significant figures kept in a quoted premium
pub const PREMIUM_SIGNIFICANT_FIGURES: u32 = 3;
