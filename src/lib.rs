//! Parametric drought cover pricing
//!
//! Backtests an index-based drought contract against historical daily rainfall:
//! - `rainfall`: the rainfall table, cover periods, CSV loading and aggregation
//! - `contract`: product terms and validated contract parameters
//! - `payout`: per-year payouts and the premium derived from them
//! - `pricing`: the engine that ties the pieces together for callers
//! - `api`: JSON request handling used by the HTTP function

pub mod api;
pub mod contract;
pub mod error;
pub mod payout;
pub mod pricing;
pub mod rainfall;
pub mod series;

pub use contract::{ContractParameters, ProductTerms};
pub use error::{DataError, PricingError};
pub use payout::{
    compute_contract_premium, compute_payouts, compute_premium, PayoutSeries, PremiumPolicy,
};
pub use pricing::{PricingEngine, Quote, QuoteRequest};
pub use rainfall::{aggregate, CoverPeriod, CumulativeRainfall, RainfallTable};
pub use series::InstanceSeries;
