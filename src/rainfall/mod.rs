//! Historical rainfall data and cumulative rainfall over a cover period

mod table;
mod aggregator;
pub mod loader;

pub use table::{RainfallTable, MissingValuePolicy, CoverPeriod};
pub use aggregator::{aggregate, CumulativeRainfall};
pub use loader::{load_rainfall_table, load_rainfall_from_reader};

/// Sentinel used for "no reading" in the reference rainfall extracts
pub const MISSING_SENTINEL: f64 = -999.0;
