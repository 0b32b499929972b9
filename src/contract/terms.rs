//! Fixed terms of the drought cover product

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DEFAULT_BASE_PAYOUT_PER_UNIT, DEFAULT_MIN_PAYOUT};
use crate::error::DataError;
use crate::payout::PremiumPolicy;

/// Product-level constants, not chosen by the customer
///
/// Loadable from JSON; absent fields take the defaults of the faba bean
/// emergence phase cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTerms {
    /// Display name of the cover
    #[serde(default = "default_name")]
    pub name: String,

    /// Maximum payout per unit of cultivated area
    #[serde(default = "default_base_payout")]
    pub base_payout_per_unit: f64,

    /// Payout at the trigger threshold
    #[serde(default = "default_min_payout")]
    pub min_payout: f64,

    /// How the mean historical payout becomes a premium
    #[serde(default)]
    pub premium_policy: PremiumPolicy,
}

fn default_name() -> String { "Faba beans emergence phase drought cover".to_string() }
fn default_base_payout() -> f64 { DEFAULT_BASE_PAYOUT_PER_UNIT }
fn default_min_payout() -> f64 { DEFAULT_MIN_PAYOUT }

impl Default for ProductTerms {
    fn default() -> Self {
        Self {
            name: default_name(),
            base_payout_per_unit: DEFAULT_BASE_PAYOUT_PER_UNIT,
            min_payout: DEFAULT_MIN_PAYOUT,
            premium_policy: PremiumPolicy::default(),
        }
    }
}

impl ProductTerms {
    /// Load terms from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let file = File::open(path)?;
        let terms = serde_json::from_reader(file)?;
        Ok(terms)
    }
}
