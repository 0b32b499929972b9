//! Quote request parameters

use serde::{Deserialize, Serialize};

use crate::contract::{ContractParameters, ProductTerms};
use crate::error::Result;
use crate::rainfall::CoverPeriod;

/// What a caller chooses when asking for a quote
///
/// Defaults are the emergence-phase settings offered to farmers: days
/// 246..275 of the season, one unit of land, trigger 80mm, exit 20mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// First covered day (inclusive)
    #[serde(default = "default_period_start")]
    pub period_start: usize,

    /// Day after the last covered day (exclusive)
    #[serde(default = "default_period_end")]
    pub period_end: usize,

    /// Area under cultivation
    #[serde(default = "default_area")]
    pub area: f64,

    /// Cumulative rainfall at or below which payouts start
    #[serde(default = "default_trigger")]
    pub trigger: f64,

    /// Cumulative rainfall at or below which the full payout applies
    #[serde(default = "default_exit")]
    pub exit: f64,
}

fn default_period_start() -> usize { 246 }
fn default_period_end() -> usize { 275 }
fn default_area() -> f64 { 1.0 }
fn default_trigger() -> f64 { 80.0 }
fn default_exit() -> f64 { 20.0 }

impl Default for QuoteRequest {
    fn default() -> Self {
        Self {
            period_start: default_period_start(),
            period_end: default_period_end(),
            area: default_area(),
            trigger: default_trigger(),
            exit: default_exit(),
        }
    }
}

impl QuoteRequest {
    pub fn new(period_start: usize, period_end: usize, area: f64, trigger: f64, exit: f64) -> Self {
        Self {
            period_start,
            period_end,
            area,
            trigger,
            exit,
        }
    }

    pub fn period(&self) -> Result<CoverPeriod> {
        CoverPeriod::new(self.period_start, self.period_end)
    }

    pub fn contract(&self, terms: &ProductTerms) -> Result<ContractParameters> {
        ContractParameters::with_terms(self.area, self.trigger, self.exit, terms)
    }
}
