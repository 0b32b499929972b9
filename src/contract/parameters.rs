//! Validated contract parameters

use serde::Serialize;

use super::ProductTerms;
use crate::error::{PricingError, Result};

/// Parameters of one drought contract
///
/// Construction enforces the drought-cover invariants, so `tick()` is always
/// finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContractParameters {
    area_under_cultivation: f64,
    trigger_threshold: f64,
    exit_threshold: f64,
    base_payout_per_unit: f64,
    min_payout: f64,
}

impl ContractParameters {
    /// Contract on the default product terms
    pub fn new(area: f64, trigger: f64, exit: f64) -> Result<Self> {
        Self::with_terms(area, trigger, exit, &ProductTerms::default())
    }

    /// Contract on explicit product terms
    ///
    /// # Errors
    /// `InvalidParameter` when a value is not finite, the area is not positive,
    /// the trigger is not above the exit, or the maximum payout falls below the
    /// minimum payout.
    pub fn with_terms(area: f64, trigger: f64, exit: f64, terms: &ProductTerms) -> Result<Self> {
        for (name, value) in [
            ("area under cultivation", area),
            ("trigger threshold", trigger),
            ("exit threshold", exit),
            ("base payout per unit", terms.base_payout_per_unit),
            ("minimum payout", terms.min_payout),
        ] {
            if !value.is_finite() {
                return Err(PricingError::invalid(format!("{} must be finite, got {}", name, value)));
            }
        }

        if area <= 0.0 {
            return Err(PricingError::invalid(format!(
                "area under cultivation must be positive, got {}",
                area
            )));
        }
        if trigger == exit {
            return Err(PricingError::invalid(format!(
                "trigger and exit thresholds are both {}; the payout band is empty",
                trigger
            )));
        }
        if trigger < exit {
            return Err(PricingError::invalid(format!(
                "trigger threshold {} must be above exit threshold {}",
                trigger, exit
            )));
        }
        if terms.min_payout < 0.0 {
            return Err(PricingError::invalid(format!(
                "minimum payout must not be negative, got {}",
                terms.min_payout
            )));
        }

        let max_payout = terms.base_payout_per_unit * area;
        if max_payout < terms.min_payout {
            return Err(PricingError::invalid(format!(
                "maximum payout {} for area {} is below the minimum payout {}",
                max_payout, area, terms.min_payout
            )));
        }

        Ok(Self {
            area_under_cultivation: area,
            trigger_threshold: trigger,
            exit_threshold: exit,
            base_payout_per_unit: terms.base_payout_per_unit,
            min_payout: terms.min_payout,
        })
    }

    pub fn area_under_cultivation(&self) -> f64 {
        self.area_under_cultivation
    }

    pub fn trigger_threshold(&self) -> f64 {
        self.trigger_threshold
    }

    pub fn exit_threshold(&self) -> f64 {
        self.exit_threshold
    }

    pub fn base_payout_per_unit(&self) -> f64 {
        self.base_payout_per_unit
    }

    pub fn min_payout(&self) -> f64 {
        self.min_payout
    }

    /// Full payout for severe drought: base payout times area
    pub fn max_payout(&self) -> f64 {
        self.base_payout_per_unit * self.area_under_cultivation
    }

    /// Payout per unit of rainfall deficit between trigger and exit
    pub fn tick(&self) -> f64 {
        (self.max_payout() - self.min_payout) / (self.trigger_threshold - self.exit_threshold)
    }
}
