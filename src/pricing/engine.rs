//! Pricing engine: rainfall history in, historical payouts and premium out

use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

use super::QuoteRequest;
use crate::contract::{ContractParameters, ProductTerms};
use crate::error::Result;
use crate::payout::{compute_contract_premium, compute_payouts, PayoutSeries, PremiumPolicy};
use crate::rainfall::{aggregate, CoverPeriod, CumulativeRainfall, RainfallTable};

/// Full result of pricing one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub product: String,
    pub period: CoverPeriod,
    pub contract: ContractParameters,
    pub max_payout: f64,
    pub cumulative_rainfall: CumulativeRainfall,
    pub historical_payouts: PayoutSeries,
    /// Mean historical payout before rounding
    pub mean_payout: f64,
    pub premium: f64,
    pub premium_policy: PremiumPolicy,
}

/// Prices drought cover against an immutable rainfall history
///
/// The table is shared behind an `Arc`; the engine holds no mutable state and
/// can serve any number of threads.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    table: Arc<RainfallTable>,
    terms: ProductTerms,
}

impl PricingEngine {
    /// Engine on the default product terms
    pub fn new(table: Arc<RainfallTable>) -> Self {
        Self::with_terms(table, ProductTerms::default())
    }

    pub fn with_terms(table: Arc<RainfallTable>, terms: ProductTerms) -> Self {
        Self { table, terms }
    }

    pub fn table(&self) -> &RainfallTable {
        &self.table
    }

    pub fn terms(&self) -> &ProductTerms {
        &self.terms
    }

    /// Payout each historical year would have received
    pub fn get_historical_payouts(
        &self,
        period_start: usize,
        period_end: usize,
        area: f64,
        trigger: f64,
        exit: f64,
    ) -> Result<PayoutSeries> {
        let request = QuoteRequest::new(period_start, period_end, area, trigger, exit);
        self.historical_payouts(&request)
    }

    /// Premium: mean historical payout to three significant figures
    pub fn get_premium(
        &self,
        period_start: usize,
        period_end: usize,
        area: f64,
        trigger: f64,
        exit: f64,
    ) -> Result<f64> {
        let request = QuoteRequest::new(period_start, period_end, area, trigger, exit);
        self.premium(&request)
    }

    pub fn historical_payouts(&self, request: &QuoteRequest) -> Result<PayoutSeries> {
        let (period, contract) = self.validate(request)?;
        let cumulative = aggregate(&self.table, period)?;
        Ok(compute_payouts(&cumulative, &contract))
    }

    /// Never above the contract's maximum payout
    pub fn premium(&self, request: &QuoteRequest) -> Result<f64> {
        let (period, contract) = self.validate(request)?;
        let cumulative = aggregate(&self.table, period)?;
        let payouts = compute_payouts(&cumulative, &contract);
        compute_contract_premium(&payouts, &contract, self.terms.premium_policy)
    }

    /// Payouts, premium and the intermediate figures in one pass
    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let (period, contract) = self.validate(request)?;
        let cumulative_rainfall = aggregate(&self.table, period)?;
        let historical_payouts = compute_payouts(&cumulative_rainfall, &contract);
        let premium =
            compute_contract_premium(&historical_payouts, &contract, self.terms.premium_policy)?;
        let mean_payout = historical_payouts.mean().unwrap_or(0.0);

        debug!(
            "Quoted days {}..{} area {} trigger {} exit {}: mean payout {:.2}, premium {}",
            period.start,
            period.end,
            contract.area_under_cultivation(),
            contract.trigger_threshold(),
            contract.exit_threshold(),
            mean_payout,
            premium
        );

        Ok(Quote {
            product: self.terms.name.clone(),
            period,
            max_payout: contract.max_payout(),
            contract,
            cumulative_rainfall,
            historical_payouts,
            mean_payout,
            premium,
            premium_policy: self.terms.premium_policy,
        })
    }

    fn validate(&self, request: &QuoteRequest) -> Result<(CoverPeriod, ContractParameters)> {
        let checked = request.period().and_then(|period| {
            period.check_within(self.table.days())?;
            let contract = request.contract(&self.terms)?;
            Ok((period, contract))
        });
        if let Err(e) = &checked {
            warn!("Rejected quote request {:?}: {}", request, e);
        }
        checked
    }
}
