//! Premium grid over trigger and exit thresholds

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::PricingEngine;
use crate::contract::ContractParameters;
use crate::error::{PricingError, Result};
use crate::payout::{compute_contract_premium, compute_payouts};
use crate::rainfall::{aggregate, CoverPeriod};

/// Most values one range may expand to
pub const MAX_RANGE_VALUES: usize = 1000;

/// Inclusive stepped range of threshold values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRange {
    pub from: f64,
    pub to: f64,
    pub step: f64,
}

impl ThresholdRange {
    pub fn new(from: f64, to: f64, step: f64) -> Self {
        Self { from, to, step }
    }

    /// Triggers offered on the quote form: 60..=90mm
    pub fn default_triggers() -> Self {
        Self::new(60.0, 90.0, 1.0)
    }

    /// Exits offered on the quote form: 20..=40mm
    pub fn default_exits() -> Self {
        Self::new(20.0, 40.0, 1.0)
    }

    /// Values from `from` to `to` inclusive; empty when `to < from`
    ///
    /// # Errors
    /// `InvalidParameter` for non-finite bounds, a step that is not positive,
    /// or a range of more than [`MAX_RANGE_VALUES`] values.
    pub fn values(&self) -> Result<Vec<f64>> {
        if !(self.from.is_finite() && self.to.is_finite() && self.step.is_finite()) {
            return Err(PricingError::invalid(format!(
                "threshold range must be finite, got {}..={} step {}",
                self.from, self.to, self.step
            )));
        }
        if self.step <= 0.0 {
            return Err(PricingError::invalid(format!(
                "threshold step must be positive, got {}",
                self.step
            )));
        }
        if self.to < self.from {
            return Ok(Vec::new());
        }

        let span = ((self.to - self.from) / self.step + 1e-9).floor();
        if span >= MAX_RANGE_VALUES as f64 {
            return Err(PricingError::invalid(format!(
                "threshold range {}..={} step {} exceeds {} values",
                self.from, self.to, self.step, MAX_RANGE_VALUES
            )));
        }
        let count = span as usize + 1;
        Ok((0..count).map(|i| self.from + i as f64 * self.step).collect())
    }
}

/// Premium for one (trigger, exit) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridCell {
    pub trigger: f64,
    pub exit: f64,
    pub premium: f64,
}

impl PricingEngine {
    /// Premium for every valid (trigger, exit) combination
    ///
    /// Rainfall is aggregated once; combinations are priced in parallel.
    /// Pairs with `trigger <= exit` are skipped. Cells come back ordered by
    /// trigger, then exit.
    pub fn premium_grid(
        &self,
        period: CoverPeriod,
        area: f64,
        triggers: &ThresholdRange,
        exits: &ThresholdRange,
    ) -> Result<Vec<GridCell>> {
        let cumulative = aggregate(self.table(), period)?;
        let policy = self.terms().premium_policy;

        let exit_values = exits.values()?;
        let pairs: Vec<(f64, f64)> = triggers
            .values()?
            .into_iter()
            .flat_map(|t| exit_values.iter().map(move |&e| (t, e)))
            .filter(|(t, e)| t > e)
            .collect();

        let cells = pairs
            .par_iter()
            .map(|&(trigger, exit)| -> Result<GridCell> {
                let contract = ContractParameters::with_terms(area, trigger, exit, self.terms())?;
                let payouts = compute_payouts(&cumulative, &contract);
                let premium = compute_contract_premium(&payouts, &contract, policy)?;
                Ok(GridCell {
                    trigger,
                    exit,
                    premium,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Priced {} grid cells for days {}..{}",
            cells.len(),
            period.start,
            period.end
        );
        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rainfall::RainfallTable;
    use std::sync::Arc;

    fn engine() -> PricingEngine {
        let table = RainfallTable::from_columns(
            vec!["2001".into(), "2002".into(), "2003".into()],
            vec![
                vec![10.0, 15.0, 5.0],
                vec![30.0, 20.0, 12.0],
                vec![40.0, 40.0, 30.0],
            ],
        )
        .unwrap();
        PricingEngine::new(Arc::new(table))
    }

    #[test]
    fn test_range_values() {
        assert_eq!(ThresholdRange::default_triggers().values().unwrap().len(), 31);
        assert_eq!(ThresholdRange::default_exits().values().unwrap().len(), 21);
        assert_eq!(
            ThresholdRange::new(1.0, 2.0, 0.5).values().unwrap(),
            vec![1.0, 1.5, 2.0]
        );
        assert!(ThresholdRange::new(3.0, 2.0, 1.0).values().unwrap().is_empty());
        assert_eq!(
            ThresholdRange::new(0.0, 999.0, 1.0).values().unwrap().len(),
            MAX_RANGE_VALUES
        );
    }

    #[test]
    fn test_range_rejects_bad_steps() {
        for step in [0.0, -1.0, f64::NAN] {
            let err = ThresholdRange::new(1.0, 2.0, step).values().unwrap_err();
            assert!(matches!(err, PricingError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_range_rejects_unbounded() {
        let ranges = [
            ThresholdRange::new(60.0, f64::INFINITY, 1.0),
            ThresholdRange::new(f64::NEG_INFINITY, 90.0, 1.0),
            ThresholdRange::new(f64::NAN, 90.0, 1.0),
            ThresholdRange::new(60.0, 90.0, 1e-12),
            ThresholdRange::new(0.0, 1000.0, 1.0),
            ThresholdRange::new(-f64::MAX, f64::MAX, 1.0),
        ];
        for range in ranges {
            let err = range.values().unwrap_err();
            assert!(matches!(err, PricingError::InvalidParameter(_)), "{:?}", range);
        }
    }

    #[test]
    fn test_grid_rejects_bad_range() {
        let err = engine()
            .premium_grid(
                CoverPeriod::new(0, 3).unwrap(),
                1.0,
                &ThresholdRange::new(60.0, 90.0, 1e-12),
                &ThresholdRange::default_exits(),
            )
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter(_)));
    }

    #[test]
    fn test_grid_premium_capped_for_fractional_area() {
        // Area 1.002 insures 3006; an all-dry history would otherwise quote 3010
        let table = RainfallTable::from_columns(
            vec!["2001".into(), "2002".into()],
            vec![vec![0.0], vec![0.0]],
        )
        .unwrap();
        let cells = PricingEngine::new(Arc::new(table))
            .premium_grid(
                CoverPeriod::new(0, 1).unwrap(),
                1.002,
                &ThresholdRange::new(80.0, 80.0, 1.0),
                &ThresholdRange::new(20.0, 20.0, 1.0),
            )
            .unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].premium, 1.002 * 3000.0);
    }

    #[test]
    fn test_grid_matches_single_quotes() {
        let engine = engine();
        let period = CoverPeriod::new(0, 3).unwrap();
        let cells = engine
            .premium_grid(
                period,
                2.0,
                &ThresholdRange::default_triggers(),
                &ThresholdRange::default_exits(),
            )
            .unwrap();

        assert_eq!(cells.len(), 31 * 21);
        for cell in cells.iter().step_by(37) {
            let single = engine
                .get_premium(0, 3, 2.0, cell.trigger, cell.exit)
                .unwrap();
            assert_eq!(cell.premium, single);
        }
        assert_eq!(cells[0].trigger, 60.0);
        assert_eq!(cells[0].exit, 20.0);
    }

    #[test]
    fn test_grid_skips_inverted_pairs() {
        let cells = engine()
            .premium_grid(
                CoverPeriod::new(0, 3).unwrap(),
                1.0,
                &ThresholdRange::new(30.0, 40.0, 5.0),
                &ThresholdRange::new(30.0, 40.0, 5.0),
            )
            .unwrap();
        let pairs: Vec<(f64, f64)> = cells.iter().map(|c| (c.trigger, c.exit)).collect();
        assert_eq!(pairs, vec![(35.0, 30.0), (40.0, 30.0), (40.0, 35.0)]);
    }

    #[test]
    fn test_grid_period_out_of_range() {
        let err = engine()
            .premium_grid(
                CoverPeriod { start: 0, end: 10 },
                1.0,
                &ThresholdRange::default_triggers(),
                &ThresholdRange::default_exits(),
            )
            .unwrap_err();
        assert!(matches!(err, PricingError::Range(_)));
    }
}
