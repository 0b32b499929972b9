//! Cumulative rainfall per historical instance

use log::debug;

use super::{CoverPeriod, RainfallTable};
use crate::error::Result;
use crate::series::InstanceSeries;

/// Total rainfall over the cover period, one value per historical instance
pub type CumulativeRainfall = InstanceSeries;

/// Sum the non-missing readings of every instance over `period`
///
/// Missing readings contribute nothing. An instance with no readings at all in
/// the period gets a cumulative rainfall of zero.
pub fn aggregate(table: &RainfallTable, period: CoverPeriod) -> Result<CumulativeRainfall> {
    period.check_within(table.days())?;

    let mut cumulative = CumulativeRainfall::with_capacity(table.instance_count());
    for (label, readings) in table.instances() {
        let window = &readings[period.start..period.end];
        let mut total = 0.0;
        let mut observed = 0usize;
        for reading in window.iter().flatten() {
            total += reading;
            observed += 1;
        }
        if observed == 0 {
            debug!(
                "Instance {} has no readings in days {}..{}, cumulative rainfall is 0",
                label, period.start, period.end
            );
        }
        cumulative.push(label, total);
    }

    debug!(
        "Aggregated {} instances over days {}..{}",
        cumulative.len(),
        period.start,
        period.end
    );
    Ok(cumulative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use crate::rainfall::MISSING_SENTINEL;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn table() -> RainfallTable {
        RainfallTable::from_columns(
            vec!["2001".into(), "2002".into(), "2003".into()],
            vec![
                vec![1.0, 2.0, 3.0, 4.0, 5.0],
                vec![MISSING_SENTINEL, 10.0, MISSING_SENTINEL, 0.0, 6.5],
                vec![MISSING_SENTINEL; 5],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_sums_skip_missing() {
        let cumulative = aggregate(&table(), CoverPeriod::new(1, 4).unwrap()).unwrap();

        assert_eq!(cumulative.get("2001"), Some(9.0));
        assert_eq!(cumulative.get("2002"), Some(10.0));
        assert_eq!(cumulative.get("2003"), Some(0.0));
    }

    #[test]
    fn test_preserves_column_order() {
        let cumulative = aggregate(&table(), CoverPeriod::new(0, 5).unwrap()).unwrap();
        let labels: Vec<&str> = cumulative.labels().collect();
        assert_eq!(labels, vec!["2001", "2002", "2003"]);
    }

    #[test]
    fn test_all_missing_is_zero_not_nan() {
        let cumulative = aggregate(&table(), CoverPeriod::new(0, 5).unwrap()).unwrap();
        let value = cumulative.get("2003").unwrap();
        assert_eq!(value, 0.0);
        assert!(!value.is_nan());
    }

    #[test]
    fn test_period_past_end_is_range_error() {
        let err = aggregate(&table(), CoverPeriod { start: 2, end: 6 }).unwrap_err();
        assert!(matches!(err, PricingError::Range(_)));

        let err = aggregate(&table(), CoverPeriod { start: 3, end: 3 }).unwrap_err();
        assert!(matches!(err, PricingError::Range(_)));
    }

    #[test]
    fn test_full_season() {
        let cumulative = aggregate(&table(), CoverPeriod::new(0, 5).unwrap()).unwrap();
        assert_relative_eq!(cumulative.get("2001").unwrap(), 15.0);
        assert_relative_eq!(cumulative.get("2002").unwrap(), 16.5);
    }

    proptest! {
        #[test]
        fn prop_adjacent_periods_add_up(
            raw in prop::collection::vec(
                prop_oneof![Just(MISSING_SENTINEL), 0.0f64..50.0],
                2..60,
            ),
            cut in 0.0f64..1.0,
        ) {
            let days = raw.len();
            let split = 1 + ((days - 1) as f64 * cut) as usize;
            let split = split.min(days - 1);
            let table = RainfallTable::from_columns(vec!["x".into()], vec![raw.clone()]).unwrap();

            let whole = aggregate(&table, CoverPeriod::new(0, days).unwrap()).unwrap();
            let left = aggregate(&table, CoverPeriod::new(0, split).unwrap()).unwrap();
            let right = aggregate(&table, CoverPeriod::new(split, days).unwrap()).unwrap();

            let expected: f64 = raw.iter().filter(|v| **v >= 0.0).sum();
            let whole = whole.get("x").unwrap();
            prop_assert!((whole - expected).abs() < 1e-9);
            prop_assert!((left.get("x").unwrap() + right.get("x").unwrap() - whole).abs() < 1e-9);
        }
    }
}
