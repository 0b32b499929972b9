//! Rainfall table and cover period types

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, PricingError, Result};

/// Decides which raw readings count as "no reading"
///
/// Raw values strictly below `floor` are missing, as is NaN. A measured zero
/// is a real reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissingValuePolicy {
    pub floor: f64,
}

impl Default for MissingValuePolicy {
    fn default() -> Self {
        Self { floor: 0.0 }
    }
}

impl MissingValuePolicy {
    /// Classify a raw cell value
    pub fn reading(&self, raw: f64) -> Option<f64> {
        if raw.is_nan() || raw < self.floor {
            None
        } else {
            Some(raw)
        }
    }
}

/// Daily rainfall by day-of-season (rows) and historical instance (columns)
///
/// Immutable once built. Every column has the same number of rows.
#[derive(Debug, Clone)]
pub struct RainfallTable {
    labels: Vec<String>,
    /// Column-major readings, `None` where missing
    columns: Vec<Vec<Option<f64>>>,
    days: usize,
}

impl RainfallTable {
    /// Build a table from raw columns using the default missing-value policy
    pub fn from_columns(
        labels: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> std::result::Result<Self, DataError> {
        Self::from_columns_with_policy(labels, columns, MissingValuePolicy::default())
    }

    pub fn from_columns_with_policy(
        labels: Vec<String>,
        columns: Vec<Vec<f64>>,
        policy: MissingValuePolicy,
    ) -> std::result::Result<Self, DataError> {
        if labels.is_empty() {
            return Err(DataError::NoInstances);
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for (idx, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(DataError::EmptyLabel(idx));
            }
            if !seen.insert(label.as_str()) {
                return Err(DataError::DuplicateLabel(label.clone()));
            }
        }

        if columns.len() != labels.len() {
            return Err(DataError::RaggedColumn {
                label: format!("<{} columns for {} labels>", columns.len(), labels.len()),
                expected: labels.len(),
                actual: columns.len(),
            });
        }

        let days = columns[0].len();
        for (label, column) in labels.iter().zip(&columns) {
            if column.len() != days {
                return Err(DataError::RaggedColumn {
                    label: label.clone(),
                    expected: days,
                    actual: column.len(),
                });
            }
        }

        let columns = columns
            .into_iter()
            .map(|col| col.into_iter().map(|raw| policy.reading(raw)).collect())
            .collect();

        Ok(Self {
            labels,
            columns,
            days,
        })
    }

    /// Number of days (rows) in the season
    pub fn days(&self) -> usize {
        self.days
    }

    /// Number of historical instances (columns)
    pub fn instance_count(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Reading for a given instance and day, `None` if missing or out of range
    pub fn reading(&self, instance: usize, day: usize) -> Option<f64> {
        self.columns
            .get(instance)
            .and_then(|col| col.get(day).copied().flatten())
    }

    /// Iterate columns as `(label, readings)`
    pub fn instances(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }
}

/// Half-open range of season days `[start, end)` covered by the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverPeriod {
    pub start: usize,
    pub end: usize,
}

impl CoverPeriod {
    /// Create a period, requiring `start < end`
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start >= end {
            return Err(PricingError::range(format!(
                "cover period start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of days covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the period against a table with `days` rows
    pub fn check_within(&self, days: usize) -> Result<()> {
        if self.start >= self.end {
            return Err(PricingError::range(format!(
                "cover period start {} must be before end {}",
                self.start, self.end
            )));
        }
        if self.end > days {
            return Err(PricingError::range(format!(
                "cover period ends at day {} but rainfall history has {} days",
                self.end, days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_negative_readings_are_missing() {
        let table = RainfallTable::from_columns(
            labels(&["1990"]),
            vec![vec![2.5, -999.0, 0.0, -0.1, f64::NAN]],
        )
        .unwrap();

        assert_eq!(table.reading(0, 0), Some(2.5));
        assert_eq!(table.reading(0, 1), None);
        // Zero is a measured dry day
        assert_eq!(table.reading(0, 2), Some(0.0));
        assert_eq!(table.reading(0, 3), None);
        assert_eq!(table.reading(0, 4), None);
        assert_eq!(table.reading(0, 5), None);
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = RainfallTable::from_columns(
            labels(&["1990", "1991"]),
            vec![vec![1.0, 2.0], vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::RaggedColumn { ref label, expected: 2, actual: 1 } if label == "1991"));
    }

    #[test]
    fn test_label_validation() {
        assert!(matches!(
            RainfallTable::from_columns(vec![], vec![]),
            Err(DataError::NoInstances)
        ));
        assert!(matches!(
            RainfallTable::from_columns(labels(&["1990", "1990"]), vec![vec![1.0], vec![2.0]]),
            Err(DataError::DuplicateLabel(l)) if l == "1990"
        ));
        assert!(matches!(
            RainfallTable::from_columns(labels(&["1990", " "]), vec![vec![1.0], vec![2.0]]),
            Err(DataError::EmptyLabel(1))
        ));
    }

    #[test]
    fn test_cover_period_bounds() {
        assert!(CoverPeriod::new(5, 5).is_err());
        assert!(CoverPeriod::new(6, 5).is_err());

        let period = CoverPeriod::new(0, 10).unwrap();
        assert_eq!(period.len(), 10);
        assert!(period.check_within(10).is_ok());
        assert!(matches!(period.check_within(9), Err(PricingError::Range(_))));
    }
}
