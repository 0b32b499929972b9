//! Ordered per-instance series
//!
//! Cumulative rainfall and payouts are both one number per historical
//! instance. Entries keep the rainfall table's column order for display;
//! nothing downstream depends on that order.

use serde::{Deserialize, Serialize};

/// One value for one historical instance (e.g. a year)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceValue {
    pub label: String,
    pub value: f64,
}

/// Ordered mapping from instance label to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceSeries {
    entries: Vec<InstanceValue>,
}

impl InstanceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append a value; labels are expected to be unique
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.entries.push(InstanceValue {
            label: label.into(),
            value,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value recorded for `label`, if any
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|e| (e.label.as_str(), e.value))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.value)
    }

    /// Apply `f` to every value, keeping labels and order
    pub fn map_values<F>(&self, mut f: F) -> InstanceSeries
    where
        F: FnMut(f64) -> f64,
    {
        InstanceSeries {
            entries: self
                .entries
                .iter()
                .map(|e| InstanceValue {
                    label: e.label.clone(),
                    value: f(e.value),
                })
                .collect(),
        }
    }

    /// Arithmetic mean, `None` when empty
    pub fn mean(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: f64 = self.values().sum();
        Some(total / self.entries.len() as f64)
    }
}

impl FromIterator<(String, f64)> for InstanceSeries {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(label, value)| InstanceValue { label, value })
                .collect(),
        }
    }
}
