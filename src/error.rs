//! Error types
//!
//! `PricingError` covers the deterministic validation failures of the pricing
//! core. `DataError` covers reading rainfall tables and product terms.

use thiserror::Error;

/// Result type alias for pricing operations
pub type Result<T> = std::result::Result<T, PricingError>;

/// Validation failures raised by aggregation, payout and premium calculation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Contract parameters violate a domain invariant
    #[error("Invalid contract parameter: {0}")]
    InvalidParameter(String),

    /// Cover period falls outside the available rainfall history
    #[error("Range error: {0}")]
    Range(String),
}

impl PricingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PricingError::InvalidParameter(msg.into())
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        PricingError::Range(msg.into())
    }
}

/// Failures while loading reference data
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Line {line}, column '{column}': cannot parse '{value}' as rainfall")]
    Parse {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Column '{label}' has {actual} rows, expected {expected}")]
    RaggedColumn {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate instance label '{0}'")]
    DuplicateLabel(String),

    #[error("Instance label at column {0} is empty")]
    EmptyLabel(usize),

    #[error("Rainfall table has no historical instances")]
    NoInstances,
}
