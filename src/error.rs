//! Error types for the kpi-trends library.

use thiserror::Error;

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur while analysing or forecasting a KPI series.
///
/// Every variant except [`AnalyticsError::ComputationError`] is a caller
/// mistake and names the parameter at fault.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A parameter is outside its accepted range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Too few data points for the requested method.
    #[error("insufficient data in `{name}`: need at least {needed}, got {got}")]
    InsufficientData {
        name: &'static str,
        needed: usize,
        got: usize,
    },

    /// Two sequences that must be aligned have different lengths.
    #[error("length mismatch between `{left}` and `{right}`: expected {expected}, got {got}")]
    DimensionMismatch {
        left: &'static str,
        right: &'static str,
        expected: usize,
        got: usize,
    },

    /// Dates of a series are not strictly ascending.
    #[error("dates must be strictly ascending (violated at index {index})")]
    UnorderedDates { index: usize },

    /// Numeric issue while converting an intermediate result.
    #[error("computation error: {0}")]
    ComputationError(String),
}

impl AnalyticsError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True when the error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::ComputationError(_))
    }
}
