//! Utility functions shared by the analysis and forecasting modules.

pub mod metrics;
pub mod stats;

pub use metrics::{forecast_accuracy, AccuracyMetrics};
