//! Trend features for KPI series.

mod trend;

pub use trend::{
    analyze_trend, analyze_trend_with, classify_trend, classify_trend_with, linear_regression,
    linear_regression_indexed, FitOutcome, LinearFit, TrendDirection, TrendResult,
};
