//! # kpi-trends
//!
//! Trend analysis and short-horizon forecasting for business KPI series.
//!
//! Values cross the public API as [`rust_decimal::Decimal`] and are rounded
//! to fixed scales; statistics are computed internally in `f64`.
//!
//! Provides moving averages, least-squares trend classification, standard
//! deviation anomaly detection, additive seasonal decomposition, and three
//! forecasting methods (simple exponential smoothing, Holt's linear trend
//! and linear extrapolation) with automatic method selection.
//!
//! # Example
//!
//! ```
//! use kpi_trends::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let values = [dec!(80), dec!(82), dec!(84), dec!(86), dec!(88)];
//! let trend = analyze_trend(&values).unwrap();
//! assert_eq!(trend.trend_direction, TrendDirection::Increasing);
//!
//! let forecast = auto_forecast(&values, 3).unwrap();
//! assert_eq!(forecast.horizon(), 3);
//! ```

#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod config;
pub mod core;
pub mod detection;
pub mod error;
pub mod features;
pub mod models;
pub mod seasonality;
pub mod transform;
pub mod utils;

pub use error::{AnalyticsError, Result};

pub mod prelude {
    pub use crate::analysis::{summarize, ForecastPoint, KpiSummary};
    pub use crate::config::{ForecastConfig, KpiType, TrendThresholds};
    pub use crate::core::{ForecastMethod, ForecastResult, KpiPoint, KpiSeries, TimeRange};
    pub use crate::detection::detect_anomalies;
    pub use crate::error::{AnalyticsError, Result};
    pub use crate::features::{analyze_trend, linear_regression, TrendDirection, TrendResult};
    pub use crate::models::{auto_forecast, Forecaster};
    pub use crate::seasonality::decompose;
    pub use crate::transform::{exponential_moving_average, moving_average};
    pub use crate::utils::{forecast_accuracy, AccuracyMetrics};
}
