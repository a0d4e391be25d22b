//! Thresholds, default parameters and the KPI profile table.

pub mod kpi;
pub mod thresholds;

pub use kpi::{KpiProfile, KpiType};
pub use thresholds::{ForecastConfig, SelectionThresholds, TrendThresholds};
