//! Core data structures for KPI analysis.

pub mod decimal;
mod forecast;
mod series;

pub(crate) use forecast::ForecastBuilder;
pub use forecast::{ForecastMethod, ForecastResult};
pub use series::{KpiPoint, KpiSeries, TimeRange};
