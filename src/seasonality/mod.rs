//! Seasonal decomposition of KPI series.

mod decompose;

pub use decompose::{decompose, decompose_weekly, Decomposition};
