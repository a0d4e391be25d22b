//! Forecasting models.

mod auto;
mod confidence;
mod linear;
mod traits;

pub mod exponential;

pub use auto::{
    auto_forecast, auto_forecast_with, forecaster_for, select_method, MIN_POINTS_FOR_TREND,
};
pub use exponential::{
    double_exponential_smoothing, simple_exponential_smoothing, HoltLinearTrend,
    SimpleExponentialSmoothing,
};
pub use linear::{linear_trend_forecast, LinearTrendExtrapolation};
pub use traits::{BoxedForecaster, Forecaster};
