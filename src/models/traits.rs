//! Forecaster trait defining the common interface for all methods.

use crate::core::{ForecastMethod, ForecastResult};
use crate::error::Result;
use rust_decimal::Decimal;

/// Common interface for the forecasting methods.
///
/// Forecasters hold only their parameters; every call is a pure function of
/// the history passed in, so one instance can serve any number of callers.
/// The trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Forecast `horizon` periods past the end of `values`.
    fn forecast(&self, values: &[Decimal], horizon: usize) -> Result<ForecastResult>;

    /// The method this forecaster implements.
    fn method(&self) -> ForecastMethod;

    /// Get the method name.
    fn name(&self) -> &str {
        self.method().as_str()
    }
}

/// Type alias for boxed forecaster trait objects.
///
/// # Example
///
/// ```
/// use kpi_trends::models::{BoxedForecaster, Forecaster};
/// use kpi_trends::models::LinearTrendExtrapolation;
///
/// let model: BoxedForecaster = Box::new(LinearTrendExtrapolation::new());
/// assert_eq!(model.name(), "linear_trend_extrapolation");
/// ```
pub type BoxedForecaster = Box<dyn Forecaster + Send + Sync>;
