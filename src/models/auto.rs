//! Automatic choice between the forecasting methods.
//!
//! Short histories use simple exponential smoothing. Otherwise a line is
//! fitted over index positions; a strong fit (R² > 0.7) with a material
//! slope (|slope| > 0.1) selects a trend model, anything else selects
//! simple exponential smoothing.
//!
//! Within the trend branch, Holt is chosen when |slope| > 0.05 and linear
//! extrapolation otherwise. With the default thresholds the outer slope
//! guard already implies the inner one, so the trend branch always yields
//! Holt; the linear arm is only reachable with custom
//! [`SelectionThresholds`].

use crate::config::{ForecastConfig, SelectionThresholds};
use crate::core::{ForecastMethod, ForecastResult};
use crate::error::Result;
use crate::features::linear_regression_indexed;
use crate::models::exponential::{HoltLinearTrend, SimpleExponentialSmoothing};
use crate::models::{BoxedForecaster, LinearTrendExtrapolation};
use log::debug;
use rust_decimal::Decimal;

/// Histories shorter than this always use simple exponential smoothing.
pub const MIN_POINTS_FOR_TREND: usize = 3;

/// Pick the forecasting method for `values`.
pub fn select_method(
    values: &[Decimal],
    thresholds: &SelectionThresholds,
) -> Result<ForecastMethod> {
    if values.len() < MIN_POINTS_FOR_TREND {
        debug!(
            "{} points, selecting simple exponential smoothing",
            values.len()
        );
        return Ok(ForecastMethod::SimpleExponentialSmoothing);
    }

    let fit = linear_regression_indexed(values)?;
    let slope = fit.slope.abs();

    let method = if fit.r_squared > thresholds.min_r_squared && slope > thresholds.min_slope {
        if slope > thresholds.holt_slope {
            ForecastMethod::DoubleExponentialSmoothing
        } else {
            ForecastMethod::LinearTrendExtrapolation
        }
    } else {
        ForecastMethod::SimpleExponentialSmoothing
    };

    debug!(
        "selected {} (slope {}, r_squared {})",
        method, fit.slope, fit.r_squared
    );
    Ok(method)
}

/// Build the forecaster for `method` with the smoothing factors in `config`.
///
/// # Errors
/// Smoothing factors outside `(0, 1]`.
pub fn forecaster_for(method: ForecastMethod, config: &ForecastConfig) -> Result<BoxedForecaster> {
    Ok(match method {
        ForecastMethod::SimpleExponentialSmoothing => {
            Box::new(SimpleExponentialSmoothing::new(config.alpha)?)
        }
        ForecastMethod::DoubleExponentialSmoothing => {
            Box::new(HoltLinearTrend::new(config.alpha, config.beta)?)
        }
        ForecastMethod::LinearTrendExtrapolation => Box::new(LinearTrendExtrapolation::new()),
    })
}

/// Select a method with default thresholds and forecast `horizon` periods.
///
/// # Example
/// ```
/// use kpi_trends::core::ForecastMethod;
/// use kpi_trends::models::auto_forecast;
/// use rust_decimal_macros::dec;
///
/// let forecast = auto_forecast(&[dec!(85), dec!(86)], 7).unwrap();
/// assert_eq!(forecast.method, ForecastMethod::SimpleExponentialSmoothing);
/// ```
pub fn auto_forecast(values: &[Decimal], horizon: usize) -> Result<ForecastResult> {
    auto_forecast_with(values, &ForecastConfig::default().with_horizon(horizon))
}

/// Select a method and forecast using an explicit configuration.
pub fn auto_forecast_with(values: &[Decimal], config: &ForecastConfig) -> Result<ForecastResult> {
    config.validate()?;
    let method = select_method(values, &config.selection)?;
    forecaster_for(method, config)?.forecast(values, config.horizon)
}
