//! Simple Exponential Smoothing (SES) forecasting.
//!
//! SES is suitable for KPIs with no clear trend: the forecast is flat at the
//! last smoothed level.

use crate::config::thresholds::DEFAULT_ALPHA;
use crate::core::decimal::{self, VALUE_SCALE};
use crate::core::{ForecastBuilder, ForecastMethod, ForecastResult};
use crate::error::{AnalyticsError, Result};
use crate::models::confidence::ConfidenceDecay;
use crate::models::Forecaster;
use crate::transform::window::validate_smoothing;
use crate::transform::exponential_moving_average;
use crate::utils::metrics;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CONFIDENCE: ConfidenceDecay = ConfidenceDecay::new(dec!(85), dec!(2), dec!(50));
const MARGIN_MULTIPLIER: Decimal = dec!(2);

/// Simple Exponential Smoothing forecaster.
///
/// The model equation is:
/// `level_t = α × y_t + (1-α) × level_{t-1}`
///
/// where α (alpha) is the smoothing parameter (0 < α ≤ 1).
///
/// The prediction band is `±2 × MAE` of the smoothed history, constant over
/// the horizon. Confidence starts at 85 and loses 2 points per step down
/// to 50.
///
/// # Example
/// ```
/// use kpi_trends::models::{Forecaster, SimpleExponentialSmoothing};
/// use rust_decimal_macros::dec;
///
/// let values = [dec!(10), dec!(12), dec!(11), dec!(13), dec!(12), dec!(14)];
/// let model = SimpleExponentialSmoothing::new(dec!(0.3)).unwrap();
///
/// let forecast = model.forecast(&values, 3).unwrap();
/// assert_eq!(forecast.horizon(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleExponentialSmoothing {
    alpha: Decimal,
}

impl SimpleExponentialSmoothing {
    /// Create a new SES model.
    ///
    /// # Errors
    /// `alpha` outside `(0, 1]`.
    pub fn new(alpha: Decimal) -> Result<Self> {
        validate_smoothing("alpha", alpha)?;
        Ok(Self { alpha })
    }

    /// Get the smoothing parameter.
    pub fn alpha(&self) -> Decimal {
        self.alpha
    }
}

impl Default for SimpleExponentialSmoothing {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl Forecaster for SimpleExponentialSmoothing {
    fn forecast(&self, values: &[Decimal], horizon: usize) -> Result<ForecastResult> {
        if values.len() < 2 {
            return Err(AnalyticsError::InsufficientData {
                name: "values",
                needed: 2,
                got: values.len(),
            });
        }

        let smoothed = exponential_moving_average(values, self.alpha)?;
        let level = smoothed[smoothed.len() - 1].round_dp(VALUE_SCALE);
        let margin = decimal::mul(MARGIN_MULTIPLIER, metrics::mae(values, &smoothed)?)?
            .round_dp(VALUE_SCALE);

        let mut builder = ForecastBuilder::with_horizon(horizon);
        for h in 1..=horizon {
            builder.push(level, margin, CONFIDENCE.at(h))?;
        }

        Ok(builder.finish(
            ForecastMethod::SimpleExponentialSmoothing,
            metrics::accuracy_from_mape(values, &smoothed)?,
        ))
    }

    fn method(&self) -> ForecastMethod {
        ForecastMethod::SimpleExponentialSmoothing
    }
}

/// Forecast with Simple Exponential Smoothing.
///
/// # Errors
/// `alpha` outside `(0, 1]` or fewer than two values.
pub fn simple_exponential_smoothing(
    values: &[Decimal],
    horizon: usize,
    alpha: Decimal,
) -> Result<ForecastResult> {
    SimpleExponentialSmoothing::new(alpha)?.forecast(values, horizon)
}
