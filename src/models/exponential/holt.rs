//! Holt's Linear Trend forecasting.
//!
//! Also known as double exponential smoothing, this model is suitable for
//! KPIs with a linear trend but no seasonality.

use crate::config::thresholds::{DEFAULT_ALPHA, DEFAULT_BETA};
use crate::core::decimal::{self, VALUE_SCALE};
use crate::core::{ForecastBuilder, ForecastMethod, ForecastResult};
use crate::error::Result;
use crate::models::confidence::ConfidenceDecay;
use crate::models::exponential::SimpleExponentialSmoothing;
use crate::models::Forecaster;
use crate::transform::window::validate_smoothing;
use crate::utils::metrics;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CONFIDENCE: ConfidenceDecay = ConfidenceDecay::new(dec!(82), dec!(2.5), dec!(45));
const MARGIN_MULTIPLIER: Decimal = dec!(2.5);
const MIN_POINTS: usize = 3;

/// Holt's Linear Trend forecaster.
///
/// The model equations are:
/// - Level: `l_t = α × y_t + (1-α) × (l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β × (l_t - l_{t-1}) + (1-β) × b_{t-1}`
/// - Forecast: `ŷ_{t+h} = l_t + h × b_t`
///
/// The state starts at `l_0 = y_0`, `b_0 = y_1 - y_0`. Histories shorter
/// than three points are forecast with [`SimpleExponentialSmoothing`]
/// using the same alpha, and the result reports that method.
///
/// The band is `±2.5 × MAE` of the fitted levels; confidence starts at 82
/// and loses 2.5 points per step down to 45.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoltLinearTrend {
    /// Level smoothing parameter (0 < alpha <= 1).
    alpha: Decimal,
    /// Trend smoothing parameter (0 < beta <= 1).
    beta: Decimal,
}

/// Level and trend after walking the history.
#[derive(Debug, Clone, PartialEq)]
struct HoltState {
    level: Decimal,
    trend: Decimal,
    /// Level after each observation, aligned with the input.
    levels: Vec<Decimal>,
}

impl HoltLinearTrend {
    /// Create a new Holt model.
    ///
    /// # Errors
    /// `alpha` or `beta` outside `(0, 1]`.
    pub fn new(alpha: Decimal, beta: Decimal) -> Result<Self> {
        validate_smoothing("alpha", alpha)?;
        validate_smoothing("beta", beta)?;
        Ok(Self { alpha, beta })
    }

    /// Get the level smoothing parameter.
    pub fn alpha(&self) -> Decimal {
        self.alpha
    }

    /// Get the trend smoothing parameter.
    pub fn beta(&self) -> Decimal {
        self.beta
    }

    /// Run the recursion over `values`, which must hold at least two points.
    fn smooth(&self, values: &[Decimal]) -> Result<HoltState> {
        let mut level = values[0];
        let mut trend = decimal::sub(values[1], values[0])?;
        let mut levels = Vec::with_capacity(values.len());
        levels.push(level);

        for &y in &values[1..] {
            let prev_level = level;
            let projected = decimal::add(prev_level, trend)?;
            level = decimal::add(
                decimal::mul(self.alpha, y)?,
                decimal::mul(Decimal::ONE - self.alpha, projected)?,
            )?;
            let step = decimal::sub(level, prev_level)?;
            trend = decimal::add(
                decimal::mul(self.beta, step)?,
                decimal::mul(Decimal::ONE - self.beta, trend)?,
            )?;
            levels.push(level);
        }

        Ok(HoltState {
            level,
            trend,
            levels,
        })
    }
}

impl Default for HoltLinearTrend {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
        }
    }
}

impl Forecaster for HoltLinearTrend {
    fn forecast(&self, values: &[Decimal], horizon: usize) -> Result<ForecastResult> {
        if values.len() < MIN_POINTS {
            debug!(
                "{} points is too short for Holt, using simple exponential smoothing",
                values.len()
            );
            return SimpleExponentialSmoothing::new(self.alpha)?.forecast(values, horizon);
        }

        let state = self.smooth(values)?;
        let margin = decimal::mul(MARGIN_MULTIPLIER, metrics::mae(values, &state.levels)?)?
            .round_dp(VALUE_SCALE);

        let mut builder = ForecastBuilder::with_horizon(horizon);
        for h in 1..=horizon {
            let drift = decimal::mul(state.trend, decimal::count(h))?;
            let prediction = decimal::add(state.level, drift)?.round_dp(VALUE_SCALE);
            builder.push(prediction, margin, CONFIDENCE.at(h))?;
        }

        Ok(builder.finish(
            ForecastMethod::DoubleExponentialSmoothing,
            metrics::accuracy_from_mape(values, &state.levels)?,
        ))
    }

    fn method(&self) -> ForecastMethod {
        ForecastMethod::DoubleExponentialSmoothing
    }
}

/// Forecast with double exponential smoothing (Holt's method).
///
/// # Errors
/// `alpha` or `beta` outside `(0, 1]`, fewer than two values, or a level,
/// trend or prediction outside the decimal range.
pub fn double_exponential_smoothing(
    values: &[Decimal],
    horizon: usize,
    alpha: Decimal,
    beta: Decimal,
) -> Result<ForecastResult> {
    HoltLinearTrend::new(alpha, beta)?.forecast(values, horizon)
}
