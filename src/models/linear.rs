//! Linear trend extrapolation.

use crate::core::decimal::{self, VALUE_SCALE};
use crate::core::{ForecastBuilder, ForecastMethod, ForecastResult};
use crate::error::Result;
use crate::features::linear_regression_indexed;
use crate::models::confidence::ConfidenceDecay;
use crate::models::Forecaster;
use crate::utils::stats;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CONFIDENCE_STEP: Decimal = dec!(3);
const CONFIDENCE_FLOOR: Decimal = dec!(40);
const MIN_START_CONFIDENCE: Decimal = dec!(50);
const MARGIN_MULTIPLIER: f64 = 2.0;
const MARGIN_GROWTH_PER_STEP: f64 = 0.1;

/// Extrapolates the least-squares line fitted over index positions.
///
/// Step `h` predicts `slope × (n - 1 + h) + intercept`. The band is
/// `±2 × σ_res × (1 + 0.1 h)` where `σ_res` is the sample standard deviation
/// of the in-sample residuals, so it widens with the horizon. Confidence
/// starts at `max(50, R² × 100)` and loses 3 points per step down to 40;
/// accuracy is `R² × 100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearTrendExtrapolation;

impl LinearTrendExtrapolation {
    pub fn new() -> Self {
        Self
    }
}

impl Forecaster for LinearTrendExtrapolation {
    fn forecast(&self, values: &[Decimal], horizon: usize) -> Result<ForecastResult> {
        let fit = linear_regression_indexed(values)?;
        let n = values.len();

        let residuals = values
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                let fitted = fit.predict(decimal::count(i))?;
                Ok(decimal::to_f64(decimal::sub(y, fitted)?))
            })
            .collect::<Result<Vec<f64>>>()?;
        let residual_std = stats::std_dev_or_zero(&residuals);

        let r_squared_pct = fit.r_squared * dec!(100);
        let confidence = ConfidenceDecay::new(
            r_squared_pct.max(MIN_START_CONFIDENCE),
            CONFIDENCE_STEP,
            CONFIDENCE_FLOOR,
        );

        let mut builder = ForecastBuilder::with_horizon(horizon);
        for h in 1..=horizon {
            let prediction = fit.predict(decimal::count(n - 1 + h))?.round_dp(VALUE_SCALE);
            let margin = decimal::from_f64(
                MARGIN_MULTIPLIER * residual_std * (1.0 + MARGIN_GROWTH_PER_STEP * h as f64),
                VALUE_SCALE,
            )?;
            builder.push(prediction, margin, confidence.at(h))?;
        }

        Ok(builder.finish(
            ForecastMethod::LinearTrendExtrapolation,
            r_squared_pct.round_dp(VALUE_SCALE),
        ))
    }

    fn method(&self) -> ForecastMethod {
        ForecastMethod::LinearTrendExtrapolation
    }
}

/// Forecast by extrapolating a linear trend.
///
/// # Errors
/// Fewer than two values, or a fitted value or bound outside the decimal
/// range.
pub fn linear_trend_forecast(values: &[Decimal], horizon: usize) -> Result<ForecastResult> {
    LinearTrendExtrapolation::new().forecast(values, horizon)
}
