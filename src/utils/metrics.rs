//! Accuracy metrics for forecast evaluation.

use crate::core::decimal::{self, VALUE_SCALE};
use crate::error::{AnalyticsError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Accuracy metrics between an actual and a predicted series.
///
/// All fields are non-negative and rounded to four decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    /// Mean Absolute Error
    pub mae: Decimal,
    /// Root Mean Squared Error
    pub rmse: Decimal,
    /// Mean Absolute Percentage Error over positions where actual is non-zero
    pub mape: Decimal,
}

impl AccuracyMetrics {
    /// Metrics for a perfect (or empty) comparison.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Calculate MAE, RMSE and MAPE between `actual` and `predicted`.
///
/// Empty inputs yield all-zero metrics. Positions where `actual` is zero are
/// left out of MAPE entirely; if no position remains, MAPE is zero.
///
/// # Example
/// ```
/// use kpi_trends::utils::forecast_accuracy;
/// use rust_decimal_macros::dec;
///
/// let actual = [dec!(100), dec!(200)];
/// let predicted = [dec!(110), dec!(190)];
/// let metrics = forecast_accuracy(&actual, &predicted).unwrap();
/// assert_eq!(metrics.mae, dec!(10));
/// assert_eq!(metrics.mape, dec!(7.5));
/// ```
pub fn forecast_accuracy(actual: &[Decimal], predicted: &[Decimal]) -> Result<AccuracyMetrics> {
    if actual.len() != predicted.len() {
        return Err(AnalyticsError::DimensionMismatch {
            left: "actual",
            right: "predicted",
            expected: actual.len(),
            got: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Ok(AccuracyMetrics::zero());
    }

    let errors = errors(actual, predicted)?;
    let mse: f64 = errors
        .iter()
        .map(|&e| decimal::to_f64(e).powi(2))
        .sum::<f64>()
        / actual.len() as f64;

    Ok(AccuracyMetrics {
        mae: abs_mean(&errors).round_dp(VALUE_SCALE),
        rmse: decimal::from_f64(mse.sqrt(), VALUE_SCALE)?,
        mape: mape(actual, predicted)?.round_dp(VALUE_SCALE),
    })
}

/// Pointwise `actual - predicted`.
fn errors(actual: &[Decimal], predicted: &[Decimal]) -> Result<Vec<Decimal>> {
    actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| decimal::sub(a, p))
        .collect()
}

fn abs_mean(errors: &[Decimal]) -> Decimal {
    let magnitudes: Vec<Decimal> = errors.iter().map(|e| e.abs()).collect();
    decimal::mean(&magnitudes).unwrap_or(Decimal::ZERO)
}

/// Unrounded MAE between two aligned slices; zero when empty.
pub(crate) fn mae(actual: &[Decimal], predicted: &[Decimal]) -> Result<Decimal> {
    Ok(abs_mean(&errors(actual, predicted)?))
}

/// Unrounded MAPE (percent) between two aligned slices, skipping zero actuals.
pub(crate) fn mape(actual: &[Decimal], predicted: &[Decimal]) -> Result<Decimal> {
    let ratios = actual
        .iter()
        .zip(predicted)
        .filter(|(a, _)| !a.is_zero())
        .map(|(&a, &p)| -> Result<Decimal> {
            let error = decimal::sub(a, p)?;
            Ok(decimal::div(error, a)?.abs())
        })
        .collect::<Result<Vec<Decimal>>>()?;
    match decimal::mean(&ratios) {
        Some(m) => decimal::mul(m, dec!(100)),
        None => Ok(Decimal::ZERO),
    }
}

/// In-sample accuracy score `max(0, 100 - MAPE)`.
pub(crate) fn accuracy_from_mape(actual: &[Decimal], fitted: &[Decimal]) -> Result<Decimal> {
    let score = dec!(100)
        .checked_sub(mape(actual, fitted)?)
        .unwrap_or(Decimal::ZERO);
    Ok(score.max(Decimal::ZERO).round_dp(VALUE_SCALE))
}
