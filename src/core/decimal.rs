//! Conversions between the decimal boundary and `f64` internals.
//!
//! KPI values are persisted and compared as decimals, so every public value
//! is a [`Decimal`]. Statistics that need square roots or long sums of
//! squares run in `f64` and are rounded back to a fixed scale.

use crate::error::{AnalyticsError, Result};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Decimal places kept for regression slopes.
pub const SLOPE_SCALE: u32 = 6;
/// Decimal places kept for intercepts and R².
pub const FIT_SCALE: u32 = 4;
/// Decimal places kept for forecast values, bounds and accuracy figures.
pub const VALUE_SCALE: u32 = 4;
/// Decimal places kept for confidence scores.
pub const CONFIDENCE_SCALE: u32 = 2;

/// Convert a decimal to `f64`.
///
/// Every finite `Decimal` fits in an `f64`, so this never fails; precision
/// beyond ~15 significant digits is dropped.
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Convert a slice of decimals to `f64`.
pub fn to_f64_vec(values: &[Decimal]) -> Vec<f64> {
    values.iter().map(|&v| to_f64(v)).collect()
}

/// Convert an `f64` back to a decimal rounded to `scale` places.
pub fn from_f64(value: f64, scale: u32) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(AnalyticsError::ComputationError(format!(
            "non-finite intermediate value {value}"
        )));
    }
    Decimal::from_f64(value)
        .map(|d| d.round_dp(scale))
        .ok_or_else(|| {
            AnalyticsError::ComputationError(format!("{value} is outside the decimal range"))
        })
}

/// Arithmetic mean of a decimal slice, `None` when empty.
///
/// When the plain sum would leave the decimal range the mean is taken as
/// `sum(v / n)`, whose partial sums stay within `max |v|`.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let n = Decimal::from(values.len());
    let mean = match values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
    {
        Some(sum) => sum / n,
        None => values
            .iter()
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v / n)),
    };
    Some(mean)
}

fn overflow(a: Decimal, op: char, b: Decimal) -> AnalyticsError {
    AnalyticsError::ComputationError(format!("{a} {op} {b} is outside the decimal range"))
}

/// `a + b`, or `ComputationError` on overflow.
pub(crate) fn add(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(a, '+', b))
}

/// `a - b`, or `ComputationError` on overflow.
pub(crate) fn sub(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(a, '-', b))
}

/// `a * b`, or `ComputationError` on overflow.
pub(crate) fn mul(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(a, '*', b))
}

/// `a / b`, or `ComputationError` on overflow or a zero divisor.
pub(crate) fn div(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_div(b).ok_or_else(|| overflow(a, '/', b))
}

/// Decimal representation of a count, used as a divisor or step index.
pub(crate) fn count(n: usize) -> Decimal {
    Decimal::from(n)
}
