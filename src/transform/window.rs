//! Windowed and exponential smoothing primitives.

use crate::core::decimal;
use crate::error::{AnalyticsError, Result};
use rust_decimal::Decimal;

/// Trailing simple moving average.
///
/// The output has the same length as `values`. Positions `0..window-1` have
/// no full window and are `None`; position `i >= window-1` holds the mean of
/// `values[i+1-window..=i]`.
///
/// # Errors
/// A zero `window`, or a running window sum outside the decimal range.
///
/// # Example
/// ```
/// use kpi_trends::transform::moving_average;
/// use rust_decimal_macros::dec;
///
/// let ma = moving_average(&[dec!(85), dec!(86), dec!(87), dec!(88), dec!(89)], 3).unwrap();
/// assert_eq!(ma, vec![None, None, Some(dec!(86)), Some(dec!(87)), Some(dec!(88))]);
/// ```
pub fn moving_average(values: &[Decimal], window: usize) -> Result<Vec<Option<Decimal>>> {
    if window < 1 {
        return Err(AnalyticsError::invalid("window", "must be at least 1"));
    }

    let divisor = decimal::count(window);
    let mut result = vec![None; values.len()];
    let mut sum = Decimal::ZERO;

    for (i, &x) in values.iter().enumerate() {
        sum = decimal::add(sum, x)?;
        if i >= window {
            sum = decimal::sub(sum, values[i - window])?;
        }
        if i + 1 >= window {
            result[i] = Some(sum / divisor);
        }
    }

    Ok(result)
}

/// Centered moving average over `2 * half_window + 1` points.
///
/// Positions closer than `half_window` to either edge are `None`.
pub fn centered_moving_average(
    values: &[Decimal],
    half_window: usize,
) -> Result<Vec<Option<Decimal>>> {
    let trailing = moving_average(values, 2 * half_window + 1)?;
    let n = values.len();

    Ok((0..n)
        .map(|i| trailing.get(i + half_window).copied().flatten())
        .collect())
}

/// Exponential moving average.
///
/// `ema[0] = values[0]` and `ema[i] = alpha * values[i] + (1 - alpha) * ema[i-1]`.
/// With `alpha = 1` the output equals the input exactly.
///
/// # Errors
/// `alpha` outside `(0, 1]`, or an empty series.
pub fn exponential_moving_average(values: &[Decimal], alpha: Decimal) -> Result<Vec<Decimal>> {
    validate_smoothing("alpha", alpha)?;
    let Some(&first) = values.first() else {
        return Err(AnalyticsError::InsufficientData {
            name: "values",
            needed: 1,
            got: 0,
        });
    };

    let mut result = Vec::with_capacity(values.len());
    let mut ema = first;
    result.push(ema);

    for &x in &values[1..] {
        let weighted = decimal::mul(alpha, x)?;
        let carried = decimal::mul(Decimal::ONE - alpha, ema)?;
        ema = decimal::add(weighted, carried)?;
        result.push(ema);
    }

    Ok(result)
}

/// Check that a smoothing factor lies in `(0, 1]`.
pub(crate) fn validate_smoothing(name: &'static str, factor: Decimal) -> Result<()> {
    if factor <= Decimal::ZERO || factor > Decimal::ONE {
        return Err(AnalyticsError::invalid(
            name,
            format!("must be in (0, 1], got {factor}"),
        ));
    }
    Ok(())
}
