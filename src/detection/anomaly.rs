//! Standard-deviation based anomaly flagging.

use crate::config::thresholds::{validate_threshold, DEFAULT_ANOMALY_THRESHOLD};
use crate::core::decimal;
use crate::error::Result;
use crate::utils::stats;
use rust_decimal::Decimal;

/// Minimum number of points for meaningful detection.
pub const MIN_ANOMALY_POINTS: usize = 3;

/// Flag values further than `threshold_std` sample standard deviations
/// from the series mean.
///
/// Returns ascending indices into `values`. Fewer than
/// [`MIN_ANOMALY_POINTS`] values, or a series with zero variance, yield an
/// empty list.
///
/// # Errors
/// A non-positive `threshold_std`. This is the only failure, so callers
/// that want a plain index list with the default threshold can use
/// [`detect_anomalies_default`].
///
/// # Example
/// ```
/// use kpi_trends::detection::detect_anomalies;
/// use rust_decimal_macros::dec;
///
/// let values = [dec!(85), dec!(86), dec!(84), dec!(120), dec!(85), dec!(87)];
/// assert_eq!(detect_anomalies(&values, dec!(2.0)).unwrap(), vec![3]);
/// ```
pub fn detect_anomalies(values: &[Decimal], threshold_std: Decimal) -> Result<Vec<usize>> {
    validate_threshold(threshold_std)?;
    if values.len() < MIN_ANOMALY_POINTS {
        return Ok(Vec::new());
    }

    if values.iter().all(|v| *v == values[0]) {
        return Ok(Vec::new());
    }

    let floats = decimal::to_f64_vec(values);
    let mean = stats::mean(&floats);
    let std_dev = stats::std_dev(&floats);

    if std_dev.is_nan() || std_dev <= 0.0 {
        return Ok(Vec::new());
    }

    let limit = decimal::to_f64(threshold_std) * std_dev;
    Ok(floats
        .iter()
        .enumerate()
        .filter(|(_, &x)| (x - mean).abs() > limit)
        .map(|(i, _)| i)
        .collect())
}

/// [`detect_anomalies`] with the default two-standard-deviation threshold.
///
/// Returns the index list directly; the default threshold is positive, so
/// validation cannot fail.
pub fn detect_anomalies_default(values: &[Decimal]) -> Vec<usize> {
    detect_anomalies(values, DEFAULT_ANOMALY_THRESHOLD).unwrap_or_default()
}
