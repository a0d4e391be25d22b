//! Linear trend fitting and trend-direction classification.

use crate::config::TrendThresholds;
use crate::core::decimal::{self, FIT_SCALE, SLOPE_SCALE};
use crate::error::{AnalyticsError, Result};
use crate::utils::stats;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a [`LinearFit`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitOutcome {
    /// Ordinary least squares.
    LeastSquares,
    /// All x values are identical; the fit is the horizontal line at mean(y).
    ConstantPredictor,
}

/// Result of a least-squares line fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Rounded to six decimal places.
    pub slope: Decimal,
    /// Rounded to four decimal places.
    pub intercept: Decimal,
    /// Coefficient of determination in `[0, 1]`, four decimal places.
    pub r_squared: Decimal,
    pub outcome: FitOutcome,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`.
    ///
    /// # Errors
    /// `ComputationError` when the value leaves the decimal range.
    pub fn predict(&self, x: Decimal) -> Result<Decimal> {
        decimal::add(decimal::mul(self.slope, x)?, self.intercept)
    }
}

/// Direction label for a KPI series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    Volatile,
}

impl TrendDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
            TrendDirection::Volatile => "volatile",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regression statistics together with the classified direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendResult {
    pub slope: Decimal,
    pub intercept: Decimal,
    pub r_squared: Decimal,
    pub trend_direction: TrendDirection,
}

/// Fit `y` against `x` by ordinary least squares.
///
/// When every `x` is identical the slope is undefined; the result is then
/// slope 0, intercept `mean(y)`, R² 0 with [`FitOutcome::ConstantPredictor`].
/// A constant `y` with distinct `x` is a perfect horizontal fit (R² = 1).
///
/// # Errors
/// Mismatched lengths or fewer than two points.
///
/// # Example
/// ```
/// use kpi_trends::features::linear_regression;
/// use rust_decimal_macros::dec;
///
/// let x = [dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)];
/// let y = [dec!(82), dec!(84), dec!(86), dec!(88), dec!(90)];
/// let fit = linear_regression(&x, &y).unwrap();
/// assert_eq!(fit.slope, dec!(2));
/// assert_eq!(fit.intercept, dec!(80));
/// assert_eq!(fit.r_squared, dec!(1));
/// ```
pub fn linear_regression(x: &[Decimal], y: &[Decimal]) -> Result<LinearFit> {
    if x.len() != y.len() {
        return Err(AnalyticsError::DimensionMismatch {
            left: "x",
            right: "y",
            expected: x.len(),
            got: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(AnalyticsError::InsufficientData {
            name: "x",
            needed: 2,
            got: x.len(),
        });
    }

    if x.iter().all(|v| *v == x[0]) {
        debug!("all x values identical, falling back to mean predictor");
        let mean_y = decimal::mean(y).unwrap_or(Decimal::ZERO);
        return Ok(LinearFit {
            slope: Decimal::ZERO,
            intercept: mean_y.round_dp(FIT_SCALE),
            r_squared: Decimal::ZERO,
            outcome: FitOutcome::ConstantPredictor,
        });
    }

    let xs = decimal::to_f64_vec(x);
    let ys = decimal::to_f64_vec(y);
    let mean_x = stats::mean(&xs);
    let mean_y = stats::mean(&ys);

    let ss_xx: f64 = xs.iter().map(|&xi| (xi - mean_x).powi(2)).sum();
    let ss_xy: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum();

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    let r_squared = if y.iter().all(|v| *v == y[0]) {
        1.0
    } else {
        let ss_yy: f64 = ys.iter().map(|&yi| (yi - mean_y).powi(2)).sum();
        let ss_res: f64 = xs
            .iter()
            .zip(&ys)
            .map(|(&xi, &yi)| (yi - (slope * xi + intercept)).powi(2))
            .sum();
        (1.0 - ss_res / ss_yy).clamp(0.0, 1.0)
    };

    Ok(LinearFit {
        slope: decimal::from_f64(slope, SLOPE_SCALE)?,
        intercept: decimal::from_f64(intercept, FIT_SCALE)?,
        r_squared: decimal::from_f64(r_squared, FIT_SCALE)?,
        outcome: FitOutcome::LeastSquares,
    })
}

/// Fit `values` against their positions `0..n`.
pub fn linear_regression_indexed(values: &[Decimal]) -> Result<LinearFit> {
    let x: Vec<Decimal> = (0..values.len()).map(decimal::count).collect();
    linear_regression(&x, values).map_err(|err| match err {
        AnalyticsError::InsufficientData { needed, got, .. } => AnalyticsError::InsufficientData {
            name: "values",
            needed,
            got,
        },
        other => other,
    })
}

/// Classify a trend using the default thresholds.
///
/// Volatility is checked first: a coefficient of variation above 20% or an
/// R² below 0.3 yields [`TrendDirection::Volatile`] regardless of slope.
/// Otherwise an absolute slope below 0.1 is [`TrendDirection::Stable`], and
/// the sign of the slope decides between increasing and decreasing.
pub fn classify_trend(
    slope: Decimal,
    r_squared: Decimal,
    std_dev: Decimal,
    mean_value: Decimal,
) -> TrendDirection {
    classify_trend_with(slope, r_squared, std_dev, mean_value, &TrendThresholds::default())
}

/// Classify a trend with explicit thresholds.
pub fn classify_trend_with(
    slope: Decimal,
    r_squared: Decimal,
    std_dev: Decimal,
    mean_value: Decimal,
    thresholds: &TrendThresholds,
) -> TrendDirection {
    // A ratio beyond the decimal range is as volatile as it gets.
    let cv_percent = if mean_value.is_zero() {
        Decimal::ZERO
    } else {
        std_dev
            .checked_div(mean_value)
            .and_then(|cv| cv.checked_mul(dec!(100)))
            .unwrap_or(Decimal::MAX)
    };

    if cv_percent > thresholds.volatility_cv_percent || r_squared < thresholds.min_r_squared {
        TrendDirection::Volatile
    } else if slope.abs() < thresholds.stable_slope {
        TrendDirection::Stable
    } else if slope > Decimal::ZERO {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    }
}

/// Fit a trend over index positions and classify it.
///
/// # Errors
/// Fewer than two values.
pub fn analyze_trend(values: &[Decimal]) -> Result<TrendResult> {
    analyze_trend_with(values, &TrendThresholds::default())
}

/// [`analyze_trend`] with explicit thresholds.
pub fn analyze_trend_with(values: &[Decimal], thresholds: &TrendThresholds) -> Result<TrendResult> {
    let fit = linear_regression_indexed(values)?;

    let floats = decimal::to_f64_vec(values);
    let std_dev = decimal::from_f64(stats::std_dev(&floats), FIT_SCALE)?;
    let mean_value = decimal::mean(values).unwrap_or(Decimal::ZERO);

    let trend_direction =
        classify_trend_with(fit.slope, fit.r_squared, std_dev, mean_value, thresholds);

    Ok(TrendResult {
        slope: fit.slope,
        intercept: fit.intercept,
        r_squared: fit.r_squared,
        trend_direction,
    })
}
