//! Additive seasonal decomposition.
//!
//! Splits a series into three components that sum back to the input:
//! - Trend: centered moving average, edges filled from the nearest value
//! - Seasonal: mean detrended value per phase, tiled over the series
//! - Residual: what remains

use crate::config::thresholds::DEFAULT_SEASONAL_PERIOD;
use crate::core::decimal::{self, FIT_SCALE};
use crate::error::{AnalyticsError, Result};
use crate::transform::centered_moving_average;
use crate::utils::stats;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of an additive decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    pub trend: Vec<Decimal>,
    pub seasonal: Vec<Decimal>,
    pub residual: Vec<Decimal>,
    pub period: usize,
    /// True when the series was shorter than two periods and was returned
    /// as pure trend.
    pub fallback: bool,
}

impl Decomposition {
    fn passthrough(values: &[Decimal], period: usize) -> Self {
        Self {
            trend: values.to_vec(),
            seasonal: vec![Decimal::ZERO; values.len()],
            residual: vec![Decimal::ZERO; values.len()],
            period,
            fallback: true,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.trend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trend.is_empty()
    }

    /// Seasonal strength in `[0, 1]`; values near 1 indicate a strong
    /// repeating pattern.
    pub fn seasonal_strength(&self) -> Result<Decimal> {
        strength(&self.seasonal, &self.residual)
    }

    /// Trend strength in `[0, 1]`; values near 1 indicate a strong trend.
    pub fn trend_strength(&self) -> Result<Decimal> {
        strength(&self.trend, &self.residual)
    }
}

/// `max(0, 1 - Var(residual) / Var(component + residual))`.
fn strength(component: &[Decimal], residual: &[Decimal]) -> Result<Decimal> {
    let residual_f = decimal::to_f64_vec(residual);
    let combined = component
        .iter()
        .zip(residual)
        .map(|(&c, &r)| decimal::add(c, r).map(decimal::to_f64))
        .collect::<Result<Vec<f64>>>()?;

    let var_combined = stats::variance(&combined);
    if var_combined.is_nan() || var_combined < 1e-10 {
        return Ok(Decimal::ZERO);
    }
    let var_residual = stats::variance(&residual_f);

    decimal::from_f64((1.0 - var_residual / var_combined).max(0.0), FIT_SCALE)
}

/// Additive decomposition with the default weekly period.
pub fn decompose_weekly(values: &[Decimal]) -> Result<Decomposition> {
    decompose(values, DEFAULT_SEASONAL_PERIOD)
}

/// Decompose `values` with the given seasonal `period`.
///
/// Series shorter than `2 * period` are returned unchanged as trend with
/// zero seasonal and residual components (see [`Decomposition::fallback`]).
///
/// # Errors
/// `period` of zero, or a component outside the decimal range.
///
/// # Example
/// ```
/// use kpi_trends::seasonality::decompose;
/// use rust_decimal::Decimal;
///
/// let values: Vec<Decimal> = (0..21).map(|i| Decimal::from(100 + (i % 7) * 2)).collect();
/// let parts = decompose(&values, 7).unwrap();
/// for i in 0..values.len() {
///     assert_eq!(parts.trend[i] + parts.seasonal[i] + parts.residual[i], values[i]);
/// }
/// ```
pub fn decompose(values: &[Decimal], period: usize) -> Result<Decomposition> {
    if period < 1 {
        return Err(AnalyticsError::invalid("period", "must be at least 1"));
    }

    let n = values.len();
    if n < 2 * period {
        debug!(
            "series of {} points shorter than two periods of {}, returning as trend",
            n, period
        );
        return Ok(Decomposition::passthrough(values, period));
    }

    let half_window = period / 2;
    let raw_trend = centered_moving_average(values, half_window)?;
    let trend = fill_edges(&raw_trend);

    // Phase sums over positions where the centered average was defined.
    let mut phase_sum = vec![Decimal::ZERO; period];
    let mut phase_count = vec![0usize; period];
    for (i, (value, t)) in values.iter().zip(&raw_trend).enumerate() {
        if let Some(t) = t {
            let detrended = decimal::sub(*value, *t)?;
            phase_sum[i % period] = decimal::add(phase_sum[i % period], detrended)?;
            phase_count[i % period] += 1;
        }
    }

    let seasonal_index: Vec<Decimal> = phase_sum
        .iter()
        .zip(&phase_count)
        .map(|(&sum, &count)| {
            if count == 0 {
                Decimal::ZERO
            } else {
                sum / decimal::count(count)
            }
        })
        .collect();

    let seasonal: Vec<Decimal> = (0..n).map(|i| seasonal_index[i % period]).collect();
    let residual = (0..n)
        .map(|i| decimal::sub(decimal::sub(values[i], trend[i])?, seasonal[i]))
        .collect::<Result<Vec<Decimal>>>()?;

    Ok(Decomposition {
        trend,
        seasonal,
        residual,
        period,
        fallback: false,
    })
}

/// Replace leading and trailing gaps with the nearest defined value.
fn fill_edges(raw: &[Option<Decimal>]) -> Vec<Decimal> {
    let first = raw.iter().flatten().next().copied().unwrap_or(Decimal::ZERO);
    let mut last = first;

    raw.iter()
        .map(|v| {
            if let Some(v) = v {
                last = *v;
            }
            last
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn weekly_pattern(weeks: usize) -> Vec<Decimal> {
        let pattern = [dec!(0), dec!(2), dec!(4), dec!(2), dec!(0), dec!(-4), dec!(-4)];
        (0..weeks * 7).map(|i| dec!(100) + pattern[i % 7]).collect()
    }

    #[test]
    fn short_series_falls_back_to_trend() {
        let values = vec![dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)];

        let parts = decompose(&values, 3).unwrap();

        assert!(parts.is_fallback());
        assert_eq!(parts.trend, values);
        assert!(parts.seasonal.iter().all(|s| s.is_zero()));
        assert!(parts.residual.iter().all(|r| r.is_zero()));
    }

    #[test]
    fn empty_series_falls_back() {
        let parts = decompose(&[], 7).unwrap();
        assert!(parts.is_fallback());
        assert!(parts.is_empty());
    }

    #[test]
    fn zero_period_is_rejected() {
        assert!(matches!(
            decompose(&[dec!(1)], 0),
            Err(AnalyticsError::InvalidParameter { name: "period", .. })
        ));
    }

    #[test]
    fn components_sum_to_input() {
        let values: Vec<Decimal> = (0..30)
            .map(|i| Decimal::from(80 + i) + Decimal::from((i * 7) % 5))
            .collect();

        let parts = decompose(&values, 7).unwrap();

        assert!(!parts.is_fallback());
        assert_eq!(parts.len(), values.len());
        for i in 0..values.len() {
            let rebuilt = parts.trend[i] + parts.seasonal[i] + parts.residual[i];
            assert!((rebuilt - values[i]).abs() < dec!(0.000000000001));
        }
    }

    #[test]
    fn pure_weekly_pattern_is_recovered() {
        // Pattern sums to zero, so the 7-point centered average is flat.
        let values = weekly_pattern(4);

        let parts = decompose_weekly(&values).unwrap();

        for i in 0..values.len() {
            assert_eq!(parts.trend[i], dec!(100));
            assert_eq!(parts.seasonal[i], values[i] - dec!(100));
            assert_eq!(parts.residual[i], Decimal::ZERO);
        }
        assert_eq!(parts.seasonal_strength().unwrap(), Decimal::ONE);
    }

    #[test]
    fn seasonal_component_repeats_every_period() {
        let values: Vec<Decimal> = (0..28)
            .map(|i| Decimal::from(i) + weekly_pattern(4)[i as usize])
            .collect();

        let parts = decompose(&values, 7).unwrap();

        for i in 7..values.len() {
            assert_eq!(parts.seasonal[i], parts.seasonal[i - 7]);
        }
    }

    #[test]
    fn trend_edges_are_filled_from_nearest_value() {
        let values: Vec<Decimal> = (0..14).map(Decimal::from).collect();

        let parts = decompose(&values, 7).unwrap();

        // half window 3: positions 0..3 take trend[3], positions 11..14 take trend[10]
        assert_eq!(parts.trend[0], dec!(3));
        assert_eq!(parts.trend[2], dec!(3));
        assert_eq!(parts.trend[3], dec!(3));
        assert_eq!(parts.trend[10], dec!(10));
        assert_eq!(parts.trend[13], dec!(10));
    }

    #[test]
    fn linear_series_has_strong_trend() {
        let values: Vec<Decimal> = (0..28).map(|i| Decimal::from(2 * i)).collect();
        let parts = decompose(&values, 7).unwrap();
        assert!(parts.trend_strength().unwrap() > dec!(0.9));
    }

    #[test]
    fn detrending_outside_decimal_range_is_an_error() {
        let values = [Decimal::MAX, Decimal::MIN, Decimal::MAX, Decimal::MIN];
        assert!(matches!(
            decompose(&values, 2),
            Err(AnalyticsError::ComputationError(_))
        ));
    }

    #[test]
    fn fill_edges_handles_all_missing() {
        assert_eq!(fill_edges(&[None, None]), vec![Decimal::ZERO, Decimal::ZERO]);
        assert_eq!(
            fill_edges(&[None, Some(dec!(2)), None, Some(dec!(4)), None]),
            vec![dec!(2), dec!(2), dec!(2), dec!(4), dec!(4)]
        );
    }
}
