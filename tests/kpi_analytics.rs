//! End-to-end checks of the documented analytics behavior.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use kpi_trends::analysis::summarize;
use kpi_trends::config::{ForecastConfig, KpiType};
use kpi_trends::core::decimal::to_f64;
use kpi_trends::core::{ForecastMethod, TimeRange};
use kpi_trends::detection::detect_anomalies;
use kpi_trends::features::{linear_regression, FitOutcome};
use kpi_trends::models::{auto_forecast, double_exponential_smoothing};
use kpi_trends::seasonality::decompose;
use kpi_trends::transform::moving_average;
use kpi_trends::utils::forecast_accuracy;
use kpi_trends::AnalyticsError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn decimals(values: &[i64]) -> Vec<Decimal> {
    values.iter().map(|&v| Decimal::from(v)).collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn moving_average_leaves_warmup_empty() {
    let ma = moving_average(&decimals(&[85, 86, 87, 88, 89]), 3).unwrap();
    assert_eq!(ma, vec![None, None, Some(dec!(86)), Some(dec!(87)), Some(dec!(88))]);
}

#[test]
fn regression_recovers_exact_line() {
    let x = decimals(&[1, 2, 3, 4, 5]);
    let y = decimals(&[82, 84, 86, 88, 90]);
    let fit = linear_regression(&x, &y).unwrap();
    assert_relative_eq!(to_f64(fit.slope), 2.0, epsilon = 1e-6);
    assert_relative_eq!(to_f64(fit.intercept), 80.0, epsilon = 1e-4);
    assert_relative_eq!(to_f64(fit.r_squared), 1.0, epsilon = 1e-4);
    assert_eq!(fit.outcome, FitOutcome::LeastSquares);
}

#[test]
fn spike_is_the_only_anomaly() {
    let values = decimals(&[85, 86, 84, 120, 85, 87]);
    assert_eq!(detect_anomalies(&values, dec!(2.0)).unwrap(), vec![3]);
}

#[test]
fn holt_follows_direction() {
    let up = decimals(&[80, 82, 85, 86, 90, 93]);
    let forecast = double_exponential_smoothing(&up, 5, dec!(0.3), dec!(0.1)).unwrap();
    assert!(forecast.predictions[4] > forecast.predictions[0]);

    let down: Vec<Decimal> = up.iter().rev().copied().collect();
    let forecast = double_exponential_smoothing(&down, 5, dec!(0.3), dec!(0.1)).unwrap();
    assert!(forecast.predictions[4] < forecast.predictions[0]);
}

#[test]
fn auto_forecast_on_two_points_uses_ses() {
    let forecast = auto_forecast(&decimals(&[90, 10]), 4).unwrap();
    assert_eq!(forecast.method, ForecastMethod::SimpleExponentialSmoothing);
    assert_eq!(forecast.horizon(), 4);
}

#[test]
fn accuracy_rejects_mismatched_lengths() {
    let err = forecast_accuracy(&decimals(&[1, 2, 3]), &decimals(&[1, 2])).unwrap_err();
    assert!(matches!(err, AnalyticsError::DimensionMismatch { .. }));
    assert!(err.is_validation());
}

#[test]
fn short_decomposition_is_pure_trend() {
    let values = decimals(&[10, 12, 11, 13, 12]);
    let parts = decompose(&values, 7).unwrap();
    assert!(parts.is_fallback());
    assert_eq!(parts.trend, values);
    assert!(parts.seasonal.iter().all(|s| s.is_zero()));
    assert!(parts.residual.iter().all(|r| r.is_zero()));
}

#[test]
fn weekly_pattern_is_recovered() {
    let pattern = [5i64, -3, 0, 2, -4, 1, -1];
    let values: Vec<Decimal> = (0..28)
        .map(|i| Decimal::from(100 + pattern[i % 7]))
        .collect();
    let parts = decompose(&values, 7).unwrap();

    assert!(!parts.is_fallback());
    for (i, s) in parts.seasonal.iter().enumerate() {
        assert_eq!(*s, Decimal::from(pattern[i % 7]));
    }
    assert_relative_eq!(to_f64(parts.seasonal_strength().unwrap()), 1.0, epsilon = 1e-4);
}

#[test]
fn synthesized_kpis_summarize_cleanly() {
    let start = date(2024, 3, 1);
    let config = ForecastConfig::default();

    for (seed, kpi) in KpiType::ALL.into_iter().enumerate() {
        let profile = kpi.profile();
        let series = profile.synthesize_series(start, 90, seed as u64).unwrap();
        assert_eq!(series.len(), 90);
        assert!(series.values().iter().all(|v| profile.min <= *v && *v <= profile.max));

        let recent = series.in_range(TimeRange::Month, date(2024, 5, 29));
        assert_eq!(recent.len(), 30);
        assert_eq!(recent.first_date(), Some(date(2024, 4, 30)));

        let summary = summarize(&recent, &config, 7).unwrap();
        assert_eq!(summary.forecast.len(), config.horizon);
        assert_eq!(summary.forecast[0].date, date(2024, 5, 30));
        for point in &summary.forecast {
            assert!(point.lower <= point.prediction && point.prediction <= point.upper, "{kpi}");
        }
        assert!(summary
            .anomaly_dates()
            .iter()
            .all(|d| recent.dates().contains(d)));
    }
}

#[test]
fn summary_serializes_to_json() {
    let series = KpiType::Oee.profile().synthesize_series(date(2024, 1, 1), 14, 7).unwrap();
    let summary = summarize(&series, &ForecastConfig::default().with_horizon(3), 3).unwrap();

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["forecast"].as_array().map(Vec::len), Some(3));
    assert!(json["method"].is_string());
}
