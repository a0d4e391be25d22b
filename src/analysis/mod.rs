//! One-call summary of a dated KPI series.
//!
//! Combines smoothing, trend analysis, anomaly detection and an
//! automatically selected forecast, and maps positional results back onto
//! calendar dates.

use crate::config::ForecastConfig;
use crate::core::{ForecastMethod, ForecastResult, KpiPoint, KpiSeries};
use crate::detection::detect_anomalies_default;
use crate::error::{AnalyticsError, Result};
use crate::features::{analyze_trend, TrendResult};
use crate::models::auto_forecast_with;
use crate::transform::moving_average;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single dated forecast step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub prediction: Decimal,
    pub lower: Decimal,
    pub upper: Decimal,
    pub confidence: Decimal,
}

/// Everything the dashboard layer shows for one KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub latest: KpiPoint,
    pub moving_average: Vec<Option<Decimal>>,
    pub trend: TrendResult,
    pub anomalies: Vec<KpiPoint>,
    pub method: ForecastMethod,
    pub accuracy_score: Decimal,
    pub forecast: Vec<ForecastPoint>,
}

impl KpiSummary {
    pub fn anomaly_dates(&self) -> Vec<NaiveDate> {
        self.anomalies.iter().map(|p| p.date).collect()
    }
}

/// Attach calendar dates to the steps of `forecast`.
pub fn dated_forecast(series: &KpiSeries, forecast: &ForecastResult) -> Vec<ForecastPoint> {
    series
        .forecast_dates(forecast.horizon())
        .into_iter()
        .zip(forecast.steps())
        .map(|(date, (prediction, lower, upper, confidence))| ForecastPoint {
            date,
            prediction,
            lower,
            upper,
            confidence,
        })
        .collect()
}

/// Summarize `series` with a `window`-point moving average and a forecast
/// configured by `config`.
///
/// # Errors
/// Fewer than two observations, a zero `window`, or an invalid `config`.
pub fn summarize(series: &KpiSeries, config: &ForecastConfig, window: usize) -> Result<KpiSummary> {
    let values = series.values();
    let trend = analyze_trend(values)?;
    let moving_average = moving_average(values, window)?;
    let forecast = auto_forecast_with(values, config)?;

    let anomalies: Vec<KpiPoint> = detect_anomalies_default(values)
        .into_iter()
        .filter_map(|i| series.date_at(i).map(|date| KpiPoint::new(date, values[i])))
        .collect();

    let latest = series
        .points()
        .last()
        .ok_or(AnalyticsError::InsufficientData {
            name: "series",
            needed: 1,
            got: 0,
        })?;

    debug!(
        "summarized {} points: {} trend, {} anomalies, {} forecast",
        series.len(),
        trend.trend_direction,
        anomalies.len(),
        forecast.method
    );

    Ok(KpiSummary {
        latest,
        moving_average,
        trend,
        anomalies,
        method: forecast.method,
        accuracy_score: forecast.accuracy_score,
        forecast: dated_forecast(series, &forecast),
    })
}
