//! Dated KPI series as supplied by the persistence layer.

use crate::error::{AnalyticsError, Result};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One KPI observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

impl KpiPoint {
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }
}

/// One value per period for a single (tenant, KPI type, date range).
///
/// Dates are strictly ascending; gaps are permitted and ignored by the
/// engine, which works on positions rather than calendar distance.
///
/// Serializes as a list of [`KpiPoint`]s; deserialization goes through
/// [`KpiSeries::new`] and rejects unordered or duplicate dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<KpiPoint>", into = "Vec<KpiPoint>")]
pub struct KpiSeries {
    dates: Vec<NaiveDate>,
    values: Vec<Decimal>,
}

impl KpiSeries {
    /// Build a series from `(date, value)` points.
    pub fn new(points: impl IntoIterator<Item = KpiPoint>) -> Result<Self> {
        let (dates, values): (Vec<_>, Vec<_>) =
            points.into_iter().map(|p| (p.date, p.value)).unzip();
        Self::from_parts(dates, values)
    }

    /// Build a series from parallel date and value vectors.
    pub fn from_parts(dates: Vec<NaiveDate>, values: Vec<Decimal>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(AnalyticsError::DimensionMismatch {
                left: "dates",
                right: "values",
                expected: dates.len(),
                got: values.len(),
            });
        }
        if let Some(i) = (1..dates.len()).find(|&i| dates[i] <= dates[i - 1]) {
            return Err(AnalyticsError::UnorderedDates { index: i });
        }
        Ok(Self { dates, values })
    }

    /// Consecutive daily values starting at `start`.
    pub fn daily(start: NaiveDate, values: Vec<Decimal>) -> Self {
        let dates = (0..values.len())
            .map(|i| start + Duration::days(i as i64))
            .collect();
        Self { dates, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Decimal] {
        &self.values
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied()
    }

    pub fn points(&self) -> impl Iterator<Item = KpiPoint> + '_ {
        self.dates
            .iter()
            .zip(&self.values)
            .map(|(&date, &value)| KpiPoint { date, value })
    }

    /// Translate positional indices (e.g. anomalies) back to dates.
    ///
    /// Indices past the end of the series are skipped.
    pub fn dates_for(&self, indices: &[usize]) -> Vec<NaiveDate> {
        indices.iter().filter_map(|&i| self.date_at(i)).collect()
    }

    /// Calendar dates of forecast steps `1..=horizon`, one day apart after
    /// the last observation.
    pub fn forecast_dates(&self, horizon: usize) -> Vec<NaiveDate> {
        match self.last_date() {
            Some(last) => (1..=horizon)
                .map(|h| last + Duration::days(h as i64))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Points with `start <= date <= end`.
    pub fn within(&self, start: NaiveDate, end: NaiveDate) -> KpiSeries {
        let from = self.dates.partition_point(|d| *d < start);
        let to = self.dates.partition_point(|d| *d <= end).max(from);
        KpiSeries {
            dates: self.dates[from..to].to_vec(),
            values: self.values[from..to].to_vec(),
        }
    }

    /// Restrict to a trailing [`TimeRange`] ending at `end`.
    pub fn in_range(&self, range: TimeRange, end: NaiveDate) -> KpiSeries {
        let (start, end) = range.resolve(end);
        self.within(start, end)
    }
}

impl TryFrom<Vec<KpiPoint>> for KpiSeries {
    type Error = AnalyticsError;

    fn try_from(points: Vec<KpiPoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<KpiSeries> for Vec<KpiPoint> {
    fn from(series: KpiSeries) -> Self {
        series.points().collect()
    }
}

/// Relative lookback window accepted by the serving layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl TimeRange {
    pub fn days(self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
        }
    }

    /// Inclusive `(start, end)` covering `days()` dates ending at `end`.
    pub fn resolve(self, end: NaiveDate) -> (NaiveDate, NaiveDate) {
        (end - Duration::days(self.days() - 1), end)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Quarter => "90d",
        }
    }
}

impl FromStr for TimeRange {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "7d" => Ok(TimeRange::Week),
            "30d" => Ok(TimeRange::Month),
            "90d" => Ok(TimeRange::Quarter),
            other => Err(AnalyticsError::invalid(
                "time_range",
                format!("expected one of 7d, 30d, 90d, got {other:?}"),
            )),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
