//! Per-KPI profiles: plausible bounds, volatility and direction.
//!
//! The table is immutable and keyed by [`KpiType`]; it is consulted when
//! generating demo series and when deciding whether a trend is good news.

use crate::core::decimal::{self, to_f64};
use crate::core::KpiSeries;
use crate::error::{AnalyticsError, Result};
use crate::features::TrendDirection;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// KPI types tracked by the operations system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiType {
    Efficiency,
    Oee,
    AttendanceRate,
    AbsenteeismRate,
    DefectRate,
    FirstPassYield,
    DowntimeMinutes,
    ShiftCoverage,
    BradfordFactor,
}

/// Static characteristics of a KPI type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiProfile {
    /// Typical value around which demo data is generated.
    pub baseline: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    /// Maximum day-to-day deviation from the baseline.
    pub volatility: Decimal,
    pub higher_is_better: bool,
}

impl KpiType {
    pub const ALL: [KpiType; 9] = [
        KpiType::Efficiency,
        KpiType::Oee,
        KpiType::AttendanceRate,
        KpiType::AbsenteeismRate,
        KpiType::DefectRate,
        KpiType::FirstPassYield,
        KpiType::DowntimeMinutes,
        KpiType::ShiftCoverage,
        KpiType::BradfordFactor,
    ];

    pub fn profile(self) -> KpiProfile {
        let (baseline, min, max, volatility, higher_is_better) = match self {
            KpiType::Efficiency => (dec!(85), dec!(60), dec!(100), dec!(3), true),
            KpiType::Oee => (dec!(75), dec!(40), dec!(100), dec!(4), true),
            KpiType::AttendanceRate => (dec!(94), dec!(70), dec!(100), dec!(2), true),
            KpiType::AbsenteeismRate => (dec!(6), dec!(0), dec!(30), dec!(1.5), false),
            KpiType::DefectRate => (dec!(2.5), dec!(0), dec!(15), dec!(0.8), false),
            KpiType::FirstPassYield => (dec!(96), dec!(80), dec!(100), dec!(1.5), true),
            KpiType::DowntimeMinutes => (dec!(45), dec!(0), dec!(480), dec!(15), false),
            KpiType::ShiftCoverage => (dec!(92), dec!(60), dec!(100), dec!(3), true),
            KpiType::BradfordFactor => (dec!(80), dec!(0), dec!(1000), dec!(25), false),
        };
        KpiProfile {
            baseline,
            min,
            max,
            volatility,
            higher_is_better,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KpiType::Efficiency => "efficiency",
            KpiType::Oee => "oee",
            KpiType::AttendanceRate => "attendance_rate",
            KpiType::AbsenteeismRate => "absenteeism_rate",
            KpiType::DefectRate => "defect_rate",
            KpiType::FirstPassYield => "first_pass_yield",
            KpiType::DowntimeMinutes => "downtime_minutes",
            KpiType::ShiftCoverage => "shift_coverage",
            KpiType::BradfordFactor => "bradford_factor",
        }
    }
}

impl FromStr for KpiType {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        KpiType::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| AnalyticsError::invalid("kpi_type", format!("unknown KPI type {s:?}")))
    }
}

impl fmt::Display for KpiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl KpiProfile {
    /// Clamp a value into the profile's plausible range.
    pub fn clamp(&self, value: Decimal) -> Decimal {
        value.clamp(self.min, self.max)
    }

    /// Whether a trend direction is an improvement for this KPI.
    ///
    /// `None` for stable or volatile series.
    pub fn is_improving(&self, direction: TrendDirection) -> Option<bool> {
        match direction {
            TrendDirection::Increasing => Some(self.higher_is_better),
            TrendDirection::Decreasing => Some(!self.higher_is_better),
            TrendDirection::Stable | TrendDirection::Volatile => None,
        }
    }

    /// Deterministic demo values: uniform noise of at most `volatility`
    /// around the baseline, clamped to `[min, max]`, two decimal places.
    pub fn synthesize(&self, days: usize, seed: u64) -> Result<Vec<Decimal>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let baseline = to_f64(self.baseline);
        let volatility = to_f64(self.volatility);

        (0..days)
            .map(|_| {
                let noise = if volatility > 0.0 {
                    rng.gen_range(-volatility..=volatility)
                } else {
                    0.0
                };
                decimal::from_f64(baseline + noise, 2).map(|v| self.clamp(v))
            })
            .collect()
    }

    /// Demo series of consecutive days starting at `start`.
    pub fn synthesize_series(&self, start: NaiveDate, days: usize, seed: u64) -> Result<KpiSeries> {
        Ok(KpiSeries::daily(start, self.synthesize(days, seed)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_profile_is_consistent() {
        for kpi in KpiType::ALL {
            let p = kpi.profile();
            assert!(p.min <= p.baseline && p.baseline <= p.max, "{kpi}");
            assert!(p.volatility > Decimal::ZERO, "{kpi}");
        }
    }

    #[test]
    fn tags_roundtrip() {
        for kpi in KpiType::ALL {
            assert_eq!(kpi.to_string().parse::<KpiType>().unwrap(), kpi);
        }
        assert!(matches!(
            "throughput".parse::<KpiType>(),
            Err(AnalyticsError::InvalidParameter { name: "kpi_type", .. })
        ));
    }

    #[test]
    fn serde_uses_the_same_tags() {
        let json = serde_json::to_string(&KpiType::BradfordFactor).unwrap();
        assert_eq!(json, "\"bradford_factor\"");
    }

    #[test]
    fn synthesize_is_deterministic_and_bounded() {
        let profile = KpiType::Efficiency.profile();
        let a = profile.synthesize(60, 7).unwrap();
        let b = profile.synthesize(60, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 60);

        for v in &a {
            assert!(*v >= dec!(82) && *v <= dec!(88));
            assert!(v.scale() <= 2);
        }

        assert_ne!(a, profile.synthesize(60, 8).unwrap());
    }

    #[test]
    fn synthesize_clamps_to_range() {
        let profile = KpiProfile {
            baseline: dec!(99.5),
            min: dec!(0),
            max: dec!(100),
            volatility: dec!(5),
            higher_is_better: true,
        };
        for v in profile.synthesize(200, 1).unwrap() {
            assert!(v <= dec!(100));
        }
    }

    #[test]
    fn synthesize_series_is_daily() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = KpiType::Oee
            .profile()
            .synthesize_series(start, 10, 3)
            .unwrap();
        assert_eq!(series.len(), 10);
        assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2024, 1, 10));
    }

    #[test]
    fn improvement_depends_on_direction_of_goodness() {
        let efficiency = KpiType::Efficiency.profile();
        let defects = KpiType::DefectRate.profile();
        assert_eq!(efficiency.is_improving(TrendDirection::Increasing), Some(true));
        assert_eq!(defects.is_improving(TrendDirection::Increasing), Some(false));
        assert_eq!(defects.is_improving(TrendDirection::Decreasing), Some(true));
        assert_eq!(efficiency.is_improving(TrendDirection::Volatile), None);
    }
}
