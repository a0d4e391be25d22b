//! Tunable thresholds and default parameters.
//!
//! The defaults reproduce the documented behaviour; deployments that want a
//! different sensitivity construct their own values instead of editing
//! constants.

use crate::error::{AnalyticsError, Result};
use crate::transform::window::validate_smoothing;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Coefficient of variation (percent) above which a series is volatile.
pub const VOLATILITY_CV_PERCENT: Decimal = dec!(20);
/// R² below which a fitted trend is considered unreliable.
pub const MIN_TREND_R_SQUARED: Decimal = dec!(0.3);
/// Absolute slope below which a series is considered stable.
pub const STABLE_SLOPE: Decimal = dec!(0.1);

/// R² a series must exceed before auto-selection considers a trend model.
pub const AUTO_MIN_R_SQUARED: Decimal = dec!(0.7);
/// Absolute slope a series must exceed before auto-selection considers a trend model.
pub const AUTO_MIN_SLOPE: Decimal = dec!(0.1);
/// Absolute slope above which auto-selection prefers Holt over linear extrapolation.
pub const AUTO_HOLT_SLOPE: Decimal = dec!(0.05);

pub const DEFAULT_ALPHA: Decimal = dec!(0.3);
pub const DEFAULT_BETA: Decimal = dec!(0.1);
pub const DEFAULT_HORIZON: usize = 7;
pub const DEFAULT_ANOMALY_THRESHOLD: Decimal = dec!(2.0);
pub const DEFAULT_SEASONAL_PERIOD: usize = 7;

/// Thresholds used by trend classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendThresholds {
    /// Coefficient of variation in percent.
    pub volatility_cv_percent: Decimal,
    pub min_r_squared: Decimal,
    pub stable_slope: Decimal,
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            volatility_cv_percent: VOLATILITY_CV_PERCENT,
            min_r_squared: MIN_TREND_R_SQUARED,
            stable_slope: STABLE_SLOPE,
        }
    }
}

impl TrendThresholds {
    pub fn with_volatility_cv_percent(mut self, percent: Decimal) -> Self {
        self.volatility_cv_percent = percent;
        self
    }

    pub fn with_min_r_squared(mut self, r_squared: Decimal) -> Self {
        self.min_r_squared = r_squared;
        self
    }

    pub fn with_stable_slope(mut self, slope: Decimal) -> Self {
        self.stable_slope = slope;
        self
    }
}

/// Thresholds used by forecast method auto-selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionThresholds {
    pub min_r_squared: Decimal,
    pub min_slope: Decimal,
    pub holt_slope: Decimal,
}

impl Default for SelectionThresholds {
    fn default() -> Self {
        Self {
            min_r_squared: AUTO_MIN_R_SQUARED,
            min_slope: AUTO_MIN_SLOPE,
            holt_slope: AUTO_HOLT_SLOPE,
        }
    }
}

/// Smoothing parameters and horizon shared by the forecasting methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Level smoothing factor in `(0, 1]`.
    pub alpha: Decimal,
    /// Trend smoothing factor in `(0, 1]`.
    pub beta: Decimal,
    pub horizon: usize,
    pub selection: SelectionThresholds,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            horizon: DEFAULT_HORIZON,
            selection: SelectionThresholds::default(),
        }
    }
}

impl ForecastConfig {
    /// Create a validated configuration.
    pub fn new(alpha: Decimal, beta: Decimal, horizon: usize) -> Result<Self> {
        let config = Self {
            alpha,
            beta,
            horizon,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_selection(mut self, selection: SelectionThresholds) -> Self {
        self.selection = selection;
        self
    }

    /// Check smoothing factors; useful after deserialising a configuration.
    pub fn validate(&self) -> Result<()> {
        validate_smoothing("alpha", self.alpha)?;
        validate_smoothing("beta", self.beta)
    }
}

/// Validate an anomaly threshold expressed in standard deviations.
pub(crate) fn validate_threshold(threshold_std: Decimal) -> Result<()> {
    if threshold_std <= Decimal::ZERO {
        return Err(AnalyticsError::invalid(
            "threshold_std",
            format!("must be positive, got {threshold_std}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_trend_thresholds() {
        let t = TrendThresholds::default();
        assert_eq!(t.volatility_cv_percent, dec!(20));
        assert_eq!(t.min_r_squared, dec!(0.3));
        assert_eq!(t.stable_slope, dec!(0.1));

        let tuned = t.with_stable_slope(dec!(0.5)).with_min_r_squared(dec!(0.5));
        assert_eq!(tuned.stable_slope, dec!(0.5));
        assert_eq!(tuned.min_r_squared, dec!(0.5));
        assert_eq!(tuned.volatility_cv_percent, dec!(20));
    }

    #[test]
    fn default_forecast_config() {
        let config = ForecastConfig::default();
        assert_eq!(config.alpha, dec!(0.3));
        assert_eq!(config.beta, dec!(0.1));
        assert_eq!(config.horizon, 7);
        assert_eq!(config.selection, SelectionThresholds::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn forecast_config_rejects_invalid_factors() {
        assert!(matches!(
            ForecastConfig::new(dec!(0), dec!(0.1), 7),
            Err(AnalyticsError::InvalidParameter { name: "alpha", .. })
        ));
        assert!(matches!(
            ForecastConfig::new(dec!(0.3), dec!(1.5), 7),
            Err(AnalyticsError::InvalidParameter { name: "beta", .. })
        ));
        assert!(ForecastConfig::new(dec!(1), dec!(1), 0).is_ok());
    }

    #[test]
    fn forecast_config_roundtrips_through_json() {
        let config = ForecastConfig::default().with_horizon(14);
        let json = serde_json::to_string(&config).unwrap();
        let back: ForecastConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn anomaly_threshold_must_be_positive() {
        assert!(validate_threshold(dec!(2.0)).is_ok());
        assert!(matches!(
            validate_threshold(dec!(0)),
            Err(AnalyticsError::InvalidParameter { name: "threshold_std", .. })
        ));
    }
}
