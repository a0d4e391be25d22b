//! Forecast result structure for holding predictions.

use crate::core::decimal;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Forecasting method that produced a [`ForecastResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    SimpleExponentialSmoothing,
    DoubleExponentialSmoothing,
    LinearTrendExtrapolation,
}

impl ForecastMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ForecastMethod::SimpleExponentialSmoothing => "simple_exponential_smoothing",
            ForecastMethod::DoubleExponentialSmoothing => "double_exponential_smoothing",
            ForecastMethod::LinearTrendExtrapolation => "linear_trend_extrapolation",
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predictions over a forecast horizon with bounds and confidence.
///
/// The four sequences always have the same length, and for every step
/// `lower_bounds[i] <= predictions[i] <= upper_bounds[i]`.
/// `confidence_scores` never increases along the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub predictions: Vec<Decimal>,
    pub lower_bounds: Vec<Decimal>,
    pub upper_bounds: Vec<Decimal>,
    pub confidence_scores: Vec<Decimal>,
    pub method: ForecastMethod,
    /// In-sample accuracy in `[0, 100]`.
    pub accuracy_score: Decimal,
}

impl ForecastResult {
    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Iterate over `(prediction, lower, upper, confidence)` per step.
    pub fn steps(&self) -> impl Iterator<Item = (Decimal, Decimal, Decimal, Decimal)> + '_ {
        self.predictions
            .iter()
            .zip(&self.lower_bounds)
            .zip(&self.upper_bounds)
            .zip(&self.confidence_scores)
            .map(|(((&p, &l), &u), &c)| (p, l, u, c))
    }
}

/// Accumulates per-step values while a model walks the horizon.
#[derive(Debug, Clone)]
pub(crate) struct ForecastBuilder {
    predictions: Vec<Decimal>,
    lower_bounds: Vec<Decimal>,
    upper_bounds: Vec<Decimal>,
    confidence_scores: Vec<Decimal>,
}

impl ForecastBuilder {
    pub(crate) fn with_horizon(horizon: usize) -> Self {
        Self {
            predictions: Vec::with_capacity(horizon),
            lower_bounds: Vec::with_capacity(horizon),
            upper_bounds: Vec::with_capacity(horizon),
            confidence_scores: Vec::with_capacity(horizon),
        }
    }

    /// Record one step. `margin` is clamped at zero so bounds never cross
    /// the prediction.
    ///
    /// Fails with `ComputationError` when a bound leaves the decimal range.
    pub(crate) fn push(
        &mut self,
        prediction: Decimal,
        margin: Decimal,
        confidence: Decimal,
    ) -> Result<()> {
        let margin = margin.max(Decimal::ZERO);
        let lower = decimal::sub(prediction, margin)?;
        let upper = decimal::add(prediction, margin)?;
        self.predictions.push(prediction);
        self.lower_bounds.push(lower);
        self.upper_bounds.push(upper);
        self.confidence_scores.push(confidence);
        Ok(())
    }

    pub(crate) fn finish(self, method: ForecastMethod, accuracy_score: Decimal) -> ForecastResult {
        ForecastResult {
            predictions: self.predictions,
            lower_bounds: self.lower_bounds,
            upper_bounds: self.upper_bounds,
            confidence_scores: self.confidence_scores,
            method,
            accuracy_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn builder_keeps_sequences_aligned() {
        let mut builder = ForecastBuilder::with_horizon(2);
        builder.push(dec!(10), dec!(1.5), dec!(85)).unwrap();
        builder.push(dec!(11), dec!(2), dec!(83)).unwrap();
        let result = builder.finish(ForecastMethod::SimpleExponentialSmoothing, dec!(97.5));

        assert_eq!(result.horizon(), 2);
        assert_eq!(result.lower_bounds, vec![dec!(8.5), dec!(9)]);
        assert_eq!(result.upper_bounds, vec![dec!(11.5), dec!(13)]);
        assert_eq!(result.confidence_scores, vec![dec!(85), dec!(83)]);

        let steps: Vec<_> = result.steps().collect();
        assert_eq!(steps[1], (dec!(11), dec!(9), dec!(13), dec!(83)));
    }

    #[test]
    fn negative_margin_collapses_to_point() {
        let mut builder = ForecastBuilder::with_horizon(1);
        builder.push(dec!(5), dec!(-1), dec!(50)).unwrap();
        let result = builder.finish(ForecastMethod::LinearTrendExtrapolation, dec!(0));
        assert_eq!(result.lower_bounds, vec![dec!(5)]);
        assert_eq!(result.upper_bounds, vec![dec!(5)]);
    }

    #[test]
    fn bound_outside_decimal_range_is_rejected() {
        let mut builder = ForecastBuilder::with_horizon(1);
        assert!(matches!(
            builder.push(Decimal::MAX, dec!(1), dec!(80)),
            Err(crate::error::AnalyticsError::ComputationError(_))
        ));
        let result = builder.finish(ForecastMethod::SimpleExponentialSmoothing, dec!(0));
        assert!(result.is_empty());
    }

    #[test]
    fn empty_horizon() {
        let result = ForecastBuilder::with_horizon(0)
            .finish(ForecastMethod::DoubleExponentialSmoothing, dec!(100));
        assert!(result.is_empty());
        assert_eq!(result.horizon(), 0);
    }

    #[test]
    fn method_serializes_as_snake_case() {
        let json = serde_json::to_string(&ForecastMethod::DoubleExponentialSmoothing).unwrap();
        assert_eq!(json, "\"double_exponential_smoothing\"");
        assert_eq!(
            ForecastMethod::LinearTrendExtrapolation.to_string(),
            "linear_trend_extrapolation"
        );
    }
}
