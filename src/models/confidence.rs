//! Linearly decaying confidence scores.

use crate::core::decimal::{self, CONFIDENCE_SCALE};
use rust_decimal::Decimal;

/// Confidence that starts at `start` and loses `step` points per forecast
/// step, never dropping below `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ConfidenceDecay {
    pub start: Decimal,
    pub step: Decimal,
    pub floor: Decimal,
}

impl ConfidenceDecay {
    pub(crate) const fn new(start: Decimal, step: Decimal, floor: Decimal) -> Self {
        Self { start, step, floor }
    }

    /// Confidence at 1-based forecast step `h`.
    pub(crate) fn at(&self, h: usize) -> Decimal {
        let decayed = self.start - self.step * decimal::count(h.saturating_sub(1));
        decayed.max(self.floor).round_dp(CONFIDENCE_SCALE)
    }
}
