//! Exponential smoothing models.
//!
//! This module provides exponential smoothing forecasting methods:
//! - Simple Exponential Smoothing (SES)
//! - Holt's Linear Trend (double exponential smoothing)

mod holt;
mod ses;

pub use holt::{double_exponential_smoothing, HoltLinearTrend};
pub use ses::{simple_exponential_smoothing, SimpleExponentialSmoothing};
