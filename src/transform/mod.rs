//! Smoothing transformations for KPI series.
//!
//! # Example
//!
//! ```
//! use kpi_trends::transform::{exponential_moving_average, moving_average};
//! use rust_decimal_macros::dec;
//!
//! let series = vec![dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)];
//!
//! // Trailing mean with window 3
//! let ma = moving_average(&series, 3).unwrap();
//!
//! // Exponential smoothing
//! let ema = exponential_moving_average(&series, dec!(0.3)).unwrap();
//! assert_eq!(ma.len(), ema.len());
//! ```

pub mod window;

pub use window::{centered_moving_average, exponential_moving_average, moving_average};
