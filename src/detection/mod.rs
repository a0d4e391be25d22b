//! Anomaly detection for KPI series.

mod anomaly;

pub use anomaly::{detect_anomalies, detect_anomalies_default, MIN_ANOMALY_POINTS};
