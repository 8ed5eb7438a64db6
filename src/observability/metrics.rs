//! Metrics collection.
//!
//! # Metrics
//! - `ingress_config_reloads_total` (counter): reload attempts by result
//! - `ingress_config_ingress_classes` (gauge): classes in the active snapshot
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! embedding process installs a recorder.

use crate::config::IngressConfig;

/// Record the outcome of a reload attempt.
pub fn record_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    ::metrics::counter!("ingress_config_reloads_total", "result" => result).increment(1);
}

/// Record gauges describing the snapshot that just became active.
pub fn record_snapshot(config: &IngressConfig) {
    ::metrics::gauge!("ingress_config_ingress_classes").set(config.ingress_classes().len() as f64);
}
