//! Registry config loader (strict parsing) and directory bootstrap.

pub mod schema;

use std::fs;
use std::time::Duration;

use metricring_core::error::{MetricsError, Result};
use metricring_core::{Metric, MetricKind};

use crate::directory::RegistryDirectory;
use crate::tracking::TrackingOptions;

pub use schema::{MetricConfig, MetricsConfig, RegistryConfig, ReportSection, TrackingConfig};

pub fn load_from_file(path: &str) -> Result<MetricsConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MetricsConfig> {
    let cfg: MetricsConfig =
        serde_yaml::from_str(s).map_err(|e| MetricsError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Create every registry and metric declared in `cfg`.
///
/// Tracking registries start rotating immediately, so this must run inside a
/// Tokio runtime when any are declared.
pub fn build_directory(cfg: &MetricsConfig, directory: &RegistryDirectory) -> Result<()> {
    for r in &cfg.registries {
        let metrics = r.metrics.iter().map(|m| match m.kind {
            MetricKind::Counter => Metric::counter(m.name.as_str()),
            MetricKind::Gauge => Metric::gauge(m.name.as_str()),
        });

        match &r.tracking {
            Some(t) => {
                let options = TrackingOptions::new(t.capacity, Duration::from_millis(t.interval_ms))
                    .aligned(t.align)
                    .timestamps(t.timestamps);
                directory
                    .new_tracking_registry(&r.name, options)?
                    .add_metrics(metrics)?;
            }
            None => directory.new_registry(&r.name)?.add_metrics(metrics)?,
        }
        tracing::debug!(registry = %r.name, metrics = r.metrics.len(), "registry loaded from config");
    }
    Ok(())
}
