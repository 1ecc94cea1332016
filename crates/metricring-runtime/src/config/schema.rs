use std::collections::HashSet;

use serde::Deserialize;

use metricring_core::error::{MetricsError, Result};
use metricring_core::{MetricKind, TimestampPolicy};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    pub version: u32,

    #[serde(default)]
    pub report: ReportSection,

    #[serde(default)]
    pub registries: Vec<RegistryConfig>,
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.report.validate()?;

        let mut names = HashSet::new();
        for r in &self.registries {
            r.validate()?;
            if !names.insert(r.name.as_str()) {
                return Err(MetricsError::Config(format!(
                    "duplicate registry name: {}",
                    r.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    #[serde(default = "default_report_interval_ms")]
    pub interval_ms: u64,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            interval_ms: default_report_interval_ms(),
        }
    }
}

impl ReportSection {
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms < 100 {
            return Err(MetricsError::Config(
                "report.interval_ms must be at least 100".into(),
            ));
        }
        Ok(())
    }
}

fn default_report_interval_ms() -> u64 {
    10_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    pub name: String,

    /// Present for tracking registries.
    #[serde(default)]
    pub tracking: Option<TrackingConfig>,

    #[serde(default)]
    pub metrics: Vec<MetricConfig>,
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MetricsError::Config("registry name must not be empty".into()));
        }
        if let Some(t) = &self.tracking {
            if t.interval_ms == 0 {
                return Err(MetricsError::Config(format!(
                    "registries[{}].tracking.interval_ms must be greater than 0",
                    self.name
                )));
            }
        }

        let mut names = HashSet::new();
        for m in &self.metrics {
            if m.name.is_empty() {
                return Err(MetricsError::Config(format!(
                    "registries[{}] has a metric with an empty name",
                    self.name
                )));
            }
            if !names.insert(m.name.as_str()) {
                return Err(MetricsError::Config(format!(
                    "registries[{}] declares metric {} twice",
                    self.name, m.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackingConfig {
    pub capacity: usize,
    pub interval_ms: u64,
    #[serde(default)]
    pub align: bool,
    #[serde(default)]
    pub timestamps: TimestampPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricConfig {
    pub name: String,
    pub kind: MetricKind,
}
