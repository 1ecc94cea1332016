//! Shared error type across metricring crates.

use thiserror::Error;

/// Stable error codes for exposers (HTTP pages, CLI output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Blank metric name.
    EmptyMetricName,
    /// Blank registry name.
    EmptyRegistryName,
    /// Metric name already registered in the registry.
    MetricNameExists,
    /// Registry name already present in the directory.
    RegistryNameExists,
    /// Lookup of a metric that was never registered.
    MetricNameUnknown,
    /// Lookup of a registry that was never created.
    RegistryNameUnknown,
    /// Tracking interval is zero or out of range.
    InvalidInterval,
    /// Configuration rejected.
    Config,
    /// Internal failure.
    Internal,
}

impl ErrorCode {
    /// String representation used in rendered output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyMetricName => "EMPTY_METRIC_NAME",
            ErrorCode::EmptyRegistryName => "EMPTY_REGISTRY_NAME",
            ErrorCode::MetricNameExists => "METRIC_NAME_EXISTS",
            ErrorCode::RegistryNameExists => "REGISTRY_NAME_EXISTS",
            ErrorCode::MetricNameUnknown => "METRIC_NAME_UNKNOWN",
            ErrorCode::RegistryNameUnknown => "REGISTRY_NAME_UNKNOWN",
            ErrorCode::InvalidInterval => "INVALID_INTERVAL",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    #[error("metric name is empty")]
    EmptyMetricName,
    #[error("registry name is empty")]
    EmptyRegistryName,
    #[error("metric with given name exists: {0}")]
    MetricNameExists(String),
    #[error("registry with given name exists: {0}")]
    RegistryNameExists(String),
    #[error("undefined metric name {0}")]
    MetricNameUnknown(String),
    #[error("undefined registry name {0}")]
    RegistryNameUnknown(String),
    #[error("tracking interval must be a non-zero duration representable as a timestamp offset")]
    InvalidInterval,
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricsError::EmptyMetricName => ErrorCode::EmptyMetricName,
            MetricsError::EmptyRegistryName => ErrorCode::EmptyRegistryName,
            MetricsError::MetricNameExists(_) => ErrorCode::MetricNameExists,
            MetricsError::RegistryNameExists(_) => ErrorCode::RegistryNameExists,
            MetricsError::MetricNameUnknown(_) => ErrorCode::MetricNameUnknown,
            MetricsError::RegistryNameUnknown(_) => ErrorCode::RegistryNameUnknown,
            MetricsError::InvalidInterval => ErrorCode::InvalidInterval,
            MetricsError::Config(_) => ErrorCode::Config,
            MetricsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
