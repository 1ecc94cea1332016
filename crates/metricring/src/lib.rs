//! Top-level facade crate for metricring.
//!
//! Re-exports the core types and the runtime so users can depend on a single crate.

pub mod core {
    pub use metricring_core::*;
}

pub mod runtime {
    pub use metricring_runtime::*;
}

pub use metricring_core::{Counter, Gauge, Metric, MetricsError, Registry, Result, Snapshot, Value};
pub use metricring_runtime::{RegistryDirectory, TrackingOptions, TrackingRegistry};
