//! metricring runtime library entry.
//!
//! This crate wires the core registries into a running process: the registry
//! directory, the Tokio tasks that rotate tracking registries on a timer, and
//! the strict YAML config that declares registries up front. It is consumed by
//! the reporter binary (`main.rs`) and by integration tests.

pub mod config;
pub mod directory;
pub mod tracking;

pub use directory::RegistryDirectory;
pub use tracking::{TrackingOptions, TrackingRegistry};
