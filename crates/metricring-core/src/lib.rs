//! metricring core: lock-free metric values, registries and snapshot rings.
//!
//! This crate holds the data structures shared by the runtime and by any
//! exposer (HTTP page, CLI dump, log reporter). It carries no async runtime
//! dependency: rotation is an ordinary synchronous call taking an explicit
//! timestamp, so the scheduling policy lives one layer up.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Producers must never be taken down by instrumentation, so every fallible
//! path surfaces as `MetricsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod clock;
pub mod error;
pub mod metric;
pub mod registry;
pub mod render;
pub mod snapshot;

pub use clock::{Clock, SystemClock};
pub use error::{ErrorCode, MetricsError, Result};
pub use metric::{Counter, Gauge, Metric, MetricKind, Sample, Value};
pub use registry::{HistoryOptions, Registry};
pub use snapshot::{Snapshot, SnapshotRing, TimestampPolicy};
