//! Metric values: atomic numeric cells with a name.
//!
//! Producers hold an `Arc<Counter>` / `Arc<Gauge>` and update it without any
//! registry involvement. The registry keeps a [`Metric`] handle to the same
//! cell; snapshots hold frozen [`Sample`]s with no way back to a cell.

mod counter;
mod gauge;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use counter::Counter;
pub use gauge::Gauge;

/// Metric type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// Point-in-time read-out of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    Counter(u64),
    Gauge(f64),
}

impl Value {
    pub fn kind(&self) -> MetricKind {
        match self {
            Value::Counter(_) => MetricKind::Counter,
            Value::Gauge(_) => MetricKind::Gauge,
        }
    }

    /// Counter value, `None` for gauges.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Counter(v) => Some(v),
            Value::Gauge(_) => None,
        }
    }

    /// Numeric value as a float (counters are widened).
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::Counter(v) => v as f64,
            Value::Gauge(v) => v,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Counter(v) => write!(f, "{v}"),
            Value::Gauge(v) => write!(f, "{v}"),
        }
    }
}

/// Handle to a counter or gauge cell.
///
/// Cloning a `Metric` clones the handle, not the value: both clones observe
/// the same atomic cell.
#[derive(Debug, Clone)]
pub enum Metric {
    Counter(Arc<Counter>),
    Gauge(Arc<Gauge>),
}

impl Metric {
    /// New zeroed counter handle.
    pub fn counter(name: impl Into<String>) -> Self {
        Metric::Counter(Arc::new(Counter::new(name)))
    }

    /// New zeroed gauge handle.
    pub fn gauge(name: impl Into<String>) -> Self {
        Metric::Gauge(Arc::new(Gauge::new(name)))
    }

    pub fn name(&self) -> &str {
        match self {
            Metric::Counter(c) => c.name(),
            Metric::Gauge(g) => g.name(),
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Metric::Counter(_) => MetricKind::Counter,
            Metric::Gauge(_) => MetricKind::Gauge,
        }
    }

    pub fn get(&self) -> Value {
        match self {
            Metric::Counter(c) => Value::Counter(c.get()),
            Metric::Gauge(g) => Value::Gauge(g.get()),
        }
    }

    pub fn as_counter(&self) -> Option<&Arc<Counter>> {
        match self {
            Metric::Counter(c) => Some(c),
            Metric::Gauge(_) => None,
        }
    }

    pub fn as_gauge(&self) -> Option<&Arc<Gauge>> {
        match self {
            Metric::Gauge(g) => Some(g),
            Metric::Counter(_) => None,
        }
    }

    /// Frozen copy of the current value.
    pub(crate) fn copy(&self) -> Sample {
        match self {
            Metric::Counter(c) => Sample::from(&c.copy()),
            Metric::Gauge(g) => Sample::from(&g.copy()),
        }
    }

    /// Reset the live cell to its zero.
    pub(crate) fn flush(&self) {
        match self {
            Metric::Counter(c) => c.flush(),
            Metric::Gauge(g) => g.flush(),
        }
    }

    /// Frozen copy plus reset, fused into one atomic swap so no concurrent
    /// update can fall between capture and reset.
    pub(crate) fn take(&self) -> Sample {
        match self {
            Metric::Counter(c) => Sample::from(&c.take()),
            Metric::Gauge(g) => Sample::from(&g.take()),
        }
    }
}

impl From<Arc<Counter>> for Metric {
    fn from(c: Arc<Counter>) -> Self {
        Metric::Counter(c)
    }
}

impl From<Arc<Gauge>> for Metric {
    fn from(g: Arc<Gauge>) -> Self {
        Metric::Gauge(g)
    }
}

impl From<Counter> for Metric {
    fn from(c: Counter) -> Self {
        Metric::Counter(Arc::new(c))
    }
}

impl From<Gauge> for Metric {
    fn from(g: Gauge) -> Self {
        Metric::Gauge(Arc::new(g))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Frozen name and value captured from a metric.
///
/// Unlike [`Metric`] a sample owns its value outright; there is no cell to
/// write through, so snapshots built from samples cannot change after
/// capture.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    name: String,
    value: Value,
}

impl Sample {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MetricKind {
        self.value.kind()
    }

    pub fn get(&self) -> Value {
        self.value
    }
}

impl From<&Counter> for Sample {
    fn from(c: &Counter) -> Self {
        Self {
            name: c.name().to_string(),
            value: Value::Counter(c.get()),
        }
    }
}

impl From<&Gauge> for Sample {
    fn from(g: &Gauge) -> Self {
        Self {
            name: g.name().to_string(),
            value: Value::Gauge(g.get()),
        }
    }
}

impl From<&Metric> for Sample {
    fn from(m: &Metric) -> Self {
        Self {
            name: m.name().to_string(),
            value: m.get(),
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
