//! Registry: uniquely named metrics in registration order, optionally with a
//! snapshot history.
//!
//! Plain and tracking registries share this one type. A tracking registry is a
//! registry whose state carries a [`SnapshotRing`]; callers ask
//! [`Registry::is_tracking`] instead of matching on a concrete kind. Driving
//! rotation on a timer is the runtime's job, not this module's.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{MetricsError, Result};
use crate::metric::Metric;
use crate::render;
use crate::snapshot::{Snapshot, SnapshotRing, TimestampPolicy};

/// Snapshot history settings for a tracking registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Number of snapshots kept. 0 keeps none but rotation still resets.
    pub capacity: usize,
    /// Rotation period; also the synthetic spacing between snapshots.
    pub interval: Duration,
    pub timestamps: TimestampPolicy,
}

pub struct Registry {
    name: String,
    state: Mutex<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    metrics: HashMap<String, Metric>,
    order: Vec<String>,
    history: Option<SnapshotRing>,
}

impl RegistryState {
    fn ordered(&self) -> Vec<Metric> {
        self.order
            .iter()
            .filter_map(|n| self.metrics.get(n))
            .cloned()
            .collect()
    }
}

impl Registry {
    /// Plain registry without history. Prefer creating registries through a
    /// directory so the name is unique process-wide.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(MetricsError::EmptyRegistryName);
        }
        Ok(Self {
            name,
            state: Mutex::new(RegistryState::default()),
        })
    }

    /// Registry that keeps up to `opts.capacity` snapshots.
    pub fn with_history(name: impl Into<String>, opts: HistoryOptions) -> Result<Self> {
        let interval = TimeDelta::from_std(opts.interval).map_err(|_| MetricsError::InvalidInterval)?;
        let ring = SnapshotRing::new(opts.capacity, interval, opts.timestamps)?;
        let registry = Self::new(name)?;
        registry.lock().history = Some(ring);
        Ok(registry)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // No user code runs under this lock, so a poisoned state is still consistent.
    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a batch of metrics.
    ///
    /// All-or-nothing: the whole batch is validated first (blank names,
    /// names already registered, duplicates inside the batch) and nothing is
    /// inserted if any metric is rejected. The existing metric is never
    /// replaced.
    pub fn add_metrics<I>(&self, metrics: I) -> Result<()>
    where
        I: IntoIterator<Item = Metric>,
    {
        let batch: Vec<Metric> = metrics.into_iter().collect();
        let mut state = self.lock();

        {
            let mut seen = HashSet::with_capacity(batch.len());
            for m in &batch {
                let name = m.name();
                if name.is_empty() {
                    return Err(MetricsError::EmptyMetricName);
                }
                if state.metrics.contains_key(name) || !seen.insert(name) {
                    return Err(MetricsError::MetricNameExists(name.to_string()));
                }
            }
        }

        for m in batch {
            let name = m.name().to_string();
            state.order.push(name.clone());
            state.metrics.insert(name, m);
        }
        Ok(())
    }

    pub fn add_metric(&self, metric: impl Into<Metric>) -> Result<()> {
        self.add_metrics([metric.into()])
    }

    pub fn get_metric_by_name(&self, name: &str) -> Result<Metric> {
        if name.is_empty() {
            return Err(MetricsError::EmptyMetricName);
        }
        self.lock()
            .metrics
            .get(name)
            .cloned()
            .ok_or_else(|| MetricsError::MetricNameUnknown(name.to_string()))
    }

    /// Copy of the name to metric mapping. The handles still point at the
    /// live cells; the map itself is detached from later registrations.
    pub fn get_metrics(&self) -> HashMap<String, Metric> {
        self.lock().metrics.clone()
    }

    /// Live metric handles in registration order.
    pub fn metrics(&self) -> Vec<Metric> {
        self.lock().ordered()
    }

    pub fn metric_names(&self) -> Vec<String> {
        self.lock().order.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this registry keeps snapshot history.
    pub fn is_tracking(&self) -> bool {
        self.lock().history.is_some()
    }

    /// History capacity, `None` for plain registries.
    pub fn capacity(&self) -> Option<usize> {
        self.lock().history.as_ref().map(SnapshotRing::capacity)
    }

    /// Copy of the snapshot history, most recent first. `None` for plain
    /// registries.
    pub fn snapshots(&self) -> Option<Vec<Snapshot>> {
        self.lock().history.as_ref().map(SnapshotRing::snapshots)
    }

    /// Point-in-time copy of every metric without resetting anything.
    pub fn capture(&self, now: DateTime<Utc>) -> Snapshot {
        let state = self.lock();
        let values = state
            .order
            .iter()
            .filter_map(|n| state.metrics.get(n))
            .map(Metric::copy)
            .collect();
        Snapshot::new(now, values)
    }

    /// Capture every metric into a new snapshot stamped `now`, reset the
    /// metrics to zero and push the snapshot into the history ring.
    ///
    /// Returns `false` (and touches nothing) for plain registries.
    pub fn rotate(&self, now: DateTime<Utc>) -> bool {
        let mut guard = self.lock();
        let state = &mut *guard;
        let Some(ring) = state.history.as_mut() else {
            return false;
        };

        if ring.capacity() == 0 {
            state.metrics.values().for_each(Metric::flush);
        } else {
            let values = state
                .order
                .iter()
                .filter_map(|n| state.metrics.get(n))
                .map(Metric::take)
                .collect();
            ring.push(Snapshot::new(now, values));
        }

        tracing::debug!(
            registry = %self.name,
            snapshots = ring.len(),
            metrics = state.order.len(),
            "registry rotated"
        );
        true
    }

    /// Plain-text rendering, see [`crate::render`].
    pub fn dump(&self) -> String {
        let (current, history) = {
            let state = self.lock();
            (state.ordered(), state.history.as_ref().map(SnapshotRing::snapshots))
        };
        render::render_registry(&current, history.as_deref())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("metrics", &self.len())
            .field("tracking", &self.is_tracking())
            .finish()
    }
}
