//! Snapshots and the fixed-capacity ring that stores them.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::error::{MetricsError, Result};
use crate::metric::Sample;

/// How shifted snapshots are timestamped when a new one is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Slot `i` is re-stamped `i` intervals before slot 0, so displayed
    /// spacing is uniform even when the scheduler jitters. Only slot 0 carries
    /// a true capture time. Ticks the scheduler skipped are hidden: the
    /// neighbours of a gap are still stamped one interval apart.
    #[default]
    Synthetic,
    /// Every snapshot keeps the instant it was captured.
    Captured,
}

/// Immutable, timestamped copy of a registry's values.
///
/// Values are frozen [`Sample`]s, detached from the live metrics: updates made
/// after the capture are never visible here, and nothing a reader does with a
/// clone reaches the stored history.
#[derive(Debug, Clone)]
pub struct Snapshot {
    timestamp: DateTime<Utc>,
    /// Registration order.
    values: Vec<Sample>,
}

impl Snapshot {
    pub(crate) fn new(timestamp: DateTime<Utc>, values: Vec<Sample>) -> Self {
        Self { timestamp, values }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn get_metric_by_name(&self, name: &str) -> Result<&Sample> {
        if name.is_empty() {
            return Err(MetricsError::EmptyMetricName);
        }
        self.values
            .iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| MetricsError::MetricNameUnknown(name.to_string()))
    }

    /// Name to value mapping (copy).
    pub fn get_metrics(&self) -> HashMap<String, Sample> {
        self.values
            .iter()
            .map(|m| (m.name().to_string(), m.clone()))
            .collect()
    }

    /// Captured metrics in registration order.
    pub fn metrics(&self) -> impl Iterator<Item = &Sample> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ring buffer of snapshots, most recent first.
///
/// Length grows from 0 to `capacity` and then stays there; each push beyond
/// that evicts the oldest snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotRing {
    capacity: usize,
    interval: TimeDelta,
    policy: TimestampPolicy,
    slots: VecDeque<Snapshot>,
}

impl SnapshotRing {
    /// Fails with `InvalidInterval` when `interval` is not positive.
    pub fn new(capacity: usize, interval: TimeDelta, policy: TimestampPolicy) -> Result<Self> {
        if interval <= TimeDelta::zero() {
            return Err(MetricsError::InvalidInterval);
        }
        Ok(Self {
            capacity,
            interval,
            policy,
            slots: VecDeque::with_capacity(capacity),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn interval(&self) -> TimeDelta {
        self.interval
    }

    pub fn policy(&self) -> TimestampPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Put `snapshot` in slot 0, shifting the rest toward the tail.
    /// With capacity 0 the snapshot is discarded.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.capacity == 0 {
            return;
        }
        if self.slots.len() == self.capacity {
            self.slots.pop_back();
        }
        self.slots.push_front(snapshot);

        if self.policy == TimestampPolicy::Synthetic {
            self.respace();
        }
    }

    fn respace(&mut self) {
        let Some(newest) = self.slots.front().map(Snapshot::timestamp) else {
            return;
        };
        let interval = self.interval;
        for (i, slot) in self.slots.iter_mut().enumerate().skip(1) {
            let stamp = i32::try_from(i)
                .ok()
                .and_then(|i| interval.checked_mul(i))
                .and_then(|back| newest.checked_sub_signed(back));
            if let Some(stamp) = stamp {
                slot.timestamp = stamp;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.slots.iter()
    }

    /// Copy of every snapshot, most recent first.
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.slots.iter().cloned().collect()
    }
}
