//! Tracking registries: a registry plus the task that rotates its history.

pub mod schedule;

use std::ops::Deref;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use metricring_core::{Clock, HistoryOptions, Registry, Snapshot, TimestampPolicy};

/// Construction parameters for a tracking registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingOptions {
    /// Snapshots kept in the ring.
    pub capacity: usize,
    /// Rotation period. Must be non-zero.
    pub interval: Duration,
    /// First rotation on the next wall-clock multiple of `interval`.
    pub align: bool,
    pub timestamps: TimestampPolicy,
}

impl TrackingOptions {
    pub fn new(capacity: usize, interval: Duration) -> Self {
        Self {
            capacity,
            interval,
            align: false,
            timestamps: TimestampPolicy::default(),
        }
    }

    pub fn aligned(mut self, align: bool) -> Self {
        self.align = align;
        self
    }

    pub fn timestamps(mut self, policy: TimestampPolicy) -> Self {
        self.timestamps = policy;
        self
    }

    pub(crate) fn history(&self) -> HistoryOptions {
        HistoryOptions {
            capacity: self.capacity,
            interval: self.interval,
            timestamps: self.timestamps,
        }
    }
}

/// Handle to a registry with snapshot history and its rotation task.
///
/// Cheap to clone; all clones share one scheduler. The scheduler stops on
/// [`TrackingRegistry::shutdown`] or once every clone has been dropped. The
/// registry stays readable afterwards, it just no longer rotates.
#[derive(Clone)]
pub struct TrackingRegistry {
    inner: Arc<TrackingInner>,
}

struct TrackingInner {
    registry: Arc<Registry>,
    options: TrackingOptions,
    stop: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TrackingRegistry {
    /// Spawn the rotation task on `handle`. The first deadline is fixed here,
    /// not inside the task, so alignment is measured from construction.
    pub(crate) fn start(
        registry: Arc<Registry>,
        options: TrackingOptions,
        clock: Arc<dyn Clock>,
        handle: &Handle,
    ) -> Self {
        let first = schedule::first_deadline(
            tokio::time::Instant::now(),
            clock.now(),
            options.interval,
            options.align,
        );
        let (stop, stop_rx) = watch::channel(false);
        let task = handle.spawn(schedule::run(
            Arc::clone(&registry),
            clock,
            first,
            options.interval,
            stop_rx,
        ));

        Self {
            inner: Arc::new(TrackingInner {
                registry,
                options,
                stop,
                task: Mutex::new(Some(task)),
            }),
        }
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn options(&self) -> TrackingOptions {
        self.inner.options
    }

    /// Snapshot history, most recent first.
    pub fn get_snapshots(&self) -> Vec<Snapshot> {
        self.inner.registry.snapshots().unwrap_or_default()
    }

    /// Ask the scheduler to stop. An in-flight rotation completes first.
    pub fn shutdown(&self) {
        self.inner.stop.send_replace(true);
    }

    pub fn is_running(&self) -> bool {
        self.inner
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }

    /// Wait for the scheduler task to finish. Only the first caller waits.
    pub async fn join(&self) {
        let task = self
            .inner
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!(registry = %self.inner.registry.name(), error = %e, "rotation task ended abnormally");
            }
        }
    }
}

impl Deref for TrackingRegistry {
    type Target = Registry;

    fn deref(&self) -> &Registry {
        &self.inner.registry
    }
}

impl std::fmt::Debug for TrackingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingRegistry")
            .field("name", &self.inner.registry.name())
            .field("options", &self.inner.options)
            .finish()
    }
}
