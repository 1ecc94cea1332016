//! Registry directory: the process namespace of registries by name.
//!
//! Construct one at startup and share it (`Arc` or reference) with whatever
//! creates registries. Names are unique across plain and tracking registries
//! and are never released.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::runtime::Handle;

use metricring_core::error::{MetricsError, Result};
use metricring_core::{render, Clock, Registry, SystemClock};

use crate::tracking::{TrackingOptions, TrackingRegistry};

pub struct RegistryDirectory {
    registries: DashMap<String, Arc<Registry>>,
    // Scheduler handles for the tracking subset of `registries`.
    trackers: DashMap<String, TrackingRegistry>,
    clock: Arc<dyn Clock>,
}

impl Default for RegistryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryDirectory {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Directory whose tracking registries timestamp and align with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            registries: DashMap::new(),
            trackers: DashMap::new(),
            clock,
        }
    }

    pub fn new_registry(&self, name: &str) -> Result<Arc<Registry>> {
        if name.is_empty() {
            return Err(MetricsError::EmptyRegistryName);
        }
        match self.registries.entry(name.to_string()) {
            Entry::Occupied(_) => Err(MetricsError::RegistryNameExists(name.to_string())),
            Entry::Vacant(slot) => {
                let registry = Arc::new(Registry::new(name)?);
                slot.insert(Arc::clone(&registry));
                tracing::info!(registry = %name, "registry created");
                Ok(registry)
            }
        }
    }

    /// Create a registry with snapshot history and start its rotation task.
    ///
    /// Must be called from within a Tokio runtime; the task is spawned on the
    /// current one.
    pub fn new_tracking_registry(&self, name: &str, options: TrackingOptions) -> Result<TrackingRegistry> {
        if name.is_empty() {
            return Err(MetricsError::EmptyRegistryName);
        }
        if options.interval.is_zero() {
            return Err(MetricsError::InvalidInterval);
        }
        let handle = Handle::try_current()
            .map_err(|e| MetricsError::Internal(format!("tracking registry needs a tokio runtime: {e}")))?;

        match self.registries.entry(name.to_string()) {
            Entry::Occupied(_) => Err(MetricsError::RegistryNameExists(name.to_string())),
            Entry::Vacant(slot) => {
                // Not reachable by other threads until `slot.insert`.
                let registry = Arc::new(Registry::with_history(name, options.history())?);
                let tracker = TrackingRegistry::start(
                    Arc::clone(&registry),
                    options,
                    Arc::clone(&self.clock),
                    &handle,
                );
                self.trackers.insert(name.to_string(), tracker.clone());
                slot.insert(registry);
                tracing::info!(
                    registry = %name,
                    capacity = options.capacity,
                    interval = ?options.interval,
                    align = options.align,
                    "tracking registry created"
                );
                Ok(tracker)
            }
        }
    }

    pub fn get_registry_by_name(&self, name: &str) -> Result<Arc<Registry>> {
        if name.is_empty() {
            return Err(MetricsError::EmptyRegistryName);
        }
        self.registries
            .get(name)
            .map(|r| Arc::clone(r.value()))
            .ok_or_else(|| MetricsError::RegistryNameUnknown(name.to_string()))
    }

    /// Tracking handle for `name`; `Ok(None)` when the registry exists but
    /// keeps no history.
    pub fn get_tracking_registry_by_name(&self, name: &str) -> Result<Option<TrackingRegistry>> {
        self.get_registry_by_name(name)?;
        Ok(self.trackers.get(name).map(|t| t.value().clone()))
    }

    /// Copy of the name to registry mapping.
    pub fn get_registries(&self) -> HashMap<String, Arc<Registry>> {
        self.registries
            .iter()
            .map(|e| (e.key().clone(), Arc::clone(e.value())))
            .collect()
    }

    /// Registry names, sorted.
    pub fn registry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }

    /// Text report for one registry: name header followed by its dump.
    pub fn dump_registry(&self, name: &str) -> Result<String> {
        let registry = self.get_registry_by_name(name)?;
        Ok(render::render_report(name, &registry.dump()))
    }

    /// Stop every rotation task created by this directory and wait for them.
    pub async fn shutdown(&self) {
        let trackers: Vec<TrackingRegistry> = self.trackers.iter().map(|t| t.value().clone()).collect();
        for t in &trackers {
            t.shutdown();
        }
        for t in &trackers {
            t.join().await;
        }
        tracing::info!(stopped = trackers.len(), "registry directory shut down");
    }
}

impl std::fmt::Debug for RegistryDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryDirectory")
            .field("registries", &self.registry_names())
            .finish()
    }
}
