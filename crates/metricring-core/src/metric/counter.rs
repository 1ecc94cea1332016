use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cumulative metric holding a single `u64` that only ever goes up.
///
/// Overflow wraps modulo 2^64; nothing guards against it.
#[derive(Debug)]
pub struct Counter {
    name: String,
    value: AtomicU64,
}

impl Counter {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_value(name, 0)
    }

    fn with_value(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value: AtomicU64::new(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value (lock-free load).
    #[inline]
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Add `delta` with a single hardware atomic add.
    #[inline]
    pub fn add(&self, delta: u64) {
        self.value.fetch_add(delta, Ordering::Relaxed);
    }

    /// Increment by 1.
    #[inline]
    pub fn inc(&self) {
        self.add(1);
    }

    /// Independent counter with the same name and the current value.
    pub(crate) fn copy(&self) -> Counter {
        Self::with_value(self.name.clone(), self.get())
    }

    /// Reset to zero.
    pub(crate) fn flush(&self) {
        self.value.store(0, Ordering::Relaxed);
    }

    /// Copy and reset in one atomic swap.
    pub(crate) fn take(&self) -> Counter {
        Self::with_value(self.name.clone(), self.value.swap(0, Ordering::Relaxed))
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
