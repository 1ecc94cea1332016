use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metric holding a single `f64` that can move arbitrarily up and down.
///
/// The float is stored as its IEEE-754 bit pattern in an `AtomicU64`. Float
/// addition has no hardware atomic, so `add` runs a compare-and-swap loop on
/// the bits and retries on contention instead of taking a lock.
#[derive(Debug)]
pub struct Gauge {
    name: String,
    bits: AtomicU64,
}

impl Gauge {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_value(name, 0.0)
    }

    fn with_value(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Add `delta` (CAS retry loop).
    #[inline]
    pub fn add(&self, delta: f64) {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self.bits.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }

    #[inline]
    pub fn sub(&self, delta: f64) {
        self.add(-delta);
    }

    /// Overwrite the value. Last write wins against concurrent `add`s.
    #[inline]
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn copy(&self) -> Gauge {
        Self::with_value(self.name.clone(), self.get())
    }

    pub(crate) fn flush(&self) {
        self.set(0.0);
    }

    pub(crate) fn take(&self) -> Gauge {
        let bits = self.bits.swap(0.0_f64.to_bits(), Ordering::Relaxed);
        Self::with_value(self.name.clone(), f64::from_bits(bits))
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
