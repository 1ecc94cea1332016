//! Wall-clock source for snapshot timestamps and interval alignment.

use chrono::{DateTime, Utc};

/// Supplies the current UTC instant.
///
/// Production code uses [`SystemClock`]; tests substitute a clock driven by a
/// paused runtime so alignment can be asserted exactly.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The operating system's real-time clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
