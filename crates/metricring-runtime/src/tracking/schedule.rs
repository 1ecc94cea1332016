//! Rotation timing: wall-clock alignment and the periodic scheduler loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use metricring_core::{Clock, Registry};

/// Time left until the next instant that is a whole multiple of `interval`
/// since the Unix epoch.
///
/// The result lies in `(0, interval]`: when `now` sits exactly on a boundary
/// the next one is a full interval away.
pub fn delay_until_boundary(now: DateTime<Utc>, interval: Duration) -> Duration {
    let Ok(step) = i128::try_from(interval.as_nanos()) else {
        return interval;
    };
    if step == 0 {
        return Duration::ZERO;
    }
    let now_ns = i128::from(now.timestamp()) * 1_000_000_000 + i128::from(now.timestamp_subsec_nanos());
    let remaining = step - now_ns.rem_euclid(step);
    u64::try_from(remaining)
        .map(Duration::from_nanos)
        .unwrap_or(interval)
}

/// Instant of the first rotation for a registry created at `start`.
///
/// Unaligned registries fire one interval after creation; aligned ones at the
/// next wall-clock boundary.
pub fn first_deadline(start: Instant, now: DateTime<Utc>, interval: Duration, align: bool) -> Instant {
    if align {
        start + delay_until_boundary(now, interval)
    } else {
        start + interval
    }
}

/// Rotate `registry` at `first` and then every `interval` until `stop` flips
/// to `true` or its sender goes away.
///
/// Late ticks are skipped rather than replayed in a burst, which keeps an
/// aligned schedule on its boundaries.
pub(crate) async fn run(
    registry: Arc<Registry>,
    clock: Arc<dyn Clock>,
    first: Instant,
    interval: Duration,
    mut stop: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval_at(first, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(registry = %registry.name(), ?interval, "rotation scheduler started");

    loop {
        tokio::select! {
            biased;

            changed = stop.changed() => {
                if changed.is_err() || *stop.borrow() {
                    break;
                }
            }

            _ = ticker.tick() => {
                registry.rotate(clock.now());
            }
        }
    }

    tracing::info!(registry = %registry.name(), "rotation scheduler stopped");
}
