//! Plain-text rendering consumed by exposers.
//!
//! Format:
//! - one `name: value` line per metric, registration order;
//! - tracking registries add a `Current:` section and a `Last:` section with a
//!   `[YYYY-MM-DD HH:MM:SS]` header (UTC) per snapshot.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::metric::{Metric, Value};
use crate::snapshot::Snapshot;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// One `name: value` line per entry.
pub fn write_values<'a>(out: &mut String, values: impl IntoIterator<Item = (&'a str, Value)>) {
    for (name, value) in values {
        let _ = writeln!(out, "{name}: {value}");
    }
}

fn live(metrics: &[Metric]) -> impl Iterator<Item = (&str, Value)> {
    metrics.iter().map(|m| (m.name(), m.get()))
}

/// Render current values and, when present, the snapshot history.
pub fn render_registry(current: &[Metric], history: Option<&[Snapshot]>) -> String {
    let mut out = String::new();
    let Some(history) = history else {
        write_values(&mut out, live(current));
        return out;
    };

    out.push_str("Current:\n----------\n");
    write_values(&mut out, live(current));
    out.push('\n');
    out.push_str("Last:\n----------");
    for snap in history {
        let _ = write!(out, "\n[{}]\n", format_timestamp(snap.timestamp()));
        write_values(&mut out, snap.metrics().map(|s| (s.name(), s.get())));
    }
    out
}

/// Directory-level report: registry name, underline, blank line, body.
pub fn render_report(registry_name: &str, body: &str) -> String {
    format!("{registry_name}\n==============\n\n{body}")
}
