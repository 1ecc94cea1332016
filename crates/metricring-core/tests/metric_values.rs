//! Counter and gauge primitives under sequential and concurrent use.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use metricring_core::{Counter, Gauge, Metric, MetricKind, Value};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn counter_counts_and_wraps() {
    let c = Counter::new("requests");
    for _ in 0..100 {
        c.inc();
    }
    c.add(23);
    assert_eq!(c.get(), 123);
    assert_eq!(c.name(), "requests");

    let wrap = Counter::new("wrap");
    wrap.add(u64::MAX);
    wrap.add(2);
    assert_eq!(wrap.get(), 1);
}

#[test]
fn concurrent_counter_increments_are_not_lost() {
    let c = Arc::new(Counter::new("hits"));
    let threads: Vec<_> = (0..8)
        .map(|t| {
            let c = Arc::clone(&c);
            thread::spawn(move || {
                for _ in 0..10_000 {
                    c.inc();
                }
                c.add(t);
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }
    assert_eq!(c.get(), 8 * 10_000 + (0..8).sum::<u64>());
}

#[test]
fn gauge_add_sub_set_sequence() {
    let g = Gauge::new("load");
    assert_eq!(g.get(), 0.0);
    g.add(42.0);
    g.add(12.46);
    assert_close(g.get(), 54.46);
    g.sub(13.13);
    assert_close(g.get(), 41.33);
    g.set(0.0);
    assert_eq!(g.get(), 0.0);
}

#[test]
fn gauge_set_wins_over_earlier_adds() {
    let g = Gauge::new("temp");
    g.add(5.0);
    g.add(-2.5);
    g.set(-7.25);
    assert_eq!(g.get(), -7.25);
    g.add(0.25);
    assert_eq!(g.get(), -7.0);
}

#[test]
fn concurrent_gauge_updates_are_linearizable() {
    let g = Arc::new(Gauge::new("inflight"));
    let threads: Vec<_> = (0..8)
        .map(|_| {
            let g = Arc::clone(&g);
            thread::spawn(move || {
                for _ in 0..10_000 {
                    g.add(1.0);
                    g.sub(0.5);
                }
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }
    // Every operand is exactly representable, so any lost CAS would show.
    assert_eq!(g.get(), 40_000.0);
}

#[test]
fn metric_handle_shares_the_cell() {
    let c = Arc::new(Counter::new("shared"));
    let m = Metric::from(Arc::clone(&c));
    c.add(3);
    assert_eq!(m.get(), Value::Counter(3));
    assert_eq!(m.kind(), MetricKind::Counter);
    assert_eq!(m.name(), "shared");
    assert!(m.as_gauge().is_none());

    m.as_counter().unwrap().inc();
    assert_eq!(c.get(), 4);

    let g = Metric::gauge("ratio");
    g.as_gauge().unwrap().set(0.5);
    assert_eq!(g.get(), Value::Gauge(0.5));
}

#[test]
fn values_render_and_serialize() {
    assert_eq!(Value::Counter(1000).to_string(), "1000");
    assert_eq!(Value::Gauge(54.5).to_string(), "54.5");
    assert_eq!(Value::Gauge(0.0).to_string(), "0");
    assert_eq!(Value::Counter(7).as_u64(), Some(7));
    assert_eq!(Value::Gauge(1.5).as_u64(), None);
    assert_eq!(Value::Counter(2).as_f64(), 2.0);

    let json = serde_json::to_value(Value::Gauge(1.5)).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "gauge", "value": 1.5 }));
    let json = serde_json::to_value(Value::Counter(9)).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "counter", "value": 9 }));
}
