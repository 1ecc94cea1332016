//! Registration, lookup and text rendering of plain registries.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use metricring_core::{Counter, ErrorCode, Gauge, Metric, MetricsError, Registry, Value};

#[test]
fn empty_registry_name_is_rejected() {
    let err = Registry::new("").unwrap_err();
    assert_eq!(err, MetricsError::EmptyRegistryName);
    assert_eq!(err.code().as_str(), "EMPTY_REGISTRY_NAME");
}

#[test]
fn add_and_lookup_metrics() {
    let r = Registry::new("plain").unwrap();
    let c = Arc::new(Counter::new("metric"));
    r.add_metric(Arc::clone(&c)).unwrap();

    for _ in 0..1000 {
        c.inc();
    }

    let m = r.get_metric_by_name("metric").unwrap();
    assert_eq!(m.get(), Value::Counter(1000));
    assert!(!r.is_tracking());
    assert!(r.snapshots().is_none());
    assert_eq!(r.capacity(), None);
}

#[test]
fn duplicate_metric_keeps_the_original() {
    let r = Registry::new("dups").unwrap();
    let first = Arc::new(Counter::new("name1"));
    first.add(5);
    r.add_metric(Arc::clone(&first)).unwrap();

    let err = r.add_metric(Counter::new("name1")).unwrap_err();
    assert_eq!(err, MetricsError::MetricNameExists("name1".into()));
    assert_eq!(err.code(), ErrorCode::MetricNameExists);

    let kept = r.get_metric_by_name("name1").unwrap();
    assert_eq!(kept.get(), Value::Counter(5));
    first.inc();
    assert_eq!(kept.get(), Value::Counter(6));
    assert_eq!(r.len(), 1);
}

#[test]
fn failed_batch_inserts_nothing() {
    let r = Registry::new("batch").unwrap();
    r.add_metric(Metric::counter("existing")).unwrap();

    let err = r
        .add_metrics([Metric::counter("a"), Metric::gauge("existing"), Metric::counter("b")])
        .unwrap_err();
    assert_eq!(err, MetricsError::MetricNameExists("existing".into()));
    assert_eq!(r.metric_names(), vec!["existing".to_string()]);

    let err = r
        .add_metrics([Metric::counter("c"), Metric::counter("")])
        .unwrap_err();
    assert_eq!(err, MetricsError::EmptyMetricName);
    assert_eq!(r.len(), 1);

    let err = r
        .add_metrics([Metric::counter("d"), Metric::gauge("d")])
        .unwrap_err();
    assert_eq!(err, MetricsError::MetricNameExists("d".into()));
    assert_eq!(r.len(), 1);

    r.add_metrics([Metric::counter("a"), Metric::gauge("b")]).unwrap();
    assert_eq!(r.metric_names(), vec!["existing", "a", "b"]);
}

#[test]
fn lookup_errors() {
    let r = Registry::new("lookups").unwrap();
    assert_eq!(
        r.get_metric_by_name("").unwrap_err(),
        MetricsError::EmptyMetricName
    );
    let err = r.get_metric_by_name("missing").unwrap_err();
    assert_eq!(err, MetricsError::MetricNameUnknown("missing".into()));
    assert_eq!(err.to_string(), "undefined metric name missing");
}

#[test]
fn get_metrics_is_a_detached_map() {
    let r = Registry::new("copy").unwrap();
    r.add_metric(Metric::counter("one")).unwrap();

    let map = r.get_metrics();
    r.add_metric(Metric::counter("two")).unwrap();

    assert_eq!(map.len(), 1);
    assert!(map.contains_key("one"));
    assert_eq!(r.get_metrics().len(), 2);
}

#[test]
fn dump_uses_registration_order() {
    let r = Registry::new("dump").unwrap();
    let z = Arc::new(Counter::new("zeta"));
    let a = Arc::new(Gauge::new("alpha"));
    r.add_metrics([Metric::from(Arc::clone(&z)), Metric::from(Arc::clone(&a))])
        .unwrap();
    z.add(3);
    a.set(2.5);

    assert_eq!(r.dump(), "zeta: 3\nalpha: 2.5\n");
}

#[test]
fn capture_copies_without_resetting() {
    let r = Registry::new("capture").unwrap();
    let c = Arc::new(Counter::new("c"));
    r.add_metric(Arc::clone(&c)).unwrap();
    c.add(10);

    let snap = r.capture(chrono::Utc::now());
    c.add(1);

    assert_eq!(snap.get_metric_by_name("c").unwrap().get(), Value::Counter(10));
    assert_eq!(c.get(), 11);
}
