//! Registry directory namespace behaviour.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use metricring_core::{Counter, MetricsError, Value};
use metricring_runtime::{RegistryDirectory, TrackingOptions};

#[test]
fn duplicate_registry_name_keeps_the_first() {
    let dir = RegistryDirectory::new();
    let first = dir.new_registry("dup").unwrap();
    let c = Arc::new(Counter::new("c"));
    first.add_metric(Arc::clone(&c)).unwrap();

    let err = dir.new_registry("dup").unwrap_err();
    assert_eq!(err, MetricsError::RegistryNameExists("dup".into()));
    assert_eq!(err.code().as_str(), "REGISTRY_NAME_EXISTS");

    let found = dir.get_registry_by_name("dup").unwrap();
    assert!(Arc::ptr_eq(&first, &found));
    c.add(2);
    assert_eq!(found.get_metric_by_name("c").unwrap().get(), Value::Counter(2));
}

#[test]
fn name_errors() {
    let dir = RegistryDirectory::new();
    assert_eq!(dir.new_registry("").unwrap_err(), MetricsError::EmptyRegistryName);
    assert_eq!(
        dir.get_registry_by_name("").unwrap_err(),
        MetricsError::EmptyRegistryName
    );
    assert_eq!(
        dir.get_registry_by_name("nope").unwrap_err(),
        MetricsError::RegistryNameUnknown("nope".into())
    );
    assert_eq!(
        dir.dump_registry("nope").unwrap_err(),
        MetricsError::RegistryNameUnknown("nope".into())
    );
    assert!(dir.is_empty());
}

#[test]
fn tracking_registry_needs_a_runtime() {
    let dir = RegistryDirectory::new();
    let err = dir
        .new_tracking_registry("no-rt", TrackingOptions::new(3, Duration::from_secs(1)))
        .unwrap_err();
    assert_eq!(err.code().as_str(), "INTERNAL");
    // Nothing was registered.
    assert!(dir.get_registry_by_name("no-rt").is_err());
}

#[tokio::test]
async fn tracking_and_plain_share_one_namespace() {
    let dir = RegistryDirectory::new();
    dir.new_registry("shared").unwrap();

    let err = dir
        .new_tracking_registry("shared", TrackingOptions::new(3, Duration::from_secs(100)))
        .unwrap_err();
    assert_eq!(err, MetricsError::RegistryNameExists("shared".into()));

    let tracker = dir
        .new_tracking_registry("newswap", TrackingOptions::new(10, Duration::from_secs(100)).aligned(true))
        .unwrap();
    assert_eq!(
        dir.new_registry("newswap").unwrap_err(),
        MetricsError::RegistryNameExists("newswap".into())
    );
    assert_eq!(
        dir.new_tracking_registry("", TrackingOptions::new(10, Duration::from_secs(100)))
            .unwrap_err(),
        MetricsError::EmptyRegistryName
    );
    assert_eq!(
        dir.new_tracking_registry("zero", TrackingOptions::new(10, Duration::ZERO))
            .unwrap_err(),
        MetricsError::InvalidInterval
    );

    assert!(tracker.is_tracking());
    assert!(dir.get_registry_by_name("newswap").unwrap().is_tracking());
    assert!(dir.get_tracking_registry_by_name("newswap").unwrap().is_some());
    assert!(dir.get_tracking_registry_by_name("shared").unwrap().is_none());
    assert!(dir.get_tracking_registry_by_name("ghost").is_err());

    assert_eq!(dir.registry_names(), vec!["newswap", "shared"]);
    dir.shutdown().await;
}

#[test]
fn get_registries_is_a_detached_map() {
    let dir = RegistryDirectory::new();
    dir.new_registry("a").unwrap();
    let map = dir.get_registries();
    dir.new_registry("b").unwrap();

    assert_eq!(map.len(), 1);
    assert!(map.contains_key("a"));
    assert_eq!(dir.get_registries().len(), 2);
    assert_eq!(dir.len(), 2);
}

#[test]
fn dump_registry_adds_a_header() {
    let dir = RegistryDirectory::new();
    let r = dir.new_registry("web").unwrap();
    let c = Arc::new(Counter::new("hits"));
    r.add_metric(Arc::clone(&c)).unwrap();
    c.add(12);

    assert_eq!(
        dir.dump_registry("web").unwrap(),
        "web\n==============\n\nhits: 12\n"
    );
}

#[test]
fn concurrent_creation_admits_one_winner() {
    let dir = Arc::new(RegistryDirectory::new());
    let threads: Vec<_> = (0..8)
        .map(|_| {
            let dir = Arc::clone(&dir);
            std::thread::spawn(move || dir.new_registry("race").is_ok())
        })
        .collect();
    let winners = threads
        .into_iter()
        .map(|t| t.join().unwrap())
        .filter(|won| *won)
        .count();
    assert_eq!(winners, 1);
}
