/*!
 * Entity Lifecycle Tests
 * Admission, update, prune, removal, and capacity behavior through the
 * public engine API
 */

use memwatch::{
    EntityObservation, EntityStatus, PoolError, SortKey, TelemetryConfig, TelemetryEngine,
};
use pretty_assertions::assert_eq;

fn small_engine() -> TelemetryEngine {
    TelemetryEngine::new(TelemetryConfig {
        max_tracked_entities: 3,
        entity_history_capacity: 16,
        history_capacity: 8,
        ..TelemetryConfig::default()
    })
}

fn obs(name: &str, kb: f64) -> EntityObservation {
    EntityObservation::new(name, kb, EntityStatus::Running)
}

#[test]
fn test_snapshot_admits_and_updates() {
    let mut engine = small_engine();
    engine.apply_snapshot(&[obs("a", 100.0), obs("b", 200.0)], 1_000);

    assert_eq!(engine.tracked_len(), 2);
    let a = engine.entity("a").unwrap();
    assert_eq!(a.current_kb, 100.0);
    assert_eq!(a.peak_kb, a.min_kb);
    assert_eq!(a.history().len(), 1);

    engine.apply_snapshot(&[obs("a", 150.0), obs("b", 180.0)], 2_000);
    let a = engine.entity("a").unwrap();
    assert_eq!(a.current_kb, 150.0);
    assert_eq!(a.last_delta, 50.0);
    let b = engine.entity("b").unwrap();
    assert_eq!(b.last_delta, -20.0);
    assert_eq!(b.min_kb, 180.0);
    assert_eq!(b.peak_kb, 200.0);
}

#[test]
fn test_absent_entities_become_unloaded_once() {
    let mut engine = small_engine();
    engine.apply_snapshot(&[obs("a", 100.0), obs("b", 200.0)], 1_000);
    engine.apply_snapshot(&[obs("a", 110.0)], 2_000);

    let b = engine.entity("b").unwrap();
    assert_eq!(b.status, EntityStatus::Unloaded);
    assert_eq!(b.current_kb, 0.0);
    assert_eq!(b.last_delta, 0.0);
    assert_eq!(b.history().len(), 2);
    assert_eq!(*b.history().latest().unwrap(), 0.0);

    // still absent: no second zero sample
    engine.apply_snapshot(&[obs("a", 120.0)], 3_000);
    assert_eq!(engine.entity("b").unwrap().history().len(), 2);
}

#[test]
fn test_unloaded_entity_can_reload() {
    let mut engine = small_engine();
    engine.apply_snapshot(&[obs("a", 100.0)], 1_000);
    engine.apply_snapshot(&[], 2_000);
    assert_eq!(engine.entity("a").unwrap().status, EntityStatus::Unloaded);

    engine.apply_snapshot(&[obs("a", 300.0)], 3_000);
    let a = engine.entity("a").unwrap();
    assert_eq!(a.status, EntityStatus::Running);
    assert_eq!(a.current_kb, 300.0);
    // history retained across the unload
    assert_eq!(a.history().len(), 3);
}

#[test]
fn test_capacity_overflow_drops_only_new_entity() {
    let mut engine = small_engine();
    engine.apply_snapshot(
        &[obs("a", 1.0), obs("b", 2.0), obs("c", 3.0), obs("d", 4.0)],
        1_000,
    );

    assert_eq!(engine.tracked_len(), 3);
    assert!(engine.entity("d").is_none());
    assert_eq!(engine.entity("c").unwrap().current_kb, 3.0);

    // the overflowing name is simply untracked, not an engine failure
    engine.apply_snapshot(&[obs("a", 5.0), obs("d", 6.0)], 2_000);
    assert_eq!(engine.entity("a").unwrap().current_kb, 5.0);
    assert!(engine.entity("d").is_none());
}

#[test]
fn test_remove_frees_slot_for_new_entity() {
    let mut engine = small_engine();
    engine.apply_snapshot(&[obs("a", 1.0), obs("b", 2.0), obs("c", 3.0)], 1_000);

    engine.remove("b");
    assert_eq!(engine.tracked_len(), 2);
    assert!(engine.entity("b").is_none());

    engine.apply_snapshot(&[obs("d", 4.0)], 2_000);
    assert_eq!(engine.entity("d").unwrap().current_kb, 4.0);
    assert_eq!(engine.tracked_len(), 3);
}

#[test]
fn test_pool_error_is_typed() {
    let mut engine = small_engine();
    engine.apply_snapshot(&[obs("a", 1.0), obs("b", 2.0), obs("c", 3.0)], 1_000);

    // the typed failure is observable at the pool layer
    let mut pool = memwatch::EntityPool::new(1, 4);
    pool.update("x", 1.0, EntityStatus::Running, 0).unwrap();
    assert_eq!(
        pool.get_or_create("y").unwrap_err(),
        PoolError::AtCapacity { capacity: 1 }
    );
    assert_eq!(engine.tracked_len(), 3);
}

#[test]
fn test_sort_through_engine() {
    let mut engine = small_engine();
    engine.apply_snapshot(&[obs("a", 500.0), obs("b", 300.0), obs("c", 700.0)], 1_000);
    engine.apply_snapshot(&[obs("b", 300.0), obs("c", 700.0)], 2_000); // a unloads

    engine.sort(SortKey::Value, false);
    let names: Vec<&str> = engine.ordered_entities().iter().map(String::as_str).collect();
    assert_eq!(names, vec!["c", "b", "a"]);
}

#[test]
fn test_reset_clears_everything() {
    let mut engine = small_engine();
    engine.apply_snapshot(&[obs("a", 100.0)], 1_000);
    engine.record_process_sample(memwatch::ProcessSample {
        working_set_kb: 1.0,
        paged_kb: 2.0,
        tracked_total_kb: 3.0,
        timestamp_ms: 1_000,
    });

    engine.reset();
    assert_eq!(engine.tracked_len(), 0);
    assert!(engine.process_history().is_empty());
    assert_eq!(engine.alerts().count(), 0);
}

#[test]
fn test_zero_capacity_config_does_not_panic() {
    let cfg: TelemetryConfig = serde_json::from_str(
        r#"{"history_capacity": 0, "entity_history_capacity": 0, "alert_log_capacity": 0}"#,
    )
    .unwrap();
    let mut engine = TelemetryEngine::new(cfg);

    engine.apply_snapshot(&[obs("a", 100.0)], 1_000);
    engine.record_process_sample(memwatch::ProcessSample {
        working_set_kb: 1.0,
        paged_kb: 2.0,
        tracked_total_kb: 3.0,
        timestamp_ms: 1_000,
    });

    assert_eq!(engine.config().history_capacity, 1);
    assert_eq!(engine.entity("a").unwrap().history().len(), 1);
    assert_eq!(engine.process_history().len(), 1);
}

#[test]
fn test_threshold_config_applies_next_update() {
    let mut engine = TelemetryEngine::new(TelemetryConfig {
        leak_threshold_kb_s: 1_000_000.0,
        ..TelemetryConfig::default()
    });

    // steady 5 MB/s growth (well under the spike thresholds per step),
    // but the leak threshold is unreachable
    for i in 0..6u64 {
        engine.apply_snapshot(&[obs("a", 100_000.0 + i as f64 * 5_000.0)], i * 1_000);
    }
    assert_eq!(engine.alerts().count(), 0);

    let mut cfg = engine.config().clone();
    cfg.leak_threshold_kb_s = 10.0;
    engine.set_config(cfg);

    engine.apply_snapshot(&[obs("a", 130_000.0)], 6_000);
    assert!(engine.alerts().count() > 0);
}
