/*!
 * Read-Only View Tests
 * History iterators, aggregate totals, snapshots, and the shared wrapper
 */

use memwatch::{
    EntityObservation, EntityStatus, ProcessSample, SharedEngine, SortKey, TelemetryConfig,
    TelemetryEngine,
};
use pretty_assertions::assert_eq;

fn obs(name: &str, kb: f64) -> EntityObservation {
    EntityObservation::new(name, kb, EntityStatus::Running)
}

fn sample(ws: f64, ts: u64) -> ProcessSample {
    ProcessSample {
        working_set_kb: ws,
        paged_kb: ws * 2.0,
        tracked_total_kb: ws / 2.0,
        timestamp_ms: ts,
    }
}

#[test]
fn test_entity_history_is_indexed_and_restartable() {
    let mut engine = TelemetryEngine::default();
    for (i, v) in [100.0, 150.0, 120.0].iter().enumerate() {
        engine.apply_snapshot(&[obs("p", *v)], i as u64 * 1_000);
    }

    let first: Vec<(usize, f64)> = engine.entity_history("p").unwrap().collect();
    assert_eq!(first, vec![(0, 100.0), (1, 150.0), (2, 120.0)]);

    // a second pass yields the same finite sequence
    let second: Vec<(usize, f64)> = engine.entity_history("p").unwrap().collect();
    assert_eq!(first, second);

    assert!(engine.entity_history("ghost").is_none());
}

#[test]
fn test_process_history_parallel_series() {
    let mut engine = TelemetryEngine::new(TelemetryConfig {
        history_capacity: 3,
        ..TelemetryConfig::default()
    });
    for i in 0..5u64 {
        engine.record_process_sample(sample(100.0 * i as f64, i));
    }

    let history = engine.process_history();
    assert_eq!(history.len(), 3);
    let (_, newest) = history.iter().last().unwrap();
    assert_eq!(newest.working_set_kb, 400.0);
    assert_eq!(newest.paged_kb, 800.0);
    assert_eq!(newest.timestamp_ms, 4);
}

#[test]
fn test_aggregate_excludes_unloaded() {
    let mut engine = TelemetryEngine::default();
    engine.apply_snapshot(&[obs("a", 100.0), obs("b", 200.0), obs("c", 300.0)], 1_000);
    engine.apply_snapshot(&[obs("a", 100.0), obs("b", 200.0)], 2_000);

    assert_eq!(engine.aggregate_tracked_total(), 300.0);
}

#[test]
fn test_snapshot_serializes_for_presentation() {
    let mut engine = TelemetryEngine::default();
    engine.apply_snapshot(&[obs("a", 100.0), obs("b", 700.0)], 1_000);
    engine.sort(SortKey::Value, false);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.entities.len(), 2);
    assert_eq!(snapshot.entities[0].name, "b");
    assert_eq!(snapshot.aggregate_tracked_kb, 800.0);
    assert_eq!(snapshot.alert_count, 0);

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"status\":\"running\""));
}

#[test]
fn test_shared_engine_single_writer_discipline() {
    let shared = SharedEngine::new(TelemetryEngine::default());

    {
        let mut engine = shared.write();
        engine.apply_snapshot(&[obs("p", 100.0)], 1_000);
    }

    let reader = shared.clone();
    let engine = reader.read();
    assert_eq!(engine.tracked_len(), 1);
    assert_eq!(engine.entity("p").unwrap().current_kb, 100.0);
}
