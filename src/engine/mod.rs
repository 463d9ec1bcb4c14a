/*!
 * Telemetry Engine
 * Explicit context object tying the pool, histories, and alerting together
 *
 * Pure function of (current state, new sample) -> (new state, alerts):
 * the engine never initiates I/O and allocates nothing in steady state
 * beyond alert message formatting.
 */

mod shared;
mod snapshot;

pub use shared::SharedEngine;
pub use snapshot::{EngineSnapshot, EntitySnapshot};

use crate::config::TelemetryConfig;
use crate::core::types::{EntityObservation, Kb, ProcessSample, TimestampMs};
use crate::history::ProcessHistory;
use crate::pool::{EntityPool, EntityRecord};
use crate::sort::SortKey;
use crate::trend::{self, AlertLog, AlertRecord};
use tracing::{debug, info, warn};

/// The analysis core: fixed-capacity state plus per-cycle entry points
pub struct TelemetryEngine {
    config: TelemetryConfig,
    pool: EntityPool,
    process_history: ProcessHistory,
    alerts: AlertLog,
}

impl TelemetryEngine {
    /// Claim all backing storage up front per the configured capacities.
    /// Zero capacities are raised to 1 rather than rejected.
    pub fn new(config: TelemetryConfig) -> Self {
        let config = config.with_valid_capacities();
        info!(
            max_entities = config.max_tracked_entities,
            history = config.history_capacity,
            entity_history = config.entity_history_capacity,
            "telemetry engine initialized"
        );
        let pool = EntityPool::new(config.max_tracked_entities, config.entity_history_capacity);
        let process_history = ProcessHistory::new(config.history_capacity);
        let alerts = AlertLog::new(config.alert_log_capacity);
        Self {
            config,
            pool,
            process_history,
            alerts,
        }
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    /// Replace the configuration. Threshold, smoothing, and enable options
    /// take effect on the next update; capacity options take effect at the
    /// next `reset`.
    pub fn set_config(&mut self, config: TelemetryConfig) {
        let config = config.with_valid_capacities();
        if config.max_tracked_entities != self.pool.capacity()
            || config.history_capacity != self.process_history.capacity()
            || config.alert_log_capacity != self.alerts.capacity()
        {
            debug!("capacity options changed; they bind at the next reset");
        }
        self.config = config;
    }

    /// Record one whole-process measurement.
    pub fn record_process_sample(&mut self, sample: ProcessSample) {
        self.process_history.push(sample);
    }

    /// Apply a full poll snapshot: update every observed entity, run the
    /// trend and alert analysis, then mark absent entities Unloaded.
    ///
    /// An entity that cannot be admitted (pool at capacity) is dropped for
    /// this cycle; other entities are unaffected.
    pub fn apply_snapshot(&mut self, observations: &[EntityObservation], now: TimestampMs) {
        self.pool.begin_cycle();
        for obs in observations {
            match self.pool.get_or_create(&obs.name) {
                Ok(record) => {
                    record.apply_measurement(obs.memory_kb, obs.status, now);
                    trend::observe(record, &self.config, &mut self.alerts, now);
                }
                Err(err) => {
                    warn!(entity = obs.name.as_str(), %err, "sample dropped");
                }
            }
        }
        self.pool.prune_and_mark();
    }

    /// Reorder the display list; Unloaded entities always sort last.
    pub fn sort(&mut self, key: SortKey, ascending: bool) {
        self.pool.sort(key, ascending);
    }

    /// Stop tracking an entity and recycle its pool slot.
    pub fn remove(&mut self, name: &str) {
        self.pool.remove(name);
    }

    /// Tracked record, if any.
    pub fn entity(&self, name: &str) -> Option<&EntityRecord> {
        self.pool.get(name)
    }

    /// Number of currently tracked entities.
    pub fn tracked_len(&self) -> usize {
        self.pool.len()
    }

    /// Per-entity history, oldest first, as (logical index, value) pairs.
    pub fn entity_history(
        &self,
        name: &str,
    ) -> Option<impl Iterator<Item = (usize, Kb)> + '_> {
        self.pool
            .get(name)
            .map(|record| record.history().iter().copied().enumerate())
    }

    /// The four parallel whole-process series.
    pub fn process_history(&self) -> &ProcessHistory {
        &self.process_history
    }

    /// Display order as of the last `sort` call.
    pub fn ordered_entities(&self) -> &[String] {
        self.pool.ordered_names()
    }

    /// Bounded alert sequence, oldest first, newest-overwrite semantics.
    pub fn alerts(&self) -> impl Iterator<Item = &AlertRecord> + '_ {
        self.alerts.iter()
    }

    /// Sum of current values over all non-Unloaded tracked entities.
    pub fn aggregate_tracked_total(&self) -> Kb {
        self.pool.aggregate_tracked_total()
    }

    /// One consistent serializable view of the engine, in display order.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            entities: self.pool.entities().map(EntitySnapshot::from).collect(),
            aggregate_tracked_kb: self.pool.aggregate_tracked_total(),
            alert_count: self.alerts.len(),
        }
    }

    /// Discard all tracked state and rebuild the backing stores with the
    /// current configuration's capacities. The only clearing path.
    pub fn reset(&mut self) {
        info!("telemetry engine reset");
        self.pool = EntityPool::new(
            self.config.max_tracked_entities,
            self.config.entity_history_capacity,
        );
        self.process_history = ProcessHistory::new(self.config.history_capacity);
        self.alerts = AlertLog::new(self.config.alert_log_capacity);
    }
}

impl Default for TelemetryEngine {
    fn default() -> Self {
        Self::new(TelemetryConfig::default())
    }
}
