/*!
 * Engine Configuration
 * Recognized tuning options for the telemetry core
 *
 * Threshold and smoothing options take effect on the next update.
 * Capacity options bind at construction and at `reset`: resizing live
 * buffers would allocate in steady state, which the engine forbids.
 */

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default sustained-growth threshold, KB per second
pub const DEFAULT_LEAK_THRESHOLD_KB_S: f64 = 50.0;
/// Default single-step relative threshold, percent
pub const DEFAULT_SPIKE_THRESHOLD_PCT: f64 = 100.0;
/// Default single-step absolute threshold, KB
pub const DEFAULT_SPIKE_MIN_ABSOLUTE_KB: f64 = 512.0;
/// Default whole-process history depth (samples)
pub const DEFAULT_HISTORY_CAPACITY: usize = 720;
/// Default per-entity history depth (samples)
pub const DEFAULT_ENTITY_HISTORY_CAPACITY: usize = 120;
/// Default entity pool size; tens, not thousands
pub const DEFAULT_MAX_TRACKED_ENTITIES: usize = 64;
/// Default EMA smoothing weight for the trend slope
pub const DEFAULT_TREND_ALPHA: f64 = 0.3;
/// History points required before the trend EMA starts moving
pub const DEFAULT_MIN_SAMPLES_FOR_TREND: usize = 3;
/// Default bounded alert log depth
pub const DEFAULT_ALERT_LOG_CAPACITY: usize = 20;

/// Telemetry engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Trend slope above which a leak alert fires, KB/s
    pub leak_threshold_kb_s: f64,
    /// Single-step percentage change above which a spike may fire
    pub spike_threshold_pct: f64,
    /// Single-step absolute change a spike must also exceed, KB
    pub spike_min_absolute_kb: f64,
    /// Gates both detectors as a unit; bookkeeping always proceeds
    pub alerts_enabled: bool,
    /// Whole-process history depth (construction/reset time)
    pub history_capacity: usize,
    /// Per-entity history depth (construction/reset time)
    pub entity_history_capacity: usize,
    /// Entity pool size (construction/reset time)
    pub max_tracked_entities: usize,
    /// EMA smoothing weight in (0, 1]
    pub trend_alpha: f64,
    /// History points required before the trend EMA starts moving
    pub min_samples_for_trend: usize,
    /// Alert log depth (construction/reset time)
    pub alert_log_capacity: usize,
}

impl TelemetryConfig {
    /// Raise zero capacities to the smallest usable value.
    ///
    /// A zero-capacity ring or pool has no valid state transition, and an
    /// externally supplied config is not a reason to panic the host, so
    /// the engine sanitizes every config it accepts.
    pub fn with_valid_capacities(mut self) -> Self {
        for (field, value) in [
            ("history_capacity", &mut self.history_capacity),
            ("entity_history_capacity", &mut self.entity_history_capacity),
            ("max_tracked_entities", &mut self.max_tracked_entities),
            ("alert_log_capacity", &mut self.alert_log_capacity),
        ] {
            if *value == 0 {
                warn!(field, "zero capacity raised to 1");
                *value = 1;
            }
        }
        self
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            leak_threshold_kb_s: DEFAULT_LEAK_THRESHOLD_KB_S,
            spike_threshold_pct: DEFAULT_SPIKE_THRESHOLD_PCT,
            spike_min_absolute_kb: DEFAULT_SPIKE_MIN_ABSOLUTE_KB,
            alerts_enabled: true,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            entity_history_capacity: DEFAULT_ENTITY_HISTORY_CAPACITY,
            max_tracked_entities: DEFAULT_MAX_TRACKED_ENTITIES,
            trend_alpha: DEFAULT_TREND_ALPHA,
            min_samples_for_trend: DEFAULT_MIN_SAMPLES_FOR_TREND,
            alert_log_capacity: DEFAULT_ALERT_LOG_CAPACITY,
        }
    }
}
