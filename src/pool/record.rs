/*!
 * Entity Record
 * Per-entity measurement state and bounded history
 */

use crate::core::types::{EntityStatus, Kb, KbPerSec, TimestampMs};
use crate::ring::RingBuffer;

/// Sentinel for an as-yet-unobserved minimum
const MIN_SENTINEL: Kb = f64::MAX;

/// Measurement state for one tracked entity
///
/// Owned exclusively by its pool slot for the whole tracked lifetime; the
/// name lookup and the display order list hold only the name, never a copy
/// of the record.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    name: String,
    pub current_kb: Kb,
    pub peak_kb: Kb,
    pub min_kb: Kb,
    /// Rate of change between the two most recent updates
    pub last_delta: KbPerSec,
    /// EMA of `last_delta`; stays 0.0 until enough history accumulates
    pub trend_slope: KbPerSec,
    pub status: EntityStatus,
    history: RingBuffer<Kb>,
    pub last_update_ms: Option<TimestampMs>,
    /// Latched leak-alert state for edge triggering
    pub alert_active: bool,
    /// Poll cycle in which this entity was last observed; stale stamps
    /// mark it for the Unloaded transition without any per-cycle set
    pub(super) last_seen_cycle: u64,
}

impl EntityRecord {
    pub fn new(name: impl Into<String>, history_capacity: usize) -> Self {
        Self {
            name: name.into(),
            current_kb: 0.0,
            peak_kb: 0.0,
            min_kb: MIN_SENTINEL,
            last_delta: 0.0,
            trend_slope: 0.0,
            status: EntityStatus::Unknown,
            history: RingBuffer::new(history_capacity),
            last_update_ms: None,
            alert_active: false,
            last_seen_cycle: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn history(&self) -> &RingBuffer<Kb> {
        &self.history
    }

    /// Mean of the retained history samples, 0.0 when empty.
    pub fn average_kb(&self) -> Kb {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().sum::<Kb>() / self.history.len() as Kb
    }

    /// Apply one polled measurement: value bookkeeping, delta, history.
    ///
    /// The delta is left untouched when `now` does not advance past the
    /// previous update (two polls in the same time quantum).
    pub fn apply_measurement(&mut self, value: Kb, status: EntityStatus, now: TimestampMs) {
        if let Some(last) = self.last_update_ms {
            if now > last {
                let dt_secs = (now - last) as f64 / 1000.0;
                self.last_delta = (value - self.current_kb) / dt_secs;
            }
        }
        self.current_kb = value;
        self.peak_kb = self.peak_kb.max(value);
        self.min_kb = self.min_kb.min(value);
        self.status = status;
        self.history.push(value);
        self.last_update_ms = Some(now);
    }

    /// Transition to Unloaded: zero the value and delta, drop the history
    /// to zero at the unload instant. Caller is responsible for calling
    /// this at most once per unload (idempotence lives in the pool).
    pub fn mark_unloaded(&mut self) {
        self.current_kb = 0.0;
        self.last_delta = 0.0;
        self.history.push(0.0);
        self.status = EntityStatus::Unloaded;
    }

    /// Reinitialize this slot for a new identity, reusing the history
    /// ring's backing storage.
    pub(super) fn reset_for(&mut self, name: &str) {
        self.name.clear();
        self.name.push_str(name);
        self.current_kb = 0.0;
        self.peak_kb = 0.0;
        self.min_kb = MIN_SENTINEL;
        self.last_delta = 0.0;
        self.trend_slope = 0.0;
        self.status = EntityStatus::Unknown;
        self.history.clear();
        self.last_update_ms = None;
        self.alert_active = false;
        self.last_seen_cycle = 0;
    }
}
