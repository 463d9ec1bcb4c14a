/*!
 * Core Types
 * Common types used across the telemetry engine
 */

use serde::{Deserialize, Serialize};

/// Memory value in kilobytes
pub type Kb = f64;

/// Timestamp in milliseconds since an arbitrary epoch chosen by the collector
pub type TimestampMs = u64;

/// Rate of change in kilobytes per second
pub type KbPerSec = f64;

/// Load state of a tracked entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    #[default]
    Unknown,
    Running,
    Unloaded,
}

impl EntityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Unknown => "unknown",
            EntityStatus::Running => "running",
            EntityStatus::Unloaded => "unloaded",
        }
    }
}

impl std::fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed observation of a tracked entity, as supplied by the collector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityObservation {
    pub name: String,
    pub memory_kb: Kb,
    pub status: EntityStatus,
}

impl EntityObservation {
    pub fn new(name: impl Into<String>, memory_kb: Kb, status: EntityStatus) -> Self {
        Self {
            name: name.into(),
            memory_kb,
            status,
        }
    }
}

/// One whole-process measurement, as supplied by the collector
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProcessSample {
    pub working_set_kb: Kb,
    pub paged_kb: Kb,
    pub tracked_total_kb: Kb,
    pub timestamp_ms: TimestampMs,
}
