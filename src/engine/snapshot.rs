/*!
 * Engine Snapshot
 * Serializable read-only view for presentation collaborators
 */

use crate::core::types::{EntityStatus, Kb, KbPerSec};
use crate::pool::EntityRecord;
use serde::{Deserialize, Serialize};

/// Headline fields for one tracked entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub name: String,
    pub current_kb: Kb,
    pub peak_kb: Kb,
    pub min_kb: Kb,
    pub average_kb: Kb,
    pub last_delta: KbPerSec,
    pub trend_slope: KbPerSec,
    pub status: EntityStatus,
    pub alert_active: bool,
}

impl From<&EntityRecord> for EntitySnapshot {
    fn from(record: &EntityRecord) -> Self {
        Self {
            name: record.name().to_string(),
            current_kb: record.current_kb,
            peak_kb: record.peak_kb,
            // the min sentinel is meaningless before the first sample
            min_kb: if record.history().is_empty() {
                0.0
            } else {
                record.min_kb
            },
            average_kb: record.average_kb(),
            last_delta: record.last_delta,
            trend_slope: record.trend_slope,
            status: record.status,
            alert_active: record.alert_active,
        }
    }
}

/// One consistent view of the whole engine, in display order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub entities: Vec<EntitySnapshot>,
    pub aggregate_tracked_kb: Kb,
    pub alert_count: usize,
}
