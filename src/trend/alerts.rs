/*!
 * Alert Log
 * Bounded log of leak and spike alerts with overwrite-oldest semantics
 */

use crate::core::types::TimestampMs;
use crate::ring::RingBuffer;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Alert classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Sustained growth above the leak threshold (edge-triggered)
    #[default]
    Leak,
    /// Single-step jump meeting both spike thresholds (per-cycle)
    Spike,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AlertKind::Leak => write!(f, "leak"),
            AlertKind::Spike => write!(f, "spike"),
        }
    }
}

/// One emitted alert
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub timestamp_ms: TimestampMs,
    pub entity: String,
    pub kind: AlertKind,
    pub message: String,
}

/// Bounded alert store; once full, the oldest alert is overwritten
#[derive(Debug, Clone)]
pub struct AlertLog {
    ring: RingBuffer<AlertRecord>,
}

impl AlertLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: RingBuffer::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Append an alert, overwriting the oldest once full.
    pub fn push(&mut self, record: AlertRecord) {
        warn!(
            entity = record.entity.as_str(),
            kind = %record.kind,
            message = record.message.as_str(),
            "alert emitted"
        );
        self.ring.push(record);
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &AlertRecord> + '_ {
        self.ring.iter()
    }

    pub fn latest(&self) -> Option<&AlertRecord> {
        self.ring.latest()
    }

    pub fn clear(&mut self) {
        self.ring.clear();
    }
}
