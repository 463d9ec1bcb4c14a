/*!
 * Sort Keys
 * Closed set of display-order sort keys with a fixed Unloaded-last partition
 */

use crate::core::types::EntityStatus;
use crate::pool::EntityRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Selectable display-order key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Case-insensitive entity name
    Name,
    /// Current memory value
    Value,
    /// Status string
    Status,
    /// Most recent delta (KB/s)
    Delta,
    /// EMA trend slope (KB/s)
    Trend,
}

/// Compare two records for display ordering.
///
/// The Unloaded-last partition is the mandatory primary criterion and is
/// never affected by `ascending`; the requested key and direction apply
/// only within each partition.
pub fn compare(a: &EntityRecord, b: &EntityRecord, key: SortKey, ascending: bool) -> Ordering {
    let a_unloaded = a.status == EntityStatus::Unloaded;
    let b_unloaded = b.status == EntityStatus::Unloaded;
    if a_unloaded != b_unloaded {
        return if a_unloaded {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    let by_key = match key {
        SortKey::Name => a
            .name()
            .bytes()
            .map(|c| c.to_ascii_lowercase())
            .cmp(b.name().bytes().map(|c| c.to_ascii_lowercase())),
        SortKey::Value => a.current_kb.total_cmp(&b.current_kb),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        SortKey::Delta => a.last_delta.total_cmp(&b.last_delta),
        SortKey::Trend => a.trend_slope.total_cmp(&b.trend_slope),
    };

    if ascending {
        by_key
    } else {
        by_key.reverse()
    }
}
