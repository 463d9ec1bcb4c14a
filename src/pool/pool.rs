/*!
 * Entity Pool
 * Fixed-capacity slot pool with name lookup, display order, and slot reuse
 *
 * All slots (including their history rings) are preallocated at
 * construction; admission, update, pruning, and removal never allocate
 * record storage. Freed slot indices go onto a reuse freelist consulted
 * before the forward cursor, so churn within the capacity bound never
 * exhausts the pool. Poll-cycle membership is tracked by a generation
 * stamp on each record rather than a per-cycle name set.
 */

use crate::core::types::{EntityStatus, Kb, TimestampMs};
use crate::pool::record::EntityRecord;
use crate::sort::{self, SortKey};
use ahash::RandomState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Pool operation result
pub type PoolResult<T> = Result<T, PoolError>;

/// Entity pool errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum PoolError {
    #[error("Entity pool at capacity: all {capacity} slots are live")]
    #[diagnostic(
        code(pool::at_capacity),
        help("The entity stays untracked for this cycle. Remove retired entities or raise max_tracked_entities.")
    )]
    AtCapacity { capacity: usize },
}

/// Fixed-capacity pool of entity records
#[derive(Debug)]
pub struct EntityPool {
    slots: Vec<EntityRecord>,
    /// Forward cursor for first-time slot claims
    next_free: usize,
    /// Indices freed by `remove`, reused before advancing the cursor
    free_list: Vec<usize>,
    /// name -> slot index; keys unique while tracked
    index: HashMap<String, usize, RandomState>,
    /// Display order, independent of lookup iteration order
    order: Vec<String>,
    /// Current poll generation; records carry the stamp of the cycle in
    /// which they were last observed
    cycle: u64,
}

impl EntityPool {
    pub fn new(capacity: usize, entity_history_capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| EntityRecord::new("", entity_history_capacity))
            .collect();
        Self {
            slots,
            next_free: 0,
            free_list: Vec::with_capacity(capacity),
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            order: Vec::with_capacity(capacity),
            cycle: 0,
        }
    }

    /// Open a new poll cycle. Every `get_or_create` (and so every
    /// `update`) until the next call stamps its record as observed in
    /// this cycle; `prune_and_mark` then retires the rest.
    pub fn begin_cycle(&mut self) {
        self.cycle += 1;
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of currently tracked entities.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&EntityRecord> {
        self.index.get(name).map(|&i| &self.slots[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut EntityRecord> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.slots[i]),
            None => None,
        }
    }

    /// Existing record for `name`, or a freshly claimed slot.
    ///
    /// Fails with `AtCapacity` when no slot is available; no partial state
    /// is created in that case and the entity must be treated as untracked
    /// for this cycle.
    pub fn get_or_create(&mut self, name: &str) -> PoolResult<&mut EntityRecord> {
        if let Some(&i) = self.index.get(name) {
            let record = &mut self.slots[i];
            record.last_seen_cycle = self.cycle;
            return Ok(record);
        }

        let slot = if let Some(i) = self.free_list.pop() {
            i
        } else if self.next_free < self.slots.len() {
            let i = self.next_free;
            self.next_free += 1;
            i
        } else {
            return Err(PoolError::AtCapacity {
                capacity: self.slots.len(),
            });
        };

        self.slots[slot].reset_for(name);
        self.slots[slot].last_seen_cycle = self.cycle;
        self.index.insert(name.to_string(), slot);
        self.order.push(name.to_string());
        debug!(entity = name, slot, "tracking new entity");
        Ok(&mut self.slots[slot])
    }

    /// Apply one measurement to a tracked or newly admitted entity.
    pub fn update(
        &mut self,
        name: &str,
        value: Kb,
        status: EntityStatus,
        now: TimestampMs,
    ) -> PoolResult<()> {
        self.get_or_create(name)?.apply_measurement(value, status, now);
        Ok(())
    }

    /// Mark every tracked entity not observed in the current cycle as
    /// Unloaded.
    ///
    /// Idempotent: entities already Unloaded are skipped, so a repeat call
    /// appends no second zero sample. Allocation-free.
    pub fn prune_and_mark(&mut self) {
        for name in &self.order {
            let slot = self.index[name.as_str()];
            let record = &mut self.slots[slot];
            if record.last_seen_cycle != self.cycle && record.status != EntityStatus::Unloaded {
                record.mark_unloaded();
                info!(entity = name.as_str(), "entity unloaded");
            }
        }
    }

    /// Stop tracking `name`: erase it from the lookup and the display
    /// order, and recycle its slot. Unknown names are a no-op.
    pub fn remove(&mut self, name: &str) {
        if let Some(slot) = self.index.remove(name) {
            self.order.retain(|n| n != name);
            self.free_list.push(slot);
            debug!(entity = name, slot, "entity removed, slot recycled");
        }
    }

    /// Display order as of the last `sort` call (insertion order before
    /// any sort).
    pub fn ordered_names(&self) -> &[String] {
        &self.order
    }

    /// Records in display order.
    pub fn entities(&self) -> impl Iterator<Item = &EntityRecord> + '_ {
        self.order
            .iter()
            .map(move |name| &self.slots[self.index[name.as_str()]])
    }

    /// Sum of current values over all non-Unloaded tracked entities.
    pub fn aggregate_tracked_total(&self) -> Kb {
        self.entities()
            .filter(|rec| rec.status != EntityStatus::Unloaded)
            .map(|rec| rec.current_kb)
            .sum()
    }

    /// Reorder the display list by `key`. Unloaded entities always sort
    /// after loaded ones, regardless of key or direction.
    pub fn sort(&mut self, key: SortKey, ascending: bool) {
        let mut order = std::mem::take(&mut self.order);
        order.sort_by(|a, b| {
            let ra = &self.slots[self.index[a.as_str()]];
            let rb = &self.slots[self.index[b.as_str()]];
            sort::compare(ra, rb, key, ascending)
        });
        self.order = order;
    }

    /// Drop all tracked entities and recycle every slot.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        self.free_list.clear();
        self.next_free = 0;
        self.cycle = 0;
    }
}
