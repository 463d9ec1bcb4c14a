/*!
 * Process History
 * Whole-process time series as four parallel ring buffers
 *
 * The series share one capacity and advance together atomically per
 * sample, so a logical index denotes the same sampling instant across
 * all four.
 */

use crate::core::types::{Kb, ProcessSample, TimestampMs};
use crate::ring::{RingBuffer, RingResult};

/// Parallel ring buffers for the whole-process series
#[derive(Debug, Clone)]
pub struct ProcessHistory {
    working_set: RingBuffer<Kb>,
    paged: RingBuffer<Kb>,
    tracked_total: RingBuffer<Kb>,
    timestamps: RingBuffer<TimestampMs>,
}

impl ProcessHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            working_set: RingBuffer::new(capacity),
            paged: RingBuffer::new(capacity),
            tracked_total: RingBuffer::new(capacity),
            timestamps: RingBuffer::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.timestamps.capacity()
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Append one process sample to all four series.
    pub fn push(&mut self, sample: ProcessSample) {
        self.working_set.push(sample.working_set_kb);
        self.paged.push(sample.paged_kb);
        self.tracked_total.push(sample.tracked_total_kb);
        self.timestamps.push(sample.timestamp_ms);
    }

    /// Reconstruct the sample at logical index `i` (0 = oldest).
    pub fn get(&self, index: usize) -> RingResult<ProcessSample> {
        Ok(ProcessSample {
            working_set_kb: *self.working_set.get(index)?,
            paged_kb: *self.paged.get(index)?,
            tracked_total_kb: *self.tracked_total.get(index)?,
            timestamp_ms: *self.timestamps.get(index)?,
        })
    }

    /// Iterate the series oldest to newest as reconstructed samples.
    /// Restartable: each call yields a fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = (usize, ProcessSample)> + '_ {
        (0..self.len()).map(move |i| {
            let sample = self
                .get(i)
                .expect("parallel history rings out of step");
            (i, sample)
        })
    }

    pub fn working_set(&self) -> &RingBuffer<Kb> {
        &self.working_set
    }

    pub fn paged(&self) -> &RingBuffer<Kb> {
        &self.paged
    }

    pub fn tracked_total(&self) -> &RingBuffer<Kb> {
        &self.tracked_total
    }

    pub fn timestamps(&self) -> &RingBuffer<TimestampMs> {
        &self.timestamps
    }

    pub fn clear(&mut self) {
        self.working_set.clear();
        self.paged.clear();
        self.tracked_total.clear();
        self.timestamps.clear();
    }
}
