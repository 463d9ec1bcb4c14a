/*!
 * Ring Buffer
 * Fixed-capacity circular sample store with overwrite-oldest semantics
 *
 * All backing storage is claimed once at construction; push never
 * allocates and never fails. Logical index 0 is the oldest retained
 * sample, `len() - 1` the newest.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ring buffer operation result
pub type RingResult<T> = Result<T, RingError>;

/// Ring buffer errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum RingError {
    #[error("Logical index {index} out of range: buffer holds {len} samples")]
    #[diagnostic(
        code(ring::out_of_range),
        help("Valid logical indices are 0..len(). This is a caller contract violation, not data loss.")
    )]
    OutOfRange { index: usize, len: usize },
}

/// Fixed-capacity circular buffer
///
/// Once full, each push silently overwrites the oldest sample. No
/// notification is raised for the loss: this is a trend store, not a
/// durable log.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buf: Box<[T]>,
    /// Next write position
    head: usize,
    /// Number of valid logical entries, saturating at capacity
    len: usize,
}

impl<T: Clone + Default> RingBuffer<T> {
    /// Create a buffer with `capacity` preallocated slots.
    ///
    /// # Panics
    /// Panics if `capacity` is zero; a zero-capacity ring has no valid
    /// state transition.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            buf: vec![T::default(); capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Append a sample, overwriting the oldest once full. Always succeeds.
    pub fn push(&mut self, value: T) {
        let cap = self.capacity();
        self.buf[self.head] = value;
        self.head = (self.head + 1) % cap;
        if self.len < cap {
            self.len += 1;
        }
    }

    /// Read by logical age: 0 = oldest retained, `len() - 1` = newest.
    ///
    /// Out-of-range reads fail with a typed error rather than exposing
    /// stale slots.
    pub fn get(&self, index: usize) -> RingResult<&T> {
        if index >= self.len {
            return Err(RingError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(&self.buf[self.physical(index)])
    }

    /// Newest sample, if any.
    pub fn latest(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            Some(&self.buf[self.physical(self.len - 1)])
        }
    }

    /// Iterate oldest to newest. Restartable: each call yields a fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).map(move |i| &self.buf[self.physical(i)])
    }

    /// Drop all logical entries. Slots are retained for reuse.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    fn physical(&self, logical: usize) -> usize {
        let cap = self.capacity();
        // head is one past the newest; walk back len entries then forward
        (self.head + cap - self.len + logical) % cap
    }
}
