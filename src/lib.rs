/*!
 * memwatch
 * Allocation-free memory telemetry core for a bounded set of tracked
 * entities (plugins in a host process) plus the aggregate process series
 *
 * The engine consumes already-parsed poll snapshots, retains bounded
 * history in preallocated ring buffers, and derives trend, leak, and
 * spike signals. Collection and presentation are external collaborators.
 */

pub mod config;
pub mod core;
pub mod engine;
pub mod history;
pub mod pool;
pub mod ring;
pub mod sort;
pub mod telemetry;
pub mod trend;

// Re-exports
pub use crate::core::types::{
    EntityObservation, EntityStatus, Kb, KbPerSec, ProcessSample, TimestampMs,
};
pub use config::TelemetryConfig;
pub use engine::{EngineSnapshot, EntitySnapshot, SharedEngine, TelemetryEngine};
pub use history::ProcessHistory;
pub use pool::{EntityPool, EntityRecord, PoolError, PoolResult};
pub use ring::{RingBuffer, RingError, RingResult};
pub use sort::SortKey;
pub use telemetry::init_tracing;
pub use trend::{AlertKind, AlertLog, AlertRecord};
