/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

// Re-export RingError from the ring module
pub use crate::ring::RingError;

// Re-export PoolError from the pool module
pub use crate::pool::PoolError;
