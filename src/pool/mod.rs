/*!
 * Pool Module
 * Entity records, the fixed-capacity pool, and lifecycle transitions
 */

mod pool;
mod record;

pub use pool::{EntityPool, PoolError, PoolResult};
pub use record::EntityRecord;
