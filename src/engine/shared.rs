/*!
 * Shared Engine
 * Single-writer wrapper for multi-threaded hosts
 *
 * The core engine is single-threaded by design; hosts that poll from one
 * thread and render from another serialize every mutation through this
 * wrapper's write lock and take display reads under the read lock.
 */

use crate::engine::TelemetryEngine;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Cheaply cloneable handle to one engine instance
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<TelemetryEngine>>,
}

impl SharedEngine {
    pub fn new(engine: TelemetryEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Exclusive access for the polling path.
    pub fn write(&self) -> RwLockWriteGuard<'_, TelemetryEngine> {
        self.inner.write()
    }

    /// Consistent snapshot access for display reads.
    pub fn read(&self) -> RwLockReadGuard<'_, TelemetryEngine> {
        self.inner.read()
    }
}

impl Default for SharedEngine {
    fn default() -> Self {
        Self::new(TelemetryEngine::default())
    }
}
