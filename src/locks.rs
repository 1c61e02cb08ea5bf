//! Exclusive locks scoped to a container id.
//!
//! Placements into the same container are serialised so the collision check
//! always sees a consistent occupant set. Different containers never contend.
//! Locks are held briefly and never across an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of one mutex per container id, created on first use.
///
/// # Examples
/// ```
/// use stowage::locks::ContainerLocks;
///
/// let locks = ContainerLocks::new();
/// let occupants = locks.with_lock("contA", || 3);
/// assert_eq!(occupants, 3);
/// ```
#[derive(Debug, Default)]
pub struct ContainerLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ContainerLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, container_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(container_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Runs `f` while holding the container's lock.
    ///
    /// A lock poisoned by a panicking holder is taken over, not propagated.
    pub fn with_lock<R>(&self, container_id: &str, f: impl FnOnce() -> R) -> R {
        let lock = self.handle(container_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }
}
