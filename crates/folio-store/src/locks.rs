//! Per-collection mutual exclusion.
//!
//! Two levels of locking: a short-lived registry mutex guards the
//! `collection -> lock` map during lookup or insert, and a long-lived
//! per-collection mutex serializes the mutating I/O itself. The registry
//! mutex is never held while a collection lock is awaited or held, so work
//! on unrelated collections does not queue behind a single global point.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Exclusive lock handle for one collection.
pub type CollectionLock = Arc<Mutex<()>>;

/// Lazily populated registry of collection locks.
///
/// Entries are never removed, not even when a collection directory is
/// deleted. A collection recreated later under the same name reuses the
/// same lock. Evicting an entry could hand a second lock to a thread that
/// arrives while the first is still held, which would break exclusion.
///
/// Keys are the collection strings exactly as given. `"users"`, `"users/"`
/// and `"./users"` name the same directory but get three separate locks,
/// so writes through different spellings are not serialized against each
/// other. Callers should spell a collection one way.
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: Mutex<HashMap<String, CollectionLock>>,
}

impl LockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the lock for `collection`, creating it on first use.
    ///
    /// Concurrent first callers for a brand-new collection all receive the
    /// same instance.
    pub fn acquire(&self, collection: &str) -> CollectionLock {
        let mut locks = self.locks.lock().expect("lock registry poisoned");
        if let Some(lock) = locks.get(collection) {
            return Arc::clone(lock);
        }
        let lock = CollectionLock::default();
        locks.insert(collection.to_string(), Arc::clone(&lock));
        lock
    }

    /// Number of collections that have ever been locked.
    pub fn len(&self) -> usize {
        self.locks.lock().expect("lock registry poisoned").len()
    }

    /// Returns `true` if no collection has been locked yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lock a collection handle for the duration of a mutating operation.
///
/// The mutex guards `()`, so a panic in a previous holder leaves nothing
/// inconsistent behind and poisoning is ignored.
pub fn hold(lock: &CollectionLock) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}
