//! Per-scope write serialization.
//!
//! Creating or updating a slot reads the scope's existing slots and then
//! writes. Holding the scope's lock across both steps makes the pair atomic
//! with respect to other writers in this process. Writers in other processes
//! are caught by the store's exclusion constraint instead.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::models::slot::SlotScope;

type LockMap = DashMap<SlotScope, Arc<Mutex<()>>>;

#[derive(Debug, Clone, Default)]
pub struct ScopeLocks {
    locks: Arc<LockMap>,
}

impl ScopeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other writer holds `scope`, then holds it until the guard drops.
    pub async fn acquire(&self, scope: SlotScope) -> ScopeGuard {
        // The map entry is released at the end of this statement, before awaiting.
        let lock = self.locks.entry(scope).or_default().value().clone();
        let guard = lock.lock_owned().await;

        ScopeGuard {
            guard: Some(guard),
            scope,
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of scopes currently held or waited on.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Holds a scope's lock; dropping it releases the scope.
#[derive(Debug)]
pub struct ScopeGuard {
    guard: Option<OwnedMutexGuard<()>>,
    scope: SlotScope,
    locks: Arc<LockMap>,
}

impl ScopeGuard {
    pub fn scope(&self) -> SlotScope {
        self.scope
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map's own reference left means nobody holds or waits on this scope.
        self.locks
            .remove_if(&self.scope, |_, lock| Arc::strong_count(lock) == 1);
    }
}
