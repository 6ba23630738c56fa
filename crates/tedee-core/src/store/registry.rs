// ── Lock registry ──
//
// Owned by the client; only the reconciler mutates it (through `&mut self`),
// so there is never more than one writer. Readers either borrow individual
// locks or subscribe to a `watch` channel that carries a fresh snapshot
// after every mutation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{Lock, LockId};

/// Snapshot of every tracked lock, ordered by id.
pub type LockSnapshot = Arc<Vec<Lock>>;

/// The set of locks a client tracks, keyed by id.
pub struct LockRegistry {
    locks: HashMap<LockId, Lock>,
    snapshot: watch::Sender<LockSnapshot>,
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LockRegistry {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            locks: HashMap::new(),
            snapshot,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn get(&self, id: LockId) -> Option<&Lock> {
        self.locks.get(&id)
    }

    pub fn contains(&self, id: LockId) -> bool {
        self.locks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = LockId> + '_ {
        self.locks.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lock> {
        self.locks.values()
    }

    /// Current snapshot, cheap to clone and safe to hand to other tasks.
    pub fn snapshot(&self) -> LockSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<LockSnapshot> {
        self.snapshot.subscribe()
    }

    // ── Mutation (reconciler only) ───────────────────────────────────

    /// Insert or replace a lock. Returns `true` if the id was new.
    #[cfg(test)]
    pub(crate) fn upsert(&mut self, lock: Lock) -> bool {
        let is_new = self.locks.insert(lock.id, lock).is_none();
        self.publish();
        is_new
    }

    /// Mutate one lock in place. Returns `false` if the id is not tracked.
    pub(crate) fn update(&mut self, id: LockId, f: impl FnOnce(&mut Lock)) -> bool {
        let Some(lock) = self.locks.get_mut(&id) else {
            return false;
        };
        f(lock);
        self.publish();
        true
    }

    /// Apply several mutations and publish a single snapshot at the end.
    pub(crate) fn batch<R>(&mut self, f: impl FnOnce(&mut HashMap<LockId, Lock>) -> R) -> R {
        let result = f(&mut self.locks);
        self.publish();
        result
    }

    fn publish(&self) {
        let mut locks: Vec<Lock> = self.locks.values().cloned().collect();
        locks.sort_by_key(|lock| lock.id);
        self.snapshot.send_replace(Arc::new(locks));
    }
}
