//! Per-handle serialization of cache population.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<AsyncMutex<()>>>;

/// One async mutex per handle, created on first use and evicted when the last
/// holder or waiter lets go. Holding the guard means no other request is
/// generating an aggregate for the same handle.
#[derive(Debug, Clone, Default)]
pub struct HandleLocks {
    locks: Arc<Mutex<LockMap>>,
}

/// Exclusive access to one handle. Dropping it releases the lock and removes
/// the map entry if nobody else is queued on it.
#[derive(Debug)]
pub struct HandleGuard {
    guard: Option<OwnedMutexGuard<()>>,
    handle: String,
    locks: Arc<Mutex<LockMap>>,
}

fn lock_map(locks: &Mutex<LockMap>) -> MutexGuard<'_, LockMap> {
    locks.lock().unwrap_or_else(PoisonError::into_inner)
}

impl HandleLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, handle: &str) -> HandleGuard {
        let lock = Arc::clone(lock_map(&self.locks).entry(handle.to_string()).or_default());
        HandleGuard {
            guard: Some(lock.lock_owned().await),
            handle: handle.to_string(),
            locks: Arc::clone(&self.locks),
        }
    }

    #[cfg(test)]
    pub fn tracked(&self) -> usize {
        lock_map(&self.locks).len()
    }
}

impl Drop for HandleGuard {
    fn drop(&mut self) {
        // Waiters clone the Arc under the map lock, so a count of one here
        // means only the map still refers to the mutex.
        let mut locks = lock_map(&self.locks);
        self.guard.take();
        if locks
            .get(&self.handle)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.handle);
        }
    }
}
