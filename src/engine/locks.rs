//! Key-scoped mutual exclusion.

use crate::persistence::OrderId;
use std::collections::HashSet;
use std::sync::{Condvar, Mutex, PoisonError};

/// Serializes work per order identifier.
///
/// Holders of different identifiers never wait on each other. The set only
/// contains identifiers with an operation in flight, so it does not grow
/// with the number of orders ever seen.
#[derive(Default)]
pub(crate) struct KeyedLocks {
    held: Mutex<HashSet<OrderId>>,
    released: Condvar,
}

/// Releases its identifier when dropped.
pub(crate) struct KeyGuard<'a> {
    locks: &'a KeyedLocks,
    id: OrderId,
}

impl KeyedLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Block until no other guard holds `id`, then hold it.
    pub(crate) fn acquire(&self, id: OrderId) -> KeyGuard<'_> {
        let held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        let mut held = self
            .released
            .wait_while(held, |held| held.contains(&id))
            .unwrap_or_else(PoisonError::into_inner);
        held.insert(id);
        KeyGuard { locks: self, id }
    }

    #[cfg(test)]
    fn is_held(&self, id: &OrderId) -> bool {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        let mut held = self
            .locks
            .held
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        held.remove(&self.id);
        self.locks.released.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn guard_releases_on_drop() {
        let locks = KeyedLocks::new();
        let id = OrderId::new();

        {
            let _guard = locks.acquire(id);
            assert!(locks.is_held(&id));
        }
        assert!(!locks.is_held(&id));
    }

    #[test]
    fn different_ids_do_not_block() {
        let locks = KeyedLocks::new();
        let _a = locks.acquire(OrderId::new());
        let _b = locks.acquire(OrderId::new());
    }

    #[test]
    fn same_id_is_mutually_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let id = OrderId::new();
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    let _guard = locks.acquire(id);
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_inside.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(2));
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert!(!locks.is_held(&id));
    }
}
