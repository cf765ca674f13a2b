//! The in-flight checkout lock table.
//!
//! Two concurrent create-checkout calls for the same (buyer, gig) pair are a real race: each
//! database or gateway call is a suspension point, so a second request can interleave before the
//! first has persisted its pending order. The lock table rejects the second call outright
//! instead of racing a second gateway order.
//!
//! The table is process-local, transient state. It must not be relied on across restarts or
//! between instances; the durable backstop is the partial unique index on pending orders.

use std::{
    collections::{hash_map::Entry, HashMap},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

/// How long an entry may sit in the table before the sweeper may reclaim it. A request that is
/// still running owns its entry; eligibility is keyed strictly on age.
pub const LOCK_MAX_AGE: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckoutKey {
    pub buyer_id: i64,
    pub gig_id: i64,
}

/// Per-(buyer, gig) mutual exclusion across the order-creation window.
#[derive(Clone, Default)]
pub struct ProcessingLocks {
    entries: Arc<Mutex<HashMap<CheckoutKey, Instant>>>,
}

impl ProcessingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an in-flight checkout for the pair, or returns `None` if one is already
    /// running. The returned guard releases the entry when dropped, on every exit path.
    pub fn try_acquire(&self, buyer_id: i64, gig_id: i64) -> Option<CheckoutGuard> {
        let key = CheckoutKey { buyer_id, gig_id };
        let mut entries = self.entries();
        match entries.entry(key) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(Instant::now());
                Some(CheckoutGuard { key, locks: self.clone() })
            },
        }
    }

    /// Removes entries older than `max_age` and returns how many were reclaimed. Guards normally
    /// clean up after themselves; anything this finds was leaked.
    pub fn sweep_stale(&self, max_age: Duration) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, started| started.elapsed() <= max_age);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn release(&self, key: &CheckoutKey) {
        self.entries().remove(key);
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<CheckoutKey, Instant>> {
        // A panic while holding the lock leaves the map intact, so the poison can be ignored.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// RAII handle for an in-flight checkout. Dropping it releases the lock unconditionally.
pub struct CheckoutGuard {
    key: CheckoutKey,
    locks: ProcessingLocks,
}

impl Drop for CheckoutGuard {
    fn drop(&mut self) {
        self.locks.release(&self.key);
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::ProcessingLocks;

    #[test]
    fn second_acquisition_is_rejected() {
        let locks = ProcessingLocks::new();
        let guard = locks.try_acquire(1, 10).expect("first acquisition should succeed");
        assert!(locks.try_acquire(1, 10).is_none());
        // A different pair is unaffected
        assert!(locks.try_acquire(1, 11).is_some());
        assert!(locks.try_acquire(2, 10).is_some());
        drop(guard);
    }

    #[test]
    fn dropping_the_guard_releases_the_lock() {
        let locks = ProcessingLocks::new();
        {
            let _guard = locks.try_acquire(1, 10).unwrap();
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
        assert!(locks.try_acquire(1, 10).is_some());
    }

    #[test]
    fn sweep_is_keyed_on_age() {
        let locks = ProcessingLocks::new();
        let guard = locks.try_acquire(1, 10).unwrap();
        // Fresh entries are not reclaimed, even by a zealous sweeper
        assert_eq!(locks.sweep_stale(Duration::from_secs(30)), 0);
        assert_eq!(locks.len(), 1);
        std::thread::sleep(Duration::from_millis(20));
        // Entries past the age limit are reclaimed whether or not a guard still exists
        assert_eq!(locks.sweep_stale(Duration::from_millis(5)), 1);
        assert!(locks.is_empty());
        drop(guard);
    }
}
