//! src/search/slots.rs
//! Admission slots: a counting semaphore over a bounded token channel

use crossbeam_channel::{bounded, Receiver, Sender};

/// A pool of exactly `capacity` admission slots.
///
/// Acquiring pushes a token into a channel of capacity `capacity`, so the
/// `capacity + 1`-th acquirer blocks until a guard is dropped. The pool owns both
/// channel ends, so the channel can never disconnect while the pool is alive.
#[derive(Debug)]
pub struct SlotPool {
    take: Sender<()>,
    give_back: Receiver<()>,
    capacity: usize,
}

/// Permission to run one oracle invocation. Released on drop.
#[derive(Debug)]
#[must_use = "a slot is released as soon as its guard is dropped"]
pub struct SlotGuard<'pool> {
    pool: &'pool SlotPool,
}

impl SlotPool {
    /// Create a pool with `capacity` slots (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (take, give_back) = bounded(capacity);
        Self {
            take,
            give_back,
            capacity,
        }
    }

    /// Block until a slot is free, then take it.
    pub fn acquire(&self) -> SlotGuard<'_> {
        // Both ends are owned by `self`: `send` only fails on disconnect.
        let _ = self.take.send(());
        SlotGuard { pool: self }
    }

    /// Take a slot if one is free right now.
    #[cfg(test)]
    pub(crate) fn try_acquire(&self) -> Option<SlotGuard<'_>> {
        self.take.try_send(()).ok().map(|()| SlotGuard { pool: self })
    }

    /// Number of slots currently held.
    #[cfg(test)]
    pub(crate) fn in_use(&self) -> usize {
        self.take.len()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        let _ = self.pool.give_back.try_recv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_hands_out_more_than_capacity() {
        let pool = SlotPool::new(2);
        let a = pool.acquire();
        let b = pool.acquire();
        assert_eq!(pool.in_use(), 2);
        assert!(pool.try_acquire().is_none());

        drop(a);
        assert_eq!(pool.in_use(), 1);
        let c = pool.try_acquire();
        assert!(c.is_some());
        assert_eq!(pool.in_use(), 2);

        drop(b);
        drop(c);
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let pool = SlotPool::new(0);
        assert_eq!(pool.capacity(), 1);
        let _slot = pool.acquire();
        assert!(pool.try_acquire().is_none());
    }

    #[test]
    fn blocked_acquirer_wakes_on_release() {
        let pool = SlotPool::new(1);
        let held = pool.acquire();

        std::thread::scope(|s| {
            let waiter = s.spawn(|| {
                let _slot = pool.acquire();
                pool.in_use()
            });
            std::thread::sleep(std::time::Duration::from_millis(20));
            drop(held);
            assert_eq!(waiter.join().unwrap(), 1);
        });
    }
}
