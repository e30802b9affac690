//! The concurrent key → FIFO queue store behind `WR`, `RD` and `IN`.
//!
//! ## Locking
//! One `parking_lot::Mutex` guards the whole map and one `Condvar` is shared
//! by every blocked caller. A write to any key wakes all of them
//! (`notify_all`) and each re-checks its own key before proceeding, so a
//! wake-up caused by an unrelated key, or by a value another taker already
//! won, simply parks the caller again.
//!
//! ## Invariants
//! - Only `write` inserts into the map. Lookups use `get`/`get_mut`, never an
//!   entry API, so waiting on an absent key leaves the map untouched.
//! - Keys are never removed. A queue drained by `take` stays as an empty entry.

use std::collections::HashMap;
use std::collections::VecDeque;

use parking_lot::Condvar;
use parking_lot::Mutex;
use parking_lot::MutexGuard;
use tracing::trace;

use super::Tuple;
use crate::metrics::BLOCKED_WAITERS;
use crate::metrics::OPERATIONS_TOTAL;

#[derive(Debug, Default)]
struct SpaceState {
    queues: HashMap<String, VecDeque<Tuple>>,
    /// Callers currently parked on `available`
    waiters: usize,
}

/// Shared tuple store. Construct once and hand out behind an `Arc`.
#[derive(Debug, Default)]
pub struct TupleSpace {
    state: Mutex<SpaceState>,
    available: Condvar,
}

impl TupleSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the tail of `key`'s queue. Never blocks.
    pub fn write(
        &self,
        key: &str,
        value: Tuple,
    ) {
        {
            let mut state = self.state.lock();
            match state.queues.get_mut(key) {
                Some(queue) => queue.push_back(value),
                None => {
                    state.queues.insert(key.to_string(), VecDeque::from([value]));
                }
            }
            trace!(key, "tuple written");
        }
        // Woken callers can grab the lock right away.
        self.available.notify_all();
        OPERATIONS_TOTAL.with_label_values(&["write"]).inc();
    }

    /// Returns a copy of the oldest tuple under `key`, blocking until one exists.
    pub fn read(
        &self,
        key: &str,
    ) -> Tuple {
        let mut state = self.state.lock();
        let value = loop {
            if let Some(head) = state.queues.get(key).and_then(VecDeque::front) {
                break head.clone();
            }
            self.park(&mut state, key);
        };
        drop(state);

        OPERATIONS_TOTAL.with_label_values(&["read"]).inc();
        value
    }

    /// Removes and returns the oldest tuple under `key`, blocking until one exists.
    pub fn take(
        &self,
        key: &str,
    ) -> Tuple {
        let value = self.take_head(key);
        OPERATIONS_TOTAL.with_label_values(&["take"]).inc();
        value
    }

    /// Blocking removal shared by `take` and the input side of an exchange.
    /// The lock is released before returning.
    pub(crate) fn take_head(
        &self,
        key: &str,
    ) -> Tuple {
        let mut state = self.state.lock();
        loop {
            if let Some(head) = state.queues.get_mut(key).and_then(VecDeque::pop_front) {
                return head;
            }
            self.park(&mut state, key);
        }
    }

    /// Number of tuples queued under `key`; 0 for a key never written.
    pub fn len(
        &self,
        key: &str,
    ) -> usize {
        self.state.lock().queues.get(key).map_or(0, VecDeque::len)
    }

    /// Number of keys present in the map, drained ones included.
    pub fn key_count(&self) -> usize {
        self.state.lock().queues.len()
    }

    /// Number of callers currently blocked in `read`, `take` or an exchange.
    pub fn waiters(&self) -> usize {
        self.state.lock().waiters
    }

    fn park(
        &self,
        state: &mut MutexGuard<'_, SpaceState>,
        key: &str,
    ) {
        state.waiters += 1;
        BLOCKED_WAITERS.inc();
        trace!(key, waiters = state.waiters, "no tuple yet, waiting");

        self.available.wait(state);

        state.waiters -= 1;
        BLOCKED_WAITERS.dec();
    }
}
