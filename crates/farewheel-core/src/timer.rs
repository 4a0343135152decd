//! Host-driven timers with cancellation
//!
//! Nothing here sleeps or spawns. Owners schedule a `kind` against an explicit
//! `Instant`, and the host event loop drains expired entries with
//! [`TimerQueue::pop_expired`] on every tick. Handles are never reused, so a
//! cancelled handle can never fire later.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Opaque handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Ordered set of pending timers
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    next_id: u64,
    /// Keyed by (deadline, id) so ties fire in scheduling order
    pending: BTreeMap<(Instant, u64), K>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<K: Copy> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire once `after` has elapsed since `now`
    pub fn schedule(&mut self, now: Instant, after: Duration, kind: K) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert((now + after, id), kind);
        TimerHandle(id)
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let key = self
            .pending
            .keys()
            .find(|(_, id)| *id == handle.0)
            .copied();
        match key {
            Some(key) => self.pending.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.keys().any(|(_, id)| *id == handle.0)
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`
    pub fn pop_expired(&mut self, now: Instant) -> Option<(TimerHandle, K)> {
        let (&(deadline, id), _) = self.pending.iter().next()?;
        if deadline > now {
            return None;
        }
        self.pending
            .remove(&(deadline, id))
            .map(|kind| (TimerHandle(id), kind))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

/// Single-slot timer: restarting always cancels the previous handle first
#[derive(Debug, Clone, Copy, Default)]
pub struct Debouncer {
    slot: Option<TimerHandle>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending timer in this slot and schedule a fresh one
    pub fn restart<K: Copy>(
        &mut self,
        queue: &mut TimerQueue<K>,
        now: Instant,
        after: Duration,
        kind: K,
    ) -> TimerHandle {
        self.cancel(queue);
        let handle = queue.schedule(now, after, kind);
        self.slot = Some(handle);
        handle
    }

    pub fn cancel<K: Copy>(&mut self, queue: &mut TimerQueue<K>) {
        if let Some(handle) = self.slot.take() {
            queue.cancel(handle);
        }
    }

    /// True if `handle` is the one this slot is waiting on. Clears the slot
    /// when it matches, since a fired timer is no longer pending.
    pub fn take_if_current(&mut self, handle: TimerHandle) -> bool {
        if self.slot == Some(handle) {
            self.slot = None;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.slot.is_some()
    }
}
