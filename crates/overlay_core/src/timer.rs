//! Timer queue
//!
//! One-shot timers keyed by deadline on a host-supplied monotonic clock.
//! Nothing here reads the wall clock: the owner passes `now` in and pops
//! whatever has come due, which keeps every timing path deterministic.

use slotmap::{new_key_type, SlotMap};
use std::time::Duration;

new_key_type! {
    pub struct TimerId;
}

#[derive(Clone, Debug)]
struct Timer<K> {
    deadline: Duration,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
    kind: K,
}

/// A timer taken off the queue because its deadline passed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TimerId,
    pub kind: K,
    /// When the timer was due, which may be earlier than the pop
    pub deadline: Duration,
}

/// Pending one-shot timers, fired in deadline order
#[derive(Debug)]
pub struct TimerQueue<K> {
    timers: SlotMap<TimerId, Timer<K>>,
    next_seq: u64,
}

impl<K: Copy + PartialEq> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// Schedule a timer that fires once `deadline` is reached
    pub fn schedule_at(&mut self, deadline: Duration, kind: K) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Timer {
            deadline,
            seq,
            kind,
        })
    }

    /// Schedule a timer `delay` after `now`
    pub fn schedule(&mut self, now: Duration, delay: Duration, kind: K) -> TimerId {
        self.schedule_at(now.saturating_add(delay), kind)
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn deadline(&self, id: TimerId) -> Option<Duration> {
        self.timers.get(id).map(|t| t.deadline)
    }

    pub fn kind(&self, id: TimerId) -> Option<K> {
        self.timers.get(id).map(|t| t.kind)
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.deadline).min()
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`
    ///
    /// Pop one at a time: handling a timer may cancel or schedule others.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<K>> {
        let (id, _) = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.seq))?;
        self.timers.remove(id).map(|t| Fired {
            id,
            kind: t.kind,
            deadline: t.deadline,
        })
    }

    /// Number of pending timers of the given kind
    pub fn count_of(&self, kind: K) -> usize {
        self.timers.values().filter(|t| t.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

impl<K: Copy + PartialEq> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A named slot holding at most one pending timer
///
/// Arming a slot cancels whatever it held before, so a slot can never have
/// two timers in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerSlot {
    id: Option<TimerId>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self { id: None }
    }

    /// Replace the slot's timer with a new one firing at `deadline`
    pub fn arm_at<K: Copy + PartialEq>(
        &mut self,
        queue: &mut TimerQueue<K>,
        deadline: Duration,
        kind: K,
    ) -> TimerId {
        self.cancel(queue);
        let id = queue.schedule_at(deadline, kind);
        self.id = Some(id);
        id
    }

    /// Replace the slot's timer with a new one firing `delay` after `now`
    pub fn arm<K: Copy + PartialEq>(
        &mut self,
        queue: &mut TimerQueue<K>,
        now: Duration,
        delay: Duration,
        kind: K,
    ) -> TimerId {
        self.arm_at(queue, now.saturating_add(delay), kind)
    }

    /// Cancel the held timer. Returns true if one was pending.
    pub fn cancel<K: Copy + PartialEq>(&mut self, queue: &mut TimerQueue<K>) -> bool {
        match self.id.take() {
            Some(id) => queue.cancel(id),
            None => false,
        }
    }

    /// Release the slot after its timer fired. Returns true if `id` was ours.
    pub fn fired(&mut self, id: TimerId) -> bool {
        if self.id == Some(id) {
            self.id = None;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.id.is_some()
    }

    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    pub fn deadline<K: Copy + PartialEq>(&self, queue: &TimerQueue<K>) -> Option<Duration> {
        self.id.and_then(|id| queue.deadline(id))
    }
}
