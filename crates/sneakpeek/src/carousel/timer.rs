use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Identifies one scheduled callback. Handles are never reused within a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<E> {
    deadline: Instant,
    event: E,
}

/// Deferred events waiting for their deadline.
///
/// Nothing runs on its own: the owner polls [`TimerSet::pop_due`] from its
/// event loop. Dropping or clearing the set discards every pending event, so
/// a torn-down owner can never observe one firing.
#[derive(Debug)]
pub struct TimerSet<E> {
    next_id: u64,
    pending: BTreeMap<TimerHandle, Pending<E>>,
}

impl<E> Default for TimerSet<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<E> TimerSet<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(
            handle,
            Pending {
                deadline: now + delay,
                event,
            },
        );
        handle
    }

    /// Cancel one timer. Returns its event if it had not fired yet.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<E> {
        self.pending.remove(&handle).map(|p| p.event)
    }

    /// Cancel everything, returning how many timers were still pending.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    /// Timers sharing a deadline come out in scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerHandle, E)> {
        let handle = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .min_by_key(|(handle, p)| (p.deadline, **handle))
            .map(|(handle, _)| *handle)?;
        self.pending.remove(&handle).map(|p| (handle, p.event))
    }
}
