use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a scheduled timer, usable to cancel it before it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Queue of delayed payloads keyed by deadline.
///
/// Payloads come out in deadline order. Equal deadlines come out in the
/// order they were scheduled. Nothing else is serialized: a payload with a
/// short delay overtakes one with a longer delay scheduled before it.
#[derive(Debug)]
pub struct Scheduler<T> {
    queue: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `payload` to fire `delay` after `now`
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;

        let deadline = now + delay;
        self.queue.insert((deadline, id), payload);
        self.deadlines.insert(id, deadline);
        tracing::debug!("Scheduled timer {} for {:?}", id, deadline);
        TimerHandle(id)
    }

    /// Remove a pending timer. Returns its payload if it had not fired yet.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let deadline = self.deadlines.remove(&handle.0)?;
        tracing::debug!("Cancelled timer {}", handle.0);
        self.queue.remove(&(deadline, handle.0))
    }

    /// Drop every pending timer, returning how many there were
    pub fn cancel_all(&mut self) -> usize {
        let count = self.queue.len();
        self.queue.clear();
        self.deadlines.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Time left until the earliest timer fires; zero when one is overdue
    pub fn time_until_next(&self, now: Duration) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Take the earliest payload whose deadline has passed
    pub fn pop_due(&mut self, now: Duration) -> Option<T> {
        let (deadline, id) = *self.queue.keys().next()?;
        if deadline > now {
            return None;
        }
        self.deadlines.remove(&id);
        self.queue.remove(&(deadline, id))
    }

    /// Take every payload whose deadline has passed, in firing order
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        std::iter::from_fn(|| self.pop_due(now)).collect()
    }
}
