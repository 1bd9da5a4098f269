//! Virtual timer queue.
//!
//! Time only moves when the host calls [`TimerQueue::drain_due`], which keeps
//! debounce behaviour deterministic under test.

use crate::watch::TimerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    due_ms: u64,
    order: u64,
    timer: TimerId,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_order: u64,
    scheduled: Vec<Scheduled>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }

    #[must_use]
    pub fn is_scheduled(&self, timer: TimerId) -> bool {
        self.scheduled.iter().any(|s| s.timer == timer)
    }

    /// Schedules `timer` to fire `delay_ms` after the current time.
    ///
    /// Rescheduling an id that is already pending replaces the old deadline.
    pub fn schedule(&mut self, timer: TimerId, delay_ms: u64) {
        self.cancel(timer);
        let order = self.next_order;
        self.next_order += 1;
        self.scheduled.push(Scheduled {
            due_ms: self.now_ms.saturating_add(delay_ms),
            order,
            timer,
        });
    }

    /// Removes `timer`. Returns whether it was pending.
    pub fn cancel(&mut self, timer: TimerId) -> bool {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.timer != timer);
        self.scheduled.len() != before
    }

    /// Advances the clock to `now_ms` and removes every timer due by then,
    /// ordered by deadline and then by scheduling order.
    ///
    /// The clock never moves backwards.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<TimerId> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.scheduled.drain(..).partition(|s| s.due_ms <= now);
        self.scheduled = pending;

        due.sort_by_key(|s| (s.due_ms, s.order));
        due.into_iter().map(|s| s.timer).collect()
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.scheduled.iter().map(|s| s.due_ms).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watch::TimerChannel;

    fn id(channel: TimerChannel, seq: u64) -> TimerId {
        TimerId { channel, seq }
    }

    #[test]
    fn drains_in_deadline_then_insertion_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(id(TimerChannel::Search, 0), 500);
        queue.schedule(id(TimerChannel::Scroll, 0), 150);
        queue.schedule(id(TimerChannel::Scroll, 1), 500);

        assert!(queue.drain_due(100).is_empty());
        assert_eq!(queue.drain_due(150), vec![id(TimerChannel::Scroll, 0)]);
        assert_eq!(
            queue.drain_due(1_000),
            vec![id(TimerChannel::Search, 0), id(TimerChannel::Scroll, 1)]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut queue = TimerQueue::new();
        let timer = id(TimerChannel::Search, 4);
        queue.schedule(timer, 500);
        assert!(queue.cancel(timer));
        assert!(!queue.cancel(timer));
        assert!(queue.drain_due(10_000).is_empty());
    }

    #[test]
    fn delay_is_relative_to_current_time() {
        let mut queue = TimerQueue::new();
        queue.drain_due(1_000);
        queue.drain_due(10);
        assert_eq!(queue.now_ms(), 1_000);

        queue.schedule(id(TimerChannel::Search, 0), 500);
        assert_eq!(queue.next_due(), Some(1_500));
    }
}
