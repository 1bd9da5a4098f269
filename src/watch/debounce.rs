//! Single-slot debouncer.
//!
//! A [`Debouncer`] owns at most one pending timer. Restarting it supersedes the
//! previous timer: the returned actions cancel the old one on the host, and
//! [`Debouncer::fire`] rejects any id other than the current one, so a stale
//! timer the host delivers anyway has no effect.

use crate::app::Action;
use serde::{Deserialize, Serialize};

/// Search input debounce delay in milliseconds.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Shortest query, in UTF-16 code units, that schedules a search.
pub const SEARCH_MIN_QUERY_UNITS: usize = 2;

/// Scroll debounce delay in milliseconds.
pub const SCROLL_DEBOUNCE_MS: u64 = 150;

/// Which debouncer a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimerChannel {
    Search,
    Scroll,
}

/// Host-visible timer handle. `seq` increases on every restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId {
    pub channel: TimerChannel,
    pub seq: u64,
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    channel: TimerChannel,
    delay_ms: u64,
    next_seq: u64,
    pending: Option<TimerId>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(channel: TimerChannel, delay_ms: u64) -> Self {
        Self {
            channel,
            delay_ms,
            next_seq: 0,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    #[must_use]
    pub const fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Cancels the pending timer, if any, and returns the host action for it.
    pub fn cancel(&mut self) -> Option<Action> {
        self.pending
            .take()
            .map(|timer| Action::CancelTimer { timer })
    }

    /// Cancels any pending timer and schedules a fresh one.
    pub fn restart(&mut self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.cancel().into_iter().collect();

        let timer = TimerId {
            channel: self.channel,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending = Some(timer);

        actions.push(Action::ScheduleTimer {
            timer,
            delay_ms: self.delay_ms,
        });
        actions
    }

    /// Consumes an expired timer. Returns `true` only for the pending one.
    pub fn fire(&mut self, timer: TimerId) -> bool {
        if self.pending == Some(timer) {
            self.pending = None;
            true
        } else {
            tracing::trace!(?timer, pending = ?self.pending, "ignoring stale timer");
            false
        }
    }
}
