//! Scroll tracking.
//!
//! Scroll events update the viewport right away (intersection watchers need
//! it) and restart a short debounce; when scrolling pauses the settled
//! viewport is recorded for anything that only cares about the resting
//! position.

use crate::app::Action;
use crate::domain::Viewport;
use crate::watch::{Debouncer, TimerChannel, TimerId, SCROLL_DEBOUNCE_MS};

#[derive(Debug, Clone)]
pub struct ScrollTracker {
    current: Viewport,
    settled: Option<Viewport>,
    debouncer: Debouncer,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl ScrollTracker {
    #[must_use]
    pub const fn new(initial: Viewport) -> Self {
        Self {
            current: initial,
            settled: None,
            debouncer: Debouncer::new(TimerChannel::Scroll, SCROLL_DEBOUNCE_MS),
        }
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.current
    }

    /// Viewport at the end of the last completed scroll gesture.
    #[must_use]
    pub const fn settled(&self) -> Option<Viewport> {
        self.settled
    }

    pub fn on_scroll(&mut self, viewport: Viewport) -> Vec<Action> {
        self.current = viewport;
        self.debouncer.restart()
    }

    /// Returns `true` if `timer` settled the scroll.
    pub fn on_timer(&mut self, timer: TimerId) -> bool {
        if !self.debouncer.fire(timer) {
            return false;
        }
        self.settled = Some(self.current);
        tracing::debug!(scroll_y = self.current.scroll_y, "scroll settled");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_on_latest_viewport_only() {
        let mut tracker = ScrollTracker::default();
        tracker.on_scroll(Viewport::new(0.0, 100.0, 800.0, 600.0));
        let stale = tracker.debouncer.pending().unwrap();
        tracker.on_scroll(Viewport::new(0.0, 400.0, 800.0, 600.0));
        let live = tracker.debouncer.pending().unwrap();

        assert!(!tracker.on_timer(stale));
        assert!(tracker.settled().is_none());
        assert!(tracker.on_timer(live));
        assert_eq!(tracker.settled().map(|v| v.scroll_y), Some(400.0));
    }
}
