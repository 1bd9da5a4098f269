//! Reveal-on-scroll: elements gain the active class once they come into view.
//!
//! The transition is one-way, so a revealed element is retired from the watch
//! list immediately.

use crate::domain::{Document, Markers, NodeId, Result};
use crate::watch::{IntersectionEntry, IntersectionOptions, WatchList};

#[derive(Debug, Clone)]
pub struct RevealAnimator {
    active_class: String,
    watch: WatchList,
}

impl RevealAnimator {
    #[must_use]
    pub fn install(doc: &Document, markers: &Markers) -> Option<Self> {
        let targets = doc.find_by_class(doc.root(), &markers.fade_in);
        if targets.is_empty() {
            tracing::debug!("no fade-in elements, reveal animator not installed");
            return None;
        }

        let mut animator = Self {
            active_class: markers.active.clone(),
            watch: WatchList::new(IntersectionOptions::REVEAL),
        };
        animator.observe(&targets);
        tracing::debug!(observed = targets.len(), "reveal animator installed");
        Some(animator)
    }

    pub fn observe(&mut self, elements: &[NodeId]) {
        for &element in elements {
            self.watch.observe(element);
        }
    }

    #[must_use]
    pub const fn watch_list(&self) -> &WatchList {
        &self.watch
    }

    pub fn watch_list_mut(&mut self) -> &mut WatchList {
        &mut self.watch
    }

    /// Applies intersection entries. Returns the elements revealed by this call.
    ///
    /// # Errors
    ///
    /// Returns an error if a revealed element was removed from the document.
    pub fn on_entries(&mut self, doc: &mut Document, entries: &[IntersectionEntry]) -> Result<Vec<NodeId>> {
        let mut revealed = Vec::new();
        for entry in entries {
            if !self.watch.accepts(entry) {
                continue;
            }
            self.watch.unobserve(entry.target);
            doc.add_class(entry.target, &self.active_class)?;
            revealed.push(entry.target);
        }
        if !revealed.is_empty() {
            tracing::debug!(count = revealed.len(), "elements revealed");
        }
        Ok(revealed)
    }
}
