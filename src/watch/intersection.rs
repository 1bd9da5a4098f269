//! Viewport intersection watch lists.
//!
//! A [`WatchList`] is the set of elements one intersection watcher observes,
//! keyed by [`NodeId`]. Entries come from two places: hosts that compute
//! intersections themselves send them in as [`IntersectionEntry`] values, and
//! hosts that only report scroll position get them from
//! [`WatchList::evaluate`], which applies the same threshold/margin rules
//! against the element rectangles in the document.

use crate::domain::{intersection_ratio, Document, NodeId, Viewport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Threshold and root margin of one watcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionOptions {
    /// Minimum visible fraction of the target, in `0.0..=1.0`.
    pub threshold: f64,
    /// Pixels added around the viewport on every side.
    pub root_margin: f64,
}

impl IntersectionOptions {
    /// Reveal animation: 10% visible, 50px early.
    pub const REVEAL: Self = Self {
        threshold: 0.1,
        root_margin: 50.0,
    };

    /// Browser defaults: any overlap, no margin.
    pub const DEFAULT: Self = Self {
        threshold: 0.0,
        root_margin: 0.0,
    };
}

impl Default for IntersectionOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One observation delivered to a watcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    #[serde(default)]
    pub ratio: f64,
}

#[derive(Debug, Clone, Default)]
pub struct WatchList {
    options: IntersectionOptions,
    observed: BTreeSet<NodeId>,
}

impl WatchList {
    #[must_use]
    pub const fn new(options: IntersectionOptions) -> Self {
        Self {
            options,
            observed: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn options(&self) -> IntersectionOptions {
        self.options
    }

    pub fn observe(&mut self, node: NodeId) {
        self.observed.insert(node);
    }

    /// Stops observing `node`. Returns whether it was observed.
    pub fn unobserve(&mut self, node: NodeId) -> bool {
        self.observed.remove(&node)
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.observed.contains(&node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Whether `entry` counts as a hit for this watcher.
    ///
    /// Host-supplied entries are trusted for `is_intersecting`; the ratio is
    /// only checked when the watcher has a non-zero threshold and the host
    /// reported one.
    #[must_use]
    pub fn accepts(&self, entry: &IntersectionEntry) -> bool {
        if !entry.is_intersecting || !self.contains(entry.target) {
            return false;
        }
        self.options.threshold <= 0.0 || entry.ratio <= 0.0 || entry.ratio >= self.options.threshold
    }

    /// Computes entries for every observed element against `viewport`.
    ///
    /// Elements that were removed from the document are dropped from the
    /// list. Elements without a layout rect, or hidden directly or through an
    /// ancestor, report as not intersecting.
    pub fn evaluate(&mut self, doc: &Document, viewport: &Viewport) -> Vec<IntersectionEntry> {
        self.observed.retain(|&node| doc.contains_node(node));

        self.observed
            .iter()
            .map(|&target| {
                let ratio = doc
                    .rect(target)
                    .filter(|_| doc.is_rendered(target))
                    .and_then(|rect| intersection_ratio(&rect, viewport, self.options.root_margin));

                match ratio {
                    Some(ratio) if ratio >= self.options.threshold => IntersectionEntry {
                        target,
                        is_intersecting: true,
                        ratio,
                    },
                    other => IntersectionEntry {
                        target,
                        is_intersecting: false,
                        ratio: other.unwrap_or(0.0),
                    },
                }
            })
            .collect()
    }
}
