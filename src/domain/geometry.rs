//! Layout rectangles and viewport intersection math.
//!
//! Coordinates are document-space CSS pixels. The host assigns a [`Rect`] to
//! each element it has laid out and reports the visible [`Viewport`] on
//! scroll; intersection watchers derive their entries from these two alone.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grows the rectangle by `margin` on every side.
    #[must_use]
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    /// Returns the overlap of two rectangles.
    ///
    /// Edge-adjacent rectangles yield a zero-area intersection rather than
    /// `None`, matching how browsers report touching targets as intersecting.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }

        Some(Self::new(left, top, right - left, bottom - top))
    }
}

/// The visible scroll window of the page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(scroll_x: f64, scroll_y: f64, width: f64, height: f64) -> Self {
        Self {
            scroll_x,
            scroll_y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn as_rect(&self) -> Rect {
        Rect::new(self.scroll_x, self.scroll_y, self.width, self.height)
    }

    /// Whether the host has reported a real size yet.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.as_rect().area() > 0.0
    }
}

/// Computes the intersection ratio of `target` against `viewport` grown by
/// `root_margin`.
///
/// Returns `None` when the rectangles neither overlap nor touch. A zero-area
/// target that touches the root reports a ratio of `1.0`.
#[must_use]
pub fn intersection_ratio(target: &Rect, viewport: &Viewport, root_margin: f64) -> Option<f64> {
    let root = viewport.as_rect().expand(root_margin);
    let overlap = target.intersection(&root)?;

    let target_area = target.area();
    if target_area == 0.0 {
        return Some(1.0);
    }

    Some((overlap.area() / target_area).clamp(0.0, 1.0))
}
