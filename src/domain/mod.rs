//! Domain layer: the document tree and everything the controllers share.
//!
//! Nothing in here knows about events or timers; it is the passive model the
//! application layer mutates.
//!
//! # Organization
//!
//! - [`document`]: arena-backed element tree
//! - [`geometry`]: layout rectangles and intersection math
//! - [`markers`]: class/attribute names locating controller collaborators
//! - [`error`]: error type and result alias

pub mod document;
pub mod error;
pub mod geometry;
pub mod markers;

pub use document::{Document, Element, ElementSpec, NodeId};
pub use error::{PageError, Result};
pub use geometry::{intersection_ratio, Rect, Viewport};
pub use markers::Markers;
