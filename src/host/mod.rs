//! Host-side execution of actions.
//!
//! The library core is pure: it mutates the document and returns actions.
//! This module is the reference host that carries those actions out.
//!
//! - [`backend`]: the seam to the external search backend
//! - [`timers`]: a virtual clock for debounce timers
//! - [`runtime`]: the event loop tying state, timers and backend together

pub mod backend;
pub mod runtime;
pub mod timers;

pub use backend::{FormBackend, RecordingBackend};
pub use runtime::PageRuntime;
pub use timers::TimerQueue;
