//! Application layer coordinating page state, events, and actions.
//!
//! This module sits between the host (see [`crate::host`]) and the
//! controllers. It implements the single-threaded event loop that drives every
//! interactive behaviour on the page.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Host Input → Events → Event Handler → Document Mutations → Actions → Side Effects
//!                           ↑                                     ↓
//!                           └─────────── Timer expiry ────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and routing to controllers
//! - [`state`]: The document and its installed controllers
//!
//! # Example
//!
//! ```rust
//! use directory_page::app::{handle_event, Event, PageState};
//! use directory_page::controllers::Key;
//! use directory_page::domain::{Document, Markers};
//!
//! let mut state = PageState::new(Document::new(), Markers::default());
//! handle_event(&mut state, &Event::DocumentReady)?;
//! let (_, actions) = handle_event(&mut state, &Event::KeyDown { key: Key::Escape })?;
//! assert!(actions.is_empty());
//! # Ok::<(), directory_page::PageError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod state;

pub use actions::{Action, FormSubmission};
pub use handler::{handle_event, Event};
pub use state::PageState;
