//! Directory page: the client-side interaction layer of a browsable listing.
//!
//! The crate drives every interactive behaviour of a directory/listing page:
//! - A mobile navigation toggle and mutually exclusive dropdown menus
//! - Debounced auto-submission of the search form
//! - Sorting of result items and live text filtering
//! - One-way reveal animation and one-shot lazy image loading
//! - Inline required-field validation on submit
//! - Escape-closes-everything and a skip-navigation link

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (host/)                                       │  ← Event loop
//! │  - Virtual timer queue                              │
//! │  - Form submission backend                          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event routing
//! │  - Event handling                                   │
//! │  - Action emission                                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Controllers (controllers/)                         │  ← Behaviour
//! │  - Menus, search, sort/filter, validation           │
//! │  - Reveal, lazy media, accessibility, scroll        │
//! └─────────────────────────────────────────────────────┘
//!         │                                      │
//! ┌───────────────────────┐       ┌──────────────────────────┐
//! │ Watch (watch/)        │       │ Domain (domain/)         │
//! │ - Debouncers          │       │ - Document arena         │
//! │ - Intersection lists  │       │ - Geometry, markers      │
//! └───────────────────────┘       └──────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Page state, events, actions and the event handler
//! - [`controllers`]: One controller per interactive behaviour
//! - [`domain`]: Document tree, geometry, markers and errors
//! - [`host`]: Reference runtime executing actions
//! - [`watch`]: Debounce timers and intersection watch lists
//! - [`observability`]: `tracing` subscriber setup
//!
//! # Configuration
//!
//! Hosts pass settings as a string map:
//!
//! ```text
//! markers_file = "/etc/directory/markers.toml"
//! trace_level  = "directory_page=debug"
//! markers      = "nav_menu = \"site-nav\""
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Load**: parse [`Config`], install tracing, build the [`Document`]
//! 2. **Ready**: `Event::DocumentReady` installs every controller whose
//!    collaborators exist and evaluates both watch lists once
//! 3. **Interact**: the host forwards clicks, keys, input, submits, scrolls
//!    and timer expiries; each returns a repaint flag and actions
//!
//! # Example
//!
//! ```rust
//! use directory_page::{initialize, Config, Event, PageRuntime, RecordingBackend};
//! use directory_page::domain::{Document, ElementSpec};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let form = doc.append(body, ElementSpec::new("form").id("searchForm").attr("action", "/search"))?;
//! let input = doc.append(form, ElementSpec::new("input").id("searchInput").attr("name", "q"))?;
//!
//! let state = initialize(&Config::default(), doc);
//! let mut runtime = PageRuntime::new(state, RecordingBackend::default());
//! runtime.dispatch(&Event::DocumentReady);
//! runtime.dispatch(&Event::Input { target: input, value: "oak".to_string() });
//! runtime.advance(500);
//!
//! assert_eq!(runtime.backend().urls(), vec!["/search?q=oak".to_string()]);
//! # Ok::<(), directory_page::PageError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Single-threaded event loop
//!
//! Every event runs to completion before the next. Paired writes (a menu
//! panel's class and its trigger's `aria-expanded`) therefore never
//! interleave with another event.
//!
//! ## Timers as values
//!
//! Debounce timers are ids handed to the host. A timer that fires after it
//! was superseded is recognised as stale and ignored, even if the host never
//! honoured the cancel.

pub mod app;
pub mod controllers;
pub mod domain;
pub mod host;
pub mod watch;

pub mod observability;

pub use app::{handle_event, Action, Event, FormSubmission, PageState};
pub use domain::{Document, Markers, NodeId, PageError, Result, Viewport};
pub use host::{FormBackend, PageRuntime, RecordingBackend};

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Host configuration.
///
/// # Example
///
/// ```text
/// markers_file "/srv/site/markers.toml"
/// trace_level  "debug"
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Inline marker overrides. Ignored when `markers_file` loads.
    pub markers: Markers,

    /// Path to a TOML markers file.
    ///
    /// Takes precedence over `markers`. Fields missing from the file keep
    /// their defaults.
    pub markers_file: Option<PathBuf>,

    /// `EnvFilter` directive for the tracing subscriber.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or per-target
    /// directives. Default: `"info"`
    pub trace_level: Option<String>,

    /// Initial viewport, used by the intersection pass on `DocumentReady`.
    ///
    /// When unset, nothing is loaded or revealed until the first `Scroll` or
    /// `Intersection` event reports real geometry.
    pub viewport: Option<Viewport>,
}

impl Config {
    /// Parses configuration from a host key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - `markers`: inline TOML → [`Markers`] (defaults on parse error)
    /// - `markers_file`: String → `PathBuf`
    /// - `trace_level`: String → `Option<String>`
    /// - `viewport_width`, `viewport_height`: both positive numbers →
    ///   `Some(Viewport)` at the origin; otherwise `None`
    ///
    /// Unknown keys are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use directory_page::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("markers".to_string(), "nav_menu = \"site-nav\"".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.markers.nav_menu, "site-nav");
    /// assert_eq!(config.markers.dropdown, "dropdown");
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// assert!(config.viewport.is_none());
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let markers = config.get("markers").map_or_else(Markers::default, |inline| {
            Markers::from_toml(inline).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "invalid inline markers, using defaults");
                Markers::default()
            })
        });

        Self {
            markers,
            markers_file: config
                .get("markers_file")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            trace_level: config.get("trace_level").cloned(),
            viewport: parse_viewport(config),
        }
    }

    /// Markers to use: the file if it loads, otherwise the inline set.
    #[must_use]
    pub fn resolve_markers(&self) -> Markers {
        self.markers_file.as_ref().map_or_else(
            || self.markers.clone(),
            |path| {
                Markers::from_file(path).unwrap_or_else(|e| {
                    tracing::debug!(path = %path.display(), error = %e, "failed to load markers file, using inline markers");
                    self.markers.clone()
                })
            },
        )
    }
}

fn parse_viewport(config: &BTreeMap<String, String>) -> Option<Viewport> {
    let dimension = |key: &str| {
        config
            .get(key)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
    };

    match (dimension("viewport_width"), dimension("viewport_height")) {
        (Some(width), Some(height)) => Some(Viewport::new(0.0, 0.0, width, height)),
        (None, None) => None,
        _ => {
            tracing::debug!("incomplete or invalid viewport size, ignoring");
            None
        }
    }
}

/// Builds the page state for `document`.
///
/// Controllers are not installed yet; that happens when the host dispatches
/// `Event::DocumentReady`. Tracing is left to
/// [`observability::init_tracing`] so hosts with their own subscriber keep
/// it.
///
/// # Example
///
/// ```rust
/// use directory_page::{initialize, Config};
/// use directory_page::domain::Document;
///
/// let state = initialize(&Config::default(), Document::new());
/// assert!(!state.is_ready());
/// assert_eq!(state.markers.active, "active");
/// ```
#[must_use]
pub fn initialize(config: &Config, document: Document) -> PageState {
    tracing::debug!(has_viewport = config.viewport.is_some(), "initializing directory page");
    let state = PageState::new(document, config.resolve_markers());
    match config.viewport {
        Some(viewport) => state.with_viewport(viewport),
        None => state,
    }
}
