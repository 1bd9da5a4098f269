//! Event handling and dispatch to the controllers.
//!
//! The host translates its native input (DOM events, test scripts, JSON
//! messages) into [`Event`] values and feeds them to [`handle_event`] one at a
//! time. Each call runs to completion before the next begins, which is what
//! makes the menu pair writes and the debounce bookkeeping race-free.
//!
//! # Event Types
//!
//! - **Lifecycle**: `DocumentReady`
//! - **Pointer and keyboard**: `Click`, `KeyDown`
//! - **Forms**: `Input`, `Submit`
//! - **Deferred**: `TimerFired`, `Scroll`, `Intersection`
//!
//! # Example
//!
//! ```rust
//! use directory_page::app::{handle_event, Event, PageState};
//! use directory_page::domain::{Document, Markers};
//!
//! let mut state = PageState::new(Document::new(), Markers::default());
//! let (changed, actions) = handle_event(&mut state, &Event::DocumentReady)?;
//! assert!(changed); // skip link inserted
//! assert!(actions.is_empty());
//! # Ok::<(), directory_page::PageError>(())
//! ```

use crate::app::{Action, PageState};
use crate::controllers::Key;
use crate::domain::error::Result;
use crate::domain::{NodeId, Viewport};
use crate::watch::{IntersectionEntry, TimerChannel, TimerId};
use serde::{Deserialize, Serialize};

/// Input delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The document tree is complete; install controllers.
    DocumentReady,

    /// A click on `target`, bubbling up to the document.
    Click { target: NodeId },

    /// A keydown anywhere on the page.
    KeyDown { key: Key },

    /// A form control's value changed to `value`.
    Input { target: NodeId, value: String },

    /// A user-initiated submit of `form`.
    Submit { form: NodeId },

    /// A timer scheduled through `Action::ScheduleTimer` expired.
    TimerFired { timer: TimerId },

    /// The page scrolled or resized.
    Scroll { viewport: Viewport },

    /// Intersection changes computed by the host itself.
    Intersection { entries: Vec<IntersectionEntry> },
}

/// Processes one event, mutating page state and returning host actions.
///
/// The boolean is `true` when the document changed and the host should
/// repaint. Events arriving before `DocumentReady` are ignored.
///
/// # Errors
///
/// Returns an error when an event refers to nodes that are no longer in the
/// document.
pub fn handle_event(state: &mut PageState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if !state.is_ready() && *event != Event::DocumentReady {
        tracing::debug!("page not ready, ignoring event");
        return Ok((false, vec![]));
    }

    let revision = state.document.revision();
    let actions = match event {
        Event::DocumentReady => {
            if state.is_ready() {
                vec![]
            } else {
                state.install_controllers();
                state.evaluate_viewport()?
            }
        }
        Event::Click { target } => {
            handle_click(state, *target)?;
            vec![]
        }
        Event::KeyDown { key } => {
            if let Some(accessibility) = &state.accessibility {
                accessibility.on_key(&mut state.document, key)?;
            }
            vec![]
        }
        Event::Input { target, value } => handle_input(state, *target, value)?,
        Event::Submit { form } => handle_submit(state, *form)?,
        Event::TimerFired { timer } => handle_timer(state, *timer),
        Event::Scroll { viewport } => {
            let mut actions = state.scroll.on_scroll(*viewport);
            actions.extend(state.evaluate_viewport()?);
            actions
        }
        Event::Intersection { entries } => state.apply_intersections(entries)?,
    };

    let changed = state.document.revision() != revision;
    tracing::debug!(changed, action_count = actions.len(), "event handled");
    Ok((changed, actions))
}

/// Runs the click listeners along the path from `target` to the document.
///
/// Target-level listeners run first. A dropdown trigger stops propagation,
/// so the document-level listener that closes dropdowns never sees its click.
fn handle_click(state: &mut PageState, target: NodeId) -> Result<()> {
    let doc = &mut state.document;
    let mut propagate = true;

    if let Some(menus) = &state.menus {
        if menus.is_mobile_trigger(doc, target) {
            menus.toggle_mobile_menu(doc)?;
        }
        if let Some(dropdown) = menus.dropdown_for_trigger(doc, target) {
            menus.toggle_dropdown(doc, dropdown)?;
            propagate = false;
        }
    }

    if let Some(engine) = &state.sort_filter {
        if let Some(button) = engine.button_for(doc, target) {
            engine.activate_button(doc, button)?;
        }
    }

    if propagate {
        if let Some(menus) = &state.menus {
            menus.close_dropdowns_outside(doc, target)?;
        }
    }
    Ok(())
}

fn handle_input(state: &mut PageState, target: NodeId, value: &str) -> Result<Vec<Action>> {
    state.document.set_value(target, value)?;
    let mut actions = vec![];

    if let Some(search) = state.search.as_mut() {
        if search.input() == target {
            actions.extend(search.on_input(value));
        }
    }

    if let Some(engine) = &state.sort_filter {
        if engine.is_filter_input(target) {
            engine.apply_filter(&mut state.document, value)?;
        }
    }

    Ok(actions)
}

fn handle_submit(state: &mut PageState, form: NodeId) -> Result<Vec<Action>> {
    let Some(validator) = &state.validation else {
        return Ok(vec![]);
    };
    if !validator.validates(form) {
        return Ok(vec![]);
    }

    let report = validator.validate_on_submit(&mut state.document, form)?;
    if report.is_valid() {
        Ok(vec![])
    } else {
        tracing::debug!(%form, invalid = report.invalid.len(), "submission blocked");
        Ok(vec![Action::PreventDefault { form }])
    }
}

fn handle_timer(state: &mut PageState, timer: TimerId) -> Vec<Action> {
    match timer.channel {
        TimerChannel::Search => state
            .search
            .as_mut()
            .and_then(|search| search.on_timer(&state.document, timer))
            .into_iter()
            .collect(),
        TimerChannel::Scroll => {
            state.scroll.on_timer(timer);
            vec![]
        }
    }
}
