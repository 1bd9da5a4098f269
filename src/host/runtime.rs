//! Reference host: runs the event loop and executes actions.
//!
//! [`PageRuntime`] is what a browser shim does for real. It feeds events to
//! [`handle_event`], keeps timers on a [`TimerQueue`], forwards submissions to
//! a [`FormBackend`] and remembers which images were fetched. Handler errors
//! are logged and the page keeps running.

use super::backend::FormBackend;
use super::timers::TimerQueue;
use crate::app::{handle_event, Action, Event, FormSubmission, PageState};
use crate::domain::error::Result;
use crate::domain::NodeId;

#[derive(Debug)]
pub struct PageRuntime<B> {
    state: PageState,
    timers: TimerQueue,
    backend: B,
    fetched: Vec<(NodeId, String)>,
}

impl<B: FormBackend> PageRuntime<B> {
    #[must_use]
    pub fn new(state: PageState, backend: B) -> Self {
        Self {
            state,
            timers: TimerQueue::new(),
            backend,
            fetched: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &PageState {
        &self.state
    }

    /// Direct access for hosts that lay out or edit the page between events.
    pub fn state_mut(&mut self) -> &mut PageState {
        &mut self.state
    }

    #[must_use]
    pub const fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Images whose source was assigned, with the source, in fetch order.
    #[must_use]
    pub fn fetched_images(&self) -> &[(NodeId, String)] {
        &self.fetched
    }

    #[must_use]
    pub fn into_parts(self) -> (PageState, B) {
        (self.state, self.backend)
    }

    /// Handles one event and executes its actions.
    ///
    /// Returns `true` when the document changed. A `Submit` that the handler
    /// did not prevent is sent to the backend, as the browser would.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        let _span = tracing::debug_span!("dispatch").entered();

        match handle_event(&mut self.state, event) {
            Ok((changed, actions)) => {
                let prevented = actions
                    .iter()
                    .any(|action| matches!(action, Action::PreventDefault { .. }));
                for action in &actions {
                    self.execute_action(action);
                }
                if let Event::Submit { form } = event {
                    if !prevented && self.state.document.contains_node(*form) {
                        let submission = FormSubmission::from_form(&self.state.document, *form);
                        self.backend.submit(&submission);
                    }
                }
                changed
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Decodes a JSON-encoded [`Event`] and dispatches it.
    ///
    /// ```
    /// use directory_page::app::PageState;
    /// use directory_page::domain::{Document, Markers};
    /// use directory_page::host::{PageRuntime, RecordingBackend};
    ///
    /// let state = PageState::new(Document::new(), Markers::default());
    /// let mut runtime = PageRuntime::new(state, RecordingBackend::default());
    /// assert!(runtime.dispatch_json(r#""DocumentReady""#)?);
    /// assert!(runtime.state().is_ready());
    /// # Ok::<(), directory_page::PageError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::PageError::Json`] if `payload` is not a valid event.
    pub fn dispatch_json(&mut self, payload: &str) -> Result<bool> {
        let event: Event = serde_json::from_str(payload)?;
        Ok(self.dispatch(&event))
    }

    /// Moves the virtual clock forward by `ms`, firing due timers in order.
    ///
    /// Timers scheduled by a firing timer also fire if they fall due within
    /// the window. Returns whether any fired timer changed the document.
    pub fn advance(&mut self, ms: u64) -> bool {
        let target = self.timers.now_ms().saturating_add(ms);
        let mut changed = false;

        while let Some(due) = self.timers.next_due().filter(|&due| due <= target) {
            for timer in self.timers.drain_due(due) {
                tracing::trace!(?timer, at_ms = due, "timer fired");
                changed |= self.dispatch(&Event::TimerFired { timer });
            }
        }
        self.timers.drain_due(target);
        changed
    }

    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::ScheduleTimer { timer, delay_ms } => {
                self.timers.schedule(*timer, *delay_ms);
            }
            Action::CancelTimer { timer } => {
                self.timers.cancel(*timer);
            }
            Action::SubmitForm(submission) => {
                self.backend.submit(submission);
            }
            Action::PreventDefault { form } => {
                tracing::debug!(%form, "default submission prevented");
            }
            Action::FetchImage { image, src } => {
                tracing::debug!(%image, %src, "fetching image");
                self.fetched.push((*image, src.clone()));
            }
        }
    }
}
