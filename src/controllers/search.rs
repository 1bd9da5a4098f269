//! Debounced search-as-you-type.
//!
//! Each keystroke in the search input cancels the pending submission. Queries
//! of at least [`SEARCH_MIN_QUERY_UNITS`] schedule a new one; shorter queries
//! leave nothing pending. Length is measured in UTF-16 code units, as a
//! browser reports `value.length`, so a single astral character such as an
//! emoji already counts as two. When the timer expires the enclosing form is submitted
//! to the search backend.

use crate::app::{Action, FormSubmission};
use crate::domain::{Document, Markers, NodeId};
use crate::watch::{Debouncer, TimerChannel, TimerId, SEARCH_DEBOUNCE_MS, SEARCH_MIN_QUERY_UNITS};

#[derive(Debug, Clone)]
pub struct SearchTrigger {
    form: NodeId,
    input: NodeId,
    debouncer: Debouncer,
}

impl SearchTrigger {
    /// Finds the search form and input by id. Returns `None` if either is
    /// missing.
    #[must_use]
    pub fn install(doc: &Document, markers: &Markers) -> Option<Self> {
        let form = doc.element_by_id(&markers.search_form_id);
        let input = doc.element_by_id(&markers.search_input_id);

        let (Some(form), Some(input)) = (form, input) else {
            tracing::debug!(
                has_form = form.is_some(),
                has_input = input.is_some(),
                "search form or input missing, search trigger not installed"
            );
            return None;
        };

        Some(Self {
            form,
            input,
            debouncer: Debouncer::new(TimerChannel::Search, SEARCH_DEBOUNCE_MS),
        })
    }

    #[must_use]
    pub const fn input(&self) -> NodeId {
        self.input
    }

    #[must_use]
    pub const fn form(&self) -> NodeId {
        self.form
    }

    #[must_use]
    pub const fn pending(&self) -> Option<TimerId> {
        self.debouncer.pending()
    }

    /// Handles one input event carrying the field's current value.
    pub fn on_input(&mut self, value: &str) -> Vec<Action> {
        let length = value.encode_utf16().count();

        if length >= SEARCH_MIN_QUERY_UNITS {
            tracing::trace!(query_len = length, "search scheduled");
            self.debouncer.restart()
        } else {
            tracing::trace!(query_len = length, "query too short, search cancelled");
            self.debouncer.cancel().into_iter().collect()
        }
    }

    /// Handles an expired timer, submitting the form if it is the live one.
    pub fn on_timer(&mut self, doc: &Document, timer: TimerId) -> Option<Action> {
        if !self.debouncer.fire(timer) {
            return None;
        }
        let submission = FormSubmission::from_form(doc, self.form);
        tracing::debug!(url = %submission.url(), "submitting search");
        Some(Action::SubmitForm(submission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ElementSpec;

    fn page() -> (Document, SearchTrigger) {
        let mut doc = Document::new();
        let body = doc.body();
        let form = doc
            .append(body, ElementSpec::new("form").id("searchForm").attr("action", "/search"))
            .unwrap();
        doc.append(form, ElementSpec::new("input").id("searchInput").attr("name", "q").value("oak"))
            .unwrap();
        let trigger = SearchTrigger::install(&doc, &Markers::default()).unwrap();
        (doc, trigger)
    }

    #[test]
    fn short_query_schedules_nothing() {
        let (_, mut trigger) = page();
        assert!(trigger.on_input("o").is_empty());
        assert!(trigger.pending().is_none());
    }

    #[test]
    fn dropping_below_minimum_cancels_pending_search() {
        let (_, mut trigger) = page();
        trigger.on_input("oa");
        let pending = trigger.pending().unwrap();
        assert_eq!(trigger.on_input("o"), vec![Action::CancelTimer { timer: pending }]);
        assert!(trigger.pending().is_none());
    }

    #[test]
    fn expiry_submits_enclosing_form() {
        let (doc, mut trigger) = page();
        trigger.on_input("oak");
        let timer = trigger.pending().unwrap();

        let Some(Action::SubmitForm(submission)) = trigger.on_timer(&doc, timer) else {
            panic!("expected a form submission");
        };
        assert_eq!(submission.url(), "/search?q=oak");
        assert!(trigger.on_timer(&doc, timer).is_none());
    }

    #[test]
    fn missing_input_skips_install() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append(body, ElementSpec::new("form").id("searchForm")).unwrap();
        assert!(SearchTrigger::install(&doc, &Markers::default()).is_none());
    }

    #[test]
    fn length_counts_utf16_units() {
        let (_, mut trigger) = page();
        assert!(trigger.on_input("é").is_empty());
        assert!(trigger.pending().is_none());

        // U+1D11E is one char but a surrogate pair.
        assert_eq!(trigger.on_input("\u{1D11E}").len(), 1);
        assert!(trigger.pending().is_some());
    }

    #[test]
    fn minimum_length_ignores_marker_overrides() {
        let markers = Markers::from_toml("search_debounce_min_chars = 0\n").unwrap();
        let mut doc = Document::new();
        let body = doc.body();
        let form = doc.append(body, ElementSpec::new("form").id("searchForm")).unwrap();
        doc.append(form, ElementSpec::new("input").id("searchInput")).unwrap();
        let mut trigger = SearchTrigger::install(&doc, &markers).unwrap();

        assert!(trigger.on_input("").is_empty());
        assert!(trigger.pending().is_none());
    }
}
