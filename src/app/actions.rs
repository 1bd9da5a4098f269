//! Actions representing side effects for the host to execute.
//!
//! The event handler never touches the outside world. Timers, navigation and
//! resource fetches come back as [`Action`] values, and the host (see
//! [`crate::host::PageRuntime`]) carries them out.
//!
//! # Example
//!
//! ```rust
//! use directory_page::app::Action;
//! use directory_page::watch::{TimerChannel, TimerId};
//!
//! let action = Action::ScheduleTimer {
//!     timer: TimerId { channel: TimerChannel::Search, seq: 0 },
//!     delay_ms: 500,
//! };
//! assert!(matches!(action, Action::ScheduleTimer { delay_ms: 500, .. }));
//! ```

use crate::domain::{Document, NodeId};
use crate::watch::TimerId;
use serde::{Deserialize, Serialize};

/// Elements whose `name`d value is sent with a form.
const FORM_CONTROL_TAGS: [&str; 3] = ["input", "select", "textarea"];

/// Side effects requested by the event handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Starts a one-shot timer. The host reports expiry with
    /// `Event::TimerFired`.
    ScheduleTimer {
        timer: TimerId,
        delay_ms: u64,
    },

    /// Cancels a previously scheduled timer.
    CancelTimer {
        timer: TimerId,
    },

    /// Navigates by submitting a form to its target (the search backend).
    SubmitForm(FormSubmission),

    /// Cancels the default action of a submit event.
    PreventDefault {
        form: NodeId,
    },

    /// Starts fetching an image whose source was just assigned.
    FetchImage {
        image: NodeId,
        src: String,
    },
}

/// A form's target and encoded fields at the moment of submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub form: NodeId,
    /// The form's `action` attribute; empty means the current page.
    pub action: String,
    /// Lower-cased `method` attribute, `get` when absent.
    pub method: String,
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    /// Captures the named controls of `form` in document order.
    #[must_use]
    pub fn from_form(doc: &Document, form: NodeId) -> Self {
        let fields = doc
            .find_all(form, |el| {
                el.attr("name").is_some()
                    && el.attr("disabled").is_none()
                    && FORM_CONTROL_TAGS
                        .iter()
                        .any(|tag| el.tag.eq_ignore_ascii_case(tag))
            })
            .into_iter()
            .filter_map(|control| {
                let name = doc.attr(control, "name")?;
                Some((name.to_string(), doc.value(control).to_string()))
            })
            .collect();

        Self {
            form,
            action: doc.attr(form, "action").unwrap_or_default().to_string(),
            method: doc
                .attr(form, "method")
                .map_or_else(|| "get".to_string(), str::to_lowercase),
            fields,
        }
    }

    /// URL-encoded query string of the fields.
    #[must_use]
    pub fn query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.fields)
            .finish()
    }

    /// Navigation target: the action with the fields appended as a query.
    ///
    /// ```
    /// use directory_page::app::FormSubmission;
    /// use directory_page::domain::NodeId;
    ///
    /// let submission = FormSubmission {
    ///     form: NodeId::from_raw(2),
    ///     action: "/search".to_string(),
    ///     method: "get".to_string(),
    ///     fields: vec![("q".to_string(), "oak desk".to_string())],
    /// };
    /// assert_eq!(submission.url(), "/search?q=oak+desk");
    /// ```
    #[must_use]
    pub fn url(&self) -> String {
        if self.fields.is_empty() {
            return self.action.clone();
        }
        let separator = if self.action.contains('?') { '&' } else { '?' };
        format!("{}{separator}{}", self.action, self.query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ElementSpec;

    #[test]
    fn captures_named_controls_only() {
        let mut doc = Document::new();
        let body = doc.body();
        let form = doc
            .append(body, ElementSpec::new("form").attr("action", "/search?src=nav").attr("method", "GET"))
            .unwrap();
        doc.append(form, ElementSpec::new("input").attr("name", "q").value("chairs & more")).unwrap();
        doc.append(form, ElementSpec::new("input").value("unnamed")).unwrap();
        doc.append(form, ElementSpec::new("input").attr("name", "off").attr("disabled", "")).unwrap();
        doc.append(form, ElementSpec::new("div").attr("name", "decor")).unwrap();

        let submission = FormSubmission::from_form(&doc, form);
        assert_eq!(submission.method, "get");
        assert_eq!(submission.fields, vec![("q".to_string(), "chairs & more".to_string())]);
        assert_eq!(submission.url(), "/search?src=nav&q=chairs+%26+more");
    }

    #[test]
    fn form_without_action_targets_current_page() {
        let mut doc = Document::new();
        let body = doc.body();
        let form = doc.append(body, ElementSpec::new("form")).unwrap();
        let submission = FormSubmission::from_form(&doc, form);
        assert_eq!(submission.url(), "");
    }
}
