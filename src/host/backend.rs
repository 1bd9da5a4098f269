//! Form submission backend abstraction.
//!
//! The search backend lives outside the page. [`FormBackend`] is the seam the
//! runtime hands submissions to; a browser shim navigates, a test records.

use crate::app::FormSubmission;

/// Receiver of form submissions that leave the page.
///
/// # Examples
///
/// ```
/// use directory_page::app::FormSubmission;
/// use directory_page::domain::NodeId;
/// use directory_page::host::{FormBackend, RecordingBackend};
///
/// let mut backend = RecordingBackend::default();
/// backend.submit(&FormSubmission {
///     form: NodeId::from_raw(3),
///     action: "/search".to_string(),
///     method: "get".to_string(),
///     fields: vec![("q".to_string(), "oak".to_string())],
/// });
/// assert_eq!(backend.urls(), vec!["/search?q=oak".to_string()]);
/// ```
pub trait FormBackend {
    /// Delivers one submission. Called once per submission, in order.
    fn submit(&mut self, submission: &FormSubmission);
}

/// Backend that keeps every submission in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    submissions: Vec<FormSubmission>,
}

impl RecordingBackend {
    #[must_use]
    pub fn submissions(&self) -> &[FormSubmission] {
        &self.submissions
    }

    /// Navigation targets of the recorded submissions.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.submissions.iter().map(FormSubmission::url).collect()
    }

    pub fn clear(&mut self) {
        self.submissions.clear();
    }
}

impl FormBackend for RecordingBackend {
    fn submit(&mut self, submission: &FormSubmission) {
        tracing::debug!(url = %submission.url(), method = %submission.method, "form submitted");
        self.submissions.push(submission.clone());
    }
}

impl<B: FormBackend + ?Sized> FormBackend for &mut B {
    fn submit(&mut self, submission: &FormSubmission) {
        (**self).submit(submission);
    }
}
