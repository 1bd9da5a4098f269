//! Inline required-field validation for forms carrying the validate marker.
//!
//! Validation runs synchronously on submit. Each required field either gets
//! the error class plus exactly one adjacent message element, or loses both.
//! Re-running the check reuses or removes existing messages, so repeated
//! submits never stack duplicates.

use crate::domain::{Document, ElementSpec, Markers, NodeId, Result};

/// Label used when a required field has no label attribute.
pub const FALLBACK_LABEL: &str = "Field";

/// Outcome of validating one form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Required fields that were empty, in document order.
    pub invalid: Vec<NodeId>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FormValidator {
    markers: Markers,
    forms: Vec<NodeId>,
}

impl FormValidator {
    #[must_use]
    pub fn install(doc: &Document, markers: &Markers) -> Option<Self> {
        let forms: Vec<NodeId> = doc
            .find_by_attr(doc.root(), &markers.validate_attr)
            .into_iter()
            .filter(|&id| doc.get(id).is_some_and(|el| el.tag.eq_ignore_ascii_case("form")))
            .collect();

        if forms.is_empty() {
            tracing::debug!("no validated forms, form validator not installed");
            return None;
        }

        tracing::debug!(form_count = forms.len(), "form validator installed");
        Some(Self {
            markers: markers.clone(),
            forms,
        })
    }

    #[must_use]
    pub fn validates(&self, form: NodeId) -> bool {
        self.forms.contains(&form)
    }

    /// Message text for a missing value in `field`.
    #[must_use]
    pub fn message_for(&self, doc: &Document, field: NodeId) -> String {
        let label = doc
            .attr(field, &self.markers.label_attr)
            .filter(|label| !label.is_empty())
            .unwrap_or(FALLBACK_LABEL);
        format!("{label} is required")
    }

    /// The message element directly after `field`, if there is one.
    #[must_use]
    pub fn message_element(&self, doc: &Document, field: NodeId) -> Option<NodeId> {
        doc.next_element_sibling(field)
            .filter(|&next| doc.has_class(next, &self.markers.error_message))
    }

    /// Checks every required field of `form`, updating inline errors.
    ///
    /// # Errors
    ///
    /// Returns an error if a field was removed from the document mid-pass.
    pub fn validate_on_submit(&self, doc: &mut Document, form: NodeId) -> Result<ValidationReport> {
        let _span = tracing::debug_span!("validate_on_submit", form = %form).entered();
        let mut report = ValidationReport::default();

        for field in doc.find_by_attr(form, &self.markers.required_attr) {
            if doc.value(field).trim().is_empty() {
                self.mark_invalid(doc, field)?;
                report.invalid.push(field);
            } else {
                self.mark_valid(doc, field)?;
            }
        }

        tracing::debug!(invalid_count = report.invalid.len(), "form validated");
        Ok(report)
    }

    fn mark_invalid(&self, doc: &mut Document, field: NodeId) -> Result<()> {
        doc.add_class(field, &self.markers.field_error)?;
        let text = self.message_for(doc, field);

        let message = if let Some(existing) = self.message_element(doc, field) {
            existing
        } else {
            let Some(parent) = doc.parent(field) else {
                tracing::debug!(%field, "detached field, no place for an error message");
                return Ok(());
            };
            let created = doc.create_element(ElementSpec::new("div"));
            let reference = doc.next_element_sibling(field);
            doc.insert_before(parent, created, reference)?;
            created
        };

        doc.set_class_name(message, &self.markers.error_message)?;
        doc.set_text(message, &text)?;
        Ok(())
    }

    fn mark_valid(&self, doc: &mut Document, field: NodeId) -> Result<()> {
        doc.remove_class(field, &self.markers.field_error)?;
        if let Some(message) = self.message_element(doc, field) {
            doc.remove(message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Page {
        doc: Document,
        form: NodeId,
        email: NodeId,
        notes: NodeId,
        validator: FormValidator,
    }

    fn page() -> Page {
        let mut doc = Document::new();
        let body = doc.body();
        let form = doc
            .append(body, ElementSpec::new("form").attr("data-validate", "").attr("action", "/contact"))
            .unwrap();
        let email = doc
            .append(form, ElementSpec::new("input").attr("name", "email").attr("required", "").attr("data-label", "Email"))
            .unwrap();
        let notes = doc
            .append(form, ElementSpec::new("textarea").attr("name", "notes").attr("required", ""))
            .unwrap();
        doc.append(form, ElementSpec::new("button").text("Send")).unwrap();
        let validator = FormValidator::install(&doc, &Markers::default()).unwrap();
        Page {
            doc,
            form,
            email,
            notes,
            validator,
        }
    }

    fn messages(p: &Page) -> Vec<String> {
        p.doc
            .find_by_class(p.form, "error-message")
            .into_iter()
            .map(|id| p.doc.text(id).to_string())
            .collect()
    }

    #[test]
    fn empty_fields_get_one_message_each() {
        let mut p = page();
        let report = p.validator.validate_on_submit(&mut p.doc, p.form).unwrap();
        assert_eq!(report.invalid, vec![p.email, p.notes]);
        assert_eq!(messages(&p), vec!["Email is required", "Field is required"]);
        assert!(p.doc.has_class(p.email, "error"));

        let message = p.validator.message_element(&p.doc, p.email).unwrap();
        assert_eq!(p.doc.next_element_sibling(p.email), Some(message));
    }

    #[test]
    fn revalidation_does_not_duplicate_messages() {
        let mut p = page();
        p.validator.validate_on_submit(&mut p.doc, p.form).unwrap();
        p.validator.validate_on_submit(&mut p.doc, p.form).unwrap();
        assert_eq!(messages(&p).len(), 2);
    }

    #[test]
    fn corrected_field_loses_marker_and_message() {
        let mut p = page();
        p.validator.validate_on_submit(&mut p.doc, p.form).unwrap();

        p.doc.set_value(p.email, "someone@example.com").unwrap();
        let report = p.validator.validate_on_submit(&mut p.doc, p.form).unwrap();

        assert_eq!(report.invalid, vec![p.notes]);
        assert!(!p.doc.has_class(p.email, "error"));
        assert_eq!(messages(&p), vec!["Field is required"]);
    }

    #[test]
    fn whitespace_only_value_is_empty() {
        let mut p = page();
        p.doc.set_value(p.email, "   \t").unwrap();
        p.doc.set_value(p.notes, "hello").unwrap();
        let report = p.validator.validate_on_submit(&mut p.doc, p.form).unwrap();
        assert_eq!(report.invalid, vec![p.email]);
        assert!(!report.is_valid());
    }

    #[test]
    fn forms_without_marker_are_not_validated() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append(body, ElementSpec::new("form")).unwrap();
        assert!(FormValidator::install(&doc, &Markers::default()).is_none());
    }
}
