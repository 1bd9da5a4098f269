//! Client-side ordering and text filtering of the results collection.
//!
//! Sorting only moves items and filtering only hides them, so the two compose
//! freely: a filtered-out item keeps its sorted position and reappears there.
//!
//! # Ordering
//!
//! The `name` key compares lexically on a folded key (accents stripped,
//! lower-cased), then accented after plain, then lower case first. Every other key parses a leading integer the way `parseInt` does and
//! orders larger values first. Values that are missing or do not start with
//! an integer sort after all present values, keeping their relative order.
//! The sort is stable throughout.

use crate::domain::{Document, Markers, NodeId, Result};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// The one sort key compared as text.
pub const LEXICAL_SORT_KEY: &str = "name";

/// Parses a leading integer like JavaScript's `parseInt(value, 10)`.
///
/// Leading whitespace and one sign are accepted, digits are read up to the
/// first non-digit, and `None` stands for not-a-number. Out-of-range values
/// saturate.
///
/// ```
/// use directory_page::controllers::sort_filter::parse_int_prefix;
///
/// assert_eq!(parse_int_prefix("  42px"), Some(42));
/// assert_eq!(parse_int_prefix("-7"), Some(-7));
/// assert_eq!(parse_int_prefix("3.9"), Some(3));
/// assert_eq!(parse_int_prefix("$12"), None);
/// ```
#[must_use]
pub fn parse_int_prefix(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut seen_digit = false;
    let mut total: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        let digit = i64::from(byte - b'0');
        total = total.saturating_mul(10).saturating_add(digit);
    }

    seen_digit.then_some(if negative { -total } else { total })
}

/// Primary collation key: canonical decomposition with combining marks
/// dropped, lower-cased. `"Émile"` folds to `"emile"`.
fn fold(value: &str) -> String {
    value
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accent- and case-insensitive text ordering with deterministic tie-breaks.
///
/// ```
/// use directory_page::controllers::sort_filter::compare_lexical;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_lexical("Émile", "Zoe"), Ordering::Less);
/// assert_eq!(compare_lexical("resume", "résumé"), Ordering::Less);
/// assert_eq!(compare_lexical("a", "A"), Ordering::Less);
/// ```
#[must_use]
pub fn compare_lexical(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Orders two optional values, placing `None` after every `Some`.
fn missing_last<T>(a: Option<T>, b: Option<T>, present: impl FnOnce(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => present(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compares two raw attribute values under `key`'s ordering rules.
#[must_use]
pub fn compare_values(key: &str, a: Option<&str>, b: Option<&str>) -> Ordering {
    if key == LEXICAL_SORT_KEY {
        missing_last(a, b, compare_lexical)
    } else {
        missing_last(
            a.and_then(parse_int_prefix),
            b.and_then(parse_int_prefix),
            |a, b| b.cmp(&a),
        )
    }
}

/// Counts from one filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSummary {
    pub visible: usize,
    pub hidden: usize,
}

#[derive(Debug, Clone)]
pub struct SortFilterEngine {
    markers: Markers,
    sort_buttons: Vec<NodeId>,
    filter_inputs: Vec<NodeId>,
}

impl SortFilterEngine {
    /// Registers every sort button and filter input. Returns `None` if the
    /// page has neither.
    #[must_use]
    pub fn install(doc: &Document, markers: &Markers) -> Option<Self> {
        let root = doc.root();
        let sort_buttons = doc.find_by_class(root, &markers.sort_button);
        let filter_inputs = doc.find_by_class(root, &markers.filter_input);

        if sort_buttons.is_empty() && filter_inputs.is_empty() {
            tracing::debug!("no sort buttons or filter inputs, sort/filter engine not installed");
            return None;
        }

        tracing::debug!(
            sort_buttons = sort_buttons.len(),
            filter_inputs = filter_inputs.len(),
            "sort/filter engine installed"
        );

        Some(Self {
            markers: markers.clone(),
            sort_buttons,
            filter_inputs,
        })
    }

    #[must_use]
    pub fn sort_buttons(&self) -> &[NodeId] {
        &self.sort_buttons
    }

    /// The sort button containing `node`, if any.
    #[must_use]
    pub fn button_for(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        self.sort_buttons
            .iter()
            .copied()
            .find(|&button| doc.is_inclusive_ancestor(button, node))
    }

    #[must_use]
    pub fn is_filter_input(&self, node: NodeId) -> bool {
        self.filter_inputs.contains(&node)
    }

    /// Sorts by the button's `data-sort` key and marks it as the active sort.
    ///
    /// Nothing changes when the button has no key or the page has no results
    /// container.
    ///
    /// # Errors
    ///
    /// Returns an error if a node involved was removed from the document.
    pub fn activate_button(&self, doc: &mut Document, button: NodeId) -> Result<bool> {
        let Some(key) = doc.attr(button, &self.markers.sort_key_attr).map(str::to_string) else {
            tracing::debug!(%button, "sort button without a key");
            return Ok(false);
        };

        if !self.sort_by(doc, &key)? {
            return Ok(false);
        }

        for &other in &self.sort_buttons {
            if other != button {
                doc.remove_class(other, &self.markers.active)?;
            }
        }
        doc.add_class(button, &self.markers.active)?;
        Ok(true)
    }

    /// Reorders the results container's children by `key`.
    ///
    /// Returns `false` if there is no results container.
    ///
    /// # Errors
    ///
    /// Returns an error if an item was removed from the document mid-sort.
    pub fn sort_by(&self, doc: &mut Document, key: &str) -> Result<bool> {
        let Some(container) = doc.first_by_class(doc.root(), &self.markers.results_container) else {
            tracing::debug!(key, "no results container to sort");
            return Ok(false);
        };

        let _span = tracing::debug_span!("sort_by", key, container = %container).entered();

        let attr = Markers::sort_value_attr(key);
        let mut items = doc.children(container).to_vec();
        items.sort_by(|&a, &b| compare_values(key, doc.attr(a, &attr), doc.attr(b, &attr)));

        for &item in &items {
            doc.append_child(container, item)?;
        }

        tracing::debug!(item_count = items.len(), "results sorted");
        Ok(true)
    }

    /// Hides every filterable item whose lower-cased text does not contain
    /// the lower-cased `text`, and shows the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if an item was removed from the document mid-pass.
    pub fn apply_filter(&self, doc: &mut Document, text: &str) -> Result<FilterSummary> {
        let query = text.to_lowercase();
        let _span = tracing::debug_span!("apply_filter", query_len = query.len()).entered();

        let mut summary = FilterSummary::default();
        for item in doc.find_by_class(doc.root(), &self.markers.filterable_item) {
            let matches = doc.text_content(item).to_lowercase().contains(&query);
            doc.set_hidden(item, !matches)?;
            if matches {
                summary.visible += 1;
            } else {
                summary.hidden += 1;
            }
        }

        tracing::debug!(visible = summary.visible, hidden = summary.hidden, "filter applied");
        Ok(summary)
    }
}
