//! Structural markers locating each controller's collaborators in the tree.
//!
//! Controllers never hard-code class names: they read them from a [`Markers`]
//! value. The defaults match the directory page's markup; a page with
//! different markup can override any subset from a TOML file.
//!
//! # TOML Format
//!
//! ```toml
//! mobile_menu_button = "hamburger"
//! results_container = "listing-grid"
//! sort_key_attr = "data-order"
//! ```
//!
//! Omitted keys keep their defaults and unknown keys are ignored. Timing and
//! length thresholds are not markers; they live in [`crate::watch`].

use super::error::{PageError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Class names, ids and attribute names forming the document-tree contract.
///
/// Fields ending in `_attr` name attributes, `*_id` fields are element ids,
/// everything else is a class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Class shared by every open menu panel, revealed element and selected
    /// sort button.
    pub active: String,
    pub expanded_attr: String,

    pub mobile_menu_button: String,
    pub nav_menu: String,
    pub dropdown: String,
    pub dropdown_toggle: String,
    pub dropdown_menu: String,

    pub search_form_id: String,
    pub search_input_id: String,

    pub sort_button: String,
    pub sort_key_attr: String,
    pub results_container: String,
    pub filter_input: String,
    pub filterable_item: String,

    pub fade_in: String,
    pub deferred_source_attr: String,

    pub validate_attr: String,
    pub required_attr: String,
    pub label_attr: String,
    pub field_error: String,
    pub error_message: String,

    pub skip_link: String,
    pub main_anchor: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            active: "active".to_string(),
            expanded_attr: "aria-expanded".to_string(),
            mobile_menu_button: "mobile-menu-btn".to_string(),
            nav_menu: "nav-menu".to_string(),
            dropdown: "dropdown".to_string(),
            dropdown_toggle: "dropdown-toggle".to_string(),
            dropdown_menu: "dropdown-menu".to_string(),
            search_form_id: "searchForm".to_string(),
            search_input_id: "searchInput".to_string(),
            sort_button: "sort-btn".to_string(),
            sort_key_attr: "data-sort".to_string(),
            results_container: "results-grid".to_string(),
            filter_input: "filter-input".to_string(),
            filterable_item: "filterable-item".to_string(),
            fade_in: "fade-in".to_string(),
            deferred_source_attr: "data-src".to_string(),
            validate_attr: "data-validate".to_string(),
            required_attr: "required".to_string(),
            label_attr: "data-label".to_string(),
            field_error: "error".to_string(),
            error_message: "error-message".to_string(),
            skip_link: "skip-link".to_string(),
            main_anchor: "#main".to_string(),
        }
    }
}

impl Markers {
    /// Parses markers from a TOML string, defaulting omitted keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid TOML or a key has the wrong
    /// type.
    pub fn from_toml(input: &str) -> Result<Self> {
        let markers: Self = toml::from_str(input)?;
        markers.validate()?;
        Ok(markers)
    }

    /// Rejects empty names, which would match every element or none.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Config`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("active", &self.active),
            ("expanded_attr", &self.expanded_attr),
            ("mobile_menu_button", &self.mobile_menu_button),
            ("nav_menu", &self.nav_menu),
            ("dropdown", &self.dropdown),
            ("dropdown_toggle", &self.dropdown_toggle),
            ("dropdown_menu", &self.dropdown_menu),
            ("search_form_id", &self.search_form_id),
            ("search_input_id", &self.search_input_id),
            ("sort_button", &self.sort_button),
            ("sort_key_attr", &self.sort_key_attr),
            ("results_container", &self.results_container),
            ("filter_input", &self.filter_input),
            ("filterable_item", &self.filterable_item),
            ("fade_in", &self.fade_in),
            ("deferred_source_attr", &self.deferred_source_attr),
            ("validate_attr", &self.validate_attr),
            ("required_attr", &self.required_attr),
            ("label_attr", &self.label_attr),
            ("field_error", &self.field_error),
            ("error_message", &self.error_message),
            ("skip_link", &self.skip_link),
            ("main_anchor", &self.main_anchor),
        ];

        match names.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(PageError::Config(format!("marker `{field}` is empty"))),
            None => Ok(()),
        }
    }

    /// Loads markers from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Name of the data attribute carrying the sort value for `key`.
    ///
    /// Keys are dataset names, so `dateAdded` reads `data-date-added`.
    #[must_use]
    pub fn sort_value_attr(key: &str) -> String {
        let mut attr = String::with_capacity(key.len() + 8);
        attr.push_str("data-");
        for c in key.chars() {
            if c.is_ascii_uppercase() {
                attr.push('-');
                attr.push(c.to_ascii_lowercase());
            } else {
                attr.push(c);
            }
        }
        attr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_toml_keeps_defaults() {
        let markers = Markers::from_toml("results_container = \"listing-grid\"\n").unwrap();
        assert_eq!(markers.results_container, "listing-grid");
        assert_eq!(markers.dropdown_toggle, "dropdown-toggle");
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(Markers::from_toml("nav_menu = 3").is_err());
    }

    #[test]
    fn thresholds_are_not_markers() {
        let markers = Markers::from_toml("search_debounce_min_chars = 0\n").unwrap();
        assert_eq!(markers, Markers::default());
    }

    #[test]
    fn sort_value_attr_follows_dataset_naming() {
        assert_eq!(Markers::sort_value_attr("price"), "data-price");
        assert_eq!(Markers::sort_value_attr("dateAdded"), "data-date-added");
        assert_eq!(Markers::sort_value_attr("rating-count"), "data-rating-count");
    }

    #[test]
    fn empty_marker_is_config_error() {
        let err = Markers::from_toml("dropdown = \"  \"").unwrap_err();
        assert!(matches!(err, PageError::Config(ref msg) if msg.contains("dropdown")));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "nav_menu = \"site-nav\"").unwrap();
        let markers = Markers::from_file(file.path()).unwrap();
        assert_eq!(markers.nav_menu, "site-nav");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Markers::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, crate::domain::PageError::Io(_)));
    }
}
