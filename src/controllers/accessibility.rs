//! Global keyboard handling and the skip-navigation link.
//!
//! Escape closes every open menu on the page. Open panels are found from the
//! tree rather than from the menu controller, so a panel opened by any code
//! path is closed; each one is closed through [`menu::apply_state`] together
//! with its trigger.

use super::menu::{self, MenuState};
use crate::domain::{Document, ElementSpec, Markers, NodeId, Result};
use serde::{Deserialize, Serialize};

/// Text of the inserted skip link.
pub const SKIP_LINK_TEXT: &str = "Skip to main content";

/// A keyboard key as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Char(char),
    Other(String),
}

#[derive(Debug, Clone)]
pub struct AccessibilityController {
    markers: Markers,
    skip_link: Option<NodeId>,
}

impl AccessibilityController {
    /// Installs the controller and inserts the skip link as the first child
    /// of the body, unless the page already has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is missing from the document.
    pub fn install(doc: &mut Document, markers: &Markers) -> Result<Self> {
        let body = doc.body();
        let existing = doc
            .find_by_class(body, &markers.skip_link)
            .into_iter()
            .find(|&link| doc.attr(link, "href") == Some(markers.main_anchor.as_str()));

        let skip_link = if let Some(link) = existing {
            tracing::debug!(%link, "skip link already present");
            link
        } else {
            let link = doc.create_element(
                ElementSpec::new("a")
                    .class(&markers.skip_link)
                    .attr("href", &markers.main_anchor)
                    .text(SKIP_LINK_TEXT),
            );
            let first = doc.first_child(body);
            doc.insert_before(body, link, first)?;
            tracing::debug!(%link, "skip link inserted");
            link
        };

        Ok(Self {
            markers: markers.clone(),
            skip_link: Some(skip_link),
        })
    }

    #[must_use]
    pub const fn skip_link(&self) -> Option<NodeId> {
        self.skip_link
    }

    /// Handles a global keydown. Returns whether the key was consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if a menu node was removed from the document.
    pub fn on_key(&self, doc: &mut Document, key: &Key) -> Result<bool> {
        if *key != Key::Escape {
            return Ok(false);
        }
        self.close_everything(doc)?;
        Ok(true)
    }

    /// Closes every open dropdown panel and the mobile navigation panel.
    ///
    /// # Errors
    ///
    /// Returns an error if a menu node was removed from the document.
    pub fn close_everything(&self, doc: &mut Document) -> Result<()> {
        let m = &self.markers;
        let root = doc.root();

        let open_panels: Vec<NodeId> = doc
            .find_by_class(root, &m.dropdown_menu)
            .into_iter()
            .filter(|&panel| doc.has_class(panel, &m.active))
            .collect();

        for panel in &open_panels {
            let trigger = self.trigger_for(doc, *panel);
            menu::apply_state(doc, m, trigger, Some(*panel), MenuState::Closed)?;
        }

        let nav = doc.first_by_class(root, &m.nav_menu);
        let mobile_button = doc.first_by_class(root, &m.mobile_menu_button);
        menu::apply_state(doc, m, mobile_button, nav, MenuState::Closed)?;

        tracing::debug!(closed_dropdowns = open_panels.len(), "escape closed all menus");
        Ok(())
    }

    /// The trigger for a dropdown panel: its previous sibling, or else the
    /// toggle inside the enclosing dropdown.
    fn trigger_for(&self, doc: &Document, panel: NodeId) -> Option<NodeId> {
        let m = &self.markers;
        doc.previous_element_sibling(panel)
            .filter(|&sibling| doc.has_class(sibling, &m.dropdown_toggle))
            .or_else(|| {
                doc.ancestors_inclusive(panel)
                    .into_iter()
                    .find(|&node| doc.has_class(node, &m.dropdown))
                    .and_then(|dropdown| doc.first_by_class(dropdown, &m.dropdown_toggle))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_link_becomes_first_body_child_once() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append(body, ElementSpec::new("header")).unwrap();

        let markers = Markers::default();
        let first = AccessibilityController::install(&mut doc, &markers).unwrap();
        let again = AccessibilityController::install(&mut doc, &markers).unwrap();

        let link = first.skip_link().unwrap();
        assert_eq!(again.skip_link(), Some(link));
        assert_eq!(doc.first_child(body), Some(link));
        assert_eq!(doc.attr(link, "href"), Some("#main"));
        assert_eq!(doc.text(link), SKIP_LINK_TEXT);
        assert_eq!(doc.find_by_class(body, "skip-link").len(), 1);
    }

    #[test]
    fn escape_closes_open_panels_and_resets_triggers() {
        let mut doc = Document::new();
        let body = doc.body();
        let dropdown = doc.append(body, ElementSpec::new("div").class("dropdown")).unwrap();
        let wrapper = doc.append(dropdown, ElementSpec::new("span")).unwrap();
        let toggle = doc
            .append(wrapper, ElementSpec::new("button").class("dropdown-toggle").attr("aria-expanded", "true"))
            .unwrap();
        let panel = doc
            .append(dropdown, ElementSpec::new("ul").class("dropdown-menu").class("active"))
            .unwrap();

        let controller = AccessibilityController::install(&mut doc, &Markers::default()).unwrap();
        assert!(!controller.on_key(&mut doc, &Key::Char('x')).unwrap());
        assert!(controller.on_key(&mut doc, &Key::Escape).unwrap());

        assert!(!doc.has_class(panel, "active"));
        assert_eq!(doc.attr(toggle, "aria-expanded"), Some("false"));
    }
}
