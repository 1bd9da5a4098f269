//! Mobile navigation panel and mutually exclusive dropdown menus.
//!
//! Every menu is a trigger/panel pair. Its open state is written through
//! [`MenuPair::apply`], which updates the panel's activation class and the
//! trigger's expansion attribute together; nothing else in the crate touches
//! either of them separately.
//!
//! Dropdowns form one group: opening one closes the rest. The mobile panel is
//! independent of the group.

use crate::domain::{Document, Markers, NodeId, Result};

/// Open/closed state of one menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Open,
    Closed,
}

impl MenuState {
    #[must_use]
    pub const fn from_open(open: bool) -> Self {
        if open {
            Self::Open
        } else {
            Self::Closed
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    /// Both visible outputs of a state: whether the panel carries the active
    /// class, and the trigger's expansion attribute value.
    #[must_use]
    pub const fn outputs(self) -> (bool, &'static str) {
        match self {
            Self::Open => (true, "true"),
            Self::Closed => (false, "false"),
        }
    }
}

/// Writes `state` to whichever halves of a menu are present.
///
/// Used directly by the escape handler, which discovers open panels from the
/// tree and may not find a trigger for every one.
///
/// # Errors
///
/// Returns an error if a given node is no longer in the document.
pub fn apply_state(
    doc: &mut Document,
    markers: &Markers,
    trigger: Option<NodeId>,
    panel: Option<NodeId>,
    state: MenuState,
) -> Result<()> {
    let (panel_active, expanded) = state.outputs();

    if let Some(panel) = panel {
        if panel_active {
            doc.add_class(panel, &markers.active)?;
        } else {
            doc.remove_class(panel, &markers.active)?;
        }
    }
    if let Some(trigger) = trigger {
        doc.set_attr(trigger, &markers.expanded_attr, expanded)?;
    }
    Ok(())
}

/// A trigger element paired with the panel it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuPair {
    pub trigger: NodeId,
    pub panel: NodeId,
}

impl MenuPair {
    /// Reads the current state from the panel's activation class.
    #[must_use]
    pub fn state(&self, doc: &Document, markers: &Markers) -> MenuState {
        MenuState::from_open(doc.has_class(self.panel, &markers.active))
    }

    /// Writes `state` to both halves of the pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either node is no longer in the document.
    pub fn apply(&self, doc: &mut Document, markers: &Markers, state: MenuState) -> Result<()> {
        apply_state(doc, markers, Some(self.trigger), Some(self.panel), state)
    }

    /// Whether `node` lies within the trigger or the panel.
    #[must_use]
    pub fn contains(&self, doc: &Document, node: NodeId) -> bool {
        doc.is_inclusive_ancestor(self.trigger, node) || doc.is_inclusive_ancestor(self.panel, node)
    }
}

/// Index of a dropdown within its group, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropdownId(pub usize);

#[derive(Debug, Clone)]
pub struct MenuController {
    markers: Markers,
    mobile: Option<MenuPair>,
    dropdowns: Vec<MenuPair>,
}

impl MenuController {
    /// Locates the mobile menu and every complete dropdown.
    ///
    /// A dropdown missing its toggle or panel is skipped. Returns `None` when
    /// neither a mobile menu nor any dropdown is present.
    #[must_use]
    pub fn install(doc: &Document, markers: &Markers) -> Option<Self> {
        let root = doc.root();

        let mobile = doc
            .first_by_class(root, &markers.mobile_menu_button)
            .zip(doc.first_by_class(root, &markers.nav_menu))
            .map(|(trigger, panel)| MenuPair { trigger, panel });

        let dropdowns: Vec<MenuPair> = doc
            .find_by_class(root, &markers.dropdown)
            .into_iter()
            .filter_map(|dropdown| {
                let trigger = doc.first_by_class(dropdown, &markers.dropdown_toggle);
                let panel = doc.first_by_class(dropdown, &markers.dropdown_menu);
                if trigger.is_none() || panel.is_none() {
                    tracing::debug!(%dropdown, "dropdown without toggle or panel, skipping");
                }
                Some(MenuPair {
                    trigger: trigger?,
                    panel: panel?,
                })
            })
            .collect();

        if mobile.is_none() && dropdowns.is_empty() {
            tracing::debug!("no menus found, menu controller not installed");
            return None;
        }

        tracing::debug!(
            has_mobile_menu = mobile.is_some(),
            dropdown_count = dropdowns.len(),
            "menu controller installed"
        );

        Some(Self {
            markers: markers.clone(),
            mobile,
            dropdowns,
        })
    }

    #[must_use]
    pub const fn mobile(&self) -> Option<MenuPair> {
        self.mobile
    }

    #[must_use]
    pub fn dropdowns(&self) -> &[MenuPair] {
        &self.dropdowns
    }

    #[must_use]
    pub fn dropdown(&self, id: DropdownId) -> Option<MenuPair> {
        self.dropdowns.get(id.0).copied()
    }

    /// The dropdown whose trigger contains `node`.
    #[must_use]
    pub fn dropdown_for_trigger(&self, doc: &Document, node: NodeId) -> Option<DropdownId> {
        self.dropdowns
            .iter()
            .position(|pair| doc.is_inclusive_ancestor(pair.trigger, node))
            .map(DropdownId)
    }

    /// Whether `node` lies within the mobile menu trigger.
    #[must_use]
    pub fn is_mobile_trigger(&self, doc: &Document, node: NodeId) -> bool {
        self.mobile
            .is_some_and(|pair| doc.is_inclusive_ancestor(pair.trigger, node))
    }

    /// Dropdowns currently open, in document order.
    #[must_use]
    pub fn open_dropdowns(&self, doc: &Document) -> Vec<DropdownId> {
        self.dropdowns
            .iter()
            .enumerate()
            .filter(|(_, pair)| pair.state(doc, &self.markers) == MenuState::Open)
            .map(|(index, _)| DropdownId(index))
            .collect()
    }

    /// Flips the mobile navigation panel. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu's nodes were removed from the document.
    pub fn toggle_mobile_menu(&self, doc: &mut Document) -> Result<Option<MenuState>> {
        let Some(pair) = self.mobile else {
            return Ok(None);
        };
        let next = pair.state(doc, &self.markers).toggled();
        pair.apply(doc, &self.markers, next)?;
        tracing::debug!(state = ?next, "mobile menu toggled");
        Ok(Some(next))
    }

    /// Closes the mobile navigation panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu's nodes were removed from the document.
    pub fn close_mobile_menu(&self, doc: &mut Document) -> Result<()> {
        if let Some(pair) = self.mobile {
            pair.apply(doc, &self.markers, MenuState::Closed)?;
        }
        Ok(())
    }

    /// Closes every other dropdown, then flips `id`. Returns its new state.
    ///
    /// # Errors
    ///
    /// Returns an error if a dropdown's nodes were removed from the document.
    pub fn toggle_dropdown(&self, doc: &mut Document, id: DropdownId) -> Result<Option<MenuState>> {
        let Some(target) = self.dropdown(id) else {
            tracing::debug!(dropdown = id.0, "unknown dropdown");
            return Ok(None);
        };

        for (index, pair) in self.dropdowns.iter().enumerate() {
            if index != id.0 {
                pair.apply(doc, &self.markers, MenuState::Closed)?;
            }
        }

        let next = target.state(doc, &self.markers).toggled();
        target.apply(doc, &self.markers, next)?;
        tracing::debug!(dropdown = id.0, state = ?next, "dropdown toggled");
        Ok(Some(next))
    }

    /// Closes every dropdown in the group.
    ///
    /// # Errors
    ///
    /// Returns an error if a dropdown's nodes were removed from the document.
    pub fn close_all_dropdowns(&self, doc: &mut Document) -> Result<()> {
        for pair in &self.dropdowns {
            pair.apply(doc, &self.markers, MenuState::Closed)?;
        }
        Ok(())
    }

    /// Document-level click handling: closes every dropdown whose
    /// trigger/panel pair does not contain `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if a dropdown's nodes were removed from the document.
    pub fn close_dropdowns_outside(&self, doc: &mut Document, target: NodeId) -> Result<()> {
        for pair in &self.dropdowns {
            if !pair.contains(doc, target) {
                pair.apply(doc, &self.markers, MenuState::Closed)?;
            }
        }
        Ok(())
    }
}
