//! Page state: the document plus whichever controllers it supports.
//!
//! [`PageState`] is the single owner of everything mutable on the page. The
//! controllers hold only node ids and their own bookkeeping (pending timers,
//! watch lists), so the document is the only state they share.

use crate::app::Action;
use crate::controllers::{
    AccessibilityController, FormValidator, LazyMediaLoader, MenuController, RevealAnimator,
    ScrollTracker, SearchTrigger, SortFilterEngine,
};
use crate::domain::{Document, Markers, Result, Viewport};
use crate::watch::IntersectionEntry;

#[derive(Debug, Clone)]
pub struct PageState {
    pub document: Document,
    pub markers: Markers,

    ready: bool,

    pub menus: Option<MenuController>,
    pub search: Option<SearchTrigger>,
    pub sort_filter: Option<SortFilterEngine>,
    pub reveal: Option<RevealAnimator>,
    pub lazy_media: Option<LazyMediaLoader>,
    pub validation: Option<FormValidator>,
    pub accessibility: Option<AccessibilityController>,
    pub scroll: ScrollTracker,
}

impl PageState {
    /// Wraps a document. Controllers are installed on `DocumentReady`.
    #[must_use]
    pub fn new(document: Document, markers: Markers) -> Self {
        Self {
            document,
            markers,
            ready: false,
            menus: None,
            search: None,
            sort_filter: None,
            reveal: None,
            lazy_media: None,
            validation: None,
            accessibility: None,
            scroll: ScrollTracker::default(),
        }
    }

    /// Sets the viewport used by the initial intersection pass.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.scroll = ScrollTracker::new(viewport);
        self
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Installs every controller whose collaborators exist.
    ///
    /// Controllers are independent: one failing to install is logged and the
    /// rest still install. Calling this again after it succeeded is a no-op.
    pub fn install_controllers(&mut self) {
        if self.ready {
            tracing::debug!("controllers already installed");
            return;
        }

        let _span = tracing::debug_span!("install_controllers").entered();
        let doc = &self.document;
        let markers = &self.markers;

        self.menus = MenuController::install(doc, markers);
        self.search = SearchTrigger::install(doc, markers);
        self.sort_filter = SortFilterEngine::install(doc, markers);
        self.reveal = RevealAnimator::install(doc, markers);
        self.lazy_media = LazyMediaLoader::install(doc, markers);
        self.validation = FormValidator::install(doc, markers);

        self.accessibility = match AccessibilityController::install(&mut self.document, &self.markers) {
            Ok(controller) => Some(controller),
            Err(e) => {
                tracing::warn!(error = %e, "accessibility controller failed to install");
                None
            }
        };

        self.ready = true;
        tracing::debug!("page ready");
    }

    /// Routes intersection entries to both watchers.
    ///
    /// # Errors
    ///
    /// Returns an error if an observed element was removed mid-update.
    pub fn apply_intersections(&mut self, entries: &[IntersectionEntry]) -> Result<Vec<Action>> {
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.on_entries(&mut self.document, entries)?;
        }
        match self.lazy_media.as_mut() {
            Some(lazy) => lazy.on_entries(&mut self.document, entries),
            None => Ok(vec![]),
        }
    }

    /// Computes entries for the current viewport from layout and applies them.
    ///
    /// Nothing is evaluated until the host has reported a viewport with a
    /// non-zero area; until then only host-supplied entries apply.
    ///
    /// # Errors
    ///
    /// Returns an error if an observed element was removed mid-update.
    pub fn evaluate_viewport(&mut self) -> Result<Vec<Action>> {
        let viewport = self.scroll.viewport();
        if !viewport.has_area() {
            tracing::debug!("viewport size unknown, skipping intersection pass");
            return Ok(vec![]);
        }
        let mut actions = Vec::new();

        if let Some(reveal) = self.reveal.as_mut() {
            let entries = reveal.watch_list_mut().evaluate(&self.document, &viewport);
            reveal.on_entries(&mut self.document, &entries)?;
        }
        if let Some(lazy) = self.lazy_media.as_mut() {
            let entries = lazy.watch_list_mut().evaluate(&self.document, &viewport);
            actions.extend(lazy.on_entries(&mut self.document, &entries)?);
        }
        Ok(actions)
    }
}
