//! Arena-backed document tree.
//!
//! Elements live in a slot vector and are addressed by [`NodeId`]. Removing an
//! element leaves a tombstone in its slot, so a stale id held by a controller
//! fails loudly with [`PageError::UnknownNode`] instead of silently aliasing a
//! newer element.
//!
//! The tree is deliberately small: it models exactly what the controllers read
//! and write (classes, attributes, text, form values, visibility, layout) and
//! nothing of CSS or HTML parsing. Text is stored on the element that owns it;
//! [`Document::text_content`] concatenates it in document order.
//!
//! Every effective mutation bumps [`Document::revision`], which the event
//! handler uses to decide whether the host needs to repaint.

use super::error::{PageError, Result};
use super::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identity of an element within one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Builds an id from its raw slot index.
    ///
    /// Hosts receive ids from the document and echo them back in events; this
    /// constructor exists for decoding those messages.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One element of the tree.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    hidden: bool,
    rect: Option<Rect>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub const fn rect(&self) -> Option<Rect> {
        self.rect
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Declarative description of an element to create.
///
/// # Examples
///
/// ```
/// use directory_page::domain::{Document, ElementSpec};
///
/// let mut doc = Document::new();
/// let body = doc.body();
/// let card = doc
///     .append(body, ElementSpec::new("div").class("filterable-item").attr("data-price", "40").text("Oak desk"))
///     .unwrap();
/// assert_eq!(doc.attr(card, "data-price"), Some("40"));
/// assert_eq!(doc.text_content(card), "Oak desk");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: String,
    value: String,
    hidden: bool,
    rect: Option<Rect>,
}

impl ElementSpec {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    #[must_use]
    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    #[must_use]
    pub const fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub const fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }
}

/// The page's element tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    root: NodeId,
    body: NodeId,
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding an `html` root with an empty `body`.
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId(0);
        let body = NodeId(1);

        let mut html = Element::new("html");
        html.children.push(body);
        let mut body_el = Element::new("body");
        body_el.parent = Some(root);

        Self {
            nodes: vec![Some(html), Some(body_el)],
            root,
            body,
            revision: 0,
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Counter bumped by every mutation that changed the tree.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.index()).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    fn element(&self, node: NodeId) -> Result<&Element> {
        self.get(node).ok_or(PageError::UnknownNode(node))
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut Element> {
        self.nodes
            .get_mut(node.index())
            .and_then(Option::as_mut)
            .ok_or(PageError::UnknownNode(node))
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, spec: ElementSpec) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        let mut element = Element::new(&spec.tag);
        element.classes = spec.classes;
        element.attributes = spec.attributes.into_iter().collect();
        element.text = spec.text;
        element.value = spec.value;
        element.hidden = spec.hidden;
        element.rect = spec.rect;
        self.nodes.push(Some(element));
        self.touch();
        id
    }

    /// Creates an element and appends it as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNode`] if `parent` is not live.
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> Result<NodeId> {
        self.element(parent)?;
        let child = self.create_element(spec);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Moves `child` to the end of `parent`'s children, detaching it from its
    /// current parent first.
    ///
    /// # Errors
    ///
    /// Fails if either node is unknown or if `child` is an ancestor of
    /// `parent` (or `parent` itself).
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` under `parent` immediately before `reference`, or at the
    /// end when `reference` is `None`.
    ///
    /// # Errors
    ///
    /// Fails on unknown nodes, on cycles, and when `reference` is not a child
    /// of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        self.element(parent)?;
        self.element(child)?;

        if self.is_inclusive_ancestor(child, parent) {
            return Err(PageError::Hierarchy(format!(
                "cannot insert {child} into its own subtree at {parent}"
            )));
        }
        if reference == Some(child) {
            return Ok(());
        }
        if let Some(reference) = reference {
            if self.element(reference)?.parent != Some(parent) {
                return Err(PageError::Hierarchy(format!(
                    "{reference} is not a child of {parent}"
                )));
            }
        }

        self.detach(child)?;

        let parent_el = self.element_mut(parent)?;
        let position = reference
            .and_then(|r| parent_el.children.iter().position(|&c| c == r))
            .unwrap_or(parent_el.children.len());
        parent_el.children.insert(position, child);
        self.element_mut(child)?.parent = Some(parent);
        self.touch();
        Ok(())
    }

    fn detach(&mut self, node: NodeId) -> Result<()> {
        if let Some(parent) = self.element(node)?.parent {
            self.element_mut(parent)?.children.retain(|&c| c != node);
            self.element_mut(node)?.parent = None;
        }
        Ok(())
    }

    /// Removes `node` and its whole subtree from the document.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNode`] if `node` is not live. The root
    /// cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(PageError::Hierarchy("cannot remove the document root".to_string()));
        }
        self.detach(node)?;

        let mut doomed = vec![node];
        doomed.extend(self.descendants(node));
        for id in doomed {
            if let Some(slot) = self.nodes.get_mut(id.index()) {
                *slot = None;
            }
        }
        self.touch();
        Ok(())
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(Element::parent)
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map_or(&[], Element::children)
    }

    #[must_use]
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    #[must_use]
    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let position = siblings.iter().position(|&c| c == node)?;
        siblings.get(position + 1).copied()
    }

    #[must_use]
    pub fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let position = siblings.iter().position(|&c| c == node)?;
        position.checked_sub(1).and_then(|p| siblings.get(p).copied())
    }

    /// Returns `node` followed by each of its ancestors up to the root.
    #[must_use]
    pub fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.get(node).map(|_| node);
        while let Some(id) = current {
            path.push(id);
            current = self.parent(id);
        }
        path
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    #[must_use]
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors_inclusive(node).contains(&ancestor)
    }

    /// All descendants of `node` in document (preorder) order, excluding `node`.
    #[must_use]
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Descendants of `scope` accepted by `predicate`, in document order.
    pub fn find_all<F>(&self, scope: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(&predicate))
            .collect()
    }

    #[must_use]
    pub fn find_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.find_all(scope, |el| el.has_class(class))
    }

    #[must_use]
    pub fn first_by_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.find_by_class(scope, class).into_iter().next()
    }

    #[must_use]
    pub fn find_by_attr(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.find_all(scope, |el| el.attr(name).is_some())
    }

    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_all(self.root, |el| el.attr("id") == Some(id))
            .into_iter()
            .next()
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.has_class(class))
    }

    /// Adds `class` to `node`. Returns whether the class list changed.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNode`] if `node` is not live.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<bool> {
        let el = self.element_mut(node)?;
        if el.has_class(class) {
            return Ok(false);
        }
        el.classes.push(class.to_string());
        self.touch();
        Ok(true)
    }

    /// Removes `class` from `node`. Returns whether the class list changed.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNode`] if `node` is not live.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<bool> {
        let el = self.element_mut(node)?;
        let before = el.classes.len();
        el.classes.retain(|c| c != class);
        let changed = el.classes.len() != before;
        if changed {
            self.touch();
        }
        Ok(changed)
    }

    /// Replaces the whole class list with the whitespace-separated `classes`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNode`] if `node` is not live.
    pub fn set_class_name(&mut self, node: NodeId, classes: &str) -> Result<()> {
        let mut parsed: Vec<String> = Vec::new();
        for class in classes.split_whitespace() {
            if !parsed.iter().any(|c| c == class) {
                parsed.push(class.to_string());
            }
        }
        let el = self.element_mut(node)?;
        if el.classes != parsed {
            el.classes = parsed;
            self.touch();
        }
        Ok(())
    }

    #[must_use]
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|el| el.attr(name))
    }

    /// Sets an attribute. Returns whether its value changed.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNode`] if `node` is not live.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> Result<bool> {
        let el = self.element_mut(node)?;
        if el.attr(name) == Some(value) {
            return Ok(false);
        }
        el.attributes.insert(name.to_string(), value.to_string());
        self.touch();
        Ok(true)
    }

    /// Removes an attribute, returning its previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNode`] if `node` is not live.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> Result<Option<String>> {
        let previous = self.element_mut(node)?.attributes.remove(name);
        if previous.is_some() {
            self.touch();
        }
        Ok(previous)
    }

    #[must_use]
    pub fn text(&self, node: NodeId) -> &str {
        self.get(node).map_or("", Element::text)
    }

    /// Replaces the element's own text.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNode`] if `node` is not live.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        let el = self.element_mut(node)?;
        if el.text != text {
            el.text = text.to_string();
            self.touch();
        }
        Ok(())
    }

    /// Own text of `node` followed by the text of every descendant.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = self.text(node).to_string();
        for id in self.descendants(node) {
            out.push_str(self.text(id));
        }
        out
    }

    #[must_use]
    pub fn value(&self, node: NodeId) -> &str {
        self.get(node).map_or("", Element::value)
    }

    /// Sets the current form value of an input-like element.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNode`] if `node` is not live.
    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<()> {
        let el = self.element_mut(node)?;
        if el.value != value {
            el.value = value.to_string();
            self.touch();
        }
        Ok(())
    }

    #[must_use]
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(Element::is_hidden)
    }

    /// Whether `node` and all of its ancestors are displayed.
    #[must_use]
    pub fn is_rendered(&self, node: NodeId) -> bool {
        self.contains_node(node)
            && self
                .ancestors_inclusive(node)
                .iter()
                .all(|&id| !self.is_hidden(id))
    }

    /// Toggles the `display: none` equivalent. Returns whether it changed.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNode`] if `node` is not live.
    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) -> Result<bool> {
        let el = self.element_mut(node)?;
        if el.hidden == hidden {
            return Ok(false);
        }
        el.hidden = hidden;
        self.touch();
        Ok(true)
    }

    #[must_use]
    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.get(node).and_then(Element::rect)
    }

    /// Records the host's layout box for `node`.
    ///
    /// Layout is host-owned geometry, not page state, so it does not bump the
    /// revision.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownNode`] if `node` is not live.
    pub fn set_rect(&mut self, node: NodeId, rect: Option<Rect>) -> Result<()> {
        self.element_mut(node)?.rect = rect;
        Ok(())
    }
}
