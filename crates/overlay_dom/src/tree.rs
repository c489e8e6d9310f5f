//! Element tree
//!
//! Nodes live in a slotmap arena; parent/child links are ids. Every write
//! that a page would observe (child list, attributes, box size, scroll
//! offset) is reported to the observer registry or the scroll queue.

use std::borrow::Cow;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};
use tracing::trace;

use crate::error::{DomError, Result};
use crate::observer::{
    MutationKind, MutationObserverInit, MutationRecord, ObserverId, ObserverRegistry, ResizeRecord,
};
use crate::style_registry::StyleRegistry;

new_key_type! {
    pub struct NodeId;
}

// ============================================================================
// Geometry
// ============================================================================

/// Border-box rectangle in client coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Padding of an element's box
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub fn vertical(top: f32, bottom: f32) -> Self {
        Self {
            top,
            bottom,
            ..Default::default()
        }
    }

    /// Sum of top and bottom padding
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Vertical scroll state of an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Visible height of the scroll port
    pub client_height: f32,
    /// Full height of the scrollable content
    pub scroll_height: f32,
    /// Current vertical offset
    pub scroll_top: f32,
}

impl ScrollMetrics {
    pub fn max_scroll_top(&self) -> f32 {
        (self.scroll_height - self.client_height).max(0.0)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// One element in the document
#[derive(Clone, Debug)]
pub struct Node {
    tag: String,
    classes: SmallVec<[String; 4]>,
    attributes: IndexMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Rect,
    padding: Insets,
    metrics: ScrollMetrics,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: SmallVec::new(),
            attributes: IndexMap::new(),
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
            padding: Insets::default(),
            metrics: ScrollMetrics::default(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }
}

/// Iterator over the ancestors of a node, nearest first
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

// ============================================================================
// Document
// ============================================================================

/// An element tree plus the page-level state around it
#[derive(Debug)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    body: NodeId,
    active_element: Option<NodeId>,
    observers: ObserverRegistry,
    styles: StyleRegistry,
    scopes: FxHashMap<NodeId, u64>,
    pending_scrolls: Vec<NodeId>,
}

impl Document {
    /// Create a document with an `html` root and a `body` child
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("html"));
        let body = nodes.insert(Node::new("body"));
        nodes[root].children.push(body);
        nodes[body].parent = Some(root);

        Self {
            nodes,
            root,
            body,
            active_element: None,
            observers: ObserverRegistry::default(),
            styles: StyleRegistry::default(),
            scopes: FxHashMap::default(),
            pending_scrolls: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn exists(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(DomError::NodeNotFound(id))
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node::new(tag))
    }

    /// Create an element with the given classes and append it to `parent`
    pub fn create_child(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> Result<NodeId> {
        let id = self.create_element(tag);
        if let Some(node) = self.nodes.get_mut(id) {
            node.classes = classes.iter().map(|c| c.to_string()).collect();
        }
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.exists(parent) {
            return Err(DomError::NodeNotFound(parent));
        }
        if !self.exists(child) {
            return Err(DomError::NodeNotFound(child));
        }
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if self.nodes[child].parent.is_some() {
            self.detach(child)?;
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        self.record_mutation(
            parent,
            MutationKind::ChildList {
                added: smallvec![child],
                removed: SmallVec::new(),
            },
        );
        Ok(())
    }

    /// Remove a node from its parent, keeping it alive in the arena
    pub fn detach(&mut self, node: NodeId) -> Result<()> {
        let Some(parent) = self.node_mut(node)?.parent.take() else {
            return Ok(());
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| *c != node);
        }
        if let Some(active) = self.active_element {
            if self.contains(node, active) {
                self.active_element = None;
            }
        }
        self.record_mutation(
            parent,
            MutationKind::ChildList {
                added: SmallVec::new(),
                removed: smallvec![node],
            },
        );
        Ok(())
    }

    /// Detach a node and free it together with all its descendants
    pub fn remove_subtree(&mut self, node: NodeId) -> Result<()> {
        self.detach(node)?;

        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(removed) = self.nodes.remove(id) {
                stack.extend(removed.children);
            }
            self.scopes.remove(&id);
            self.pending_scrolls.retain(|n| *n != id);
            self.observers.forget_node(id);
        }
        trace!(?node, "removed subtree");
        Ok(())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Ancestors of `node`, nearest first, not including `node`
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(node),
        }
    }

    /// `node` followed by its ancestors
    pub fn inclusive_ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.exists(node).then_some(node),
        }
    }

    /// Number of ancestors above `node`
    pub fn depth(&self, node: NodeId) -> usize {
        self.ancestors(node).count()
    }

    /// Whether `node` is `ancestor` or one of its descendants
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.inclusive_ancestors(node).any(|a| a == ancestor)
    }

    /// Whether the node is attached to the document root
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    // ========================================================================
    // Tag, classes, attributes
    // ========================================================================

    /// Lowercase tag name, empty for unknown nodes
    pub fn tag_name(&self, node: NodeId) -> &str {
        self.nodes.get(node).map(|n| n.tag.as_str()).unwrap_or("")
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.nodes
            .get(node)
            .map(|n| n.classes.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        let n = self.node_mut(node)?;
        if n.classes.iter().any(|c| c == class) {
            return Ok(());
        }
        n.classes.push(class.to_string());
        self.record_mutation(node, MutationKind::attribute("class"));
        Ok(())
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        let n = self.node_mut(node)?;
        let before = n.classes.len();
        n.classes.retain(|c| c != class);
        if n.classes.len() != before {
            self.record_mutation(node, MutationKind::attribute("class"));
        }
        Ok(())
    }

    /// Raw attribute value. `class` is served from the class list by
    /// [`Document::attribute_value`].
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(node)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    /// Attribute value as a selector sees it, including the joined class list
    pub fn attribute_value(&self, node: NodeId, name: &str) -> Option<Cow<'_, str>> {
        if name.eq_ignore_ascii_case("class") {
            let classes = self.classes(node);
            return (!classes.is_empty()).then(|| Cow::Owned(classes.join(" ")));
        }
        self.attribute(node, name).map(Cow::Borrowed)
    }

    /// Set an attribute. Setting `class` replaces the class list.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        let n = self.node_mut(node)?;
        if name == "class" {
            n.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            n.attributes.insert(name.clone(), value);
        }
        self.record_mutation(node, MutationKind::Attributes { name });
        Ok(())
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let n = self.node_mut(node)?;
        let removed = if name == "class" {
            let had = !n.classes.is_empty();
            n.classes.clear();
            had
        } else {
            n.attributes.shift_remove(&name).is_some()
        };
        if removed {
            self.record_mutation(node, MutationKind::Attributes { name });
        }
        Ok(())
    }

    /// Replace the inline style text
    pub fn set_style(&mut self, node: NodeId, css: impl Into<String>) -> Result<()> {
        self.set_attribute(node, "style", css)
    }

    /// Whether the node is editable through an inherited `contenteditable`
    pub fn is_content_editable(&self, node: NodeId) -> bool {
        for id in self.inclusive_ancestors(node) {
            match self.attribute(id, "contenteditable") {
                Some("") | Some("true") | Some("plaintext-only") => return true,
                Some("false") => return false,
                _ => {}
            }
        }
        false
    }

    // ========================================================================
    // Focus
    // ========================================================================

    pub fn is_focusable(&self, node: NodeId) -> bool {
        let Some(n) = self.nodes.get(node) else {
            return false;
        };
        if n.attributes.contains_key("tabindex") {
            return true;
        }
        match n.tag.as_str() {
            "input" | "textarea" | "select" | "button" => !n.attributes.contains_key("disabled"),
            "a" => n.attributes.contains_key("href"),
            _ => self.is_content_editable(node),
        }
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Move focus to `node`. Returns false if it is detached or not focusable.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !self.is_connected(node) || !self.is_focusable(node) {
            return false;
        }
        self.active_element = Some(node);
        true
    }

    pub fn blur(&mut self) {
        self.active_element = None;
    }

    // ========================================================================
    // Box and scroll metrics
    // ========================================================================

    pub fn rect(&self, node: NodeId) -> Rect {
        self.nodes.get(node).map(|n| n.rect).unwrap_or_default()
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) -> Result<()> {
        let n = self.node_mut(node)?;
        let resized = n.rect.width != rect.width || n.rect.height != rect.height;
        n.rect = rect;
        if resized {
            self.observers.record_resize(node);
        }
        Ok(())
    }

    pub fn padding(&self, node: NodeId) -> Insets {
        self.nodes.get(node).map(|n| n.padding).unwrap_or_default()
    }

    pub fn set_padding(&mut self, node: NodeId, padding: Insets) -> Result<()> {
        let n = self.node_mut(node)?;
        let changed = n.padding != padding;
        n.padding = padding;
        if changed {
            self.observers.record_resize(node);
        }
        Ok(())
    }

    pub fn metrics(&self, node: NodeId) -> ScrollMetrics {
        self.nodes.get(node).map(|n| n.metrics).unwrap_or_default()
    }

    pub fn scroll_top(&self, node: NodeId) -> f32 {
        self.metrics(node).scroll_top
    }

    /// Update the visible height and the content height of a scroll port
    ///
    /// A client height change counts as a resize. A shrinking extent clamps
    /// the current offset and queues a scroll notification.
    pub fn set_scroll_extent(&mut self, node: NodeId, client_height: f32, scroll_height: f32) -> Result<()> {
        let n = self.node_mut(node)?;
        let client_height = client_height.max(0.0);
        let resized = n.metrics.client_height != client_height;
        n.metrics.client_height = client_height;
        n.metrics.scroll_height = scroll_height.max(0.0);

        let max = n.metrics.max_scroll_top();
        let clamped = n.metrics.scroll_top > max;
        if clamped {
            n.metrics.scroll_top = max;
        }

        if resized {
            self.observers.record_resize(node);
        }
        if clamped {
            self.queue_scroll(node);
        }
        Ok(())
    }

    /// Write a scroll offset, clamped to the scrollable range
    ///
    /// Returns the applied offset, or None for unknown nodes. A changed
    /// offset queues a scroll notification.
    pub fn set_scroll_top(&mut self, node: NodeId, value: f32) -> Option<f32> {
        let n = self.nodes.get_mut(node)?;
        let max = n.metrics.max_scroll_top();
        let next = if value.is_finite() {
            value.clamp(0.0, max)
        } else {
            0.0
        };
        if next != n.metrics.scroll_top {
            n.metrics.scroll_top = next;
            self.queue_scroll(node);
        }
        Some(next)
    }

    fn queue_scroll(&mut self, node: NodeId) {
        if !self.pending_scrolls.contains(&node) {
            self.pending_scrolls.push(node);
        }
    }

    /// Drain scroll notifications in the order they were first queued
    pub fn take_scroll_events(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.pending_scrolls)
    }

    pub fn has_pending_scrolls(&self) -> bool {
        !self.pending_scrolls.is_empty()
    }

    // ========================================================================
    // Observers
    // ========================================================================

    fn record_mutation(&mut self, target: NodeId, kind: MutationKind) {
        if self.observers.is_empty() {
            return;
        }
        let path: SmallVec<[NodeId; 16]> = self.inclusive_ancestors(target).collect();
        self.observers.record_mutation(target, &path, kind);
    }

    /// Watch `target` for child list and attribute changes
    pub fn observe_mutations(&mut self, target: NodeId, init: MutationObserverInit) -> ObserverId {
        self.observers.add_mutation(target, init)
    }

    /// Create an empty resize observer; add nodes with [`Document::observe_resize`]
    pub fn create_resize_observer(&mut self) -> ObserverId {
        self.observers.add_resize()
    }

    /// Start reporting box size changes of `node` to a resize observer
    pub fn observe_resize(&mut self, observer: ObserverId, node: NodeId) -> bool {
        self.exists(node) && self.observers.observe_resize(observer, node)
    }

    pub fn unobserve_resize(&mut self, observer: ObserverId, node: NodeId) {
        self.observers.unobserve_resize(observer, node);
    }

    pub fn take_mutation_records(&mut self, observer: ObserverId) -> Vec<MutationRecord> {
        self.observers.take_mutations(observer)
    }

    pub fn take_resize_records(&mut self, observer: ObserverId) -> Vec<ResizeRecord> {
        self.observers.take_resizes(observer)
    }

    /// Stop an observer and drop its undelivered records
    pub fn disconnect(&mut self, observer: ObserverId) -> bool {
        self.observers.remove(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ========================================================================
    // Shared stylesheets and component scopes
    // ========================================================================

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    /// Mark `node` as the root of a component instance identified by `key`
    pub fn register_scope(&mut self, node: NodeId, key: u64) {
        self.scopes.insert(node, key);
    }

    pub fn unregister_scope(&mut self, node: NodeId) -> Option<u64> {
        self.scopes.remove(&node)
    }

    pub fn scope_of(&self, node: NodeId) -> Option<u64> {
        self.scopes.get(&node).copied()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
