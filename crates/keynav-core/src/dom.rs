//! Arena document model.
//!
//! The pipeline consumes a narrow slice of a real document: element query,
//! computed-style read, bounding-rectangle read, focus, click dispatch, and
//! body append/remove. [`Document`] provides exactly that surface over an
//! arena of nodes, so sessions run the same way against a host-supplied
//! fixture as they would against a live page.
//!
//! Synthetic focus and click are recorded on the document rather than
//! dispatched anywhere: the host observes them through [`Document::focused`]
//! and [`Document::clicks`].
//!
//! # Node lifetime
//!
//! A [`NodeId`] stays valid until its node is removed from the document.
//! Using an id after removal is a [`DocumentError::DetachedNode`]; callers
//! propagate it and the next overlay invocation recovers via a full reset.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Rect, Viewport};

/// Handle to a node in a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from document structure access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The id refers to a node that was removed from the document.
    #[error("node #{0} is detached from the document")]
    DetachedNode(NodeId),
}

/// CSS `display` values.
///
/// Only `none` matters to the visibility filter; the rest exist so
/// fixtures can carry realistic styles without being rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    None,
    Inline,
    #[default]
    Block,
    InlineBlock,
    Flex,
    Grid,
}

/// CSS `overflow` values. Only `hidden` matters to the visibility filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
}

/// The computed-style subset the visibility filter reads.
///
/// `width`/`height` are the resolved values in pixels; `None` stands for
/// `auto`, which is never treated as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    pub display: Display,
    pub overflow: Overflow,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// A single element node.
///
/// Tags are normalized to ASCII lowercase on creation. Attributes keep
/// insertion order so serialized markup is deterministic.
#[derive(Debug, Clone)]
pub struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    style: ComputedStyle,
    rect: Rect,
    open: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            text: None,
            style: ComputedStyle::default(),
            rect: Rect::default(),
            open: false,
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value by name, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn style(&self) -> &ComputedStyle {
        &self.style
    }

    /// Bounding rectangle, viewport-relative.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Disclosure state for `details` elements.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }
}

/// An in-memory document: element tree, viewport, and the synthetic
/// focus/click state the overlay produces.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    body: NodeId,
    viewport: Viewport,
    focused: Option<NodeId>,
    clicks: Vec<NodeId>,
}

impl Document {
    /// Create an empty document: an `html` root with a `body` child.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let mut root_node = Node::new("html");
        let root = NodeId(0);
        let body = NodeId(1);
        root_node.children.push(body);
        let mut body_node = Node::new("body");
        body_node.parent = Some(root);
        Self {
            nodes: vec![Some(root_node), Some(body_node)],
            root,
            body,
            viewport,
            focused: None,
            clicks: Vec::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn body(&self) -> NodeId {
        self.body
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// The viewport as an area rectangle anchored at (0,0).
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        self.viewport.area()
    }

    fn slot(&self, id: NodeId) -> Result<&Node, DocumentError> {
        self.nodes
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(DocumentError::DetachedNode(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Node, DocumentError> {
        self.nodes
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(DocumentError::DetachedNode(id))
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Result<&Node, DocumentError> {
        self.slot(id)
    }

    /// Create a new element. The node exists in the arena but is not part
    /// of the tree until appended somewhere.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(Node::new(tag)));
        id
    }

    /// Append `child` under `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        self.slot(parent)?;
        if let Some(old_parent) = self.slot(child)?.parent {
            let old = self.slot_mut(old_parent)?;
            old.children.retain(|&c| c != child);
        }
        self.slot_mut(child)?.parent = Some(parent);
        self.slot_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Remove a node and its entire subtree from the document.
    ///
    /// Every id in the subtree becomes detached.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DocumentError> {
        let parent = self.slot(id)?.parent;
        if let Some(parent) = parent {
            self.slot_mut(parent)?.children.retain(|&c| c != id);
        }
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(slot) = self.nodes.get_mut(current.0 as usize) {
                if let Some(node) = slot.take() {
                    pending.extend(node.children);
                }
            }
        }
        if self.focused.is_some_and(|f| self.slot(f).is_err()) {
            self.focused = None;
        }
        Ok(())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DocumentError> {
        let node = self.slot_mut(id)?;
        if let Some(entry) = node.attrs.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value.to_string();
        } else {
            node.attrs.push((name.to_string(), value.to_string()));
        }
        Ok(())
    }

    /// Attribute value by name.
    pub fn attr(&self, id: NodeId, name: &str) -> Result<Option<&str>, DocumentError> {
        Ok(self.slot(id)?.attr(name))
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), DocumentError> {
        self.slot_mut(id)?.text = Some(text.to_string());
        Ok(())
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) -> Result<(), DocumentError> {
        self.slot_mut(id)?.rect = rect;
        Ok(())
    }

    pub fn set_style(&mut self, id: NodeId, style: ComputedStyle) -> Result<(), DocumentError> {
        self.slot_mut(id)?.style = style;
        Ok(())
    }

    /// Set the disclosure state (`details` elements).
    pub fn set_open(&mut self, id: NodeId, open: bool) -> Result<(), DocumentError> {
        self.slot_mut(id)?.open = open;
        Ok(())
    }

    /// All descendants of `container` in document order (pre-order),
    /// excluding the container itself.
    pub fn descendants(&self, container: NodeId) -> Result<Vec<NodeId>, DocumentError> {
        let container_node = self.slot(container)?;
        let mut out = Vec::new();
        // Children pushed in reverse so the stack pops in document order.
        let mut stack: Vec<NodeId> = container_node.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Ok(node) = self.slot(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        Ok(out)
    }

    /// All elements whose class list contains `class`, in document order.
    #[must_use]
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        let Ok(all) = self.descendants(self.root) else {
            return Vec::new();
        };
        all.into_iter()
            .filter(|&id| {
                self.slot(id)
                    .map(|node| node.class_list().any(|c| c == class))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Serialize an element to markup: tag, attributes in insertion order,
    /// direct text, then children.
    ///
    /// This is the structural identity used by the deduplicator's fallback
    /// key, so the output is deterministic for a given tree.
    pub fn outer_html(&self, id: NodeId) -> Result<String, DocumentError> {
        let mut out = String::new();
        self.write_markup(id, &mut out)?;
        Ok(out)
    }

    fn write_markup(&self, id: NodeId, out: &mut String) -> Result<(), DocumentError> {
        let node = self.slot(id)?;
        out.push('<');
        out.push_str(&node.tag);
        for (name, value) in &node.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_markup(value));
            out.push('"');
        }
        out.push('>');
        if let Some(text) = &node.text {
            out.push_str(&escape_markup(text));
        }
        for &child in &node.children {
            self.write_markup(child, out)?;
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
        Ok(())
    }

    /// Give an element input focus.
    pub fn focus(&mut self, id: NodeId) -> Result<(), DocumentError> {
        self.slot(id)?;
        self.focused = Some(id);
        Ok(())
    }

    /// The currently focused element, if any.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Dispatch a synthetic click (default activation) on an element.
    ///
    /// The document records the activation for the host to observe; there
    /// is no handler machinery here.
    pub fn click(&mut self, id: NodeId) -> Result<(), DocumentError> {
        self.slot(id)?;
        self.clicks.push(id);
        Ok(())
    }

    /// Every synthetic click dispatched so far, in order.
    #[must_use]
    pub fn clicks(&self) -> &[NodeId] {
        &self.clicks
    }
}

fn escape_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            width: 1024.0,
            height: 768.0,
        }
    }

    #[test]
    fn new_document_has_html_root_and_body() {
        let doc = Document::new(viewport());
        assert_eq!(doc.node(doc.root()).unwrap().tag(), "html");
        assert_eq!(doc.node(doc.body()).unwrap().tag(), "body");
        assert_eq!(doc.node(doc.body()).unwrap().parent(), Some(doc.root()));
    }

    #[test]
    fn tags_are_lowercased() {
        let mut doc = Document::new(viewport());
        let a = doc.create_element("A");
        assert_eq!(doc.node(a).unwrap().tag(), "a");
    }

    #[test]
    fn set_attr_replaces_existing_value() {
        let mut doc = Document::new(viewport());
        let a = doc.create_element("a");
        doc.set_attr(a, "href", "/one").unwrap();
        doc.set_attr(a, "href", "/two").unwrap();
        assert_eq!(doc.attr(a, "href").unwrap(), Some("/two"));
        assert_eq!(doc.node(a).unwrap().attrs.len(), 1);
    }

    #[test]
    fn descendants_in_document_order() {
        let mut doc = Document::new(viewport());
        let body = doc.body();
        let div = doc.create_element("div");
        let a = doc.create_element("a");
        let b = doc.create_element("button");
        doc.append_child(body, div).unwrap();
        doc.append_child(div, a).unwrap();
        doc.append_child(body, b).unwrap();

        let order = doc.descendants(body).unwrap();
        assert_eq!(order, vec![div, a, b]);
    }

    #[test]
    fn remove_detaches_subtree() {
        let mut doc = Document::new(viewport());
        let body = doc.body();
        let div = doc.create_element("div");
        let a = doc.create_element("a");
        doc.append_child(body, div).unwrap();
        doc.append_child(div, a).unwrap();

        doc.remove(div).unwrap();
        assert_eq!(doc.node(div).err(), Some(DocumentError::DetachedNode(div)));
        assert_eq!(doc.node(a).err(), Some(DocumentError::DetachedNode(a)));
        assert!(doc.descendants(body).unwrap().is_empty());
    }

    #[test]
    fn remove_clears_focus_on_removed_element() {
        let mut doc = Document::new(viewport());
        let body = doc.body();
        let a = doc.create_element("a");
        doc.append_child(body, a).unwrap();
        doc.focus(a).unwrap();
        doc.remove(a).unwrap();
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn outer_html_includes_attrs_text_and_children() {
        let mut doc = Document::new(viewport());
        let body = doc.body();
        let a = doc.create_element("a");
        doc.set_attr(a, "href", "/docs").unwrap();
        doc.set_text(a, "Docs").unwrap();
        let span = doc.create_element("span");
        doc.set_text(span, "icon").unwrap();
        doc.append_child(body, a).unwrap();
        doc.append_child(a, span).unwrap();

        assert_eq!(
            doc.outer_html(a).unwrap(),
            "<a href=\"/docs\">Docs<span>icon</span></a>"
        );
    }

    #[test]
    fn outer_html_escapes_markup_characters() {
        let mut doc = Document::new(viewport());
        let a = doc.create_element("a");
        doc.set_attr(a, "href", "/q?a=1&b=\"2\"").unwrap();
        doc.set_text(a, "1 < 2").unwrap();
        assert_eq!(
            doc.outer_html(a).unwrap(),
            "<a href=\"/q?a=1&amp;b=&quot;2&quot;\">1 &lt; 2</a>"
        );
    }

    #[test]
    fn focus_and_click_are_recorded() {
        let mut doc = Document::new(viewport());
        let body = doc.body();
        let a = doc.create_element("a");
        doc.append_child(body, a).unwrap();

        doc.focus(a).unwrap();
        doc.click(a).unwrap();
        assert_eq!(doc.focused(), Some(a));
        assert_eq!(doc.clicks(), &[a]);
    }

    #[test]
    fn class_list_splits_on_whitespace() {
        let mut doc = Document::new(viewport());
        let b = doc.create_element("b");
        doc.set_attr(b, "class", "__keynav-helper  __keynav-helper--unboxed")
            .unwrap();
        let classes: Vec<&str> = doc.node(b).unwrap().class_list().collect();
        assert_eq!(classes, vec!["__keynav-helper", "__keynav-helper--unboxed"]);
    }

    #[test]
    fn detached_id_errors_everywhere() {
        let mut doc = Document::new(viewport());
        let body = doc.body();
        let a = doc.create_element("a");
        doc.append_child(body, a).unwrap();
        doc.remove(a).unwrap();

        assert!(doc.outer_html(a).is_err());
        assert!(doc.focus(a).is_err());
        assert!(doc.click(a).is_err());
        assert!(doc.set_attr(a, "href", "/x").is_err());
    }
}
