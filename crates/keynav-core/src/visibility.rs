//! Structural visibility and viewport tagging.
//!
//! Two distinct checks feed the pipeline:
//!
//! - [`is_element_displayed`]: is the element rendered at all? Walks the
//!   ancestor chain looking for `display: none`, a collapsed zero-size box
//!   with hidden overflow, or a closed `details`. Independent of viewport
//!   position.
//! - [`element_visibility`]: does the element's box overlap the viewport
//!   area? Produces the [`BindableElement`] tag used for labeling.

use serde::Serialize;

use crate::dom::{Display, Document, DocumentError, Node, NodeId, Overflow};
use crate::geometry::{is_overlapping_area, Rect};

/// A candidate tagged with its viewport-overlap result.
///
/// Derived once per scan and never mutated afterward; only visible
/// entries are eligible for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BindableElement {
    pub node: NodeId,
    pub is_visible: bool,
}

/// Whether this node alone hides itself and everything below it.
fn hides_subtree(node: &Node) -> bool {
    let style = node.style();
    if style.display == Display::None {
        return true;
    }
    let overflow_hidden_y =
        style.overflow == Overflow::Hidden || style.overflow_y == Overflow::Hidden;
    if style.height == Some(0.0) && overflow_hidden_y {
        return true;
    }
    let overflow_hidden_x =
        style.overflow == Overflow::Hidden || style.overflow_x == Overflow::Hidden;
    if style.width == Some(0.0) && overflow_hidden_x {
        return true;
    }
    node.tag() == "details" && !node.is_open()
}

/// Check that neither the element nor any ancestor hides it.
///
/// Iterative walk up the parent chain with early exit; reaching the node
/// with no parent means the element is displayed.
pub fn is_element_displayed(doc: &Document, id: NodeId) -> Result<bool, DocumentError> {
    let mut current = Some(id);
    while let Some(node_id) = current {
        let node = doc.node(node_id)?;
        if hides_subtree(node) {
            return Ok(false);
        }
        current = node.parent();
    }
    Ok(true)
}

/// Tag a candidate with its viewport-overlap result.
///
/// `area` is the viewport rectangle anchored at (0,0), built once per scan.
pub fn element_visibility(
    doc: &Document,
    id: NodeId,
    area: &Rect,
) -> Result<BindableElement, DocumentError> {
    let rect = doc.node(id)?.rect();
    Ok(BindableElement {
        node: id,
        is_visible: is_overlapping_area(&rect, area),
    })
}
