//! Interactive element scanning.
//!
//! First pipeline stage: enumerate every element matching the interactive
//! selector, in document order. Pure query: no visibility filtering, no
//! deduplication.

use crate::dom::{Document, DocumentError, NodeId};

/// Tags matched by the interactive selector: anchors and buttons.
pub const INTERACTIVE_TAGS: &[&str] = &["a", "button"];

/// Check whether a tag is part of the interactive selector.
#[must_use]
pub fn is_interactive_tag(tag: &str) -> bool {
    INTERACTIVE_TAGS.contains(&tag)
}

/// All interactive elements under `container`, in document order.
pub fn interactive_elements(
    doc: &Document,
    container: NodeId,
) -> Result<Vec<NodeId>, DocumentError> {
    let mut out = Vec::new();
    for id in doc.descendants(container)? {
        if is_interactive_tag(doc.node(id)?.tag()) {
            out.push(id);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;

    fn doc() -> Document {
        Document::new(Viewport {
            width: 1024.0,
            height: 768.0,
        })
    }

    #[test]
    fn finds_anchors_and_buttons_in_document_order() {
        let mut doc = doc();
        let body = doc.body();
        let header = doc.create_element("header");
        let a1 = doc.create_element("a");
        let div = doc.create_element("div");
        let button = doc.create_element("button");
        let a2 = doc.create_element("a");
        doc.append_child(body, header).unwrap();
        doc.append_child(header, a1).unwrap();
        doc.append_child(body, div).unwrap();
        doc.append_child(div, button).unwrap();
        doc.append_child(div, a2).unwrap();

        let found = interactive_elements(&doc, body).unwrap();
        assert_eq!(found, vec![a1, button, a2]);
    }

    #[test]
    fn ignores_non_interactive_tags() {
        let mut doc = doc();
        let body = doc.body();
        for tag in ["div", "span", "input", "details", "b"] {
            let node = doc.create_element(tag);
            doc.append_child(body, node).unwrap();
        }
        assert!(interactive_elements(&doc, body).unwrap().is_empty());
    }

    #[test]
    fn scan_is_scoped_to_the_container() {
        let mut doc = doc();
        let body = doc.body();
        let aside = doc.create_element("aside");
        let inside = doc.create_element("a");
        let outside = doc.create_element("a");
        doc.append_child(body, aside).unwrap();
        doc.append_child(aside, inside).unwrap();
        doc.append_child(body, outside).unwrap();

        assert_eq!(interactive_elements(&doc, aside).unwrap(), vec![inside]);
    }
}
