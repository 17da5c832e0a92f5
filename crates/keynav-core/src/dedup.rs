//! Duplicate target collapsing.
//!
//! Many documents repeat the same link twice in a row: an icon anchor and
//! a text anchor pointing at the same destination. Painting two markers for
//! one logical target wastes keys, so displayed candidates are reduced to
//! one representative per identity key, keeping the first occurrence in
//! document order.
//!
//! Identity key policy: a usable link target wins; anything else falls back
//! to the element's serialized markup. The fallback knowingly collapses
//! structurally identical but distinct nodes (two bare `<button>`s with the
//! same markup share one marker); that tradeoff is part of the contract.

use std::collections::HashSet;

use crate::dom::{Document, DocumentError, NodeId};

/// Href values that trigger script handlers instead of navigating.
const SCRIPT_HREF_PREFIX: &str = "javascript:";

/// The identity key under which an element is deduplicated.
///
/// The resolved link target when it is non-empty, not a bare `#`, and not
/// a `javascript:` placeholder; otherwise the element's serialized markup.
pub fn identity_key(doc: &Document, id: NodeId) -> Result<String, DocumentError> {
    if let Some(href) = doc.node(id)?.attr("href") {
        if !href.is_empty() && href != "#" && !href.starts_with(SCRIPT_HREF_PREFIX) {
            return Ok(href.to_string());
        }
    }
    doc.outer_html(id)
}

/// Collapse candidates to one representative per identity key.
///
/// Preserves document order; later duplicates are discarded.
pub fn unique_elements(doc: &Document, candidates: &[NodeId]) -> Result<Vec<NodeId>, DocumentError> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for &id in candidates {
        if seen.insert(identity_key(doc, id)?) {
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

    fn link(doc: &mut Document, href: &str, text: &str) -> NodeId {
        let body = doc.body();
        let a = doc.create_element("a");
        doc.set_attr(a, "href", href).unwrap();
        doc.set_text(a, text).unwrap();
        doc.append_child(body, a).unwrap();
        a
    }

    #[test]
    fn href_is_the_identity_key_when_usable() {
        let mut doc = doc();
        let a = link(&mut doc, "https://example.com/docs", "Docs");
        assert_eq!(identity_key(&doc, a).unwrap(), "https://example.com/docs");
    }

    #[test]
    fn unusable_hrefs_fall_back_to_markup() {
        let mut doc = doc();
        let empty = link(&mut doc, "", "Empty");
        let hash = link(&mut doc, "#", "Hash");
        let script = link(&mut doc, "javascript:void(0)", "Script");

        for id in [empty, hash, script] {
            assert_eq!(
                identity_key(&doc, id).unwrap(),
                doc.outer_html(id).unwrap()
            );
        }
    }

    #[test]
    fn same_destination_collapses_to_first_in_document_order() {
        let mut doc = doc();
        let icon = link(&mut doc, "https://example.com/home", "");
        let text = link(&mut doc, "https://example.com/home", "Home");
        let other = link(&mut doc, "https://example.com/about", "About");

        let unique = unique_elements(&doc, &[icon, text, other]).unwrap();
        assert_eq!(unique, vec![icon, other]);
    }

    #[test]
    fn buttons_dedup_by_markup() {
        let mut doc = doc();
        let body = doc.body();
        let mut button = |label: &str| {
            let b = doc.create_element("button");
            doc.set_text(b, label).unwrap();
            doc.append_child(body, b).unwrap();
            b
        };
        let ok1 = button("OK");
        let ok2 = button("OK");
        let cancel = button("Cancel");

        // Identical markup collapses even though the nodes are distinct;
        // that precision loss is the documented fallback behavior.
        let unique = unique_elements(&doc, &[ok1, ok2, cancel]).unwrap();
        assert_eq!(unique, vec![ok1, cancel]);
    }

    #[test]
    fn differing_markup_survives_dedup() {
        let mut doc = doc();
        let a = link(&mut doc, "#", "Open menu");
        let b = link(&mut doc, "#", "Close menu");
        let unique = unique_elements(&doc, &[a, b]).unwrap();
        assert_eq!(unique, vec![a, b]);
    }
}
