//! Marker rendering.
//!
//! A marker is a `<b>` node appended to the document body, never to the
//! target element, so it cannot disturb the target's layout. It carries
//! the assigned label in a `data-key` attribute and the marker classes the
//! host stylesheet styles; its inline style pins it over the element's
//! box. Removal matches on the base marker class.

use crate::dom::{Document, DocumentError, NodeId};

/// Class list stamped on every marker.
pub const MARKER_CLASS: &str = "__keynav-helper __keynav-helper--unboxed";

/// The class markers are found (and removed) by.
pub const MARKER_CLASS_BASE: &str = "__keynav-helper";

const MARKER_TAG: &str = "b";

/// Paint one marker over `target`, labeled with `label`.
///
/// The marker's box is the target's bounding box with the origin clamped
/// to (0,0): markers never render off the top/left of the viewport, and a
/// partially off-screen element keeps a marker spanning its visible
/// portion.
pub fn create_marker(
    doc: &mut Document,
    target: NodeId,
    label: char,
) -> Result<NodeId, DocumentError> {
    let rect = doc.node(target)?.rect().clamped_to_origin();

    let marker = doc.create_element(MARKER_TAG);
    doc.set_attr(marker, "data-key", label.encode_utf8(&mut [0; 4]))?;
    doc.set_attr(marker, "class", MARKER_CLASS)?;
    doc.set_attr(
        marker,
        "style",
        &format!(
            "top: {}px; left: {}px; width: {}px; height: {}px;",
            rect.top(),
            rect.left(),
            rect.width,
            rect.height
        ),
    )?;
    doc.set_rect(marker, rect)?;

    let body = doc.body();
    doc.append_child(body, marker)?;
    Ok(marker)
}

/// Every marker currently in the document, in document order.
#[must_use]
pub fn markers(doc: &Document) -> Vec<NodeId> {
    doc.elements_by_class(MARKER_CLASS_BASE)
}

/// Remove every marker from the document.
pub fn remove_markers(doc: &mut Document) -> Result<(), DocumentError> {
    for marker in markers(doc) {
        doc.remove(marker)?;
    }
    Ok(())
}
