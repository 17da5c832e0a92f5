//! Document fixtures.
//!
//! Hosts and tests describe a document as JSON (viewport plus an element
//! tree) and build it into a [`Document`]. The CLI host loads pages this
//! way; a live host would adapt its own tree instead.
//!
//! ```json
//! {
//!   "viewport": { "width": 1024.0, "height": 768.0 },
//!   "body": {
//!     "tag": "body",
//!     "children": [
//!       {
//!         "tag": "a",
//!         "attrs": { "href": "https://example.com/docs" },
//!         "text": "Docs",
//!         "rect": { "x": 10.0, "y": 10.0, "width": 50.0, "height": 20.0 }
//!       }
//!     ]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::{ComputedStyle, Document, DocumentError, NodeId};
use crate::geometry::{Rect, Viewport};

/// A whole document fixture: viewport plus the body subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSpec {
    pub viewport: Viewport,
    pub body: NodeSpec,
}

/// One element in a fixture tree.
///
/// Everything except `tag` is optional; omitted fields take the same
/// defaults a bare element would have. Attributes come from a sorted map,
/// so the built document's serialized markup is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub style: ComputedStyle,
    #[serde(default, skip_serializing_if = "is_false")]
    pub open: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

/// Helper for serde skip_serializing_if.
fn is_false(b: &bool) -> bool {
    !*b
}

impl DocumentSpec {
    /// Build the described document.
    ///
    /// The `body` spec configures the document's own body node (its tag
    /// field is ignored, the body is always `body`); its children become
    /// the page content.
    pub fn build(&self) -> Result<Document, DocumentError> {
        let mut doc = Document::new(self.viewport);
        let body = doc.body();
        apply(&mut doc, body, &self.body)?;
        Ok(doc)
    }
}

fn apply(doc: &mut Document, id: NodeId, spec: &NodeSpec) -> Result<(), DocumentError> {
    for (name, value) in &spec.attrs {
        doc.set_attr(id, name, value)?;
    }
    if let Some(text) = &spec.text {
        doc.set_text(id, text)?;
    }
    doc.set_rect(id, spec.rect)?;
    doc.set_style(id, spec.style)?;
    doc.set_open(id, spec.open)?;
    for child_spec in &spec.children {
        let child = doc.create_element(&child_spec.tag);
        doc.append_child(id, child)?;
        apply(doc, child, child_spec)?;
    }
    Ok(())
}
