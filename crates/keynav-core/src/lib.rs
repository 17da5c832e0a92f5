//! Core types and logic for keynav.
//!
//! keynav paints single-keystroke navigation markers over the interactive
//! elements visible in a document's viewport and activates the element
//! whose key the user presses. This crate is the whole pipeline; hosts
//! (the `keynav` CLI, or an embedding UI) only load documents and forward
//! input events.
//!
//! # Modules
//!
//! - [`geometry`]: rectangles, viewport overlap, marker clamping
//! - [`dom`]: arena document model, the surface the pipeline consumes
//! - [`fixture`]: JSON document descriptions for hosts and tests
//! - [`scan`]: interactive element scanner
//! - [`visibility`]: structural display check and viewport tagging
//! - [`dedup`]: identity keys and duplicate-target collapsing
//! - [`keys`]: the fixed 38-entry key pool
//! - [`overlay`]: marker rendering and removal
//! - [`controller`]: session state machine and activation
//!
//! # A session, end to end
//!
//! ```
//! use keynav_core::controller::{Controller, Event, Outcome};
//! use keynav_core::dom::Document;
//! use keynav_core::geometry::{Rect, Viewport};
//!
//! let mut doc = Document::new(Viewport { width: 1024.0, height: 768.0 });
//! let body = doc.body();
//! let link = doc.create_element("a");
//! doc.set_attr(link, "href", "https://example.com/docs")?;
//! doc.set_rect(link, Rect::new(10.0, 10.0, 50.0, 20.0))?;
//! doc.append_child(body, link)?;
//!
//! let mut controller = Controller::new();
//! controller.show_navigation_helpers(&mut doc)?;
//!
//! let outcome = controller.handle_event(
//!     &mut doc,
//!     Event::Keypress { code: "digit1".to_string() },
//! )?;
//! assert_eq!(outcome, Outcome::Activated { element: link });
//! assert_eq!(doc.clicks(), &[link]);
//! # Ok::<(), keynav_core::dom::DocumentError>(())
//! ```

pub mod controller;
pub mod dedup;
pub mod dom;
pub mod fixture;
pub mod geometry;
pub mod keys;
pub mod overlay;
pub mod scan;
pub mod visibility;
