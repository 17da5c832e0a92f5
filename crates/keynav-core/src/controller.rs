//! Activation controller: the session state machine.
//!
//! A controller owns everything a marker session is: the binding table
//! from physical key codes to elements, and the `Idle`/`Armed` phase. The
//! host triggers [`Controller::show_navigation_helpers`] to arm a session
//! and forwards its input events to [`Controller::handle_event`]; every
//! event delivered while armed consumes the session, which is how the
//! source's one-shot listeners are expressed here. No event handling
//! exists while idle, so a stray keypress with no session is a no-op.
//!
//! # Pipeline
//!
//! | Stage | Module | Effect |
//! |-------|--------|--------|
//! | Reset | [`crate::overlay`] | tear down any prior session |
//! | Scan | [`crate::scan`] | candidates in document order |
//! | Display filter | [`crate::visibility`] | drop style/layout-hidden elements |
//! | Dedup | [`crate::dedup`] | one representative per logical target |
//! | Viewport tag + keys | [`crate::keys`] | label visible elements |
//! | Render | [`crate::overlay`] | paint markers, record bindings |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dedup::unique_elements;
use crate::dom::{Document, DocumentError, NodeId};
use crate::keys::KeyPool;
use crate::overlay::{create_marker, remove_markers};
use crate::scan::interactive_elements;
use crate::visibility::{element_visibility, is_element_displayed};

/// Session phase. At most one session exists per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No session: no markers, no bindings, no event handling.
    #[default]
    Idle,
    /// Markers painted and bindings populated; the next event ends the
    /// session.
    Armed,
}

/// A host input event forwarded to an armed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A single keypress, carrying the physical key code.
    Keypress { code: String },
    Scroll,
    Resize,
    Click,
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The keypress matched a binding: the element was focused and
    /// activated, and the session was torn down.
    Activated { element: NodeId },
    /// The session was torn down without activating anything.
    Dismissed,
    /// No session was armed; nothing happened.
    Ignored,
}

/// Result of arming a session, for host diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArmSummary {
    /// Elements that received a marker and a binding.
    pub bound: usize,
    /// Visible elements left unlabeled because the key pool ran out.
    pub skipped: usize,
}

/// Owns the binding table and session lifecycle.
///
/// Session state lives only here; tests construct isolated controllers
/// and documents.
#[derive(Debug, Default)]
pub struct Controller {
    phase: SessionPhase,
    bindings: HashMap<String, NodeId>,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The active binding table: lowercase physical key code → element.
    #[must_use]
    pub fn bindings(&self) -> &HashMap<String, NodeId> {
        &self.bindings
    }

    /// Tear the current session down: remove every marker, clear the
    /// binding table, return to idle.
    pub fn reset(&mut self, doc: &mut Document) -> Result<(), DocumentError> {
        remove_markers(doc)?;
        self.bindings.clear();
        self.phase = SessionPhase::Idle;
        Ok(())
    }

    /// The entry point: (re)build the overlay for the document's current
    /// state and arm a session.
    ///
    /// Any prior session is torn down unconditionally first, so invoking
    /// twice in a row leaves exactly the second invocation's markers.
    /// More bindable elements than pool keys is not an error: the excess
    /// stays unlabeled and is counted in the summary.
    pub fn show_navigation_helpers(
        &mut self,
        doc: &mut Document,
    ) -> Result<ArmSummary, DocumentError> {
        self.reset(doc)?;

        let candidates = interactive_elements(doc, doc.root())?;
        let mut displayed = Vec::with_capacity(candidates.len());
        for id in candidates {
            if is_element_displayed(doc, id)? {
                displayed.push(id);
            }
        }
        let unique = unique_elements(doc, &displayed)?;

        let area = doc.viewport_rect();
        let mut pool = KeyPool::new();
        let mut summary = ArmSummary {
            bound: 0,
            skipped: 0,
        };
        for id in unique {
            let bindable = element_visibility(doc, id, &area)?;
            if !bindable.is_visible {
                continue;
            }
            let Some(key) = pool.next_key() else {
                debug!(element = %id, "key pool exhausted, element left unbound");
                summary.skipped += 1;
                continue;
            };
            create_marker(doc, id, key.label)?;
            self.bindings.insert(key.code.to_string(), id);
            summary.bound += 1;
        }

        self.phase = SessionPhase::Armed;
        info!(
            bound = summary.bound,
            skipped = summary.skipped,
            "navigation markers armed"
        );
        Ok(summary)
    }

    /// Deliver a host event.
    ///
    /// While armed, every event ends the session: a keypress activates its
    /// bound element first (focus, then default activation) if the code
    /// matches, and scroll/resize/click just cancel. While idle, events
    /// are ignored.
    pub fn handle_event(
        &mut self,
        doc: &mut Document,
        event: Event,
    ) -> Result<Outcome, DocumentError> {
        if self.phase == SessionPhase::Idle {
            return Ok(Outcome::Ignored);
        }
        match event {
            Event::Keypress { code } => {
                let code = code.to_ascii_lowercase();
                let target = self.bindings.get(&code).copied();
                let outcome = match target {
                    Some(element) => {
                        doc.focus(element)?;
                        doc.click(element)?;
                        debug!(%element, code = %code, "activated bound element");
                        Outcome::Activated { element }
                    }
                    None => {
                        debug!(code = %code, "keypress matched no binding");
                        Outcome::Dismissed
                    }
                };
                self.reset(doc)?;
                Ok(outcome)
            }
            Event::Scroll | Event::Resize | Event::Click => {
                self.reset(doc)?;
                Ok(Outcome::Dismissed)
            }
        }
    }
}
