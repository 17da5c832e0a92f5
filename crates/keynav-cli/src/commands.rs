//! Subcommand implementations.
//!
//! Each command loads a document fixture, drives the core against it, and
//! prints structured results to stdout. The `session` command is the full
//! host stand-in: it forwards stdin events to the controller and reports
//! one JSON outcome line per event.

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use keynav_core::controller::{ArmSummary, Controller, Event, Outcome};
use keynav_core::dom::{Document, NodeId};
use keynav_core::fixture::DocumentSpec;
use keynav_core::geometry::{Rect, Viewport};
use keynav_core::keys::KEY_TABLE;
use keynav_core::overlay;
use keynav_core::scan::interactive_elements;
use keynav_core::visibility::is_element_displayed;

use crate::args::{OutputFormat, ScanArgs, SessionArgs, ShowArgs};
use crate::render;

/// Load and build a document fixture.
pub fn load_document(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read document fixture '{}'", path.display()))?;
    let spec: DocumentSpec = serde_json::from_str(&raw)
        .with_context(|| format!("'{}' is not a valid document fixture", path.display()))?;
    let doc = spec
        .build()
        .with_context(|| format!("'{}' could not be built into a document", path.display()))?;
    Ok(doc)
}

/// Element summary for command output.
#[derive(Debug, Serialize)]
struct ElementInfo {
    tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

fn element_info(doc: &Document, id: NodeId) -> Result<ElementInfo> {
    let node = doc.node(id)?;
    Ok(ElementInfo {
        tag: node.tag().to_string(),
        href: node.attr("href").map(str::to_string),
        text: node.text().map(str::to_string),
    })
}

#[derive(Debug, Serialize)]
struct ScanRow {
    #[serde(flatten)]
    element: ElementInfo,
    rect: Rect,
    displayed: bool,
}

/// `keynav scan`: list candidate interactive elements.
pub fn run_scan(args: &ScanArgs) -> Result<()> {
    let doc = load_document(&args.document)?;
    let mut rows = Vec::new();
    for id in interactive_elements(&doc, doc.root())? {
        let displayed = is_element_displayed(&doc, id)?;
        if !displayed && !args.hidden {
            continue;
        }
        rows.push(ScanRow {
            element: element_info(&doc, id)?,
            rect: doc.node(id)?.rect(),
            displayed,
        });
    }
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

#[derive(Debug, Serialize)]
struct BindingRow {
    label: char,
    code: String,
    element: ElementInfo,
    marker: Rect,
}

#[derive(Debug, Serialize)]
struct ShowReport {
    summary: ArmSummary,
    bindings: Vec<BindingRow>,
}

/// Bindings in key-table order, so output is deterministic.
fn binding_rows(doc: &Document, controller: &Controller) -> Result<Vec<BindingRow>> {
    let mut rows = Vec::new();
    for key in KEY_TABLE {
        if let Some(&element) = controller.bindings().get(key.code) {
            // By construction this is the box the marker was painted at.
            let marker = doc.node(element)?.rect().clamped_to_origin();
            rows.push(BindingRow {
                label: key.label,
                code: key.code.to_string(),
                element: element_info(doc, element)?,
                marker,
            });
        }
    }
    Ok(rows)
}

/// `keynav show`: arm one session and print the bindings.
pub fn run_show(args: &ShowArgs) -> Result<()> {
    let mut doc = load_document(&args.document)?;
    let mut controller = Controller::new();
    let summary = controller.show_navigation_helpers(&mut doc)?;

    match args.format {
        OutputFormat::Full => {
            let report = ShowReport {
                summary,
                bindings: binding_rows(&doc, &controller)?,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Compact => {
            for row in binding_rows(&doc, &controller)? {
                let target = row.element.href.as_deref().unwrap_or("-");
                let text = row.element.text.as_deref().unwrap_or("");
                println!(
                    "{} {:<13} {:<7} {} \"{}\"",
                    row.label, row.code, row.element.tag, target, text
                );
            }
            if summary.skipped > 0 {
                println!("({} elements left unbound: key pool exhausted)", summary.skipped);
            }
        }
        OutputFormat::Text => {
            print!("{}", render::preview(&doc, &controller)?);
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct MarkerRow {
    label: String,
    rect: Rect,
}

fn marker_rows(doc: &Document) -> Result<Vec<MarkerRow>> {
    let mut rows = Vec::new();
    for id in overlay::markers(doc) {
        let node = doc.node(id)?;
        rows.push(MarkerRow {
            label: node.attr("data-key").unwrap_or("").to_string(),
            rect: node.rect(),
        });
    }
    Ok(rows)
}

/// One JSON line per replayed event.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Reply {
    Armed {
        summary: ArmSummary,
        bindings: Vec<BindingRow>,
    },
    Event {
        #[serde(flatten)]
        outcome: Outcome,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<ElementInfo>,
    },
    Markers {
        markers: Vec<MarkerRow>,
    },
    Error {
        message: String,
    },
}

enum Step {
    Reply(Reply),
    Skip,
    Quit,
}

fn deliver(doc: &mut Document, controller: &mut Controller, event: Event) -> Result<Step> {
    let outcome = controller.handle_event(doc, event)?;
    let target = match outcome {
        Outcome::Activated { element } => Some(element_info(doc, element)?),
        _ => None,
    };
    Ok(Step::Reply(Reply::Event { outcome, target }))
}

fn apply_line(doc: &mut Document, controller: &mut Controller, line: &str) -> Result<Step> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(Step::Skip);
    };
    let step = match command {
        "show" => {
            let summary = controller.show_navigation_helpers(doc)?;
            Step::Reply(Reply::Armed {
                summary,
                bindings: binding_rows(doc, controller)?,
            })
        }
        "key" => match parts.next() {
            Some(code) => {
                return deliver(
                    doc,
                    controller,
                    Event::Keypress {
                        code: code.to_string(),
                    },
                );
            }
            None => Step::Reply(Reply::Error {
                message: "usage: key <code>".to_string(),
            }),
        },
        "scroll" => return deliver(doc, controller, Event::Scroll),
        "click" => return deliver(doc, controller, Event::Click),
        "resize" => {
            let dims: Option<(f64, f64)> = match (parts.next(), parts.next()) {
                (Some(w), Some(h)) => w.parse().ok().zip(h.parse().ok()),
                _ => None,
            };
            match dims {
                Some((width, height)) => {
                    doc.set_viewport(Viewport { width, height });
                    return deliver(doc, controller, Event::Resize);
                }
                None => Step::Reply(Reply::Error {
                    message: "usage: resize <width> <height>".to_string(),
                }),
            }
        }
        "markers" => Step::Reply(Reply::Markers {
            markers: marker_rows(doc)?,
        }),
        "quit" | "exit" => Step::Quit,
        other => Step::Reply(Reply::Error {
            message: format!("unknown command '{other}'"),
        }),
    };
    Ok(step)
}

/// `keynav session`: replay host events from stdin.
pub fn run_session(args: &SessionArgs) -> Result<()> {
    let mut doc = load_document(&args.document)?;
    let mut controller = Controller::new();

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read event from stdin")?;
        match apply_line(&mut doc, &mut controller, line.trim())? {
            Step::Reply(reply) => println!("{}", serde_json::to_string(&reply)?),
            Step::Skip => {}
            Step::Quit => break,
        }
    }
    Ok(())
}
