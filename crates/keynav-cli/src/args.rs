//! CLI argument parsing with clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Keyboard navigation markers for document fixtures.
///
/// Load a document described as JSON, paint single-keystroke navigation
/// markers over the interactive elements visible in its viewport, and
/// replay the host events that drive a marker session. Stands in for a
/// live host so overlay behavior can be inspected from a terminal.
#[derive(Debug, Parser)]
#[command(name = "keynav", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List candidate interactive elements in a document fixture
    #[command(after_help = "\
Examples:
  keynav scan page.json                 # Displayed candidates as JSON
  keynav scan --hidden page.json        # Include style-hidden candidates")]
    Scan(ScanArgs),

    /// Paint navigation markers and print the session bindings
    #[command(after_help = "\
Examples:
  keynav show page.json                 # Bindings + summary as JSON
  keynav show --format compact page.json  # One line per binding
  keynav show --format text page.json   # Character-grid viewport preview")]
    Show(ShowArgs),

    /// Replay host events against a marker session interactively
    #[command(after_long_help = "\
Reads one event per line from stdin and prints one JSON outcome line per
event. Commands:

  show              Arm (or re-arm) the overlay session
  key <code>        Press a key by physical code (digit1, keyq, minus, ...)
  scroll            Scroll the page (cancels the session)
  resize <w> <h>    Resize the viewport (cancels the session)
  click             Click outside any marker (cancels the session)
  markers           List the markers currently painted
  quit              Exit

Examples:
  printf 'show\\nkey digit1\\n' | keynav session page.json
  keynav session page.json              # Drive it by hand")]
    Session(SessionArgs),

    /// Show an end-to-end usage example
    Examples,
}

#[derive(Debug, clap::Args)]
pub struct ScanArgs {
    /// Path to the document fixture (JSON)
    pub document: PathBuf,

    /// Include candidates hidden by style/layout
    #[arg(long)]
    pub hidden: bool,
}

#[derive(Debug, clap::Args)]
pub struct ShowArgs {
    /// Path to the document fixture (JSON)
    pub document: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Full)]
    pub format: OutputFormat,
}

#[derive(Debug, clap::Args)]
pub struct SessionArgs {
    /// Path to the document fixture (JSON)
    pub document: PathBuf,
}

/// Output format for `keynav show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full JSON with bindings and summary
    Full,
    /// One line per binding
    Compact,
    /// Character-grid preview of the viewport
    Text,
}

pub const EXAMPLES_TEXT: &str = "\
keynav end-to-end example
=========================

1. Describe a page as a fixture (page.json):

   {
     \"viewport\": { \"width\": 1024.0, \"height\": 768.0 },
     \"body\": {
       \"tag\": \"body\",
       \"children\": [
         { \"tag\": \"a\", \"attrs\": { \"href\": \"https://example.com/docs\" },
           \"text\": \"Docs\",
           \"rect\": { \"x\": 10.0, \"y\": 10.0, \"width\": 50.0, \"height\": 20.0 } },
         { \"tag\": \"button\", \"text\": \"Sign in\",
           \"rect\": { \"x\": 10.0, \"y\": 40.0, \"width\": 80.0, \"height\": 24.0 } }
       ]
     }
   }

2. See what the scanner finds:

   keynav scan page.json

3. Paint markers and inspect the bindings:

   keynav show page.json
   keynav show --format text page.json

4. Replay a whole session: arm, then press the first marker's key:

   printf 'show\\nkey digit1\\n' | keynav session page.json

   The activation outcome reports which element was focused and clicked.
";
