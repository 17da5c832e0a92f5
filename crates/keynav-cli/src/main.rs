//! keynav CLI entry point.

mod args;
mod commands;
mod render;

use clap::Parser;
use tracing::error;

use crate::args::{Cli, Commands};

fn main() {
    // Initialize tracing. Logs go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Scan(args) => commands::run_scan(&args),
        Commands::Show(args) => commands::run_show(&args),
        Commands::Session(args) => commands::run_session(&args),
        Commands::Examples => {
            println!("{}", args::EXAMPLES_TEXT);
            Ok(())
        }
    }
}
