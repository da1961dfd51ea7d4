//! Sitepress - documentation-site content pipeline
//!
//! Scans a repository for markdown documents, classifies them into topical
//! categories, synthesizes titles, summaries, and keywords, injects YAML
//! front matter, and assembles a static-site content tree.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use sitepress_core::error::ExitCode as SitepressExitCode;
use sitepress_core::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    match commands::dispatch::run(&cli) {
        Ok(()) => ExitCode::from(SitepressExitCode::Success as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
