//! CLI argument parsing for sitepress
//!
//! Uses clap for argument parsing. Global flags: --root, --config,
//! --quiet, --verbose, --log-level, --log-json.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sitepress - documentation-site content pipeline
#[derive(Parser, Debug)]
#[command(name = "sitepress")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Corpus root directory (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit config file path (defaults to sitepress.toml under the root)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the markdown files the pipeline would process
    Scan,

    /// Classify the corpus: titles, categories, themes, content flags
    Analyze,

    /// Generate document summaries from the analysis artifact
    Summarize,

    /// Extract ranked keywords from the analysis artifact
    Keywords,

    /// Inject YAML front matter into the corpus (backs up originals first)
    Enhance {
        /// Only back up the originals; do not rewrite any document
        #[arg(long)]
        backup_only: bool,
    },

    /// Restore every backed-up document to its pre-injection state
    Restore,

    /// Rewrite generic titles in already-injected documents
    RefineTitles,

    /// Copy enhanced documents into the per-category content tree
    Organize,

    /// Invoke the site generator against the content tree
    Build,

    /// Remove generated site output, content directories, and artifacts
    Clean,

    /// Execute the full pipeline in dependency order
    Run {
        /// Skip content processing and only build the site
        #[arg(long)]
        build_only: bool,

        /// Process content but skip the site build
        #[arg(long, conflicts_with = "build_only")]
        no_build: bool,
    },
}
