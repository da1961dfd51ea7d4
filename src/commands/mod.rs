//! Command handlers for the sitepress CLI

pub mod analyze;
pub mod build;
pub mod clean;
pub mod dispatch;
pub mod enhance;
pub mod keywords;
pub mod organize;
pub mod refine;
pub mod run;
pub mod scan;
pub mod summarize;

use std::env;
use std::path::PathBuf;

use sitepress_core::artifacts::StageFailure;
use sitepress_core::category::CategoryTable;
use sitepress_core::config::PipelineConfig;
use sitepress_core::error::{Result, SitepressError};

use crate::cli::Cli;

/// Shared state every handler needs
pub struct Context {
    pub root: PathBuf,
    pub config: PipelineConfig,
    pub table: CategoryTable,
    pub quiet: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let config = PipelineConfig::discover(&root, cli.config.as_deref())?;
        Ok(Context {
            root,
            config,
            table: CategoryTable::builtin(),
            quiet: cli.quiet,
        })
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.config.artifacts_dir(&self.root)
    }

    /// Print a stage report line unless --quiet
    pub fn report(&self, line: &str) {
        if !self.quiet {
            println!("{}", line);
        }
    }
}

/// Print failed paths and turn a non-empty failure list into the stage's
/// exit error
pub fn finish_stage(ctx: &Context, total: usize, failures: &[StageFailure]) -> Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    ctx.report("failed documents:");
    for failure in failures {
        ctx.report(&format!("  {}: {}", failure.path, failure.error));
    }
    Err(SitepressError::DocumentFailures {
        failed: failures.len(),
        total,
    })
}
