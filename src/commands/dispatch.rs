//! Command dispatch for sitepress

use sitepress_core::error::Result;

use crate::cli::{Cli, Commands};
use crate::commands::{self, Context};

pub fn run(cli: &Cli) -> Result<()> {
    let ctx = Context::from_cli(cli)?;

    match &cli.command {
        Commands::Scan => commands::scan::handle(&ctx),
        Commands::Analyze => commands::analyze::handle(&ctx),
        Commands::Summarize => commands::summarize::handle(&ctx),
        Commands::Keywords => commands::keywords::handle(&ctx),
        Commands::Enhance { backup_only } => commands::enhance::handle(&ctx, *backup_only),
        Commands::Restore => commands::enhance::handle_restore(&ctx),
        Commands::RefineTitles => commands::refine::handle(&ctx),
        Commands::Organize => commands::organize::handle(&ctx),
        Commands::Build => commands::build::handle(&ctx),
        Commands::Clean => commands::clean::handle(&ctx),
        Commands::Run {
            build_only,
            no_build,
        } => commands::run::handle(&ctx, *build_only, *no_build),
    }
}
