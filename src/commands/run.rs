//! `sitepress run` - the full pipeline in dependency order

use sitepress_core::error::{Result, SitepressError};

use crate::commands::{self, Context};

/// Run one stage, absorbing per-document failures so later stages still
/// execute; anything else aborts the run
fn stage(
    label: &str,
    ctx: &Context,
    failed: &mut usize,
    total: &mut usize,
    f: impl FnOnce(&Context) -> Result<()>,
) -> Result<()> {
    ctx.report(&format!("==> {}", label));
    match f(ctx) {
        Ok(()) => Ok(()),
        Err(SitepressError::DocumentFailures { failed: n, total: t }) => {
            *failed += n;
            *total += t;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub fn handle(ctx: &Context, build_only: bool, no_build: bool) -> Result<()> {
    let mut failed = 0;
    let mut total = 0;

    if !build_only {
        stage("analyze", ctx, &mut failed, &mut total, commands::analyze::handle)?;
        stage("summarize", ctx, &mut failed, &mut total, commands::summarize::handle)?;
        stage("keywords", ctx, &mut failed, &mut total, commands::keywords::handle)?;
        stage("enhance", ctx, &mut failed, &mut total, |c| {
            commands::enhance::handle(c, false)
        })?;
        stage("refine-titles", ctx, &mut failed, &mut total, commands::refine::handle)?;
        stage("organize", ctx, &mut failed, &mut total, commands::organize::handle)?;
    }

    if !no_build {
        ctx.report("==> build");
        commands::build::handle(ctx)?;
    }

    if failed > 0 {
        return Err(SitepressError::DocumentFailures { failed, total });
    }
    ctx.report("pipeline complete");
    Ok(())
}
