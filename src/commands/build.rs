//! `sitepress build` - invoke the site generator

use sitepress_core::build;
use sitepress_core::error::Result;

use crate::commands::Context;

pub fn handle(ctx: &Context) -> Result<()> {
    let site_dir = ctx.config.site_dir(&ctx.root);
    build::run_generator(&site_dir, &ctx.config.generator_bin, &ctx.config.generator_args)?;

    let content_dir = ctx.config.content_dir(&ctx.root);
    let counts = build::content_stats(&content_dir, &ctx.table)?;
    let total: usize = counts.values().sum();
    ctx.report(&format!("site built: {} published documents", total));
    for (category, count) in &counts {
        ctx.report(&format!("  {}: {}", category, count));
    }
    Ok(())
}
