//! `sitepress clean` - reset generated output for a fresh run

use sitepress_core::clean;
use sitepress_core::error::Result;

use crate::commands::Context;

pub fn handle(ctx: &Context) -> Result<()> {
    let removed = clean::clean_outputs(&ctx.root, &ctx.config, &ctx.table)?;
    for path in &removed {
        ctx.report(&format!("removed {}", path.display()));
    }
    ctx.report(&format!("cleaned {} generated paths", removed.len()));
    Ok(())
}
