//! `sitepress scan` - list the files the pipeline would process

use sitepress_core::error::Result;
use sitepress_core::scan;

use crate::commands::Context;

pub fn handle(ctx: &Context) -> Result<()> {
    let files = scan::scan_corpus(&ctx.root, &ctx.config)?;
    for file in &files {
        println!("{}", file.rel_path);
    }
    ctx.report(&format!("found {} markdown files", files.len()));
    Ok(())
}
