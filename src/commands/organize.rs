//! `sitepress organize` - assemble the per-category content tree

use sitepress_core::artifacts::{self, ENHANCED_FILE};
use sitepress_core::enhance::EnhanceArtifact;
use sitepress_core::error::Result;
use sitepress_core::organize;

use crate::commands::{finish_stage, Context};

pub fn handle(ctx: &Context) -> Result<()> {
    let enhanced: EnhanceArtifact =
        artifacts::load_required(&ctx.artifacts_dir(), ENHANCED_FILE, "enhance")?;

    let content_dir = ctx.config.content_dir(&ctx.root);
    let artifact = organize::organize_corpus(&ctx.root, &enhanced.processed, &ctx.table, &content_dir)?;

    ctx.report(&format!(
        "copied {} documents into {}",
        artifact.copied.len(),
        content_dir.display()
    ));
    for (category, count) in &artifact.category_counts {
        ctx.report(&format!("  {}: {}", category, count));
    }

    finish_stage(ctx, enhanced.processed.len(), &artifact.failures)
}
