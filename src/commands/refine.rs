//! `sitepress refine-titles` - rewrite generic titles in place

use sitepress_core::artifacts::{self, ANALYSIS_FILE, ENHANCED_FILE, TITLES_FILE};
use sitepress_core::classify::AnalysisArtifact;
use sitepress_core::enhance::EnhanceArtifact;
use sitepress_core::error::Result;
use sitepress_core::titles;

use crate::commands::{finish_stage, Context};

pub fn handle(ctx: &Context) -> Result<()> {
    let dir = ctx.artifacts_dir();
    let analysis: AnalysisArtifact = artifacts::load_required(&dir, ANALYSIS_FILE, "analyze")?;
    // require the injection pass to have run; refined titles are patched
    // into the injected blocks
    let _enhanced: EnhanceArtifact = artifacts::load_required(&dir, ENHANCED_FILE, "enhance")?;

    let artifact = titles::refine_all(&ctx.root, &analysis.documents)?;
    artifacts::save(&dir, TITLES_FILE, &artifact)?;

    ctx.report(&format!(
        "refined {} titles, {} unchanged",
        artifact.refined, artifact.unchanged
    ));
    for record in artifact.records.iter().filter(|r| r.refined) {
        ctx.report(&format!(
            "  {}: \"{}\" -> \"{}\"",
            record.path, record.original_title, record.title
        ));
    }

    finish_stage(ctx, analysis.documents.len(), &artifact.failures)
}
