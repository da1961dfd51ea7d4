//! `sitepress keywords` - extract ranked keywords

use sitepress_core::artifacts::{self, ANALYSIS_FILE, KEYWORDS_FILE};
use sitepress_core::classify::AnalysisArtifact;
use sitepress_core::error::Result;
use sitepress_core::keywords;

use crate::commands::{finish_stage, Context};

pub fn handle(ctx: &Context) -> Result<()> {
    let analysis: AnalysisArtifact =
        artifacts::load_required(&ctx.artifacts_dir(), ANALYSIS_FILE, "analyze")?;

    let artifact = keywords::extract_corpus(&ctx.root, &analysis.documents, &ctx.table)?;
    artifacts::save(&ctx.artifacts_dir(), KEYWORDS_FILE, &artifact)?;

    ctx.report(&format!(
        "extracted keywords for {} documents ({} unique terms)",
        artifact.records.len(),
        artifact.unique_keywords.len()
    ));

    finish_stage(ctx, analysis.documents.len(), &artifact.failures)
}
