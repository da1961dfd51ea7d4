//! `sitepress summarize` - generate document summaries

use sitepress_core::artifacts::{self, ANALYSIS_FILE, SUMMARIES_FILE};
use sitepress_core::classify::AnalysisArtifact;
use sitepress_core::error::Result;
use sitepress_core::summary;

use crate::commands::{finish_stage, Context};

pub fn handle(ctx: &Context) -> Result<()> {
    let analysis: AnalysisArtifact =
        artifacts::load_required(&ctx.artifacts_dir(), ANALYSIS_FILE, "analyze")?;

    let artifact = summary::summarize_corpus(&ctx.root, &analysis.documents, &ctx.table)?;
    artifacts::save(&ctx.artifacts_dir(), SUMMARIES_FILE, &artifact)?;

    ctx.report(&format!(
        "summarized {} documents (avg {} words, {} fell back)",
        artifact.summaries.len(),
        artifact.average_word_count,
        artifact.failures.len()
    ));

    finish_stage(ctx, analysis.documents.len(), &artifact.failures)
}
