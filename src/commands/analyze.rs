//! `sitepress analyze` - classify the corpus and write the analysis artifact

use sitepress_core::artifacts::{self, ANALYSIS_FILE};
use sitepress_core::classify::{self, Classifier};
use sitepress_core::error::Result;
use sitepress_core::scan;

use crate::commands::{finish_stage, Context};

pub fn handle(ctx: &Context) -> Result<()> {
    let files = scan::scan_corpus(&ctx.root, &ctx.config)?;
    ctx.report(&format!("found {} markdown files", files.len()));

    let classifier = Classifier::new(&ctx.table, ctx.config.default_category);
    let artifact = classify::analyze_corpus(&files, &classifier)?;

    artifacts::save(&ctx.artifacts_dir(), ANALYSIS_FILE, &artifact)?;

    let stats = &artifact.statistics;
    ctx.report(&format!(
        "analyzed {} documents (avg {} words, {} with diagrams)",
        stats.total_documents, stats.average_word_count, stats.documents_with_mermaid
    ));
    for (category, count) in &stats.category_counts {
        ctx.report(&format!("  {}: {}", category, count));
    }

    finish_stage(ctx, files.len(), &artifact.failures)
}
