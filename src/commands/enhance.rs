//! `sitepress enhance` / `sitepress restore` - front-matter injection and
//! its reversal

use chrono::Local;

use sitepress_core::artifacts::{
    self, ANALYSIS_FILE, ENHANCED_FILE, KEYWORDS_FILE, SUMMARIES_FILE,
};
use sitepress_core::classify::AnalysisArtifact;
use sitepress_core::enhance;
use sitepress_core::error::Result;
use sitepress_core::keywords::KeywordsArtifact;
use sitepress_core::summary::SummariesArtifact;

use crate::commands::{finish_stage, Context};

pub fn handle(ctx: &Context, backup_only: bool) -> Result<()> {
    let dir = ctx.artifacts_dir();
    let analysis: AnalysisArtifact = artifacts::load_required(&dir, ANALYSIS_FILE, "analyze")?;

    if backup_only {
        let backup_dir = ctx.config.backup_dir(&ctx.root);
        let backed_up = enhance::backup_corpus(&ctx.root, &analysis.documents, &backup_dir)?;
        ctx.report(&format!(
            "backed up {} documents to {}",
            backed_up,
            backup_dir.display()
        ));
        return Ok(());
    }

    // fail fast on missing upstream artifacts before touching any file
    let summaries: SummariesArtifact =
        artifacts::load_required(&dir, SUMMARIES_FILE, "summarize")?;
    let keywords: KeywordsArtifact = artifacts::load_required(&dir, KEYWORDS_FILE, "keywords")?;

    let backup_dir = ctx.config.backup_dir(&ctx.root);
    let backed_up = enhance::backup_corpus(&ctx.root, &analysis.documents, &backup_dir)?;
    ctx.report(&format!(
        "backed up {} documents to {}",
        backed_up,
        backup_dir.display()
    ));

    let date = Local::now().format("%Y-%m-%d").to_string();
    let artifact = enhance::enhance_corpus(
        &ctx.root,
        &analysis.documents,
        &summaries.summaries,
        &keywords.records,
        &ctx.table,
        &date,
    )?;
    artifacts::save(&dir, ENHANCED_FILE, &artifact)?;

    ctx.report(&format!(
        "enhanced {} of {} documents",
        artifact.successful,
        artifact.processed.len()
    ));

    finish_stage(ctx, artifact.processed.len(), &artifact.failures)
}

pub fn handle_restore(ctx: &Context) -> Result<()> {
    let analysis: AnalysisArtifact =
        artifacts::load_required(&ctx.artifacts_dir(), ANALYSIS_FILE, "analyze")?;

    let backup_dir = ctx.config.backup_dir(&ctx.root);
    let restored = enhance::restore_corpus(&ctx.root, &analysis.documents, &backup_dir)?;
    ctx.report(&format!("restored {} documents from backup", restored));
    Ok(())
}
