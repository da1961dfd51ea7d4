//! Front-matter injection
//!
//! Merges the analysis, summary, and keyword records into a fixed-order
//! YAML block and rewrites each document in place. Originals are backed up
//! to a flat directory first, keyed by a path-to-filename transform, so a
//! run can be fully reversed. Per-document failures are recorded and the
//! run continues; this is the one stage with real partial-failure
//! semantics.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifacts::StageFailure;
use crate::category::CategoryTable;
use crate::classify::DocumentAnalysis;
use crate::error::{Result, SitepressError};
use crate::frontmatter::{self, FrontMatter};
use crate::keywords::KeywordRecord;
use crate::summary::SummaryRecord;

/// Per-document injection record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceRecord {
    pub path: String,
    pub title: String,
    pub success: bool,
    pub front_matter_len: usize,
    pub original_len: usize,
    pub enhanced_len: usize,
}

/// Output of the enhance stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceArtifact {
    pub processed: Vec<EnhanceRecord>,
    pub successful: usize,
    pub failed: usize,
    pub failures: Vec<StageFailure>,
}

/// Flat backup filename for a repository-relative path
pub fn backup_name(rel_path: &str) -> String {
    rel_path.replace(['/', '\\'], "_")
}

/// Copy every document's pre-injection bytes into the backup directory.
/// Individual copy failures are logged and skipped.
pub fn backup_corpus(root: &Path, documents: &[DocumentAnalysis], backup_dir: &Path) -> Result<usize> {
    fs::create_dir_all(backup_dir)?;

    let mut backed_up = 0;
    for doc in documents {
        let source = root.join(&doc.path);
        if !source.is_file() {
            continue;
        }
        let target = backup_dir.join(backup_name(&doc.path));
        match fs::copy(&source, &target) {
            Ok(_) => backed_up += 1,
            Err(e) => {
                tracing::warn!(path = %doc.path, error = %e, "backup failed");
            }
        }
    }

    tracing::debug!(count = backed_up, dir = %backup_dir.display(), "backup complete");
    Ok(backed_up)
}

/// Restore every backed-up document to its pre-injection bytes
pub fn restore_corpus(root: &Path, documents: &[DocumentAnalysis], backup_dir: &Path) -> Result<usize> {
    if !backup_dir.is_dir() {
        return Err(SitepressError::Other(format!(
            "no backup directory at {}",
            backup_dir.display()
        )));
    }

    let mut restored = 0;
    for doc in documents {
        let backup = backup_dir.join(backup_name(&doc.path));
        if !backup.is_file() {
            continue;
        }
        match fs::copy(&backup, root.join(&doc.path)) {
            Ok(_) => restored += 1,
            Err(e) => {
                tracing::warn!(path = %doc.path, error = %e, "restore failed");
            }
        }
    }

    Ok(restored)
}

/// Build the front-matter block for one document
fn build_front_matter(
    doc: &DocumentAnalysis,
    summary: Option<&SummaryRecord>,
    keywords: Option<&KeywordRecord>,
    table: &CategoryTable,
    date: &str,
) -> FrontMatter {
    FrontMatter {
        title: doc.title.clone(),
        summary: summary
            .map(|s| s.summary.clone())
            .unwrap_or_else(|| "No summary available.".to_string()),
        keywords: keywords.map(|k| k.keywords.clone()).unwrap_or_default(),
        category: doc.category,
        category_name: table.name_of(doc.category).to_string(),
        weight: table.weight_of(doc.category),
        date: date.to_string(),
        draft: false,
        toc: doc.has_headings,
        mermaid: doc.has_mermaid,
    }
}

fn enhance_document(
    root: &Path,
    doc: &DocumentAnalysis,
    summary: Option<&SummaryRecord>,
    keywords: Option<&KeywordRecord>,
    table: &CategoryTable,
    date: &str,
) -> Result<EnhanceRecord> {
    let path = root.join(&doc.path);
    let original = fs::read_to_string(&path)?;

    // strip any existing block so re-runs never accumulate front matter
    let body = frontmatter::strip_block(&original);
    let block = build_front_matter(doc, summary, keywords, table, date).render();
    let enhanced = format!("{}{}", block, body);

    fs::write(&path, &enhanced)?;

    Ok(EnhanceRecord {
        path: doc.path.clone(),
        title: doc.title.clone(),
        success: true,
        front_matter_len: block.len(),
        original_len: original.len(),
        enhanced_len: enhanced.len(),
    })
}

/// Inject front matter across the corpus
#[tracing::instrument(skip_all, fields(documents = documents.len()))]
pub fn enhance_corpus(
    root: &Path,
    documents: &[DocumentAnalysis],
    summaries: &[SummaryRecord],
    keywords: &[KeywordRecord],
    table: &CategoryTable,
    date: &str,
) -> Result<EnhanceArtifact> {
    let summary_map: HashMap<&str, &SummaryRecord> =
        summaries.iter().map(|s| (s.path.as_str(), s)).collect();
    let keyword_map: HashMap<&str, &KeywordRecord> =
        keywords.iter().map(|k| (k.path.as_str(), k)).collect();

    let mut processed = Vec::with_capacity(documents.len());
    let mut failures = Vec::new();

    for doc in documents {
        match enhance_document(
            root,
            doc,
            summary_map.get(doc.path.as_str()).copied(),
            keyword_map.get(doc.path.as_str()).copied(),
            table,
            date,
        ) {
            Ok(record) => processed.push(record),
            Err(e) => {
                tracing::warn!(path = %doc.path, error = %e, "enhancement failed");
                failures.push(StageFailure {
                    path: doc.path.clone(),
                    error: e.to_string(),
                });
                processed.push(EnhanceRecord {
                    path: doc.path.clone(),
                    title: doc.title.clone(),
                    success: false,
                    front_matter_len: 0,
                    original_len: 0,
                    enhanced_len: 0,
                });
            }
        }
    }

    let successful = processed.iter().filter(|r| r.success).count();
    let failed = processed.len() - successful;
    Ok(EnhanceArtifact {
        processed,
        successful,
        failed,
        failures,
    })
}
