//! Document classification: title extraction, category scoring, themes
//!
//! Title extraction is a strictly ordered fallback chain; each step is a
//! pure `-> Option<String>` heuristic so the order stays explicit and each
//! step is independently testable.

use std::collections::BTreeMap;
use std::fs;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::artifacts::StageFailure;
use crate::category::{CategorySlug, CategoryTable};
use crate::error::Result;
use crate::frontmatter;
use crate::scan::ScannedFile;
use crate::text;
use crate::titles::is_generic_term;

/// Per-document classification record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub path: String,
    pub filename: String,
    pub title: String,
    pub category: CategorySlug,
    pub themes: Vec<String>,
    pub content_length: usize,
    pub has_headings: bool,
    pub has_mermaid: bool,
    pub has_code_blocks: bool,
    pub word_count: usize,
}

/// Corpus-level statistics for the stage report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_documents: usize,
    pub category_counts: BTreeMap<CategorySlug, usize>,
    pub average_word_count: usize,
    pub documents_with_mermaid: usize,
    pub documents_with_headings: usize,
}

/// Output of the analyze stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisArtifact {
    pub documents: Vec<DocumentAnalysis>,
    pub statistics: CorpusStats,
    pub failures: Vec<StageFailure>,
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^(#+)\s+(.+)$").expect("valid regex"))
}

/// A heading is usable as a title unless it is short, generic,
/// numeric-prefixed, or looks like a file path
fn is_usable_title(text: &str) -> bool {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    let numeric = NUMERIC.get_or_init(|| Regex::new(r"^\d+\.").expect("valid regex"));

    text.chars().count() >= 4
        && !is_generic_term(text)
        && !numeric.is_match(text)
        && !text.contains('/')
        && !text.contains(".yaml")
        && !text.contains(".yml")
        && !text.contains(".json")
        && !text.contains(".md")
}

/// Chain step 1: the first level-one heading, if usable
fn first_h1_title(body: &str) -> Option<String> {
    heading_re()
        .captures_iter(body)
        .find(|c| c[1].len() == 1)
        .map(|c| text::clean_inline_markup(c[2].trim()).trim().to_string())
        .filter(|t| is_usable_title(t))
}

/// Chain step 2: the first usable heading after the document's first one
fn later_heading_title(body: &str) -> Option<String> {
    heading_re()
        .captures_iter(body)
        .skip(1)
        .map(|c| text::clean_inline_markup(c[2].trim()).trim().to_string())
        .find(|t| is_usable_title(t))
}

/// Chain step 4: title-cased filename
fn filename_title(filename: &str) -> String {
    text::title_case(filename.trim_end_matches(".md"))
}

/// Extract a document title via the ordered fallback chain: first H1,
/// later headings, existing front-matter title, filename
pub fn extract_title(content: &str, filename: &str) -> String {
    let body = frontmatter::strip_block(content);
    first_h1_title(body)
        .or_else(|| later_heading_title(body))
        .or_else(|| frontmatter::block_title(content))
        .unwrap_or_else(|| filename_title(filename))
}

/// Precompiled keyword matchers for category scoring
#[derive(Debug)]
pub struct Classifier {
    matchers: Vec<CategoryMatcher>,
    default_category: CategorySlug,
}

#[derive(Debug)]
struct CategoryMatcher {
    slug: CategorySlug,
    content_patterns: Vec<Regex>,
    path_needles: Vec<String>,
}

impl Classifier {
    pub fn new(table: &CategoryTable, default_category: CategorySlug) -> Self {
        let matchers = table
            .scored()
            .map(|spec| CategoryMatcher {
                slug: spec.slug,
                content_patterns: spec
                    .keywords
                    .iter()
                    .map(|kw| {
                        // keywords are [a-z0-9-]; hyphens match `-`, `_`, or nothing
                        let pattern = kw.replace('-', "[-_]?");
                        Regex::new(&format!(r"(?i)\b{}", pattern)).expect("valid keyword pattern")
                    })
                    .collect(),
                path_needles: spec.keywords.iter().map(|kw| kw.replace('-', "")).collect(),
            })
            .collect();
        Classifier {
            matchers,
            default_category,
        }
    }

    /// Score content and path against every category; ties and all-zero
    /// scores resolve to the configured default
    pub fn assign_category(&self, content: &str, rel_path: &str) -> CategorySlug {
        let path_lower = rel_path.to_lowercase();

        let scores: Vec<(CategorySlug, usize)> = self
            .matchers
            .iter()
            .map(|m| {
                let content_hits: usize = m
                    .content_patterns
                    .iter()
                    .map(|re| re.find_iter(content).count())
                    .sum();
                let path_hits = m
                    .path_needles
                    .iter()
                    .filter(|needle| path_lower.contains(needle.as_str()))
                    .count();
                (m.slug, content_hits * 2 + path_hits)
            })
            .collect();

        let best = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
        if best == 0 {
            return self.default_category;
        }
        let mut at_best = scores.iter().filter(|(_, s)| *s == best);
        let winner = at_best.next().map(|(slug, _)| *slug);
        match (winner, at_best.next()) {
            (Some(slug), None) => slug,
            _ => self.default_category,
        }
    }
}

/// Headings of level 1-3 plus the first prose paragraph
pub fn extract_themes(content: &str) -> Vec<String> {
    static THEME_RE: OnceLock<Regex> = OnceLock::new();
    let re = THEME_RE.get_or_init(|| Regex::new(r"(?m)^#{1,3}\s+(.+)$").expect("valid regex"));

    let body = frontmatter::strip_block(content);
    let mut themes: Vec<String> = re
        .captures_iter(body)
        .map(|c| c[1].trim().to_string())
        .collect();

    if let Some(paragraph) = body.split("\n\n").map(str::trim).find(|p| {
        !p.is_empty() && !p.starts_with('#') && !p.starts_with("```") && !p.starts_with('|')
    }) {
        themes.push(paragraph.to_string());
    }

    themes
}

/// Classify one document. All signals are computed over the body with any
/// existing front-matter block stripped, so re-running the pipeline over
/// already-enhanced files classifies identically.
pub fn analyze_document(
    file: &ScannedFile,
    content: &str,
    classifier: &Classifier,
) -> DocumentAnalysis {
    static HEADING_FLAG: OnceLock<Regex> = OnceLock::new();
    static MERMAID: OnceLock<Regex> = OnceLock::new();
    let heading_flag = HEADING_FLAG.get_or_init(|| Regex::new(r"(?m)^#+\s").expect("valid regex"));
    let mermaid = MERMAID.get_or_init(|| Regex::new(r"(?i)```mermaid").expect("valid regex"));

    let body = frontmatter::strip_block(content);
    DocumentAnalysis {
        path: file.rel_path.clone(),
        filename: file.filename.clone(),
        title: extract_title(content, &file.filename),
        category: classifier.assign_category(body, &file.rel_path),
        themes: extract_themes(body),
        content_length: body.len(),
        has_headings: heading_flag.is_match(body),
        has_mermaid: mermaid.is_match(body),
        has_code_blocks: body.contains("```"),
        word_count: body.split_whitespace().count(),
    }
}

/// Classify the whole corpus; unreadable files are recorded and skipped
#[tracing::instrument(skip_all, fields(files = files.len()))]
pub fn analyze_corpus(files: &[ScannedFile], classifier: &Classifier) -> Result<AnalysisArtifact> {
    let mut documents = Vec::with_capacity(files.len());
    let mut failures = Vec::new();

    for file in files {
        match fs::read_to_string(&file.full_path) {
            Ok(content) => documents.push(analyze_document(file, &content, classifier)),
            Err(e) => {
                tracing::warn!(path = %file.rel_path, error = %e, "unreadable document");
                failures.push(StageFailure {
                    path: file.rel_path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    let statistics = corpus_stats(&documents);
    Ok(AnalysisArtifact {
        documents,
        statistics,
        failures,
    })
}

fn corpus_stats(documents: &[DocumentAnalysis]) -> CorpusStats {
    let mut category_counts = BTreeMap::new();
    let mut with_mermaid = 0;
    let mut with_headings = 0;
    let mut total_words = 0usize;

    for doc in documents {
        *category_counts.entry(doc.category).or_insert(0) += 1;
        if doc.has_mermaid {
            with_mermaid += 1;
        }
        if doc.has_headings {
            with_headings += 1;
        }
        total_words += doc.word_count;
    }

    CorpusStats {
        total_documents: documents.len(),
        category_counts,
        average_word_count: if documents.is_empty() {
            0
        } else {
            total_words / documents.len()
        },
        documents_with_mermaid: with_mermaid,
        documents_with_headings: with_headings,
    }
}
