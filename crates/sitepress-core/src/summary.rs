//! Summary synthesis
//!
//! Reduces each document's introduction to 1-3 sentences, with a templated
//! fallback naming the category when no usable prose exists. Deterministic
//! given identical input.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::artifacts::StageFailure;
use crate::category::{CategorySlug, CategoryTable};
use crate::classify::DocumentAnalysis;
use crate::error::Result;
use crate::frontmatter;
use crate::text;

/// Maximum summary length in words before truncation
const MAX_WORDS: usize = 150;
/// Words kept when truncating an overlong summary
const TRUNCATE_WORDS: usize = 100;
/// Introductions shorter than this fall through to an overview section
const MIN_INTRO_CHARS: usize = 100;

/// How a summary was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryMethod {
    /// Two or more sentences from the introduction
    Introduction,
    /// One introduction sentence plus a topic list
    IntroTopics,
    /// Templated fallback from title, category, and themes
    Fallback,
}

/// Per-document summary record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub path: String,
    pub title: String,
    pub category: CategorySlug,
    pub summary: String,
    pub word_count: usize,
    pub method: SummaryMethod,
    pub success: bool,
}

/// Output of the summarize stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummariesArtifact {
    pub summaries: Vec<SummaryRecord>,
    pub average_word_count: usize,
    pub failures: Vec<StageFailure>,
}

fn section_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#+\s+").expect("valid regex"))
}

/// Extract the introductory span: the text before the first heading, or the
/// body of an overview-like section when that span is too short
pub fn extract_introduction(content: &str) -> String {
    static OVERVIEW: OnceLock<Regex> = OnceLock::new();
    let overview = OVERVIEW
        .get_or_init(|| Regex::new(r"(?i)overview|introduction|about|summary").expect("valid regex"));

    let body = frontmatter::strip_block(content);
    let sections: Vec<&str> = section_split_re().split(body).collect();
    let mut intro = sections[0].trim().to_string();

    if intro.chars().count() < MIN_INTRO_CHARS && sections.len() > 1 {
        for section in &sections[1..] {
            if let Some((heading, rest)) = section.split_once('\n') {
                if overview.is_match(heading) {
                    intro = rest.trim().to_string();
                    break;
                }
            }
        }
    }

    intro
}

/// Strip markdown syntax and collapse whitespace for sentence extraction
pub fn clean_text(input: &str) -> String {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    static TABLE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));
    let table = TABLE.get_or_init(|| Regex::new(r"(?m)^\|.*\|$").expect("valid regex"));

    // fences first, so their backticks never read as inline code spans
    let cleaned = fence.replace_all(input, "");
    let cleaned = text::clean_inline_markup(&cleaned);
    let cleaned = table.replace_all(&cleaned, "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split cleaned text into capitalized sentences, dropping short fragments
pub fn extract_sentences(input: &str) -> Vec<String> {
    input
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() > 10)
        .map(text::capitalize)
        .collect()
}

/// Headings of level 1-3, first five, used as topic labels
pub fn key_topics(content: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?m)^#{1,3}\s+(.+)$").expect("valid regex"));

    re.captures_iter(frontmatter::strip_block(content))
        .map(|c| c[1].trim().to_string())
        .filter(|h| !h.is_empty())
        .take(5)
        .collect()
}

fn fallback_summary(doc: &DocumentAnalysis, topics: &[String], table: &CategoryTable) -> String {
    let category_name = table.name_of(doc.category).to_lowercase();
    let topic_text = if topics.is_empty() {
        String::new()
    } else {
        format!(
            " covering {}",
            topics.iter().take(2).cloned().collect::<Vec<_>>().join(" and ")
        )
    };
    format!(
        "{} is a {} document{}. This resource provides information and guidance \
         on the topic. See the full document for detailed information and \
         implementation details.",
        doc.title, category_name, topic_text
    )
}

fn cap_length(summary: String) -> String {
    let words: Vec<&str> = summary.split_whitespace().collect();
    if words.len() <= MAX_WORDS {
        return summary;
    }
    let truncated = words[..TRUNCATE_WORDS].join(" ");
    match truncated.rfind('.') {
        Some(i) if i > 50 => truncated[..=i].to_string(),
        _ => format!("{}.", truncated),
    }
}

/// Generate a summary for one document
pub fn generate_summary(
    doc: &DocumentAnalysis,
    content: &str,
    table: &CategoryTable,
) -> (String, SummaryMethod) {
    let introduction = extract_introduction(content);
    let topics = key_topics(content);
    let sentences = extract_sentences(&clean_text(&introduction));

    let (summary, method) = match sentences.len() {
        0 => (fallback_summary(doc, &topics, table), SummaryMethod::Fallback),
        1 => {
            let topic_info = if topics.is_empty() {
                String::new()
            } else {
                format!(
                    " Covers {}.",
                    topics.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
                )
            };
            (
                format!("{}.{}", sentences[0], topic_info),
                SummaryMethod::IntroTopics,
            )
        }
        _ => (
            format!(
                "{}.",
                sentences.iter().take(3).cloned().collect::<Vec<_>>().join(". ")
            ),
            SummaryMethod::Introduction,
        ),
    };

    (cap_length(summary), method)
}

/// Summarize the whole corpus; unreadable documents get the fallback
/// template and are recorded as failures
#[tracing::instrument(skip_all, fields(documents = documents.len()))]
pub fn summarize_corpus(
    root: &Path,
    documents: &[DocumentAnalysis],
    table: &CategoryTable,
) -> Result<SummariesArtifact> {
    let mut summaries = Vec::with_capacity(documents.len());
    let mut failures = Vec::new();

    for doc in documents {
        let (summary, method, success) = match fs::read_to_string(root.join(&doc.path)) {
            Ok(content) => {
                let (summary, method) = generate_summary(doc, &content, table);
                (summary, method, true)
            }
            Err(e) => {
                tracing::warn!(path = %doc.path, error = %e, "summary fell back");
                failures.push(StageFailure {
                    path: doc.path.clone(),
                    error: e.to_string(),
                });
                (fallback_summary(doc, &[], table), SummaryMethod::Fallback, false)
            }
        };

        summaries.push(SummaryRecord {
            path: doc.path.clone(),
            title: doc.title.clone(),
            category: doc.category,
            word_count: summary.split_whitespace().count(),
            summary,
            method,
            success,
        });
    }

    let total_words: usize = summaries.iter().map(|s| s.word_count).sum();
    let average_word_count = if summaries.is_empty() {
        0
    } else {
        total_words / summaries.len()
    };

    Ok(SummariesArtifact {
        summaries,
        average_word_count,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{CategorySlug, CategoryTable};

    fn doc(title: &str, category: CategorySlug) -> DocumentAnalysis {
        DocumentAnalysis {
            path: "production/doc.md".to_string(),
            filename: "doc.md".to_string(),
            title: title.to_string(),
            category,
            themes: Vec::new(),
            content_length: 0,
            has_headings: false,
            has_mermaid: false,
            has_code_blocks: false,
            word_count: 0,
        }
    }

    #[test]
    fn test_extract_introduction_before_first_heading() {
        let content = "This tool manages Helm releases across environments and keeps \
                       the deployed state reconciled against git.\n\n# Details\n\nMore.\n";
        let intro = extract_introduction(content);
        assert!(intro.starts_with("This tool manages Helm"));
    }

    #[test]
    fn test_extract_introduction_falls_through_to_overview() {
        let content = "# Doc\n\n## Overview\n\nKargo coordinates promotions between \
                       ArgoCD-managed environments using a stage graph and warehouse \
                       subscriptions to track fresh artifacts.\n\n## Usage\n\nRun it.\n";
        let intro = extract_introduction(content);
        assert!(intro.starts_with("Kargo coordinates promotions"));
    }

    #[test]
    fn test_clean_text_strips_markdown() {
        let input = "**Bold** intro with `code` and a [link](https://x).\n\n```\nfenced\n```\n\n| a | b |";
        let cleaned = clean_text(input);
        assert_eq!(cleaned, "Bold intro with code and a link.");
    }

    #[test]
    fn test_extract_sentences_filters_fragments() {
        let sentences = extract_sentences("short. this sentence is long enough to keep. ok!");
        assert_eq!(sentences, vec!["This sentence is long enough to keep"]);
    }

    #[test]
    fn test_summary_uses_introduction_sentences() {
        let table = CategoryTable::builtin();
        let content = "Helm charts package Kubernetes manifests for repeatable installs. \
                       Values files capture per-environment overrides cleanly. Releases \
                       are tracked per namespace. A fourth sentence goes unused.\n";
        let (summary, method) = generate_summary(
            &doc("Helm Charts", CategorySlug::Infrastructure),
            content,
            &table,
        );
        assert_eq!(method, SummaryMethod::Introduction);
        assert!(summary.starts_with("Helm charts package Kubernetes"));
        assert!(summary.ends_with('.'));
        // only the first three sentences survive
        assert!(!summary.contains("fourth sentence"));
    }

    #[test]
    fn test_summary_single_sentence_appends_topics() {
        let table = CategoryTable::builtin();
        let content = "Prefect orchestrates dataflow runs with typed task graphs.\n\n\
                       # Scheduling\n\n## Retries\n\n## Caching\n";
        let (summary, method) = generate_summary(
            &doc("Prefect Notes", CategorySlug::AiMl),
            content,
            &table,
        );
        assert_eq!(method, SummaryMethod::IntroTopics);
        assert!(summary.contains("Covers Scheduling, Retries, Caching."));
    }

    #[test]
    fn test_summary_fallback_names_category() {
        let table = CategoryTable::builtin();
        // no headings, under 100 chars of body: templated fallback
        let content = "tiny note\n";
        let (summary, method) = generate_summary(
            &doc("Cluster Sizing", CategorySlug::Infrastructure),
            content,
            &table,
        );
        assert_eq!(method, SummaryMethod::Fallback);
        assert!(summary.contains("infrastructure"));
        assert!(summary.starts_with("Cluster Sizing is a"));
        let words = summary.split_whitespace().count();
        assert!((10..=200).contains(&words));
        assert!(summary.ends_with('.'));
    }

    #[test]
    fn test_summary_word_cap() {
        let table = CategoryTable::builtin();
        // one unpunctuated 200-word run forces the truncation path
        let long = (0..200).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ");
        let (summary, _) = generate_summary(
            &doc("Long Doc", CategorySlug::Workflows),
            &long,
            &table,
        );
        assert!(summary.split_whitespace().count() <= MAX_WORDS);
        assert!(summary.ends_with('.'));
    }
}
