//! Title refinement
//!
//! A post-pass over already-injected documents. Titles matching the
//! generic-title denylist are re-derived through an ordered chain of
//! heuristics, and only the `title:` field of the injected block is
//! rewritten.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::artifacts::StageFailure;
use crate::classify::DocumentAnalysis;
use crate::error::Result;
use crate::frontmatter;
use crate::text;

/// Titles too vague to stand on their own
const GENERIC_TITLES: &[&str] = &[
    "overview",
    "introduction",
    "getting started",
    "core concepts",
    "recommendations",
    "summary",
    "guide",
    "tutorial",
    "basics",
    "fundamentals",
    "primer",
    "walkthrough",
    "quickstart",
    "setup",
    "configuration",
    "installation",
    "deployment",
    "implementation",
    "architecture",
    "design",
    "patterns",
    "best practices",
    "tips",
    "tricks",
    "examples",
    "samples",
    "demo",
    "test",
    "proof of concept",
    "poc",
    "prototype",
    "draft",
    "notes",
    "thoughts",
    "ideas",
    "prompt",
    "title",
    "readme",
    "index",
];

/// Whether a title is exactly a generic term. The classifier's heading
/// filter uses this narrow form; accepting "Helm Deployment Patterns"
/// while rejecting a bare "Patterns" requires exact matching.
pub fn is_generic_term(title: &str) -> bool {
    let normalized = title.trim().to_lowercase();
    GENERIC_TITLES.contains(&normalized.as_str())
}

/// Whether a title matches the generic denylist, as an exact, prefixed
/// (`generic:` / `generic -`), or suffixed (`... generic`) match
pub fn is_generic_title(title: &str) -> bool {
    let normalized = title.trim().to_lowercase();
    GENERIC_TITLES.iter().any(|g| {
        normalized == *g
            || normalized.starts_with(&format!("{}:", g))
            || normalized.starts_with(&format!("{} -", g))
            || normalized.ends_with(&format!(" {}", g))
    })
}

/// Per-document refinement record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleRecord {
    pub path: String,
    pub original_title: String,
    pub title: String,
    pub refined: bool,
}

/// Output of the refine-titles stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitlesArtifact {
    pub records: Vec<TitleRecord>,
    pub refined: usize,
    pub unchanged: usize,
    pub failures: Vec<StageFailure>,
}

/// Readable context segments derived from the document's path
fn path_contexts(rel_path: &str) -> Vec<String> {
    static CAMEL: OnceLock<Regex> = OnceLock::new();
    let camel = CAMEL.get_or_init(|| Regex::new(r"([a-z])([A-Z])").expect("valid regex"));

    rel_path
        .split(['/', '\\'])
        .filter(|part| !part.is_empty() && !part.ends_with(".md"))
        .map(|part| {
            let spaced = camel.replace_all(part, "$1 $2");
            text::title_case(&spaced.to_lowercase())
        })
        .collect()
}

/// Heuristic 1: first non-generic heading within the leading 30 lines
fn leading_heading(content: &str) -> Option<String> {
    for line in content.lines().take(30) {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix('#') {
            let heading = rest.trim_start_matches('#').trim();
            if heading.chars().count() > 5 && !is_generic_title(heading) {
                return Some(heading.to_string());
            }
        }
    }
    None
}

/// Heuristic 2: comparison constructs (`X vs Y`)
fn comparison_title(content: &str) -> Option<String> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            r"(?i)(\w+)\s+vs\.?\s+(\w+)",
            r"(?i)(\w+)\s+versus\s+(\w+)",
            r"(?i)comparing\s+(\w+)\s+(?:and|with)\s+(\w+)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
    });

    patterns.iter().find_map(|re| {
        re.captures(content)
            .map(|c| format!("{} vs {}: Comparison", &c[1], &c[2]))
    })
}

/// Heuristic 3: guide constructs (`guide to X`, `how to X`, ...)
fn guide_title(content: &str) -> Option<String> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            r"(?i)guide\s+to\s+([^.!?\n]+)",
            r"(?i)([^.!?\n]+)\s+guide",
            r"(?i)how\s+to\s+([^.!?\n]+)",
            r"(?i)([^.!?\n]+)\s+tutorial",
            r"(?i)introduction\s+to\s+([^.!?\n]+)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
    });

    patterns.iter().find_map(|re| {
        let c = re.captures(content)?;
        let subject = c[1].trim().to_string();
        let len = subject.chars().count();
        if len > 5 && len < 50 {
            if subject.to_lowercase().contains("guide") {
                Some(subject)
            } else {
                Some(format!("{} Guide", subject))
            }
        } else {
            None
        }
    })
}

/// Heuristic 4: a capitalized tool name near setup/configuration verbs
fn tool_title(content: &str, contexts: &[String]) -> Option<String> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            r"using\s+([A-Z][a-zA-Z]+)",
            r"with\s+([A-Z][a-zA-Z]+)",
            r"(?i)([A-Z][a-zA-Z]+)\s+(?:setup|configuration|deployment|implementation)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
    });

    patterns.iter().find_map(|re| {
        let c = re.captures(content)?;
        let tool = c[1].to_string();
        if tool.chars().count() <= 3 {
            return None;
        }
        match contexts.last() {
            Some(context) => Some(format!("{} {}", tool, context)),
            None => Some(format!("{} Configuration", tool)),
        }
    })
}

/// Heuristic 5: the last two path context segments
fn path_title(contexts: &[String]) -> Option<String> {
    if contexts.len() >= 2 {
        Some(contexts[contexts.len() - 2..].join(" "))
    } else {
        None
    }
}

/// Heuristic 6: the first substantial plain-text line, truncated
fn first_line_title(content: &str) -> Option<String> {
    let line = content.lines().map(str::trim).find(|line| {
        line.chars().count() > 20
            && !line.starts_with('#')
            && !line.starts_with("```")
            && !line.starts_with("---")
            && !line.starts_with('*')
            && !line.starts_with('-')
            && line.contains(' ')
    })?;

    let mut cleaned: String = line
        .chars()
        .filter(|&c| !matches!(c, '#' | '*' | '`'))
        .collect();
    cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.chars().count() > 60 {
        cleaned = cleaned.chars().take(57).collect::<String>() + "...";
    }
    if cleaned.chars().count() > 10 {
        Some(cleaned)
    } else {
        None
    }
}

fn cleanup(candidate: &str) -> String {
    let cleaned: String = candidate
        .chars()
        .filter(|&c| !matches!(c, '#' | '*' | '`'))
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_start_matches([':', '-', ' ']);
    text::capitalize(trimmed)
}

/// Derive a better title for a document whose current title is generic.
/// Returns `None` when the existing title should be kept.
pub fn refine_title(original: &str, content: &str, rel_path: &str) -> Option<String> {
    if !is_generic_title(original) && original.chars().count() > 10 {
        return None;
    }

    let contexts = path_contexts(rel_path);
    let candidate = leading_heading(content)
        .or_else(|| comparison_title(content))
        .or_else(|| guide_title(content))
        .or_else(|| tool_title(content, &contexts))
        .or_else(|| path_title(&contexts))
        .or_else(|| first_line_title(content))?;

    let refined = cleanup(&candidate);
    if refined.chars().count() < 5 || is_generic_title(&refined) || refined == original {
        return None;
    }
    Some(refined)
}

/// Refine titles across all injected documents, patching the `title:` field
/// in place
#[tracing::instrument(skip_all, fields(documents = documents.len()))]
pub fn refine_all(root: &Path, documents: &[DocumentAnalysis]) -> Result<TitlesArtifact> {
    let mut records = Vec::with_capacity(documents.len());
    let mut failures = Vec::new();
    let mut refined_count = 0;

    for doc in documents {
        let full_path = root.join(&doc.path);
        let content = match fs::read_to_string(&full_path) {
            Ok(content) => content,
            Err(e) => {
                failures.push(StageFailure {
                    path: doc.path.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let body = frontmatter::strip_block(&content);
        let refined = refine_title(&doc.title, body, &doc.path);
        match refined {
            Some(title) => match frontmatter::patch_title(&content, &title) {
                Some(patched) => {
                    if let Err(e) = fs::write(&full_path, patched) {
                        failures.push(StageFailure {
                            path: doc.path.clone(),
                            error: e.to_string(),
                        });
                        continue;
                    }
                    tracing::debug!(path = %doc.path, from = %doc.title, to = %title, "title refined");
                    refined_count += 1;
                    records.push(TitleRecord {
                        path: doc.path.clone(),
                        original_title: doc.title.clone(),
                        title,
                        refined: true,
                    });
                }
                None => {
                    failures.push(StageFailure {
                        path: doc.path.clone(),
                        error: "no front matter to patch".to_string(),
                    });
                }
            },
            None => records.push(TitleRecord {
                path: doc.path.clone(),
                original_title: doc.title.clone(),
                title: doc.title.clone(),
                refined: false,
            }),
        }
    }

    let unchanged = records.iter().filter(|r| !r.refined).count();
    Ok(TitlesArtifact {
        records,
        refined: refined_count,
        unchanged,
        failures,
    })
}
