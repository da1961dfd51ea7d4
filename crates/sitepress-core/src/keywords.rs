//! Keyword extraction
//!
//! Candidates come from three independent sources (a fixed technical
//! vocabulary, category-specific patterns, and path segments), are scored
//! for relevance, and the top eight survive. Candidate order is the
//! insertion order, so tie scores rank deterministically.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::artifacts::StageFailure;
use crate::category::{CategorySlug, CategoryTable};
use crate::classify::DocumentAnalysis;
use crate::error::Result;
use crate::text;

/// Keywords kept per document
const MAX_KEYWORDS: usize = 8;
/// Floor below which category fallback keywords pad the list
const MIN_KEYWORDS: usize = 3;
/// Keywords produced when a document cannot be read
const FALLBACK_KEYWORDS: usize = 6;

/// Technical terms and tool names recognized literally
const TECHNICAL_TERMS: &[&str] = &[
    // AI/ML terms
    "ai",
    "artificial-intelligence",
    "machine-learning",
    "llm",
    "large-language-model",
    "agent",
    "agentic",
    "langchain",
    "langgraph",
    "temporal",
    "prefect",
    "react-pattern",
    "multi-agent",
    "orchestration",
    "workflow",
    "automation",
    "observability",
    "tracing",
    // DevOps/platform terms
    "kubernetes",
    "k8s",
    "docker",
    "container",
    "helm",
    "argocd",
    "gitops",
    "kargo",
    "crossplane",
    "backstage",
    "techdocs",
    "documentation",
    "platform",
    "devops",
    "ci-cd",
    "continuous-integration",
    "continuous-deployment",
    "infrastructure",
    // Development terms
    "api",
    "rest",
    "graphql",
    "microservices",
    "serverless",
    "function",
    "lambda",
    "database",
    "sql",
    "nosql",
    "monitoring",
    "logging",
    "metrics",
    "alerting",
    // Cloud and infrastructure
    "aws",
    "azure",
    "gcp",
    "cloud",
    "eks",
    "aks",
    "gke",
    "terraform",
    "ansible",
    "production",
    "staging",
    "deployment",
    "scaling",
    "load-balancing",
    "security",
    // Tools and formats
    "react",
    "vue",
    "angular",
    "nodejs",
    "python",
    "java",
    "golang",
    "rust",
    "typescript",
    "javascript",
    "json",
    "yaml",
    "toml",
    "markdown",
    "mermaid",
];

/// Directory names carrying no keyword signal
const COMMON_DIRS: &[&str] = &["docs", "content", "site", "themes", "book"];

fn vocabulary() -> &'static HashSet<&'static str> {
    static VOCAB: OnceLock<HashSet<&'static str>> = OnceLock::new();
    VOCAB.get_or_init(|| TECHNICAL_TERMS.iter().copied().collect())
}

/// One keyword pattern per category, matched against the whole body
fn category_pattern(slug: CategorySlug) -> Option<&'static Regex> {
    static AI_ML: OnceLock<Regex> = OnceLock::new();
    static DEVPLATFORM: OnceLock<Regex> = OnceLock::new();
    static INFRASTRUCTURE: OnceLock<Regex> = OnceLock::new();
    static WORKFLOWS: OnceLock<Regex> = OnceLock::new();

    match slug {
        CategorySlug::AiMl => Some(AI_ML.get_or_init(|| {
            Regex::new(
                r"(?i)\b(agent|agentic|llm|langchain|langgraph|temporal|prefect|ai|ml|machine.?learning|artificial.?intelligence|react.?pattern|multi.?agent|orchestration|workflow|automation|observability|tracing|metrics)\b",
            )
            .expect("valid regex")
        })),
        CategorySlug::Devplatform => Some(DEVPLATFORM.get_or_init(|| {
            Regex::new(
                r"(?i)\b(backstage|techdocs|gitops|argocd|kargo|crossplane|platform|devops|ci.?cd|continuous.?integration|continuous.?deployment|documentation|docs.?as.?code|wiki|confluence|mkdocs)\b",
            )
            .expect("valid regex")
        })),
        CategorySlug::Infrastructure => Some(INFRASTRUCTURE.get_or_init(|| {
            Regex::new(
                r"(?i)\b(kubernetes|k8s|docker|container|helm|production|staging|deployment|scaling|load.?balancing|security|monitoring|logging|alerting|infrastructure|cloud|aws|azure|gcp|eks|aks|gke|terraform|ansible)\b",
            )
            .expect("valid regex")
        })),
        CategorySlug::Workflows => Some(WORKFLOWS.get_or_init(|| {
            Regex::new(
                r"(?i)\b(workflow|orchestration|automation|serverless|function|lambda|n8n|airflow|temporal|prefect|process|task|job|pipeline|trigger|event)\b",
            )
            .expect("valid regex")
        })),
        CategorySlug::Misc => None,
    }
}

/// Per-source candidate counts for the stage report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordSources {
    pub technical: usize,
    pub domain: usize,
    pub path: usize,
}

/// Per-document keyword record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub path: String,
    pub title: String,
    pub category: CategorySlug,
    pub keywords: Vec<String>,
    pub success: bool,
    pub sources: KeywordSources,
}

/// Output of the keywords stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsArtifact {
    pub records: Vec<KeywordRecord>,
    pub unique_keywords: Vec<String>,
    pub failures: Vec<StageFailure>,
}

/// Ordered candidate set with set-membership dedup
#[derive(Default)]
struct Candidates {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl Candidates {
    fn push(&mut self, keyword: String) {
        if !keyword.is_empty() && self.seen.insert(keyword.clone()) {
            self.ordered.push(keyword);
        }
    }
}

/// Vocabulary terms found in code spans, headings, and body words
fn technical_terms(content: &str) -> Vec<String> {
    static CODE: OnceLock<Regex> = OnceLock::new();
    static HEADING: OnceLock<Regex> = OnceLock::new();
    let code = CODE.get_or_init(|| Regex::new(r"`([^`]+)`").expect("valid regex"));
    let heading = HEADING.get_or_init(|| Regex::new(r"(?m)^#+\s+(.+)$").expect("valid regex"));

    let mut out = Candidates::default();

    for span in code.captures_iter(content) {
        let term = text::normalize_keyword(&span[1]);
        if vocabulary().contains(term.as_str()) {
            out.push(term);
        }
    }

    for cap in heading.captures_iter(content) {
        for word in cap[1].split_whitespace() {
            let term = text::normalize_keyword(word);
            if vocabulary().contains(term.as_str()) {
                out.push(term);
            }
        }
    }

    for word in content.split_whitespace() {
        let term = text::normalize_keyword(word);
        if vocabulary().contains(term.as_str()) {
            out.push(term);
        }
    }

    out.ordered
}

/// Category-pattern matches across the whole body
fn domain_keywords(content: &str, category: CategorySlug) -> Vec<String> {
    let mut out = Candidates::default();
    if let Some(pattern) = category_pattern(category) {
        for m in pattern.find_iter(content) {
            let keyword = text::normalize_keyword(m.as_str());
            if keyword.chars().count() > 2 {
                out.push(keyword);
            }
        }
    }
    out.ordered
}

/// Meaningful path segments
fn path_keywords(rel_path: &str) -> Vec<String> {
    let mut out = Candidates::default();
    for part in rel_path.split(['/', '\\']) {
        if COMMON_DIRS.contains(&part) {
            continue;
        }
        let token = text::normalize_keyword(part.trim_end_matches(".md"));
        if token.chars().count() > 2 && !text::stop_words().contains(token.as_str()) {
            out.push(token);
        }
    }
    out.ordered
}

fn occurrence_pattern(keyword: &str) -> Regex {
    // hyphens in the keyword match `-`, `_`, whitespace, or nothing
    let pattern = keyword.replace('-', r"[-_\s]?");
    Regex::new(&format!(r"(?i)\b{}", pattern)).expect("valid keyword pattern")
}

fn score(keyword: &str, content: &str, title_lower: &str) -> f64 {
    let mut score = 0.0;
    if vocabulary().contains(keyword) {
        score += 10.0;
    }
    score += occurrence_pattern(keyword).find_iter(content).count() as f64 * 2.0;
    if title_lower.contains(&keyword.replace('-', "")) {
        score += 5.0;
    }
    score + (keyword.chars().count() as f64 / 3.0).min(3.0)
}

/// Rank candidates by score, descending; stable, so insertion order breaks ties
fn rank(candidates: Candidates, content: &str, title: &str) -> Vec<String> {
    let title_lower = title.to_lowercase();
    let mut scored: Vec<(String, f64)> = candidates
        .ordered
        .into_iter()
        .map(|kw| {
            let s = score(&kw, content, &title_lower);
            (kw, s)
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(kw, _)| kw).take(MAX_KEYWORDS).collect()
}

/// Category defaults plus path tokens, used when a document cannot be read
pub fn fallback_keywords(doc: &DocumentAnalysis, table: &CategoryTable) -> Vec<String> {
    let mut out = Candidates::default();
    for kw in table.get(doc.category).fallback_keywords {
        out.push(kw.to_string());
    }
    for token in path_keywords(&doc.path).into_iter().take(3) {
        out.push(token);
    }
    out.ordered.truncate(FALLBACK_KEYWORDS);
    out.ordered
}

/// Extract ranked keywords for one document
pub fn extract_keywords(
    doc: &DocumentAnalysis,
    content: &str,
    table: &CategoryTable,
) -> (Vec<String>, KeywordSources) {
    let technical = technical_terms(content);
    let domain = domain_keywords(content, doc.category);
    let path = path_keywords(&doc.path);
    let sources = KeywordSources {
        technical: technical.len(),
        domain: domain.len(),
        path: path.len(),
    };

    let mut candidates = Candidates::default();
    for kw in technical.into_iter().chain(domain).chain(path) {
        candidates.push(kw);
    }

    let mut keywords = rank(candidates, content, &doc.title);

    // pad thin results so every document carries at least a few terms
    if keywords.len() < MIN_KEYWORDS {
        for kw in fallback_keywords(doc, table) {
            if keywords.len() >= MIN_KEYWORDS {
                break;
            }
            if !keywords.contains(&kw) {
                keywords.push(kw);
            }
        }
    }

    (keywords, sources)
}

/// Extract keywords across the whole corpus
#[tracing::instrument(skip_all, fields(documents = documents.len()))]
pub fn extract_corpus(
    root: &Path,
    documents: &[DocumentAnalysis],
    table: &CategoryTable,
) -> Result<KeywordsArtifact> {
    let mut records = Vec::with_capacity(documents.len());
    let mut failures = Vec::new();
    let mut unique: Candidates = Candidates::default();

    for doc in documents {
        let (keywords, sources, success) = match fs::read_to_string(root.join(&doc.path)) {
            Ok(content) => {
                // score against the body only; an injected block's keyword
                // list must not feed back into later runs
                let body = crate::frontmatter::strip_block(&content);
                let (keywords, sources) = extract_keywords(doc, body, table);
                (keywords, sources, true)
            }
            Err(e) => {
                tracing::warn!(path = %doc.path, error = %e, "keyword extraction fell back");
                failures.push(StageFailure {
                    path: doc.path.clone(),
                    error: e.to_string(),
                });
                (fallback_keywords(doc, table), KeywordSources::default(), false)
            }
        };

        for kw in &keywords {
            unique.push(kw.clone());
        }
        records.push(KeywordRecord {
            path: doc.path.clone(),
            title: doc.title.clone(),
            category: doc.category,
            keywords,
            success,
            sources,
        });
    }

    let mut unique_keywords = unique.ordered;
    unique_keywords.sort();

    Ok(KeywordsArtifact {
        records,
        unique_keywords,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryTable;

    fn doc(path: &str, title: &str, category: CategorySlug) -> DocumentAnalysis {
        DocumentAnalysis {
            path: path.to_string(),
            filename: path.rsplit('/').next().unwrap_or(path).to_string(),
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
    fn test_extract_keywords_from_all_sources() {
        let table = CategoryTable::builtin();
        let content = "# Helm on Kubernetes\n\nDeploying `helm` charts to production \
                       clusters with kubernetes manifests and docker images.\n";
        let d = doc("production/helm-deploy.md", "Helm on Kubernetes", CategorySlug::Infrastructure);
        let (keywords, sources) = extract_keywords(&d, content, &table);

        assert!(keywords.contains(&"helm".to_string()));
        assert!(keywords.contains(&"kubernetes".to_string()));
        assert!(keywords.len() <= MAX_KEYWORDS);
        assert!(sources.technical > 0);
        assert!(sources.domain > 0);
        assert!(sources.path > 0);
    }

    #[test]
    fn test_keywords_are_normalized_and_unique() {
        let table = CategoryTable::builtin();
        let content = "Docker docker DOCKER and machine_learning machine-learning.\n";
        let d = doc("ai/ml-notes.md", "ML Notes", CategorySlug::AiMl);
        let (keywords, _) = extract_keywords(&d, content, &table);

        let unique: HashSet<&String> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
        for kw in &keywords {
            assert_eq!(kw, &kw.to_lowercase());
            assert!(kw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
        }
    }

    #[test]
    fn test_title_match_outranks_frequency() {
        let table = CategoryTable::builtin();
        // kargo appears once but matches the title; docker appears once without
        let content = "kargo docker\n";
        let d = doc("devplatform/kargo.md", "Kargo Promotions", CategorySlug::Devplatform);
        let (keywords, _) = extract_keywords(&d, content, &table);
        let kargo_at = keywords.iter().position(|k| k == "kargo").unwrap();
        let docker_at = keywords.iter().position(|k| k == "docker").unwrap();
        assert!(kargo_at < docker_at);
    }

    #[test]
    fn test_minimum_keyword_floor() {
        let table = CategoryTable::builtin();
        let d = doc("workflow/empty.md", "Empty", CategorySlug::Workflows);
        let (keywords, _) = extract_keywords(&d, "", &table);
        assert!(keywords.len() >= MIN_KEYWORDS);
        assert!(keywords.len() <= MAX_KEYWORDS);
    }

    #[test]
    fn test_fallback_keywords_cap_and_content() {
        let table = CategoryTable::builtin();
        let d = doc(
            "eks_crossplane/composition/cluster-claims.md",
            "Cluster Claims",
            CategorySlug::Infrastructure,
        );
        let keywords = fallback_keywords(&d, &table);
        assert!(keywords.contains(&"infrastructure".to_string()));
        assert!(keywords.contains(&"eks-crossplane".to_string()));
        assert!(keywords.len() <= FALLBACK_KEYWORDS);
        assert!(keywords.len() >= MIN_KEYWORDS);
    }

    #[test]
    fn test_path_keywords_skip_common_dirs_and_stop_words() {
        let out = path_keywords("docs/content/the/helm-charts/notes.md");
        assert!(!out.contains(&"docs".to_string()));
        assert!(!out.contains(&"content".to_string()));
        assert!(!out.contains(&"the".to_string()));
        assert!(out.contains(&"helm-charts".to_string()));
        assert!(out.contains(&"notes".to_string()));
    }
}
