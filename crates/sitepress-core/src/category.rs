//! Category definitions for the content pipeline
//!
//! Categories form a fixed, closed set. The keyword tables used for scoring
//! are held in a [`CategoryTable`] value constructed once at startup and
//! passed explicitly into the classifier, extractor, and copier.

use crate::error::{Result, SitepressError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topical category slug
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategorySlug {
    /// AI agents, machine learning tools, and frameworks
    AiMl,
    /// Documentation platforms, GitOps workflows, development infrastructure
    Devplatform,
    /// Kubernetes, Helm, production readiness, infrastructure management
    Infrastructure,
    /// Orchestration tools, automation patterns, workflow management
    Workflows,
    /// Copier fallback for unrecognized or missing categories; never
    /// assigned by scoring
    Misc,
}

impl CategorySlug {
    /// All valid category slugs
    pub const VALID_SLUGS: &'static [&'static str] =
        &["ai-ml", "devplatform", "infrastructure", "workflows", "misc"];
}

impl FromStr for CategorySlug {
    type Err = SitepressError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ai-ml" => Ok(CategorySlug::AiMl),
            "devplatform" => Ok(CategorySlug::Devplatform),
            "infrastructure" => Ok(CategorySlug::Infrastructure),
            "workflows" => Ok(CategorySlug::Workflows),
            "misc" => Ok(CategorySlug::Misc),
            other => Err(SitepressError::Other(format!(
                "unknown category: {} (expected: {})",
                other,
                Self::VALID_SLUGS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for CategorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CategorySlug::AiMl => "ai-ml",
            CategorySlug::Devplatform => "devplatform",
            CategorySlug::Infrastructure => "infrastructure",
            CategorySlug::Workflows => "workflows",
            CategorySlug::Misc => "misc",
        };
        write!(f, "{}", s)
    }
}

/// Static definition of one category
#[derive(Debug, Clone)]
pub struct CategorySpec {
    /// Machine identifier
    pub slug: CategorySlug,
    /// Display name (the `categoryName` front-matter field)
    pub name: &'static str,
    /// One-line description for index pages
    pub description: &'static str,
    /// Keywords scored against document content and path
    pub keywords: &'static [&'static str],
    /// Keywords substituted when extraction fails for a document
    pub fallback_keywords: &'static [&'static str],
    /// Display ordering weight
    pub weight: u32,
}

/// Immutable category configuration, built once per process
#[derive(Debug, Clone)]
pub struct CategoryTable {
    specs: Vec<CategorySpec>,
}

impl CategoryTable {
    /// The built-in category set
    pub fn builtin() -> Self {
        CategoryTable {
            specs: vec![
                CategorySpec {
                    slug: CategorySlug::AiMl,
                    name: "AI & Machine Learning",
                    description: "Information about AI agents, machine learning tools, and frameworks",
                    keywords: &[
                        "ai", "agent", "langchain", "llm", "machine-learning", "agentic",
                        "temporal", "prefect",
                    ],
                    fallback_keywords: &["ai", "machine-learning", "automation"],
                    weight: 1,
                },
                CategorySpec {
                    slug: CategorySlug::Devplatform,
                    name: "Development Platforms",
                    description: "Documentation platforms, GitOps workflows, and development infrastructure",
                    keywords: &[
                        "backstage", "gitops", "argocd", "kargo", "documentation", "techdocs",
                        "crossplane",
                    ],
                    fallback_keywords: &["platform", "development", "documentation"],
                    weight: 2,
                },
                CategorySpec {
                    slug: CategorySlug::Infrastructure,
                    name: "Infrastructure",
                    description: "Kubernetes, Helm, production readiness, and infrastructure management",
                    keywords: &[
                        "kubernetes", "helm", "production", "docker", "observability",
                        "runbooks", "eks",
                    ],
                    fallback_keywords: &["infrastructure", "kubernetes", "production"],
                    weight: 3,
                },
                CategorySpec {
                    slug: CategorySlug::Workflows,
                    name: "Workflows",
                    description: "Orchestration tools, automation patterns, and workflow management",
                    keywords: &["workflow", "orchestration", "automation", "serverless", "n8n"],
                    fallback_keywords: &["workflow", "orchestration", "automation"],
                    weight: 4,
                },
                CategorySpec {
                    slug: CategorySlug::Misc,
                    name: "Miscellaneous",
                    description: "Documents that do not fit another category",
                    keywords: &[],
                    fallback_keywords: &["technical", "documentation"],
                    weight: 5,
                },
            ],
        }
    }

    /// All categories, in display order
    pub fn all(&self) -> &[CategorySpec] {
        &self.specs
    }

    /// Categories participating in keyword scoring (everything but misc)
    pub fn scored(&self) -> impl Iterator<Item = &CategorySpec> {
        self.specs.iter().filter(|s| s.slug != CategorySlug::Misc)
    }

    /// Look up a category spec by slug
    pub fn get(&self, slug: CategorySlug) -> &CategorySpec {
        self.specs
            .iter()
            .find(|s| s.slug == slug)
            .expect("table holds every slug")
    }

    /// Display name for a slug
    pub fn name_of(&self, slug: CategorySlug) -> &'static str {
        self.get(slug).name
    }

    /// Display weight for a slug
    pub fn weight_of(&self, slug: CategorySlug) -> u32 {
        self.get(slug).weight
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for slug in CategorySlug::VALID_SLUGS {
            let parsed: CategorySlug = slug.parse().unwrap();
            assert_eq!(parsed.to_string(), *slug);
        }
    }

    #[test]
    fn test_unknown_slug_rejected() {
        assert!("sre".parse::<CategorySlug>().is_err());
    }

    #[test]
    fn test_scored_excludes_misc() {
        let table = CategoryTable::builtin();
        assert_eq!(table.scored().count(), 4);
        assert!(table.scored().all(|s| s.slug != CategorySlug::Misc));
    }

    #[test]
    fn test_table_covers_every_slug() {
        let table = CategoryTable::builtin();
        for slug in CategorySlug::VALID_SLUGS {
            let slug: CategorySlug = slug.parse().unwrap();
            assert_eq!(table.get(slug).slug, slug);
        }
    }
}
