//! Pipeline configuration
//!
//! Configuration lives in an optional `sitepress.toml` at the corpus root.
//! Every field has a sensible default, so a missing file is not an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::CategorySlug;
use crate::error::{Result, SitepressError};

/// Default config file name, resolved relative to the corpus root
pub const CONFIG_FILE: &str = "sitepress.toml";

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Top-level directories scanned for markdown documents
    #[serde(default = "default_source_dirs")]
    pub source_dirs: Vec<String>,

    /// Regex patterns excluding paths from the scan
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Directory holding inter-stage JSON artifacts, relative to the root
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// Directory holding pre-injection backups, relative to the root
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    /// Static-site directory, relative to the root
    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,

    /// Content tree inside the site directory
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Category assigned on zero or tied classification scores
    #[serde(default = "default_category")]
    pub default_category: CategorySlug,

    /// Site generator binary
    #[serde(default = "default_generator_bin")]
    pub generator_bin: String,

    /// Arguments passed to the site generator
    #[serde(default)]
    pub generator_args: Vec<String>,
}

fn default_source_dirs() -> Vec<String> {
    [
        "ai",
        "devplatform",
        "domainmodel",
        "eks_crossplane",
        "helm",
        "production",
        "workflow",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_exclude() -> Vec<String> {
    [
        r"(^|/)\.",
        r"node_modules",
        r"\.git",
        r"site/public",
        r"site/resources",
        r"site/themes",
        r"site/archetypes",
        r"site/content/docs/.*\.md$",
        r"README\.md$",
        r"AGENTS\.md$",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from(".sitepress")
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from(".sitepress/backups")
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("site")
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("site/content/docs")
}

fn default_category() -> CategorySlug {
    CategorySlug::Infrastructure
}

fn default_generator_bin() -> String {
    "hugo".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        // serde defaults and Default must agree; round-trip an empty table
        toml::from_str("").expect("empty config deserializes")
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SitepressError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load `sitepress.toml` under the root if present, else defaults
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Absolute artifacts directory
    pub fn artifacts_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.artifacts_dir)
    }

    /// Absolute backup directory
    pub fn backup_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.backup_dir)
    }

    /// Absolute site directory
    pub fn site_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.site_dir)
    }

    /// Absolute content directory
    pub fn content_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.content_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.default_category, CategorySlug::Infrastructure);
        assert_eq!(config.generator_bin, "hugo");
        assert!(config.source_dirs.contains(&"production".to_string()));
        assert_eq!(config.content_dir, PathBuf::from("site/content/docs"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: PipelineConfig =
            toml::from_str("default_category = \"workflows\"").unwrap();
        assert_eq!(config.default_category, CategorySlug::Workflows);
        assert_eq!(config.generator_bin, "hugo");
    }

    #[test]
    fn test_discover_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::discover(dir.path(), None).unwrap();
        assert_eq!(config.default_category, CategorySlug::Infrastructure);
    }
}
