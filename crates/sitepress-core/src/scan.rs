//! Corpus scanner
//!
//! Walks the allow-listed source directories under the corpus root and
//! returns markdown files in directory-traversal order. A read error on any
//! directory aborts the scan; this is an offline batch tool with no
//! partial-result recovery.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::config::PipelineConfig;
use crate::error::{Result, SitepressError};

/// A candidate markdown file found by the scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedFile {
    /// Absolute path on disk
    pub full_path: PathBuf,
    /// Repository-relative path with `/` separators; the document key
    pub rel_path: String,
    /// Basename including extension
    pub filename: String,
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| {
                SitepressError::Other(format!("invalid exclude pattern {:?}: {}", p, e))
            })
        })
        .collect()
}

fn rel_path_of(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Scan the corpus for markdown files under the allow-listed directories
#[tracing::instrument(skip(config), fields(root = ?root))]
pub fn scan_corpus(root: &Path, config: &PipelineConfig) -> Result<Vec<ScannedFile>> {
    if !root.is_dir() {
        return Err(SitepressError::CorpusRootNotFound {
            path: root.to_path_buf(),
        });
    }

    let excludes = compile_excludes(&config.exclude)?;
    let mut files = Vec::new();

    for source_dir in &config.source_dirs {
        let dir = root.join(source_dir);
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "source dir absent, skipping");
            continue;
        }

        let walker = WalkDir::new(&dir).into_iter().filter_entry(|entry| {
            let rel = rel_path_of(root, entry.path());
            !excludes.iter().any(|re| re.is_match(&rel))
        });

        for entry in walker {
            let entry = entry.map_err(|e| SitepressError::Other(format!("scan failed: {}", e)))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let filename = entry.file_name().to_string_lossy().to_string();
            if !filename.ends_with(".md") {
                continue;
            }
            files.push(ScannedFile {
                full_path: entry.path().to_path_buf(),
                rel_path: rel_path_of(root, entry.path()),
                filename,
            });
        }
    }

    tracing::debug!(count = files.len(), "scan complete");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn test_config() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.source_dirs = vec!["helm".to_string(), "ai".to_string()];
        config
    }

    #[test]
    fn test_scan_allow_list() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "helm/charts.md", "# Charts");
        write(dir.path(), "ai/agents/langchain.md", "# LangChain");
        write(dir.path(), "unlisted/skipped.md", "# Skipped");
        write(dir.path(), "helm/values.yaml", "key: value");

        let files = scan_corpus(dir.path(), &test_config()).unwrap();
        let rels: Vec<&str> = files.iter().map(|f| f.rel_path.as_str()).collect();
        assert!(rels.contains(&"helm/charts.md"));
        assert!(rels.contains(&"ai/agents/langchain.md"));
        assert!(!rels.iter().any(|r| r.contains("unlisted")));
        assert!(!rels.iter().any(|r| r.ends_with(".yaml")));
    }

    #[test]
    fn test_scan_deny_patterns() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "helm/README.md", "# Readme");
        write(dir.path(), "helm/.hidden/secret.md", "# Hidden");
        write(dir.path(), "helm/node_modules/pkg/doc.md", "# Dep");
        write(dir.path(), "helm/notes.md", "# Notes");

        let files = scan_corpus(dir.path(), &test_config()).unwrap();
        let rels: Vec<&str> = files.iter().map(|f| f.rel_path.as_str()).collect();
        assert_eq!(rels, vec!["helm/notes.md"]);
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            scan_corpus(&missing, &test_config()),
            Err(SitepressError::CorpusRootNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_source_dir_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "helm/notes.md", "# Notes");
        // "ai" does not exist
        let files = scan_corpus(dir.path(), &test_config()).unwrap();
        assert_eq!(files.len(), 1);
    }
}
