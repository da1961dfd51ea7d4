//! Inter-stage JSON artifacts
//!
//! Each stage writes one JSON file of per-document records keyed by
//! repository-relative path. Downstream stages require their upstream
//! artifacts to exist and fail fast with a descriptive error otherwise.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SitepressError};

/// Analyze-stage artifact file
pub const ANALYSIS_FILE: &str = "analysis.json";
/// Summarize-stage artifact file
pub const SUMMARIES_FILE: &str = "summaries.json";
/// Keywords-stage artifact file
pub const KEYWORDS_FILE: &str = "keywords.json";
/// Enhance-stage artifact file
pub const ENHANCED_FILE: &str = "enhanced.json";
/// Refine-titles-stage artifact file
pub const TITLES_FILE: &str = "titles.json";

/// A recorded per-document failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageFailure {
    pub path: String,
    pub error: String,
}

/// Write a stage artifact, creating the artifacts directory if needed
pub fn save<T: Serialize>(dir: &Path, name: &str, artifact: &T) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(artifact)?;
    fs::write(&path, json)?;
    tracing::debug!(path = %path.display(), "artifact written");
    Ok(path)
}

/// Load a required upstream artifact, failing fast when it is missing
pub fn load_required<T: DeserializeOwned>(
    dir: &Path,
    name: &str,
    producing_stage: &'static str,
) -> Result<T> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(SitepressError::MissingArtifact {
            path,
            stage: producing_stage,
        });
    }
    let content = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}
