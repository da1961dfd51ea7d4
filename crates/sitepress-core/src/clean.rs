//! Cleanup of generated output
//!
//! Removes everything a pipeline run produces (generated site output,
//! per-category content directories, inter-stage artifacts) so the next
//! run starts fresh. Source documents and backups are left alone.

use std::fs;
use std::path::{Path, PathBuf};

use crate::artifacts::{
    ANALYSIS_FILE, ENHANCED_FILE, KEYWORDS_FILE, SUMMARIES_FILE, TITLES_FILE,
};
use crate::category::CategoryTable;
use crate::config::PipelineConfig;
use crate::error::Result;

fn remove(path: &Path, removed: &mut Vec<PathBuf>) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
        removed.push(path.to_path_buf());
    } else if path.is_file() {
        fs::remove_file(path)?;
        removed.push(path.to_path_buf());
    }
    Ok(())
}

/// Remove generated site output, category content directories, and stage
/// artifact files. Backups survive so `restore` keeps working. Returns the
/// paths actually removed.
pub fn clean_outputs(
    root: &Path,
    config: &PipelineConfig,
    table: &CategoryTable,
) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    let site_dir = config.site_dir(root);
    remove(&site_dir.join("public"), &mut removed)?;
    remove(&site_dir.join("resources"), &mut removed)?;

    let content_dir = config.content_dir(root);
    for spec in table.all() {
        remove(&content_dir.join(spec.slug.to_string()), &mut removed)?;
    }

    let artifacts_dir = config.artifacts_dir(root);
    for name in [
        ANALYSIS_FILE,
        SUMMARIES_FILE,
        KEYWORDS_FILE,
        ENHANCED_FILE,
        TITLES_FILE,
    ] {
        remove(&artifacts_dir.join(name), &mut removed)?;
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_generated_output_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default();
        let table = CategoryTable::builtin();

        let content = config.content_dir(dir.path());
        fs::create_dir_all(content.join("infrastructure")).unwrap();
        fs::write(content.join("infrastructure/doc.md"), "doc").unwrap();
        fs::create_dir_all(config.site_dir(dir.path()).join("public")).unwrap();
        let artifacts = config.artifacts_dir(dir.path());
        fs::create_dir_all(config.backup_dir(dir.path())).unwrap();
        fs::write(artifacts.join(ANALYSIS_FILE), "{}").unwrap();
        fs::create_dir_all(dir.path().join("helm")).unwrap();
        fs::write(dir.path().join("helm/source.md"), "# Source").unwrap();

        let removed = clean_outputs(dir.path(), &config, &table).unwrap();
        assert_eq!(removed.len(), 3);
        assert!(!content.join("infrastructure").exists());
        assert!(!artifacts.join(ANALYSIS_FILE).exists());
        // backups and source corpus untouched
        assert!(config.backup_dir(dir.path()).is_dir());
        assert!(dir.path().join("helm/source.md").is_file());
    }

    #[test]
    fn test_clean_on_pristine_tree_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let removed = clean_outputs(
            dir.path(),
            &PipelineConfig::default(),
            &CategoryTable::builtin(),
        )
        .unwrap();
        assert!(removed.is_empty());
    }
}
