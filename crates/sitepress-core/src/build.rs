//! Site build trigger
//!
//! The static-site generator is an opaque collaborator: we invoke the
//! configured binary in the site directory and fail the run on any
//! non-zero exit.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::category::{CategorySlug, CategoryTable};
use crate::error::{Result, SitepressError};

/// Invoke the site generator in the site directory
pub fn run_generator(site_dir: &Path, bin: &str, args: &[String]) -> Result<()> {
    tracing::info!(bin, ?args, dir = %site_dir.display(), "building site");

    let status = Command::new(bin)
        .args(args)
        .current_dir(site_dir)
        .status()
        .map_err(|e| SitepressError::BuildSpawn {
            bin: bin.to_string(),
            source: e,
        })?;

    if !status.success() {
        return Err(SitepressError::BuildFailed { status });
    }
    Ok(())
}

/// Count published documents per category directory, excluding index stubs
pub fn content_stats(content_dir: &Path, table: &CategoryTable) -> Result<BTreeMap<CategorySlug, usize>> {
    let mut counts = BTreeMap::new();

    for spec in table.all() {
        let dir = content_dir.join(spec.slug.to_string());
        if !dir.is_dir() {
            counts.insert(spec.slug, 0);
            continue;
        }
        let mut count = 0;
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(".md") && name != "_index.md" {
                count += 1;
            }
        }
        counts.insert(spec.slug, count);
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_generator(dir.path(), "definitely-not-a-real-generator", &[]).unwrap_err();
        assert!(matches!(err, SitepressError::BuildSpawn { .. }));
    }

    #[test]
    fn test_content_stats_counts_documents() {
        let dir = tempfile::tempdir().unwrap();
        let infra = dir.path().join("infrastructure");
        fs::create_dir_all(&infra).unwrap();
        fs::write(infra.join("_index.md"), "---\n---\n").unwrap();
        fs::write(infra.join("charts.md"), "doc").unwrap();
        fs::write(infra.join("clusters.md"), "doc").unwrap();

        let table = CategoryTable::builtin();
        let counts = content_stats(dir.path(), &table).unwrap();
        assert_eq!(counts[&CategorySlug::Infrastructure], 2);
        assert_eq!(counts[&CategorySlug::AiMl], 0);
    }
}
