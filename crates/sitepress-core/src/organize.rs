//! Category tree organization
//!
//! Copies enhanced documents into per-category directories under the
//! content root, with sanitized filenames and one generated index stub per
//! category. Sanitized-filename collisions are rejected per document
//! rather than silently overwritten.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use slug::slugify;

use crate::artifacts::StageFailure;
use crate::category::{CategorySlug, CategoryTable};
use crate::enhance::EnhanceRecord;
use crate::error::Result;
use crate::frontmatter;

/// Per-document copy record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRecord {
    pub path: String,
    pub category: CategorySlug,
    pub target: String,
}

/// Output of the organize stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeArtifact {
    pub copied: Vec<CopyRecord>,
    pub category_counts: BTreeMap<CategorySlug, usize>,
    pub failures: Vec<StageFailure>,
}

/// Filesystem-safe output filename: slugged basename plus `.md`
pub fn safe_filename(rel_path: &str) -> String {
    let basename = rel_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(rel_path)
        .trim_end_matches(".md");
    format!("{}.md", slugify(basename))
}

/// Category of an enhanced document, read back from its front matter;
/// unrecognized or missing categories land in misc
fn document_category(content: &str) -> CategorySlug {
    frontmatter::block_category(content)
        .and_then(|raw| CategorySlug::from_str(&raw).ok())
        .unwrap_or(CategorySlug::Misc)
}

fn write_index_stubs(content_dir: &Path, table: &CategoryTable) -> Result<()> {
    for spec in table.all() {
        let dir = content_dir.join(spec.slug.to_string());
        fs::create_dir_all(&dir)?;
        let stub = format!(
            "---\ntitle: \"{}\"\nweight: {}\n---\n\n# {}\n\nBrowse all documents in the {} category.\n",
            spec.name, spec.weight, spec.name, spec.name
        );
        fs::write(dir.join("_index.md"), stub)?;
    }
    Ok(())
}

/// Copy enhanced documents into the category tree
#[tracing::instrument(skip_all, fields(documents = records.len()))]
pub fn organize_corpus(
    root: &Path,
    records: &[EnhanceRecord],
    table: &CategoryTable,
    content_dir: &Path,
) -> Result<OrganizeArtifact> {
    write_index_stubs(content_dir, table)?;

    let mut copied = Vec::new();
    let mut failures = Vec::new();
    let mut category_counts: BTreeMap<CategorySlug, usize> = BTreeMap::new();
    // sanitized name -> source path, per category, for collision detection
    let mut occupied: HashMap<(CategorySlug, String), String> = HashMap::new();

    for record in records.iter().filter(|r| r.success) {
        let source = root.join(&record.path);
        let content = match fs::read_to_string(&source) {
            Ok(content) => content,
            Err(e) => {
                failures.push(StageFailure {
                    path: record.path.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let category = document_category(&content);
        let filename = safe_filename(&record.path);

        if let Some(holder) = occupied.get(&(category, filename.clone())) {
            failures.push(StageFailure {
                path: record.path.clone(),
                error: format!(
                    "filename collision: {}/{} already written from {}",
                    category, filename, holder
                ),
            });
            continue;
        }

        let target = content_dir.join(category.to_string()).join(&filename);
        if let Err(e) = fs::copy(&source, &target) {
            failures.push(StageFailure {
                path: record.path.clone(),
                error: e.to_string(),
            });
            continue;
        }

        occupied.insert((category, filename.clone()), record.path.clone());
        *category_counts.entry(category).or_insert(0) += 1;
        copied.push(CopyRecord {
            path: record.path.clone(),
            category,
            target: format!("{}/{}", category, filename),
        });
    }

    Ok(OrganizeArtifact {
        copied,
        category_counts,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryTable;

    fn record(path: &str) -> EnhanceRecord {
        EnhanceRecord {
            path: path.to_string(),
            title: "T".to_string(),
            success: true,
            front_matter_len: 0,
            original_len: 0,
            enhanced_len: 0,
        }
    }

    fn write(root: &Path, rel: &str, category: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let content = format!(
            "---\ntitle: \"Doc\"\ncategory: \"{}\"\n---\n\n# Doc\n\nBody.\n",
            category
        );
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename("A/Foo Bar.md"), "foo-bar.md");
        assert_eq!(safe_filename("B/foo-bar.md"), "foo-bar.md");
        assert_eq!(safe_filename("x/Weird__Name!!.md"), "weird-name.md");
    }

    #[test]
    fn test_organize_copies_by_category() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "helm/charts.md", "infrastructure");
        write(dir.path(), "ai/agents.md", "ai-ml");
        let content_dir = dir.path().join("site/content/docs");

        let table = CategoryTable::builtin();
        let records = vec![record("helm/charts.md"), record("ai/agents.md")];
        let artifact = organize_corpus(dir.path(), &records, &table, &content_dir).unwrap();

        assert_eq!(artifact.copied.len(), 2);
        assert!(content_dir.join("infrastructure/charts.md").is_file());
        assert!(content_dir.join("ai-ml/agents.md").is_file());
        assert!(artifact.failures.is_empty());
    }

    #[test]
    fn test_unrecognized_category_lands_in_misc() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "helm/odd.md", "not-a-category");
        let content_dir = dir.path().join("content");

        let table = CategoryTable::builtin();
        let artifact =
            organize_corpus(dir.path(), &[record("helm/odd.md")], &table, &content_dir).unwrap();
        assert!(content_dir.join("misc/odd.md").is_file());
        assert_eq!(artifact.copied[0].category, CategorySlug::Misc);
    }

    #[test]
    fn test_collision_is_rejected_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "A/Foo Bar.md", "infrastructure");
        write(dir.path(), "B/foo-bar.md", "infrastructure");
        let content_dir = dir.path().join("content");

        let table = CategoryTable::builtin();
        let records = vec![record("A/Foo Bar.md"), record("B/foo-bar.md")];
        let artifact = organize_corpus(dir.path(), &records, &table, &content_dir).unwrap();

        assert_eq!(artifact.copied.len(), 1);
        assert_eq!(artifact.failures.len(), 1);
        assert!(artifact.failures[0].error.contains("collision"));
        // the first writer's content survives
        let kept = fs::read_to_string(content_dir.join("infrastructure/foo-bar.md")).unwrap();
        let first = fs::read_to_string(dir.path().join("A/Foo Bar.md")).unwrap();
        assert_eq!(kept, first);
    }

    #[test]
    fn test_index_stubs_written_for_every_category() {
        let dir = tempfile::tempdir().unwrap();
        let content_dir = dir.path().join("content");
        let table = CategoryTable::builtin();
        organize_corpus(dir.path(), &[], &table, &content_dir).unwrap();

        for spec in table.all() {
            let stub = content_dir.join(spec.slug.to_string()).join("_index.md");
            let content = fs::read_to_string(stub).unwrap();
            assert!(content.contains(&format!("title: \"{}\"", spec.name)));
            assert!(content.contains(&format!("weight: {}", spec.weight)));
        }
    }

    #[test]
    fn test_failed_enhance_records_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let content_dir = dir.path().join("content");
        let table = CategoryTable::builtin();
        let mut failed = record("helm/broken.md");
        failed.success = false;
        let artifact = organize_corpus(dir.path(), &[failed], &table, &content_dir).unwrap();
        assert!(artifact.copied.is_empty());
        assert!(artifact.failures.is_empty());
    }
}
