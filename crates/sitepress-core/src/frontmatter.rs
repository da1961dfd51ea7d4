//! YAML front-matter handling
//!
//! The injected block has a fixed field order, so it is rendered by hand
//! rather than through a YAML serializer. Parsing of pre-existing blocks is
//! tolerant: they only need to yield a `title` or `category` field.

use regex::Regex;
use std::sync::OnceLock;

use crate::category::CategorySlug;

/// Metadata block prepended to each published document
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub category: CategorySlug,
    pub category_name: String,
    pub weight: u32,
    /// `YYYY-MM-DD`
    pub date: String,
    pub draft: bool,
    pub toc: bool,
    pub mermaid: bool,
}

fn escape(value: &str) -> String {
    value.replace('"', "\\\"")
}

impl FrontMatter {
    /// Render the block in fixed field order, ending with a blank line
    pub fn render(&self) -> String {
        let mut yaml = String::from("---\n");
        yaml.push_str(&format!("title: \"{}\"\n", escape(&self.title)));
        yaml.push_str(&format!("summary: \"{}\"\n", escape(&self.summary)));
        yaml.push_str("keywords:\n");
        for keyword in &self.keywords {
            yaml.push_str(&format!("  - \"{}\"\n", escape(keyword)));
        }
        yaml.push_str(&format!("category: \"{}\"\n", self.category));
        yaml.push_str(&format!("categoryName: \"{}\"\n", escape(&self.category_name)));
        yaml.push_str(&format!("weight: {}\n", self.weight));
        yaml.push_str(&format!("date: \"{}\"\n", self.date));
        yaml.push_str(&format!("draft: {}\n", self.draft));
        yaml.push_str(&format!("toc: {}\n", self.toc));
        if self.mermaid {
            yaml.push_str("mermaid: true\n");
        }
        yaml.push_str("---\n\n");
        yaml
    }
}

/// Whether content opens with a front-matter block
pub fn has_block(content: &str) -> bool {
    content.starts_with("---\n")
}

/// Strip a leading front-matter block, if present, along with blank lines
/// separating it from the body. The body itself is untouched.
pub fn strip_block(content: &str) -> &str {
    if !has_block(content) {
        return content;
    }
    match content[4..].find("\n---\n") {
        Some(end) => content[4 + end + 5..].trim_start_matches('\n'),
        None => content,
    }
}

/// The raw YAML between the delimiters of a leading block
fn block_yaml(content: &str) -> Option<&str> {
    if !has_block(content) {
        return None;
    }
    let end = content[4..].find("\n---\n")?;
    Some(&content[4..4 + end])
}

/// Read the `title` field of an existing front-matter block
pub fn block_title(content: &str) -> Option<String> {
    let yaml = block_yaml(content)?;
    let value: serde_yaml::Value = serde_yaml::from_str(yaml).ok()?;
    let title = value.get("title")?.as_str()?.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Read the `category` field of a leading front-matter block
pub fn block_category(content: &str) -> Option<String> {
    static CATEGORY: OnceLock<Regex> = OnceLock::new();
    let re = CATEGORY.get_or_init(|| {
        Regex::new(r#"(?m)^category:\s*["']?([^"'\n]+?)["']?\s*$"#).expect("valid regex")
    });
    let yaml = block_yaml(content)?;
    re.captures(yaml)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Rewrite only the `title:` field of an injected block, leaving the rest of
/// the file byte-identical. Returns `None` when no block is present.
pub fn patch_title(content: &str, new_title: &str) -> Option<String> {
    static TITLE: OnceLock<Regex> = OnceLock::new();
    // whole-line match so titles with escaped quotes patch cleanly
    let re = TITLE
        .get_or_init(|| Regex::new(r#"(?m)^title:\s*["'](.*)["']\s*$"#).expect("valid regex"));

    let yaml = block_yaml(content)?;
    if !re.is_match(yaml) {
        return None;
    }
    let replacement = format!("title: \"{}\"", escape(new_title));
    let patched = re.replace(yaml, regex::NoExpand(&replacement));
    let rest = &content[4 + yaml.len()..];
    Some(format!("---\n{}{}", patched, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrontMatter {
        FrontMatter {
            title: "Helm Production Readiness".to_string(),
            summary: "A guide.".to_string(),
            keywords: vec!["helm".to_string(), "kubernetes".to_string()],
            category: CategorySlug::Infrastructure,
            category_name: "Infrastructure".to_string(),
            weight: 3,
            date: "2026-08-07".to_string(),
            draft: false,
            toc: true,
            mermaid: false,
        }
    }

    #[test]
    fn test_render_fixed_order() {
        let block = sample().render();
        let title_at = block.find("title:").unwrap();
        let summary_at = block.find("summary:").unwrap();
        let keywords_at = block.find("keywords:").unwrap();
        let category_at = block.find("category:").unwrap();
        let date_at = block.find("date:").unwrap();
        assert!(title_at < summary_at);
        assert!(summary_at < keywords_at);
        assert!(keywords_at < category_at);
        assert!(category_at < date_at);
        assert!(block.ends_with("---\n\n"));
        assert!(!block.contains("mermaid"));
    }

    #[test]
    fn test_render_mermaid_only_when_set() {
        let mut fm = sample();
        fm.mermaid = true;
        assert!(fm.render().contains("mermaid: true\n"));
    }

    #[test]
    fn test_render_escapes_quotes() {
        let mut fm = sample();
        fm.title = "The \"Best\" Guide".to_string();
        assert!(fm.render().contains(r#"title: "The \"Best\" Guide""#));
    }

    #[test]
    fn test_strip_block() {
        let content = "---\ntitle: \"Old\"\n---\n\n# Body\n";
        assert_eq!(strip_block(content), "# Body\n");
    }

    #[test]
    fn test_strip_without_block_is_identity() {
        let content = "# Body\n\ntext\n";
        assert_eq!(strip_block(content), content);
    }

    #[test]
    fn test_strip_then_inject_is_idempotent() {
        let body = "# Body\n\nSome text.\n";
        let once = format!("{}{}", sample().render(), body);
        let twice = format!("{}{}", sample().render(), strip_block(&once));
        assert_eq!(strip_block(&once), strip_block(&twice));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_block_title() {
        let content = "---\ntitle: \"Kargo Rollouts\"\ncategory: \"devplatform\"\n---\n\nBody\n";
        assert_eq!(block_title(content), Some("Kargo Rollouts".to_string()));
        assert_eq!(block_title("# No block\n"), None);
    }

    #[test]
    fn test_block_category() {
        let content = "---\ntitle: \"X\"\ncategory: \"workflows\"\n---\n\nBody\n";
        assert_eq!(block_category(content), Some("workflows".to_string()));
        let unquoted = "---\ntitle: \"X\"\ncategory: ai-ml\n---\n\nBody\n";
        assert_eq!(block_category(unquoted), Some("ai-ml".to_string()));
    }

    #[test]
    fn test_patch_title_preserves_body() {
        let content = format!("{}# Body\n\nUnchanged text.\n", sample().render());
        let patched = patch_title(&content, "A Better Title").unwrap();
        assert!(patched.contains("title: \"A Better Title\""));
        assert_eq!(strip_block(&patched), strip_block(&content));
        assert!(patch_title("no front matter", "T").is_none());
    }
}
