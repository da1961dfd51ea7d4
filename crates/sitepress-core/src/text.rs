//! Text processing utilities shared by the extraction stages

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Common English stop words filtered out of path-derived keywords
static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

pub fn stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| {
        [
            "a", "about", "above", "after", "all", "also", "am", "among", "an", "and", "another",
            "any", "are", "around", "as", "at", "back", "be", "been", "before", "being", "below",
            "between", "but", "by", "can", "could", "did", "do", "does", "down", "during", "each",
            "even", "for", "from", "get", "good", "got", "great", "had", "has", "have", "having",
            "here", "how", "if", "in", "into", "is", "it", "its", "just", "last", "like", "long",
            "many", "may", "might", "more", "most", "much", "must", "never", "new", "no", "not",
            "now", "of", "old", "on", "or", "other", "over", "own", "place", "right", "same",
            "shall", "should", "so", "some", "still", "such", "than", "that", "the", "their",
            "them", "then", "there", "these", "they", "this", "those", "through", "time", "to",
            "too", "under", "up", "use", "very", "was", "way", "we", "well", "were", "what",
            "when", "where", "which", "while", "who", "whom", "whose", "why", "will", "with",
            "would", "you", "your",
        ]
        .iter()
        .copied()
        .collect()
    })
}

/// Normalize a token into keyword form: lowercase, separators to hyphens,
/// non-alphanumerics stripped, hyphen runs collapsed
pub fn normalize_keyword(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_hyphen = false;
    for c in text.to_lowercase().chars() {
        let mapped = if c == '_' || c.is_whitespace() || c == '-' {
            Some('-')
        } else if c.is_ascii_alphanumeric() {
            Some(c)
        } else {
            None
        };
        if let Some(c) = mapped {
            if c == '-' {
                if !prev_hyphen && !out.is_empty() {
                    out.push('-');
                }
                prev_hyphen = true;
            } else {
                out.push(c);
                prev_hyphen = false;
            }
        }
    }
    out.trim_matches('-').to_string()
}

/// Strip bold, italic, inline-code, and link markup from a span of markdown
pub fn clean_inline_markup(text: &str) -> String {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    static ITALIC: OnceLock<Regex> = OnceLock::new();
    static CODE: OnceLock<Regex> = OnceLock::new();
    static LINK: OnceLock<Regex> = OnceLock::new();

    let bold = BOLD.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid regex"));
    let italic = ITALIC.get_or_init(|| Regex::new(r"\*([^*]+)\*").expect("valid regex"));
    let code = CODE.get_or_init(|| Regex::new(r"`([^`]+)`").expect("valid regex"));
    let link = LINK.get_or_init(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid regex"));

    let text = bold.replace_all(text, "$1");
    let text = italic.replace_all(&text, "$1");
    let text = code.replace_all(&text, "$1");
    link.replace_all(&text, "$1").into_owned()
}

/// Capitalize the first character of a string
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Turn a filename-ish token into Title Case: separators become spaces,
/// each word capitalized
pub fn title_case(token: &str) -> String {
    token
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}
