//! Core data models for PatchWork snippets and collections
//!
//! Snippets normalize their own inputs: titles are trimmed with an
//! "Untitled Snippet" fallback, tags are lowercased and deduplicated, and
//! the language is detected from the code when not supplied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::{detect_language, Language};

pub(crate) const UNTITLED: &str = "Untitled Snippet";

/// A saved code snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub code: String,
    pub language: Language,
    pub tags: Vec<String>,
    /// Name of the collection this snippet belongs to, if any.
    pub collection: Option<String>,
    pub is_favorite: bool,
    pub is_pinned: bool,
    /// Derived from `language`; kept in sync on every update.
    pub is_markdown: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a snippet. Everything beyond `title` and `code` is
/// optional; an absent `language` is detected from the code.
#[derive(Debug, Clone, Default)]
pub struct SnippetDraft {
    pub title: String,
    pub code: String,
    pub description: Option<String>,
    pub language: Option<Language>,
    pub tags: Vec<String>,
    pub collection: Option<String>,
}

/// A partial update to a snippet. `None` fields are left untouched.
///
/// When `code` changes without an accompanying `language`, the language is
/// re-detected from the new code. `collection` uses a nested option so the
/// membership can be cleared as well as changed.
#[derive(Debug, Clone, Default)]
pub struct SnippetUpdate {
    pub title: Option<String>,
    /// A blank description clears the field.
    pub description: Option<String>,
    pub code: Option<String>,
    pub language: Option<Language>,
    pub tags: Option<Vec<String>>,
    pub collection: Option<Option<String>>,
    pub is_favorite: Option<bool>,
    pub is_pinned: Option<bool>,
}

impl Snippet {
    /// Build a snippet from a draft, normalizing title, description, and
    /// tags, and detecting the language when the draft leaves it out.
    pub fn from_draft(draft: SnippetDraft) -> Self {
        let now = Utc::now();
        let language = draft
            .language
            .unwrap_or_else(|| detect_language(&draft.code, None));

        Snippet {
            id: Uuid::new_v4(),
            title: normalize_title(&draft.title),
            description: normalize_description(draft.description),
            code: draft.code,
            language,
            tags: normalize_tags(draft.tags),
            collection: draft.collection,
            is_favorite: false,
            is_pinned: false,
            is_markdown: language == Language::Markdown,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and bump `updated_at`.
    pub fn apply(&mut self, update: SnippetUpdate) {
        let code_changed = update
            .code
            .as_ref()
            .map(|code| *code != self.code)
            .unwrap_or(false);

        if let Some(title) = update.title {
            self.title = normalize_title(&title);
        }
        if let Some(description) = update.description {
            self.description = normalize_description(Some(description));
        }
        if let Some(code) = update.code {
            self.code = code;
        }
        match update.language {
            Some(language) => self.language = language,
            None if code_changed => self.language = detect_language(&self.code, None),
            None => {}
        }
        if let Some(tags) = update.tags {
            self.tags = normalize_tags(tags);
        }
        if let Some(collection) = update.collection {
            self.collection = collection;
        }
        if let Some(is_favorite) = update.is_favorite {
            self.is_favorite = is_favorite;
        }
        if let Some(is_pinned) = update.is_pinned {
            self.is_pinned = is_pinned;
        }

        self.is_markdown = self.language == Language::Markdown;
        self.updated_at = Utc::now();
    }
}

/// A named group of snippets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Display color as a hex string, e.g. "#61DAFB".
    pub color: Option<String>,
    pub snippet_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    pub fn new(name: &str, description: Option<&str>, color: Option<&str>) -> Self {
        let now = Utc::now();
        Collection {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            description: normalize_description(description.map(str::to_string)),
            color: color.map(str::to_string),
            snippet_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update to a collection. `None` fields are left untouched;
/// a blank description or color clears that field.
#[derive(Debug, Clone, Default)]
pub struct CollectionUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl Collection {
    pub fn apply(&mut self, update: CollectionUpdate) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = normalize_description(Some(description));
        }
        if let Some(color) = update.color {
            let color = color.trim().to_string();
            self.color = if color.is_empty() { None } else { Some(color) };
        }
        self.updated_at = Utc::now();
    }
}

/// A tag with its usage count, for filter sidebars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// A language with its usage count, for filter sidebars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub language: Language,
    pub count: usize,
}

/// Constraints applied on top of a text query when listing snippets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub language: Option<Language>,
    /// Every requested tag must match some snippet tag.
    pub tags: Vec<String>,
    pub collection: Option<String>,
    pub is_favorite: Option<bool>,
    pub is_pinned: Option<bool>,
}

/// Application preference surface persisted alongside the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub theme: Theme,
    pub auto_detect_language: bool,
    pub auto_copy_on_select: bool,
    pub show_line_numbers: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            theme: Theme::System,
            auto_detect_language: true,
            auto_copy_on_select: false,
            show_line_numbers: true,
        }
    }
}

fn normalize_title(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Lowercase, trim, drop empties, and deduplicate while preserving order.
pub(crate) fn normalize_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_detects_language() {
        let snippet = Snippet::from_draft(SnippetDraft {
            title: "Main".to_string(),
            code: "fn main() { let mut x = 1; }".to_string(),
            ..Default::default()
        });
        assert_eq!(snippet.language, Language::Rust);
        assert!(!snippet.is_markdown);
    }

    #[test]
    fn test_draft_normalizes_title_and_tags() {
        let snippet = Snippet::from_draft(SnippetDraft {
            title: "   ".to_string(),
            code: "x".to_string(),
            tags: vec![" Rust ".to_string(), "rust".to_string(), "".to_string()],
            ..Default::default()
        });
        assert_eq!(snippet.title, UNTITLED);
        assert_eq!(snippet.tags, vec!["rust"]);
    }

    #[test]
    fn test_explicit_language_wins_over_detection() {
        let snippet = Snippet::from_draft(SnippetDraft {
            title: "Notes".to_string(),
            code: "fn main() {}".to_string(),
            language: Some(Language::Markdown),
            ..Default::default()
        });
        assert_eq!(snippet.language, Language::Markdown);
        assert!(snippet.is_markdown);
    }

    #[test]
    fn test_apply_redetects_language_on_code_change() {
        let mut snippet = Snippet::from_draft(SnippetDraft {
            title: "Sample".to_string(),
            code: "fn main() { let mut x = 1; }".to_string(),
            ..Default::default()
        });
        assert_eq!(snippet.language, Language::Rust);

        snippet.apply(SnippetUpdate {
            code: Some("def greet():\n    print('hi')".to_string()),
            ..Default::default()
        });
        assert_eq!(snippet.language, Language::Python);
    }

    #[test]
    fn test_apply_keeps_language_when_code_unchanged() {
        let mut snippet = Snippet::from_draft(SnippetDraft {
            title: "Sample".to_string(),
            code: "fn main() {}".to_string(),
            language: Some(Language::Rust),
            ..Default::default()
        });
        snippet.apply(SnippetUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        });
        assert_eq!(snippet.language, Language::Rust);
        assert_eq!(snippet.title, "Renamed");
    }

    #[test]
    fn test_apply_clears_collection() {
        let mut snippet = Snippet::from_draft(SnippetDraft {
            title: "Sample".to_string(),
            code: "x".to_string(),
            collection: Some("Scratch".to_string()),
            ..Default::default()
        });
        snippet.apply(SnippetUpdate {
            collection: Some(None),
            ..Default::default()
        });
        assert_eq!(snippet.collection, None);
    }

    #[test]
    fn test_blank_description_clears() {
        let mut snippet = Snippet::from_draft(SnippetDraft {
            title: "Sample".to_string(),
            code: "x".to_string(),
            description: Some("something".to_string()),
            ..Default::default()
        });
        snippet.apply(SnippetUpdate {
            description: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(snippet.description, None);
    }
}
