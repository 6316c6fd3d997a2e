//! Query matching, filtering, and ordering for snippet lists
//!
//! Pure functions over snippet slices; the store calls these under its read
//! lock and hands back owned snapshots.

use crate::models::{SearchFilters, Snippet};

/// A free-text query plus structured filter constraints.
#[derive(Debug, Clone, Default)]
pub struct SnippetQuery {
    pub text: String,
    pub filters: SearchFilters,
}

impl SnippetQuery {
    pub fn text(text: &str) -> Self {
        SnippetQuery {
            text: text.to_string(),
            filters: SearchFilters::default(),
        }
    }
}

/// Apply a query to a snippet slice: text match, then filters, then order
/// (pinned first, most recently updated first).
pub fn filter_snippets(snippets: &[Snippet], query: &SnippetQuery) -> Vec<Snippet> {
    let needle = query.text.trim().to_lowercase();

    let mut results: Vec<&Snippet> = snippets
        .iter()
        .filter(|snippet| needle.is_empty() || matches_text(snippet, &needle))
        .filter(|snippet| matches_filters(snippet, &query.filters))
        .collect();

    results.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    });

    results.into_iter().cloned().collect()
}

/// Case-insensitive substring match against title, description, code, and
/// tags. `needle` must already be lowercased.
fn matches_text(snippet: &Snippet, needle: &str) -> bool {
    snippet.title.to_lowercase().contains(needle)
        || snippet
            .description
            .as_deref()
            .map(|d| d.to_lowercase().contains(needle))
            .unwrap_or(false)
        || snippet.code.to_lowercase().contains(needle)
        // Tags are stored lowercased.
        || snippet.tags.iter().any(|tag| tag.contains(needle))
}

fn matches_filters(snippet: &Snippet, filters: &SearchFilters) -> bool {
    if let Some(language) = filters.language {
        if snippet.language != language {
            return false;
        }
    }

    // Every requested tag must be contained in some snippet tag.
    let all_tags_match = filters.tags.iter().all(|wanted| {
        let wanted = wanted.to_lowercase();
        snippet.tags.iter().any(|tag| tag.contains(&wanted))
    });
    if !all_tags_match {
        return false;
    }

    if let Some(collection) = &filters.collection {
        if snippet.collection.as_deref() != Some(collection.as_str()) {
            return false;
        }
    }
    if let Some(is_favorite) = filters.is_favorite {
        if snippet.is_favorite != is_favorite {
            return false;
        }
    }
    if let Some(is_pinned) = filters.is_pinned {
        if snippet.is_pinned != is_pinned {
            return false;
        }
    }

    true
}
