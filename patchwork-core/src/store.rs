//! SnippetStore - the main API object over persisted snippet data
//!
//! Owns the key-value storage handle and an in-memory snapshot of snippets,
//! collections, and settings behind a read-write lock. Every mutation writes
//! through to storage; reads hand back owned clones so callers never hold
//! the lock.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::language::{detect_language, Language};
use crate::models::{
    normalize_tags, AppSettings, Collection, CollectionUpdate, LanguageCount, SearchFilters,
    Snippet, SnippetDraft, SnippetUpdate, TagCount,
};
use crate::search::{filter_snippets, SnippetQuery};
use crate::storage::{
    Storage, StorageError, COLLECTIONS_KEY, SETTINGS_KEY, SNIPPETS_KEY,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("snippet not found: {0}")]
    SnippetNotFound(Uuid),
    #[error("collection not found: {0}")]
    CollectionNotFound(Uuid),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type StoreResult<T> = Result<T, StoreError>;

struct State {
    snippets: Vec<Snippet>,
    collections: Vec<Collection>,
    settings: AppSettings,
}

/// Thread-safe snippet store persisting through [`Storage`].
pub struct SnippetStore {
    storage: Storage,
    state: RwLock<State>,
}

impl SnippetStore {
    /// Open a store backed by the file at `path`.
    ///
    /// Missing or unreadable persisted values degrade to empty defaults
    /// (with a log warning from the storage layer) rather than failing the
    /// open.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let storage = Storage::open(path)?;
        Ok(Self::from_storage(storage))
    }

    /// Open a store that never touches disk (for testing).
    pub fn open_in_memory() -> Self {
        Self::from_storage(Storage::in_memory())
    }

    fn from_storage(storage: Storage) -> Self {
        let state = State {
            snippets: storage.get_or(SNIPPETS_KEY, Vec::new()),
            collections: storage.get_or(COLLECTIONS_KEY, Vec::new()),
            settings: storage.get_or(SETTINGS_KEY, AppSettings::default()),
        };
        SnippetStore {
            storage,
            state: RwLock::new(state),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Snippets
    // ─────────────────────────────────────────────────────────────────────

    /// Create a snippet from a draft and persist it.
    ///
    /// When the draft carries no language and auto-detection is disabled in
    /// settings, the snippet is stored as plain text instead of guessed.
    pub fn create_snippet(&self, mut draft: SnippetDraft) -> StoreResult<Snippet> {
        let mut state = self.state.write();
        if draft.language.is_none() {
            draft.language = if state.settings.auto_detect_language {
                Some(detect_language(&draft.code, None))
            } else {
                Some(Language::Plaintext)
            };
        }
        let snippet = Snippet::from_draft(draft);
        state.snippets.push(snippet.clone());
        self.persist_snippets(&state)?;
        Ok(snippet)
    }

    /// Apply a partial update to the snippet with `id` and persist.
    pub fn update_snippet(&self, id: Uuid, update: SnippetUpdate) -> StoreResult<Snippet> {
        let mut state = self.state.write();
        let snippet = state
            .snippets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::SnippetNotFound(id))?;
        snippet.apply(update);
        let updated = snippet.clone();
        self.persist_snippets(&state)?;
        Ok(updated)
    }

    pub fn delete_snippet(&self, id: Uuid) -> StoreResult<()> {
        let mut state = self.state.write();
        let before = state.snippets.len();
        state.snippets.retain(|s| s.id != id);
        if state.snippets.len() == before {
            return Err(StoreError::SnippetNotFound(id));
        }
        self.persist_snippets(&state)?;
        Ok(())
    }

    pub fn get_snippet(&self, id: Uuid) -> Option<Snippet> {
        self.state.read().snippets.iter().find(|s| s.id == id).cloned()
    }

    /// Copy a snippet under a fresh id with a " (Copy)" title suffix.
    ///
    /// The copy goes through the normal create path, so it starts neither
    /// favorited nor pinned.
    pub fn duplicate_snippet(&self, id: Uuid) -> StoreResult<Snippet> {
        let original = self
            .get_snippet(id)
            .ok_or(StoreError::SnippetNotFound(id))?;
        self.create_snippet(SnippetDraft {
            title: format!("{} (Copy)", original.title),
            code: original.code,
            description: original.description,
            language: Some(original.language),
            tags: original.tags,
            collection: original.collection,
        })
    }

    pub fn toggle_favorite(&self, id: Uuid) -> StoreResult<Snippet> {
        let current = self
            .get_snippet(id)
            .ok_or(StoreError::SnippetNotFound(id))?;
        self.update_snippet(
            id,
            SnippetUpdate {
                is_favorite: Some(!current.is_favorite),
                ..Default::default()
            },
        )
    }

    pub fn toggle_pinned(&self, id: Uuid) -> StoreResult<Snippet> {
        let current = self
            .get_snippet(id)
            .ok_or(StoreError::SnippetNotFound(id))?;
        self.update_snippet(
            id,
            SnippetUpdate {
                is_pinned: Some(!current.is_pinned),
                ..Default::default()
            },
        )
    }

    /// Union new tags into a snippet's tag list (normalized, deduplicated).
    pub fn add_tags<I>(&self, id: Uuid, new_tags: I) -> StoreResult<Snippet>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let current = self
            .get_snippet(id)
            .ok_or(StoreError::SnippetNotFound(id))?;
        let mut combined = current.tags;
        combined.extend(new_tags.into_iter().map(|t| t.as_ref().to_string()));
        let merged = normalize_tags(combined);
        self.update_snippet(
            id,
            SnippetUpdate {
                tags: Some(merged),
                ..Default::default()
            },
        )
    }

    /// Remove tags from a snippet, matching case-insensitively.
    pub fn remove_tags<I>(&self, id: Uuid, tags_to_remove: I) -> StoreResult<Snippet>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let current = self
            .get_snippet(id)
            .ok_or(StoreError::SnippetNotFound(id))?;
        let remove: Vec<String> = tags_to_remove
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .collect();
        let kept: Vec<String> = current
            .tags
            .into_iter()
            .filter(|tag| !remove.contains(tag))
            .collect();
        self.update_snippet(
            id,
            SnippetUpdate {
                tags: Some(kept),
                ..Default::default()
            },
        )
    }

    /// Every snippet, unfiltered, in insertion order.
    pub fn all_snippets(&self) -> Vec<Snippet> {
        self.state.read().snippets.clone()
    }

    /// Snippets matching a query, pinned first then most recently updated.
    pub fn list_snippets(&self, query: &SnippetQuery) -> Vec<Snippet> {
        let state = self.state.read();
        filter_snippets(&state.snippets, query)
    }

    pub fn snippet_count(&self) -> usize {
        self.state.read().snippets.len()
    }

    /// Every tag in use, with the number of snippets carrying it.
    pub fn all_tags(&self) -> Vec<TagCount> {
        let state = self.state.read();
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for snippet in &state.snippets {
            for tag in &snippet.tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        counts
            .into_iter()
            .map(|(name, count)| TagCount {
                name: name.to_string(),
                count,
            })
            .collect()
    }

    /// Every language in use, with the number of snippets tagged with it.
    pub fn all_languages(&self) -> Vec<LanguageCount> {
        let state = self.state.read();
        let mut counts: BTreeMap<&'static str, (Language, usize)> = BTreeMap::new();
        for snippet in &state.snippets {
            counts
                .entry(snippet.language.as_tag())
                .or_insert((snippet.language, 0))
                .1 += 1;
        }
        counts
            .into_values()
            .map(|(language, count)| LanguageCount { language, count })
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Collections
    // ─────────────────────────────────────────────────────────────────────

    pub fn create_collection(
        &self,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> StoreResult<Collection> {
        let collection = Collection::new(name, description, color);
        let mut state = self.state.write();
        state.collections.push(collection.clone());
        self.persist_collections(&state)?;
        Ok(collection)
    }

    pub fn update_collection(
        &self,
        id: Uuid,
        update: CollectionUpdate,
    ) -> StoreResult<Collection> {
        let mut state = self.state.write();
        let collection = state
            .collections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::CollectionNotFound(id))?;
        collection.apply(update);
        let updated = collection.clone();
        self.persist_collections(&state)?;
        Ok(updated)
    }

    pub fn delete_collection(&self, id: Uuid) -> StoreResult<()> {
        let mut state = self.state.write();
        let before = state.collections.len();
        state.collections.retain(|c| c.id != id);
        if state.collections.len() == before {
            return Err(StoreError::CollectionNotFound(id));
        }
        self.persist_collections(&state)?;
        Ok(())
    }

    pub fn collections(&self) -> Vec<Collection> {
        self.state.read().collections.clone()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────

    pub fn settings(&self) -> AppSettings {
        self.state.read().settings.clone()
    }

    pub fn update_settings(&self, settings: AppSettings) -> StoreResult<()> {
        let mut state = self.state.write();
        state.settings = settings;
        self.storage.set(SETTINGS_KEY, &state.settings)?;
        Ok(())
    }

    fn persist_snippets(&self, state: &State) -> StoreResult<()> {
        self.storage.set(SNIPPETS_KEY, &state.snippets)?;
        Ok(())
    }

    fn persist_collections(&self, state: &State) -> StoreResult<()> {
        self.storage.set(COLLECTIONS_KEY, &state.collections)?;
        Ok(())
    }
}

/// Convenience for the common "search with no filters" case.
impl SnippetStore {
    pub fn search(&self, text: &str) -> Vec<Snippet> {
        self.list_snippets(&SnippetQuery::text(text))
    }

    pub fn list_filtered(&self, filters: SearchFilters) -> Vec<Snippet> {
        self.list_snippets(&SnippetQuery {
            text: String::new(),
            filters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, code: &str) -> SnippetDraft {
        SnippetDraft {
            title: title.to_string(),
            code: code.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = SnippetStore::open_in_memory();
        let snippet = store
            .create_snippet(draft("Hello", "fn main() { let mut x = 1; }"))
            .unwrap();
        assert_eq!(snippet.language, Language::Rust);

        let fetched = store.get_snippet(snippet.id).unwrap();
        assert_eq!(fetched, snippet);
    }

    #[test]
    fn test_update_unknown_id_is_error() {
        let store = SnippetStore::open_in_memory();
        let result = store.update_snippet(Uuid::new_v4(), SnippetUpdate::default());
        assert!(matches!(result, Err(StoreError::SnippetNotFound(_))));
    }

    #[test]
    fn test_auto_detect_respects_settings() {
        let store = SnippetStore::open_in_memory();
        store
            .update_settings(AppSettings {
                auto_detect_language: false,
                ..AppSettings::default()
            })
            .unwrap();

        let snippet = store
            .create_snippet(draft("No detection", "fn main() {}"))
            .unwrap();
        assert_eq!(snippet.language, Language::Plaintext);
    }

    #[test]
    fn test_duplicate_resets_flags() {
        let store = SnippetStore::open_in_memory();
        let original = store.create_snippet(draft("Orig", "x")).unwrap();
        store.toggle_favorite(original.id).unwrap();
        store.toggle_pinned(original.id).unwrap();

        let copy = store.duplicate_snippet(original.id).unwrap();
        assert_eq!(copy.title, "Orig (Copy)");
        assert_ne!(copy.id, original.id);
        assert!(!copy.is_favorite);
        assert!(!copy.is_pinned);
    }

    #[test]
    fn test_tag_union_and_removal() {
        let store = SnippetStore::open_in_memory();
        let snippet = store.create_snippet(draft("Tagged", "x")).unwrap();

        let tagged = store
            .add_tags(snippet.id, ["Rust", "cli", "rust"])
            .unwrap();
        assert_eq!(tagged.tags, vec!["rust", "cli"]);

        let untagged = store.remove_tags(snippet.id, ["RUST"]).unwrap();
        assert_eq!(untagged.tags, vec!["cli"]);
    }

    #[test]
    fn test_counts() {
        let store = SnippetStore::open_in_memory();
        store
            .create_snippet(SnippetDraft {
                tags: vec!["web".to_string()],
                ..draft("A", "def f():\n    print(1)")
            })
            .unwrap();
        store
            .create_snippet(SnippetDraft {
                tags: vec!["web".to_string(), "api".to_string()],
                ..draft("B", "def g():\n    print(2)")
            })
            .unwrap();

        let tags = store.all_tags();
        let web = tags.iter().find(|t| t.name == "web").unwrap();
        assert_eq!(web.count, 2);

        let languages = store.all_languages();
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].language, Language::Python);
        assert_eq!(languages[0].count, 2);
    }

    #[test]
    fn test_collection_crud() {
        let store = SnippetStore::open_in_memory();
        let collection = store
            .create_collection("Web", Some("Frontend things"), Some("#61DAFB"))
            .unwrap();

        let renamed = store
            .update_collection(
                collection.id,
                CollectionUpdate {
                    name: Some("Frontend".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "Frontend");

        store.delete_collection(collection.id).unwrap();
        assert!(store.collections().is_empty());
        assert!(matches!(
            store.delete_collection(collection.id),
            Err(StoreError::CollectionNotFound(_))
        ));
    }
}
