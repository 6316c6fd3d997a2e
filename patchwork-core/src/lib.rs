//! PatchWork Core - Rust business logic for snippet management
//!
//! This library implements the core of the PatchWork code-snippet manager:
//! typed models, flat key-value persistence, an in-memory store with search
//! and filtering, and heuristic language detection.
//!
//! # Architecture
//! - `models`: Data models (Snippet, Collection, AppSettings, etc.)
//! - `storage`: Key-value persistence over a single JSON file
//! - `store`: Main API object owning storage and state
//! - `search`: Query matching, filtering, and ordering
//! - `language`: Heuristic language detection from text and filenames
//! - `demo_data`: Sample catalog for first-run seeding

pub mod demo_data;
pub mod language;
pub mod models;
pub mod search;
pub mod storage;
pub mod store;

pub use demo_data::{load_sample_data, seed_sample_data};
pub use language::{
    detect_language, language_display_name, supported_languages, Language,
};
pub use models::*;
pub use search::SnippetQuery;
pub use storage::{Storage, StorageError, StorageResult};
pub use store::{SnippetStore, StoreError, StoreResult};
