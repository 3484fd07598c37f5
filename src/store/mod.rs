//! Persistence ports and the listing predicate.
//!
//! `SnippetStore` and `UserStore` are the seams between the service layer
//! and storage; `postgres` talks to the real database and `memory` is the
//! hash-map twin the test suites run against. `SnippetQuery` is the single
//! predicate both adapters evaluate, so listing semantics are defined once.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{Language, Snippet, User};

// ______________________________________ Snippet query ______________________________________

/// The combined filter + visibility predicate for a listing request.
///
/// Built for a concrete viewer; the visibility rule
/// `is_public OR owner_id == viewer` is always part of the predicate and
/// cannot be switched off by any filter combination.
#[derive(Debug, Clone)]
pub struct SnippetQuery {
    pub viewer: Uuid,
    pub language: Option<String>,
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub is_public: Option<bool>,
}

impl SnippetQuery {
    pub fn new(viewer: Uuid) -> Self {
        SnippetQuery {
            viewer,
            language: None,
            search: None,
            tags: Vec::new(),
            is_public: None,
        }
    }

    /// `"All"` and the empty string are sentinels for "no language
    /// constraint". Any other value becomes an exact-match clause, even one
    /// outside the supported set (it then matches nothing, since stored
    /// snippets always carry a supported language).
    pub fn language(mut self, raw: &str) -> Self {
        if !raw.is_empty() && raw != "All" {
            self.language = Some(raw.to_string());
        }
        self
    }

    /// Case-insensitive substring search over title, description, code and
    /// tags. Blank input leaves the query unconstrained.
    pub fn search(mut self, text: &str) -> Self {
        let text = text.trim();
        if !text.is_empty() {
            self.search = Some(text.to_string());
        }
        self
    }

    /// Superset semantics: every listed tag must be present on a matching
    /// snippet. An empty list never filters.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn visibility(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    /// In-memory evaluation of the predicate. The SQL the postgres adapter
    /// renders must agree with this function clause for clause.
    pub fn matches(&self, snippet: &Snippet) -> bool {
        if !snippet.is_public && snippet.owner_id != self.viewer {
            return false;
        }
        if let Some(language) = &self.language {
            if snippet.language.as_str() != language {
                return false;
            }
        }
        if let Some(is_public) = self.is_public {
            if snippet.is_public != is_public {
                return false;
            }
        }
        if !self
            .tags
            .iter()
            .all(|tag| snippet.tags.iter().any(|t| t == tag))
        {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = snippet.title.to_lowercase().contains(&needle)
                || snippet.description.to_lowercase().contains(&needle)
                || snippet.code.to_lowercase().contains(&needle)
                || snippet
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

// ______________________________________ Ports ______________________________________

#[derive(Debug, Clone)]
pub struct NewSnippet {
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: Language,
    pub tags: Vec<String>,
    pub is_public: bool,
}

/// Mutable snippet fields. `None` leaves a field untouched; `owner_id` and
/// `created_at` are not patchable at all.
#[derive(Debug, Clone, Default)]
pub struct SnippetPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub language: Option<Language>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub favorites: Option<Vec<Uuid>>,
}

#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Assigns the id and both timestamps.
    async fn insert(&self, new: NewSnippet) -> Result<Snippet, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Snippet>, StoreError>;

    /// Evaluates the predicate and returns matches newest first. The sort
    /// order is part of this contract, not an adapter detail.
    async fn find(&self, query: &SnippetQuery) -> Result<Vec<Snippet>, StoreError>;

    /// Applies the patch and bumps `updated_at`; `None` if the id is absent.
    async fn update(&self, id: Uuid, patch: SnippetPatch) -> Result<Option<Snippet>, StoreError>;

    /// `true` if a record was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    /// Already trimmed and lowercased by the caller.
    pub email: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `StoreError::DuplicateEmail` if the email is taken.
    async fn insert(&self, new: NewUser) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}
