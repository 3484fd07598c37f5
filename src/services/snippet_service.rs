//! Snippet lifecycle operations.
//!
//! Every operation takes the requester's identity explicitly; there is no
//! ambient current user. Field validation happens here, before anything
//! reaches the store, and the guard decides single-item access. A read
//! denial on a private snippet is reported as `NotFound` so a requester
//! cannot probe for the existence of snippets they cannot see; write
//! denials stay distinguishable as `Denied`.

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::{Language, Snippet, DESCRIPTION_MAX, TAG_MAX, TITLE_MAX};
use crate::services::guard::{self, Operation};
use crate::store::{NewSnippet, SnippetPatch, SnippetQuery, SnippetStore};

// ______________________________________ Inputs ______________________________________

/// Listing filters as they arrive from the query string. All optional; the
/// language sentinel `"All"` and blank search/tags are normalized away when
/// the predicate is built.
#[derive(Debug, Clone, Default)]
pub struct SnippetFilters {
    pub language: Option<String>,
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Update payload. Absent fields are left untouched; unknown fields in the
/// request body (an `ownerId`, say) are dropped during deserialization and
/// never reach the store.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

// ______________________________________ Validation ______________________________________

fn validate_title(title: &str) -> Result<String, ServiceError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ServiceError::validation("title", "Title is required"));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(ServiceError::validation(
            "title",
            "Title must be at most 100 characters",
        ));
    }
    Ok(title.to_string())
}

fn validate_description(description: &str) -> Result<String, ServiceError> {
    let description = description.trim();
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(ServiceError::validation(
            "description",
            "Description must be at most 500 characters",
        ));
    }
    Ok(description.to_string())
}

fn validate_code(code: &str) -> Result<String, ServiceError> {
    if code.trim().is_empty() {
        return Err(ServiceError::validation("code", "Code is required"));
    }
    Ok(code.to_string())
}

fn validate_language(raw: &str) -> Result<Language, ServiceError> {
    Language::parse(raw).ok_or(ServiceError::validation("language", "Unsupported language"))
}

/// Tags are stored as given (order kept, duplicates permitted); only the
/// per-tag length is enforced.
fn validate_tags(tags: &[String]) -> Result<Vec<String>, ServiceError> {
    if tags.iter().any(|tag| tag.chars().count() > TAG_MAX) {
        return Err(ServiceError::validation(
            "tags",
            "Tags must be at most 50 characters",
        ));
    }
    Ok(tags.to_vec())
}

// ______________________________________ Service ______________________________________

#[derive(Clone)]
pub struct SnippetService {
    store: Arc<dyn SnippetStore>,
}

impl SnippetService {
    pub fn new(store: Arc<dyn SnippetStore>) -> Self {
        SnippetService { store }
    }

    /// Visible snippets for this requester, newest first. An empty result
    /// is a normal outcome, never an error.
    pub async fn list(
        &self,
        requester: Uuid,
        filters: SnippetFilters,
    ) -> Result<Vec<Snippet>, ServiceError> {
        let mut query = SnippetQuery::new(requester).tags(filters.tags);
        if let Some(language) = &filters.language {
            query = query.language(language);
        }
        if let Some(search) = &filters.search {
            query = query.search(search);
        }
        if let Some(is_public) = filters.is_public {
            query = query.visibility(is_public);
        }
        Ok(self.store.find(&query).await?)
    }

    pub async fn get(&self, requester: Uuid, id: Uuid) -> Result<Snippet, ServiceError> {
        let snippet = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        // Existence hiding: an unreadable snippet looks absent.
        guard::check(&snippet, requester, Operation::Read)
            .map_err(|_| ServiceError::NotFound)?;
        Ok(snippet)
    }

    pub async fn create(
        &self,
        requester: Uuid,
        input: CreateSnippet,
    ) -> Result<Snippet, ServiceError> {
        let new = NewSnippet {
            owner_id: requester,
            title: validate_title(&input.title)?,
            description: validate_description(&input.description)?,
            code: validate_code(&input.code)?,
            language: validate_language(&input.language)?,
            tags: validate_tags(&input.tags)?,
            is_public: input.is_public,
        };
        Ok(self.store.insert(new).await?)
    }

    pub async fn update(
        &self,
        requester: Uuid,
        id: Uuid,
        input: UpdateSnippet,
    ) -> Result<Snippet, ServiceError> {
        let snippet = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        guard::check(&snippet, requester, Operation::Update).map_err(ServiceError::Denied)?;

        let patch = SnippetPatch {
            title: input.title.as_deref().map(validate_title).transpose()?,
            description: input
                .description
                .as_deref()
                .map(validate_description)
                .transpose()?,
            code: input.code.as_deref().map(validate_code).transpose()?,
            language: input
                .language
                .as_deref()
                .map(validate_language)
                .transpose()?,
            tags: input.tags.as_deref().map(validate_tags).transpose()?,
            is_public: input.is_public,
            favorites: None,
        };

        self.store
            .update(id, patch)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    pub async fn delete(&self, requester: Uuid, id: Uuid) -> Result<(), ServiceError> {
        let snippet = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        guard::check(&snippet, requester, Operation::Delete).map_err(ServiceError::Denied)?;

        if self.store.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    /// Flips the requester's membership in the snippet's favorites set.
    /// Requires read access; the read-modify-write is last-write-wins under
    /// concurrent toggles, which the low-contention use case accepts.
    pub async fn toggle_favorite(
        &self,
        requester: Uuid,
        id: Uuid,
    ) -> Result<Snippet, ServiceError> {
        let snippet = self.get(requester, id).await?;

        let mut favorites = snippet.favorites;
        if let Some(pos) = favorites.iter().position(|&user| user == requester) {
            favorites.remove(pos);
        } else {
            favorites.push(requester);
        }

        let patch = SnippetPatch {
            favorites: Some(favorites),
            ..SnippetPatch::default()
        };
        self.store
            .update(id, patch)
            .await?
            .ok_or(ServiceError::NotFound)
    }
}
