//! Hash-map twin of the postgres adapter.
//!
//! Backs the test suites and `AppState::in_memory`. Semantics must stay
//! identical to `postgres`: same sort order, same duplicate-email conflict,
//! same patch application.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{Snippet, User};
use crate::store::{NewSnippet, NewUser, SnippetPatch, SnippetQuery, SnippetStore, UserStore};

pub struct MemoryStore {
    snippets: Arc<RwLock<HashMap<Uuid, Snippet>>>,
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            snippets: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnippetStore for MemoryStore {
    async fn insert(&self, new: NewSnippet) -> Result<Snippet, StoreError> {
        let now = Utc::now();
        let snippet = Snippet {
            id: Uuid::new_v4(),
            owner_id: new.owner_id,
            title: new.title,
            description: new.description,
            code: new.code,
            language: new.language,
            tags: new.tags,
            is_public: new.is_public,
            favorites: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let mut snippets = self
            .snippets
            .write()
            .map_err(|_| StoreError::LockPoisoned("snippets"))?;
        snippets.insert(snippet.id, snippet.clone());
        Ok(snippet)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Snippet>, StoreError> {
        let snippets = self
            .snippets
            .read()
            .map_err(|_| StoreError::LockPoisoned("snippets"))?;
        Ok(snippets.get(&id).cloned())
    }

    async fn find(&self, query: &SnippetQuery) -> Result<Vec<Snippet>, StoreError> {
        let snippets = self
            .snippets
            .read()
            .map_err(|_| StoreError::LockPoisoned("snippets"))?;
        let mut matched: Vec<Snippet> = snippets
            .values()
            .filter(|s| query.matches(s))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn update(&self, id: Uuid, patch: SnippetPatch) -> Result<Option<Snippet>, StoreError> {
        let mut snippets = self
            .snippets
            .write()
            .map_err(|_| StoreError::LockPoisoned("snippets"))?;
        let Some(snippet) = snippets.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            snippet.title = title;
        }
        if let Some(description) = patch.description {
            snippet.description = description;
        }
        if let Some(code) = patch.code {
            snippet.code = code;
        }
        if let Some(language) = patch.language {
            snippet.language = language;
        }
        if let Some(tags) = patch.tags {
            snippet.tags = tags;
        }
        if let Some(is_public) = patch.is_public {
            snippet.is_public = is_public;
        }
        if let Some(favorites) = patch.favorites {
            snippet.favorites = favorites;
        }
        snippet.updated_at = Utc::now();

        Ok(Some(snippet.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut snippets = self
            .snippets
            .write()
            .map_err(|_| StoreError::LockPoisoned("snippets"))?;
        Ok(snippets.remove(&id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| StoreError::LockPoisoned("users"))?;
        if users.values().any(|u| u.email == new.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| StoreError::LockPoisoned("users"))?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| StoreError::LockPoisoned("users"))?;
        Ok(users.get(&id).cloned())
    }
}
