//! sqlx adapters over the `users` and `snippets` tables.
//!
//! Queries use the runtime API so the crate builds without a configured
//! database. The listing query is composed with `QueryBuilder`; its clauses
//! mirror `SnippetQuery::matches` exactly.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{Snippet, User};
use crate::store::{NewSnippet, NewUser, SnippetPatch, SnippetQuery, SnippetStore, UserStore};

pub struct PgSnippetStore {
    pool: Pool<Postgres>,
}

impl PgSnippetStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PgSnippetStore { pool }
    }
}

/// `%`, `_` and the escape character itself must not act as wildcards when
/// they appear in user-supplied search text.
fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

fn select_snippets(query: &SnippetQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<'static, Postgres> =
        QueryBuilder::new("SELECT * FROM snippets WHERE (is_public OR owner_id = ");
    qb.push_bind(query.viewer).push(")");

    if let Some(language) = &query.language {
        qb.push(" AND language = ").push_bind(language.clone());
    }
    if let Some(is_public) = query.is_public {
        qb.push(" AND is_public = ").push_bind(is_public);
    }
    if !query.tags.is_empty() {
        qb.push(" AND tags @> ").push_bind(query.tags.clone());
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR code ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE ")
            .push_bind(pattern)
            .push("))");
    }

    qb.push(" ORDER BY created_at DESC");
    qb
}

#[async_trait]
impl SnippetStore for PgSnippetStore {
    async fn insert(&self, new: NewSnippet) -> Result<Snippet, StoreError> {
        let snippet = sqlx::query_as::<_, Snippet>(
            r#"
            INSERT INTO snippets (owner_id, title, description, code, language, tags, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.owner_id)
        .bind(new.title)
        .bind(new.description)
        .bind(new.code)
        .bind(new.language.as_str())
        .bind(new.tags)
        .bind(new.is_public)
        .fetch_one(&self.pool)
        .await?;

        Ok(snippet)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Snippet>, StoreError> {
        let snippet = sqlx::query_as::<_, Snippet>("SELECT * FROM snippets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(snippet)
    }

    async fn find(&self, query: &SnippetQuery) -> Result<Vec<Snippet>, StoreError> {
        let snippets = select_snippets(query)
            .build_query_as::<Snippet>()
            .fetch_all(&self.pool)
            .await?;
        Ok(snippets)
    }

    async fn update(&self, id: Uuid, patch: SnippetPatch) -> Result<Option<Snippet>, StoreError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE snippets SET updated_at = now()");

        if let Some(title) = patch.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(description) = patch.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(code) = patch.code {
            qb.push(", code = ").push_bind(code);
        }
        if let Some(language) = patch.language {
            qb.push(", language = ").push_bind(language.as_str());
        }
        if let Some(tags) = patch.tags {
            qb.push(", tags = ").push_bind(tags);
        }
        if let Some(is_public) = patch.is_public {
            qb.push(", is_public = ").push_bind(is_public);
        }
        if let Some(favorites) = patch.favorites {
            qb.push(", favorites = ").push_bind(favorites);
        }

        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        let snippet = qb
            .build_query_as::<Snippet>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(snippet)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct PgUserStore {
    pool: Pool<Postgres>,
}

impl PgUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PgUserStore { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        let res = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.message().contains("users_email_key") => {
                Err(StoreError::DuplicateEmail)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
