use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::services::SnippetService;
use crate::store::memory::MemoryStore;
use crate::store::postgres::{PgSnippetStore, PgUserStore};
use crate::store::UserStore;

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

pub struct AppState {
    pub snippets: SnippetService,
    pub users: Arc<dyn UserStore>,
    pub jwt_secret: String,
}

impl AppState {
    pub fn postgres(db: Pool<Postgres>, jwt_secret: String) -> Self {
        AppState {
            snippets: SnippetService::new(Arc::new(PgSnippetStore::new(db.clone()))),
            users: Arc::new(PgUserStore::new(db)),
            jwt_secret,
        }
    }

    /// Backed by process-local hash maps; used by the test suites and for
    /// running the server without a database.
    pub fn in_memory(jwt_secret: String) -> Self {
        let store = Arc::new(MemoryStore::new());
        AppState {
            snippets: SnippetService::new(store.clone()),
            users: store,
            jwt_secret,
        }
    }
}
