pub mod guard;
mod snippet_service;

pub use snippet_service::{CreateSnippet, SnippetFilters, SnippetService, UpdateSnippet};
