pub mod auth_handler;
pub mod snippet_handler;
