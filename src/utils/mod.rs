mod auth;

pub use auth::{validate_email, validate_name, validate_password};
