use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::services::guard::DenyReason;

/// Failures surfaced by the store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Everything a snippet operation can fail with. Handlers propagate these
/// with `?`; the `ResponseError` impl maps each kind to its status code.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },
    #[error("Snippet not found")]
    NotFound,
    #[error("{0}")]
    Denied(DenyReason),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn validation(field: &'static str, message: &'static str) -> Self {
        ServiceError::Validation { field, message }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Denied(_) => StatusCode::FORBIDDEN,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Validation { field, message } => HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": message, "field": field })),
            ServiceError::NotFound => {
                HttpResponse::NotFound().json(serde_json::json!({ "error": self.to_string() }))
            }
            ServiceError::Denied(reason) => {
                HttpResponse::Forbidden().json(serde_json::json!({ "error": reason.to_string() }))
            }
            ServiceError::Store(err) => {
                log::error!("store error: {err}");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Server error" }))
            }
        }
    }
}
