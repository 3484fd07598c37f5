use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    errors::ServiceError,
    models::AuthUser,
    services::{CreateSnippet, SnippetFilters, UpdateSnippet},
    AppState,
};

/// Query-string shape of the listing filters. `tags` arrives as a single
/// comma-separated parameter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSnippetsQuery {
    pub language: Option<String>,
    pub search: Option<String>,
    pub tags: Option<String>,
    pub is_public: Option<bool>,
}

impl From<ListSnippetsQuery> for SnippetFilters {
    fn from(query: ListSnippetsQuery) -> Self {
        let tags = query
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        SnippetFilters {
            language: query.language,
            search: query.search,
            tags,
            is_public: query.is_public,
        }
    }
}

#[get("")]
pub async fn list_snippets(
    app_data: web::Data<AppState>,
    query: web::Query<ListSnippetsQuery>,
    auth: web::ReqData<AuthUser>,
) -> Result<impl Responder, ServiceError> {
    let snippets = app_data
        .snippets
        .list(auth.id, query.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(snippets))
}

#[post("")]
pub async fn create_snippet(
    app_data: web::Data<AppState>,
    body: web::Json<CreateSnippet>,
    auth: web::ReqData<AuthUser>,
) -> Result<impl Responder, ServiceError> {
    let snippet = app_data.snippets.create(auth.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(snippet))
}

#[get("/{snippetId}")]
pub async fn get_snippet(
    app_data: web::Data<AppState>,
    path: web::Path<Uuid>,
    auth: web::ReqData<AuthUser>,
) -> Result<impl Responder, ServiceError> {
    let snippet = app_data.snippets.get(auth.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(snippet))
}

#[put("/{snippetId}")]
pub async fn update_snippet(
    app_data: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateSnippet>,
    auth: web::ReqData<AuthUser>,
) -> Result<impl Responder, ServiceError> {
    let snippet = app_data
        .snippets
        .update(auth.id, path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(snippet))
}

#[delete("/{snippetId}")]
pub async fn delete_snippet(
    app_data: web::Data<AppState>,
    path: web::Path<Uuid>,
    auth: web::ReqData<AuthUser>,
) -> Result<impl Responder, ServiceError> {
    app_data.snippets.delete(auth.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Snippet deleted successfully" })))
}

#[post("/{snippetId}/favorite")]
pub async fn toggle_favorite(
    app_data: web::Data<AppState>,
    path: web::Path<Uuid>,
    auth: web::ReqData<AuthUser>,
) -> Result<impl Responder, ServiceError> {
    let snippet = app_data
        .snippets
        .toggle_favorite(auth.id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(snippet))
}
