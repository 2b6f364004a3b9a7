//! Author handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use bookshelf_core::types::PageRequest;
use bookshelf_entity::{Author, AuthorWithBooks};

use crate::dto::request::{AuthorListQuery, CreateAuthorRequest, UpdateAuthorRequest};
use crate::dto::response::{ApiResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, ValidatedQuery, parse_uuid};
use crate::state::AppState;

/// POST /api/authors
pub async fn create_author(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateAuthorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Author>>), ApiError> {
    let author = state.author_service.create(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED, author)),
    ))
}

/// GET /api/authors
pub async fn list_authors(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AuthorListQuery>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> Result<Json<PaginatedResponse<Author>>, ApiError> {
    let result = state
        .author_service
        .find_all(&query.into(), &page)
        .await?;
    Ok(Json(PaginatedResponse::ok(result)))
}

/// GET /api/authors/{id}
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AuthorWithBooks>>, ApiError> {
    let id = parse_uuid(&id)?;
    let author = state.author_service.find_one(id).await?;
    Ok(Json(ApiResponse::ok(author)))
}

/// PATCH /api/authors/{id}
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateAuthorRequest>,
) -> Result<Json<ApiResponse<Author>>, ApiError> {
    let id = parse_uuid(&id)?;
    let author = state.author_service.update(id, req.into()).await?;
    Ok(Json(ApiResponse::ok(author)))
}

/// DELETE /api/authors/{id}
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_uuid(&id)?;
    state.author_service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
