//! Book handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use bookshelf_core::types::PageRequest;
use bookshelf_entity::{Book, BookWithAuthor};

use crate::dto::request::{BookListQuery, CreateBookRequest, UpdateBookRequest};
use crate::dto::response::{ApiResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, ValidatedQuery, parse_uuid};
use crate::state::AppState;

/// POST /api/books
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateBookRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Book>>), ApiError> {
    let book = state.book_service.create(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED, book)),
    ))
}

/// GET /api/books
pub async fn list_books(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BookListQuery>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> Result<Json<PaginatedResponse<Book>>, ApiError> {
    let result = state.book_service.find_all(&query.into(), &page).await?;
    Ok(Json(PaginatedResponse::ok(result)))
}

/// GET /api/books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookWithAuthor>>, ApiError> {
    let id = parse_uuid(&id)?;
    let book = state.book_service.find_one(id).await?;
    Ok(Json(ApiResponse::ok(book)))
}

/// PATCH /api/books/{id}
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateBookRequest>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let id = parse_uuid(&id)?;
    let book = state.book_service.update(id, req.into()).await?;
    Ok(Json(ApiResponse::ok(book)))
}

/// DELETE /api/books/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_uuid(&id)?;
    state.book_service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
