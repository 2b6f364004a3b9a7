//! Route definitions for the Bookshelf HTTP API.
//!
//! Catalog routes are mounted under `/api`; the welcome text lives at `/`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with every route and the request logger.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(author_routes())
        .merge(book_routes())
        .merge(health_routes());

    Router::new()
        .route("/", get(handlers::health::welcome))
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Author CRUD
fn author_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/authors",
            post(handlers::author::create_author).get(handlers::author::list_authors),
        )
        .route(
            "/authors/{id}",
            get(handlers::author::get_author)
                .patch(handlers::author::update_author)
                .delete(handlers::author::delete_author),
        )
}

/// Book CRUD
fn book_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/books",
            post(handlers::book::create_book).get(handlers::book::list_books),
        )
        .route(
            "/books/{id}",
            get(handlers::book::get_book)
                .patch(handlers::book::update_book)
                .delete(handlers::book::delete_book),
        )
}

/// Health
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
