//! # bookshelf-api
//!
//! HTTP API layer for Bookshelf built on Axum.
//!
//! Provides the REST endpoints for authors and books, request validation,
//! the response envelope, error mapping and middleware (CORS, logging,
//! tracing, compression).

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
