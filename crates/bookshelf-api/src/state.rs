//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use bookshelf_core::config::AppConfig;
use bookshelf_database::DatabasePool;
use bookshelf_database::repositories::{AuthorRepository, BookRepository};
use bookshelf_service::{AuthorService, BookService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// SQLite connection pool
    pub db: DatabasePool,
    /// Author service
    pub author_service: Arc<AuthorService>,
    /// Book service
    pub book_service: Arc<BookService>,
}

impl AppState {
    /// Wires repositories and services on top of an open pool.
    pub fn new(config: AppConfig, db: DatabasePool) -> Self {
        let policy = config.database.deleted_rows;
        let author_repo = Arc::new(AuthorRepository::new(db.pool().clone(), policy));
        let book_repo = Arc::new(BookRepository::new(db.pool().clone(), policy));

        let author_service = Arc::new(AuthorService::new(Arc::clone(&author_repo)));
        let book_service = Arc::new(BookService::new(book_repo, author_repo));

        Self {
            config: Arc::new(config),
            db,
            author_service,
            book_service,
        }
    }
}
