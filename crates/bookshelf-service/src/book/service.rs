//! Book operations: create, list, view, update and remove.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use bookshelf_core::error::AppError;
use bookshelf_core::types::{PageRequest, PaginatedData, Patch};
use bookshelf_database::repositories::{AuthorRepository, BookRepository};
use bookshelf_entity::{Book, BookFilter, BookPatch, BookWithAuthor, NewBook};

/// Handles book operations.
#[derive(Debug, Clone)]
pub struct BookService {
    /// Book repository.
    books: Arc<BookRepository>,
    /// Author repository, for ownership checks.
    authors: Arc<AuthorRepository>,
}

impl BookService {
    /// Creates a new book service.
    pub fn new(books: Arc<BookRepository>, authors: Arc<AuthorRepository>) -> Self {
        Self { books, authors }
    }

    /// Creates a book owned by an existing author.
    pub async fn create(&self, draft: NewBook) -> Result<Book, AppError> {
        self.ensure_author(draft.author_id).await?;
        let book = self.books.base().create(draft).await?;
        info!(book_id = %book.meta.id, author_id = %book.author_id, "Book created");
        Ok(book)
    }

    /// Lists books matching the filter, one page at a time.
    pub async fn find_all(
        &self,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> Result<PaginatedData<Book>, AppError> {
        let (items, total) = self.books.search(filter, page).await?;
        Ok(PaginatedData::new(items, total, page))
    }

    /// Gets a book together with its author.
    pub async fn find_one(&self, id: Uuid) -> Result<BookWithAuthor, AppError> {
        self.books
            .find_with_author(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Applies the present fields of `patch` to a book.
    pub async fn update(&self, id: Uuid, patch: BookPatch) -> Result<Book, AppError> {
        if let Some(author_id) = patch.author_id {
            self.ensure_author(author_id).await?;
        }
        let book = self
            .books
            .update_by_id(id, &Patch::from(patch))
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(book_id = %id, "Book updated");
        Ok(book)
    }

    /// Permanently removes a book.
    pub async fn remove(&self, id: Uuid) -> Result<Book, AppError> {
        let book = self
            .books
            .delete_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(book_id = %id, "Book removed");
        Ok(book)
    }

    async fn ensure_author(&self, author_id: Uuid) -> Result<(), AppError> {
        if self.authors.find_by_id(author_id).await?.is_none() {
            warn!(author_id = %author_id, "Rejected book for unknown author");
            return Err(AppError::bad_request(format!(
                "Author with id {author_id} not found"
            )));
        }
        Ok(())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Book with id {id} not found"))
}
