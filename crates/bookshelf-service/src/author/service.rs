//! Author operations: create, list, view, update and remove.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use bookshelf_core::error::AppError;
use bookshelf_core::types::{PageRequest, PaginatedData, Patch};
use bookshelf_database::repositories::AuthorRepository;
use bookshelf_entity::{Author, AuthorFilter, AuthorPatch, AuthorWithBooks, NewAuthor};

/// Handles author operations.
#[derive(Debug, Clone)]
pub struct AuthorService {
    /// Author repository.
    authors: Arc<AuthorRepository>,
}

impl AuthorService {
    /// Creates a new author service.
    pub fn new(authors: Arc<AuthorRepository>) -> Self {
        Self { authors }
    }

    /// Creates an author.
    pub async fn create(&self, draft: NewAuthor) -> Result<Author, AppError> {
        let author = self.authors.base().create(draft).await?;
        info!(author_id = %author.meta.id, "Author created");
        Ok(author)
    }

    /// Lists authors matching the filter, one page at a time.
    pub async fn find_all(
        &self,
        filter: &AuthorFilter,
        page: &PageRequest,
    ) -> Result<PaginatedData<Author>, AppError> {
        let (items, total) = self.authors.search(filter, page).await?;
        Ok(PaginatedData::new(items, total, page))
    }

    /// Gets an author together with their books.
    pub async fn find_one(&self, id: Uuid) -> Result<AuthorWithBooks, AppError> {
        self.authors
            .find_with_books(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Applies the present fields of `patch` to an author.
    pub async fn update(&self, id: Uuid, patch: AuthorPatch) -> Result<Author, AppError> {
        let author = self
            .authors
            .update_by_id(id, &Patch::from(patch))
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(author_id = %id, "Author updated");
        Ok(author)
    }

    /// Permanently removes an author and their books.
    pub async fn remove(&self, id: Uuid) -> Result<Author, AppError> {
        let author = self
            .authors
            .delete_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(author_id = %id, "Author removed");
        Ok(author)
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Author with id {id} not found"))
}
