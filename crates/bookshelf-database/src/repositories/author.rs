//! Author repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use bookshelf_core::config::DeletedRowPolicy;
use bookshelf_core::result::RepoResult;
use bookshelf_core::types::{Criteria, Filter, FilterField, PageRequest, Patch, SortDirection};
use bookshelf_entity::{Author, AuthorFilter, AuthorWithBooks, Book};

use super::base::Repository;

/// Repository for author search, lookups and relation expansion.
#[derive(Debug, Clone)]
pub struct AuthorRepository {
    authors: Repository<Author>,
    books: Repository<Book>,
    policy: DeletedRowPolicy,
}

impl AuthorRepository {
    /// Create a new author repository.
    pub fn new(pool: SqlitePool, policy: DeletedRowPolicy) -> Self {
        Self {
            authors: Repository::new(pool.clone()),
            books: Repository::new(pool),
            policy,
        }
    }

    /// The generic repository, without the deleted-row policy applied.
    pub fn base(&self) -> &Repository<Author> {
        &self.authors
    }

    /// Search authors whose first or last name contains the search term.
    pub async fn search(
        &self,
        filter: &AuthorFilter,
        page: &PageRequest,
    ) -> RepoResult<(Vec<Author>, u64)> {
        let criteria = match filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(term) => Criteria::any_of([
                Filter::from(FilterField::contains("firstName", term)),
                Filter::from(FilterField::contains("lastName", term)),
            ]),
            None => Criteria::all(),
        };
        self.authors.find(&self.scope(criteria), Some(page)).await
    }

    /// Find an author by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Author>> {
        self.authors.find_one(&self.scope(Criteria::by_id(id))).await
    }

    /// Find an author together with their books, oldest first.
    pub async fn find_with_books(&self, id: Uuid) -> RepoResult<Option<AuthorWithBooks>> {
        let Some(author) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let criteria = self.scope(Criteria::from(FilterField::eq("authorId", id)));
        let order = PageRequest::unpaged().sorted_by("createdAt", SortDirection::Asc);
        let (books, _) = self.books.find(&criteria, Some(&order)).await?;
        Ok(Some(AuthorWithBooks { author, books }))
    }

    /// Apply a patch to a visible author.
    pub async fn update_by_id(&self, id: Uuid, patch: &Patch) -> RepoResult<Option<Author>> {
        self.authors.update(&self.scope(Criteria::by_id(id)), patch).await
    }

    /// Permanently remove a visible author. Their books go with them.
    pub async fn delete_by_id(&self, id: Uuid) -> RepoResult<Option<Author>> {
        self.authors.delete(&self.scope(Criteria::by_id(id))).await
    }

    /// Mark an author as deleted without removing the row.
    ///
    /// Returns `None` when the author is absent or already soft-deleted.
    pub async fn soft_delete(&self, id: Uuid) -> RepoResult<Option<Author>> {
        let criteria = Criteria::by_id(id).intersect(FilterField::is_null("deletedAt"));
        let patch = Patch::new().set("deletedAt", Utc::now());
        self.authors.update(&criteria, &patch).await
    }

    fn scope(&self, criteria: Criteria) -> Criteria {
        match self.policy {
            DeletedRowPolicy::Exclude => criteria.intersect(FilterField::is_null("deletedAt")),
            DeletedRowPolicy::Include => criteria,
        }
    }
}
