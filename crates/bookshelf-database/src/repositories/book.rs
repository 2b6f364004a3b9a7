//! Book repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use bookshelf_core::config::DeletedRowPolicy;
use bookshelf_core::result::RepoResult;
use bookshelf_core::types::{Criteria, Filter, FilterField, PageRequest, Patch};
use bookshelf_entity::{Author, Book, BookFilter, BookWithAuthor};

use super::base::Repository;

/// Repository for book search, lookups and relation expansion.
#[derive(Debug, Clone)]
pub struct BookRepository {
    books: Repository<Book>,
    authors: Repository<Author>,
    policy: DeletedRowPolicy,
}

impl BookRepository {
    /// Create a new book repository.
    pub fn new(pool: SqlitePool, policy: DeletedRowPolicy) -> Self {
        Self {
            books: Repository::new(pool.clone()),
            authors: Repository::new(pool),
            policy,
        }
    }

    /// The generic repository, without the deleted-row policy applied.
    pub fn base(&self) -> &Repository<Book> {
        &self.books
    }

    /// Search books by title or ISBN, optionally restricted to one author.
    pub async fn search(
        &self,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> RepoResult<(Vec<Book>, u64)> {
        self.books.find(&self.criteria_for(filter), Some(page)).await
    }

    /// Find a book by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Book>> {
        self.books.find_one(&self.scope(Criteria::by_id(id))).await
    }

    /// Find a book together with its author.
    pub async fn find_with_author(&self, id: Uuid) -> RepoResult<Option<BookWithAuthor>> {
        let Some(book) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let author = self
            .authors
            .find_one(&self.scope(Criteria::by_id(book.author_id)))
            .await?;
        Ok(Some(BookWithAuthor { book, author }))
    }

    /// Apply a patch to a visible book.
    pub async fn update_by_id(&self, id: Uuid, patch: &Patch) -> RepoResult<Option<Book>> {
        self.books.update(&self.scope(Criteria::by_id(id)), patch).await
    }

    /// Permanently remove a visible book.
    pub async fn delete_by_id(&self, id: Uuid) -> RepoResult<Option<Book>> {
        self.books.delete(&self.scope(Criteria::by_id(id))).await
    }

    /// Mark a book as deleted without removing the row.
    ///
    /// Returns `None` when the book is absent or already soft-deleted.
    pub async fn soft_delete(&self, id: Uuid) -> RepoResult<Option<Book>> {
        let criteria = Criteria::by_id(id).intersect(FilterField::is_null("deletedAt"));
        let patch = Patch::new().set("deletedAt", Utc::now());
        self.books.update(&criteria, &patch).await
    }

    /// Search terms become an OR over title and ISBN; the author constraint
    /// and the deleted-row policy are intersected into every branch.
    fn criteria_for(&self, filter: &BookFilter) -> Criteria {
        let mut criteria = match filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(term) => Criteria::any_of([
                Filter::from(FilterField::contains("title", term)),
                Filter::from(FilterField::contains("isbn", term)),
            ]),
            None => Criteria::all(),
        };
        if let Some(author_id) = filter.author_id {
            criteria = criteria.intersect(FilterField::eq("authorId", author_id));
        }
        self.scope(criteria)
    }

    fn scope(&self, criteria: Criteria) -> Criteria {
        match self.policy {
            DeletedRowPolicy::Exclude => criteria.intersect(FilterField::is_null("deletedAt")),
            DeletedRowPolicy::Include => criteria,
        }
    }
}
