//! Book entity model.

use bookshelf_core::types::{FilterValue, Patch};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::author::Author;
use crate::base::{BASE_COLUMNS, ColumnDef, Entity, EntityMeta};

/// A catalogued book. Each book belongs to exactly one author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Identity and lifecycle columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Title.
    pub title: String,
    /// ISBN-10 or ISBN-13, unique across the catalog.
    pub isbn: String,
    /// First publication date.
    pub published_date: Option<NaiveDate>,
    /// Genre label.
    pub genre: Option<String>,
    /// Owning author.
    pub author_id: Uuid,
}

impl Entity for Book {
    type Draft = NewBook;

    const NAME: &'static str = "Book";
    const TABLE: &'static str = "books";
    const COLUMNS: &'static [ColumnDef] = &[
        BASE_COLUMNS[0],
        BASE_COLUMNS[1],
        BASE_COLUMNS[2],
        BASE_COLUMNS[3],
        ColumnDef::searchable("title", "title", "title_folded"),
        ColumnDef::searchable("isbn", "isbn", "isbn_folded"),
        ColumnDef::data("publishedDate", "published_date"),
        ColumnDef::data("genre", "genre"),
        ColumnDef::data("authorId", "author_id"),
    ];

    fn from_draft(meta: EntityMeta, draft: NewBook) -> Self {
        Self {
            meta,
            title: draft.title,
            isbn: draft.isbn,
            published_date: draft.published_date,
            genre: draft.genre,
            author_id: draft.author_id,
        }
    }

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn values(&self) -> Vec<(&'static str, FilterValue)> {
        let mut values = self.meta.values();
        values.extend([
            ("title", self.title.clone().into()),
            ("isbn", self.isbn.clone().into()),
            ("published_date", self.published_date.into()),
            ("genre", self.genre.clone().into()),
            ("author_id", self.author_id.into()),
        ]);
        values
    }
}

/// Data required to create a new book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    /// Title.
    pub title: String,
    /// ISBN-10 or ISBN-13.
    pub isbn: String,
    /// First publication date.
    #[serde(default)]
    pub published_date: Option<NaiveDate>,
    /// Genre label.
    #[serde(default)]
    pub genre: Option<String>,
    /// Owning author.
    pub author_id: Uuid,
}

impl NewBook {
    /// A draft with only the required fields.
    pub fn new(title: impl Into<String>, isbn: impl Into<String>, author_id: Uuid) -> Self {
        Self {
            title: title.into(),
            isbn: isbn.into(),
            published_date: None,
            genre: None,
            author_id,
        }
    }
}

/// Fields to change on an existing book. Absent fields are left as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    /// New title.
    pub title: Option<String>,
    /// New ISBN.
    pub isbn: Option<String>,
    /// New publication date.
    pub published_date: Option<NaiveDate>,
    /// New genre.
    pub genre: Option<String>,
    /// New owning author.
    pub author_id: Option<Uuid>,
}

impl From<BookPatch> for Patch {
    fn from(patch: BookPatch) -> Self {
        Patch::new()
            .set_some("title", patch.title)
            .set_some("isbn", patch.isbn)
            .set_some("publishedDate", patch.published_date)
            .set_some("genre", patch.genre)
            .set_some("authorId", patch.author_id)
    }
}

/// Search parameters for listing books.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFilter {
    /// Case-insensitive term matched against title or ISBN.
    pub search: Option<String>,
    /// Only books owned by this author.
    pub author_id: Option<Uuid>,
}

/// A book with its author expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWithAuthor {
    /// The book.
    #[serde(flatten)]
    pub book: Book,
    /// The owning author; `None` when hidden by the deleted-row policy.
    pub author: Option<Author>,
}
