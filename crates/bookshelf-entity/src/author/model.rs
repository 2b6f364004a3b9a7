//! Author entity model.

use bookshelf_core::types::{FilterValue, Patch};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::base::{BASE_COLUMNS, ColumnDef, Entity, EntityMeta};
use crate::book::Book;

/// A book author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Identity and lifecycle columns.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Short biography.
    pub bio: Option<String>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
}

impl Entity for Author {
    type Draft = NewAuthor;

    const NAME: &'static str = "Author";
    const TABLE: &'static str = "authors";
    const COLUMNS: &'static [ColumnDef] = &[
        BASE_COLUMNS[0],
        BASE_COLUMNS[1],
        BASE_COLUMNS[2],
        BASE_COLUMNS[3],
        ColumnDef::searchable("firstName", "first_name", "first_name_folded"),
        ColumnDef::searchable("lastName", "last_name", "last_name_folded"),
        ColumnDef::data("bio", "bio"),
        ColumnDef::data("birthDate", "birth_date"),
    ];

    fn from_draft(meta: EntityMeta, draft: NewAuthor) -> Self {
        Self {
            meta,
            first_name: draft.first_name,
            last_name: draft.last_name,
            bio: draft.bio,
            birth_date: draft.birth_date,
        }
    }

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn values(&self) -> Vec<(&'static str, FilterValue)> {
        let mut values = self.meta.values();
        values.extend([
            ("first_name", self.first_name.clone().into()),
            ("last_name", self.last_name.clone().into()),
            ("bio", self.bio.clone().into()),
            ("birth_date", self.birth_date.into()),
        ]);
        values
    }
}

/// Data required to create a new author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthor {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Short biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Date of birth.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl NewAuthor {
    /// A draft with only the required names.
    pub fn named(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            bio: None,
            birth_date: None,
        }
    }
}

/// Fields to change on an existing author. Absent fields are left as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPatch {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// New date of birth.
    pub birth_date: Option<NaiveDate>,
}

impl From<AuthorPatch> for Patch {
    fn from(patch: AuthorPatch) -> Self {
        Patch::new()
            .set_some("firstName", patch.first_name)
            .set_some("lastName", patch.last_name)
            .set_some("bio", patch.bio)
            .set_some("birthDate", patch.birth_date)
    }
}

/// Search parameters for listing authors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorFilter {
    /// Case-insensitive term matched against first or last name.
    pub search: Option<String>,
}

/// An author with their books expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorWithBooks {
    /// The author.
    #[serde(flatten)]
    pub author: Author,
    /// Books written by the author.
    pub books: Vec<Book>,
}
