//! Shared entity shape and column metadata.

use bookshelf_core::types::FilterValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

/// Identity and lifecycle columns carried by every stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EntityMeta {
    /// Unique identifier, assigned once at creation.
    pub id: Uuid,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
    /// Set when the record is soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl EntityMeta {
    /// Metadata for a record created at `now`.
    pub fn new(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Whether the record carries a soft-delete marker.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Column values of the shared columns, in [`BASE_COLUMNS`] order.
    pub fn values(&self) -> Vec<(&'static str, FilterValue)> {
        vec![
            ("id", self.id.into()),
            ("created_at", self.created_at.into()),
            ("updated_at", self.updated_at.into()),
            ("deleted_at", self.deleted_at.into()),
        ]
    }
}

/// How the repository may write a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// The primary key; written once on insert.
    Identity,
    /// Maintained by the repository (`created_at`, `updated_at`).
    Managed,
    /// Ordinary data, writable through a patch.
    Data,
}

/// Metadata for one column of an entity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Property name used by callers (`firstName`).
    pub property: &'static str,
    /// Column name in the table (`first_name`).
    pub column: &'static str,
    /// Write access.
    pub kind: ColumnKind,
    /// Shadow column holding the case-folded text, for columns that
    /// support case-insensitive search.
    pub folded: Option<&'static str>,
}

impl ColumnDef {
    /// An ordinary data column.
    pub const fn data(property: &'static str, column: &'static str) -> Self {
        Self {
            property,
            column,
            kind: ColumnKind::Data,
            folded: None,
        }
    }

    /// A text data column searchable through its case-folded shadow column.
    pub const fn searchable(
        property: &'static str,
        column: &'static str,
        folded: &'static str,
    ) -> Self {
        Self {
            property,
            column,
            kind: ColumnKind::Data,
            folded: Some(folded),
        }
    }

    /// A column written only by the repository.
    pub const fn managed(property: &'static str, column: &'static str) -> Self {
        Self {
            property,
            column,
            kind: ColumnKind::Managed,
            folded: None,
        }
    }

    /// Whether callers may write this column through a patch.
    pub fn is_patchable(&self) -> bool {
        self.kind == ColumnKind::Data
    }
}

/// The shared columns, to be listed first in every entity's [`Entity::COLUMNS`].
pub const BASE_COLUMNS: [ColumnDef; 4] = [
    ColumnDef {
        property: "id",
        column: "id",
        kind: ColumnKind::Identity,
        folded: None,
    },
    ColumnDef::managed("createdAt", "created_at"),
    ColumnDef::managed("updatedAt", "updated_at"),
    ColumnDef::data("deletedAt", "deleted_at"),
];

/// Case folding applied to searchable text and to search terms alike.
///
/// SQLite's `LOWER` and `LIKE` only fold ASCII, so folding happens here
/// and the store compares already-folded text.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// A persisted record type.
///
/// Implemented once per table; the generic repository is instantiated per
/// implementor and never sees concrete field names.
pub trait Entity:
    for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static
{
    /// Caller-supplied fields for a new record.
    type Draft: Send + Sync;

    /// Display name used in diagnostics (`Author`).
    const NAME: &'static str;
    /// Table name.
    const TABLE: &'static str;
    /// Every column of the table, starting with [`BASE_COLUMNS`].
    const COLUMNS: &'static [ColumnDef];

    /// Build a record from generated metadata and a draft.
    fn from_draft(meta: EntityMeta, draft: Self::Draft) -> Self;

    /// The shared identity and lifecycle columns.
    fn meta(&self) -> &EntityMeta;

    /// Every column value keyed by column name, in [`Entity::COLUMNS`] order.
    fn values(&self) -> Vec<(&'static str, FilterValue)>;

    /// Resolve a property or column name against the known columns.
    fn column(name: &str) -> Option<&'static ColumnDef> {
        Self::COLUMNS
            .iter()
            .find(|def| def.property == name || def.column == name)
    }
}
