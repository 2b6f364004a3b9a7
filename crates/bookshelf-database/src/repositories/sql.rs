//! Rendering of criteria and patches into parameterised SQLite statements.
//!
//! Field names are resolved against [`Entity::COLUMNS`]; only the column
//! names from that static metadata are ever written into the SQL text.
//! Every value goes through `push_bind`.
//!
//! Case-insensitive search compares against the `*_folded` shadow columns,
//! which are written from [`fold_case`] on every insert and update.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};
use thiserror::Error;

use bookshelf_core::types::{Criteria, FilterField, FilterOp, FilterValue, Patch};
use bookshelf_entity::{ColumnDef, Entity, fold_case};

/// Bound-parameter limit of a single SQLite statement.
pub const SQLITE_MAX_VARIABLES: usize = 32_766;

/// Failure while building or running a statement.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A criteria or patch key that names no column of the entity.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
    /// A patch key for a column the repository maintains itself.
    #[error("column '{0}' cannot be written")]
    NotPatchable(String),
    /// A contains filter whose value is not text.
    #[error("contains filter on '{0}' requires a text value")]
    InvalidPattern(String),
    /// A contains filter on a column without a folded shadow column.
    #[error("column '{0}' does not support text search")]
    NotSearchable(String),
    /// The store rejected or failed the statement.
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl QueryError {
    /// Whether the statement was malformed by the caller's input, as opposed
    /// to failing inside the store.
    pub fn is_rejected_input(&self) -> bool {
        !matches!(self, Self::Sqlx(_))
    }
}

/// Resolve a field name to its column definition.
pub fn resolve<E: Entity>(field: &str) -> Result<&'static ColumnDef, QueryError> {
    E::column(field).ok_or_else(|| QueryError::UnknownColumn(field.to_string()))
}

/// Columns written on insert: [`Entity::COLUMNS`] in order, then every
/// folded shadow column in the same order.
pub fn column_list<E: Entity>() -> String {
    E::COLUMNS
        .iter()
        .map(|def| def.column)
        .chain(E::COLUMNS.iter().filter_map(|def| def.folded))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Number of bound parameters per inserted row.
pub fn row_width<E: Entity>() -> usize {
    E::COLUMNS.len() + E::COLUMNS.iter().filter(|def| def.folded.is_some()).count()
}

/// How many rows fit into one `INSERT` without exceeding
/// [`SQLITE_MAX_VARIABLES`].
pub fn rows_per_insert<E: Entity>() -> usize {
    (SQLITE_MAX_VARIABLES / row_width::<E>()).max(1)
}

/// Append ` WHERE (a AND b) OR (c)` for the criteria.
///
/// Every field is validated first, so invalid input is rejected even when
/// another branch matches every row and no clause is written.
pub fn push_where<E: Entity>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    criteria: &Criteria,
) -> Result<(), QueryError> {
    for branch in criteria.branches() {
        for field in branch.fields() {
            let def = resolve::<E>(&field.field)?;
            if field.op == FilterOp::Contains {
                if def.folded.is_none() {
                    return Err(QueryError::NotSearchable(field.field.clone()));
                }
                if !matches!(field.value, FilterValue::String(_)) {
                    return Err(QueryError::InvalidPattern(field.field.clone()));
                }
            }
        }
    }

    if criteria.matches_all() {
        return Ok(());
    }

    builder.push(" WHERE ");
    for (i, branch) in criteria.branches().iter().enumerate() {
        if i > 0 {
            builder.push(" OR ");
        }
        builder.push("(");
        for (j, field) in branch.fields().iter().enumerate() {
            if j > 0 {
                builder.push(" AND ");
            }
            push_condition::<E>(builder, field)?;
        }
        builder.push(")");
    }
    Ok(())
}

fn push_condition<E: Entity>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    field: &FilterField,
) -> Result<(), QueryError> {
    let def = resolve::<E>(&field.field)?;
    match (field.op, &field.value) {
        (FilterOp::IsNull, _) | (FilterOp::Eq, FilterValue::Null) => {
            builder.push(def.column).push(" IS NULL");
        }
        (FilterOp::Eq, value) => {
            builder.push(def.column).push(" = ");
            push_value(builder, value);
        }
        (FilterOp::Contains, FilterValue::String(term)) => {
            let folded = def
                .folded
                .ok_or_else(|| QueryError::NotSearchable(field.field.clone()))?;
            builder
                .push(folded)
                .push(" LIKE ")
                .push_bind(like_pattern(term))
                .push(" ESCAPE '\\'");
        }
        (FilterOp::Contains, _) => return Err(QueryError::InvalidPattern(field.field.clone())),
    }
    Ok(())
}

/// Append ` SET a = ?, b = ?, updated_at = ?`.
///
/// Patching a searchable column also rewrites its folded shadow column.
pub fn push_set<E: Entity>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    patch: &Patch,
    updated_at: DateTime<Utc>,
) -> Result<(), QueryError> {
    builder.push(" SET ");
    for (field, value) in patch.entries() {
        let def = resolve::<E>(field)?;
        if !def.is_patchable() {
            return Err(QueryError::NotPatchable(field.clone()));
        }
        builder.push(def.column).push(" = ");
        push_value(builder, value);
        builder.push(", ");
        if let Some(folded) = def.folded {
            builder.push(folded).push(" = ");
            push_value(builder, &folded_value(value));
            builder.push(", ");
        }
    }
    builder.push("updated_at = ").push_bind(updated_at);
    Ok(())
}

/// Append `(?, ?, ...)` for one row, in [`column_list`] order.
pub fn push_row<E: Entity>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    values: &[(&'static str, FilterValue)],
) {
    let folded = E::COLUMNS.iter().filter(|def| def.folded.is_some()).map(|def| {
        values
            .iter()
            .find(|(column, _)| *column == def.column)
            .map_or(FilterValue::Null, |(_, value)| folded_value(value))
    });
    let row: Vec<FilterValue> = values
        .iter()
        .map(|(_, value)| value.clone())
        .chain(folded)
        .collect();

    builder.push("(");
    for (i, value) in row.iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        push_value(builder, value);
    }
    builder.push(")");
}

/// Bind a single value.
pub fn push_value(builder: &mut QueryBuilder<'_, Sqlite>, value: &FilterValue) {
    match value {
        FilterValue::String(v) => builder.push_bind(v.clone()),
        FilterValue::Integer(v) => builder.push_bind(*v),
        FilterValue::Boolean(v) => builder.push_bind(*v),
        FilterValue::Uuid(v) => builder.push_bind(*v),
        FilterValue::Date(v) => builder.push_bind(*v),
        FilterValue::Timestamp(v) => builder.push_bind(*v),
        FilterValue::Null => builder.push_bind(None::<String>),
    };
}

/// The value stored in a folded shadow column.
fn folded_value(value: &FilterValue) -> FilterValue {
    match value {
        FilterValue::String(text) => FilterValue::String(fold_case(text)),
        _ => FilterValue::Null,
    }
}

/// Case-folded `%term%` with LIKE wildcards in the term escaped.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in fold_case(term).chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
