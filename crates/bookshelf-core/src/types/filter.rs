//! Filter types for dynamic query building.
//!
//! A [`Criteria`] is a disjunction of [`Filter`]s and each [`Filter`] is a
//! conjunction of [`FilterField`]s. Field names are the entity's property
//! names (`firstName`) or column names (`first_name`); the repository
//! resolves them against the entity's column metadata before any SQL is
//! rendered, and every value is bound as a parameter.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact equality. Equality with [`FilterValue::Null`] renders `IS NULL`.
    Eq,
    /// Case-insensitive substring match.
    Contains,
    /// SQL `IS NULL` check.
    IsNull,
}

/// A dynamic value that can be bound to a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
    /// A UUID value.
    Uuid(Uuid),
    /// A calendar date.
    Date(NaiveDate),
    /// A UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// Null / no value.
    Null,
}

impl FilterValue {
    /// Whether this value is [`FilterValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterField {
    /// The property or column name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Eq, value.into())
    }

    /// Shorthand for a case-insensitive "contains" filter.
    pub fn contains(field: impl Into<String>, term: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Contains, FilterValue::String(term.into()))
    }

    /// Shorthand for an `IS NULL` filter.
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOp::IsNull, FilterValue::Null)
    }
}

/// A conjunction of filter fields. An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Vec<FilterField>,
}

impl Filter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition. Earlier conditions on the same field stay, so the
    /// filter only ever narrows.
    pub fn and(mut self, field: FilterField) -> Self {
        self.fields.push(field);
        self
    }

    /// The conditions of this filter, in insertion order.
    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    /// Whether the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<FilterField> for Filter {
    fn from(field: FilterField) -> Self {
        Self::new().and(field)
    }
}

/// A disjunction of filters used to select rows.
///
/// `Criteria::all()` has no branches and matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    branches: Vec<Filter>,
}

impl Criteria {
    /// Criteria that match every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Criteria matching the row with the given identifier.
    pub fn by_id(id: Uuid) -> Self {
        Self::from(FilterField::eq("id", id))
    }

    /// Criteria matching rows that satisfy any of the given filters.
    pub fn any_of(branches: impl IntoIterator<Item = Filter>) -> Self {
        Self {
            branches: branches.into_iter().collect(),
        }
    }

    /// Add `field` to every branch, so it constrains the whole criteria.
    /// The result never matches a row the original did not match.
    ///
    /// On criteria that match every row this produces a single branch.
    pub fn intersect(mut self, field: FilterField) -> Self {
        if self.branches.is_empty() {
            self.branches.push(Filter::new());
        }
        self.branches = self
            .branches
            .into_iter()
            .map(|branch| branch.and(field.clone()))
            .collect();
        self
    }

    /// The branches of this criteria.
    pub fn branches(&self) -> &[Filter] {
        &self.branches
    }

    /// Whether these criteria match every row.
    pub fn matches_all(&self) -> bool {
        self.branches.is_empty() || self.branches.iter().any(Filter::is_empty)
    }
}

impl From<Filter> for Criteria {
    fn from(filter: Filter) -> Self {
        Self {
            branches: vec![filter],
        }
    }
}

impl From<FilterField> for Criteria {
    fn from(field: FilterField) -> Self {
        Self::from(Filter::from(field))
    }
}
