//! Partial-update types.

use super::filter::{Criteria, FilterValue};

/// A column-to-value mapping applied as a partial update.
///
/// Only the keys present in the patch are written. Setting a key twice
/// keeps the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    values: Vec<(String, FilterValue)>,
}

impl Patch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        let field = field.into();
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.values.push((field, value)),
        }
        self
    }

    /// Set `field` only when `value` is present.
    pub fn set_some<T: Into<FilterValue>>(self, field: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.set(field, value),
            None => self,
        }
    }

    /// The entries of this patch, in insertion order.
    pub fn entries(&self) -> &[(String, FilterValue)] {
        &self.values
    }
}

/// One `(criteria, patch)` pair of a bulk update.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkUpdate {
    /// Rows to update.
    pub criteria: Criteria,
    /// Values to write to every selected row.
    pub patch: Patch,
}

impl BulkUpdate {
    /// Create a bulk-update pair.
    pub fn new(criteria: Criteria, patch: Patch) -> Self {
        Self { criteria, patch }
    }
}
