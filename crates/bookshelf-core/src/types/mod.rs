//! Core type definitions used across the Bookshelf workspace.

pub mod filter;
pub mod pagination;
pub mod patch;
pub mod sorting;

pub use filter::{Criteria, Filter, FilterField, FilterOp, FilterValue};
pub use pagination::{PageRequest, PaginatedData, PaginationMeta};
pub use patch::{BulkUpdate, Patch};
pub use sorting::SortDirection;
