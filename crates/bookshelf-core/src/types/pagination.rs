//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::sorting::SortDirection;

/// Default page number.
pub const DEFAULT_PAGE: u64 = 1;
/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Maximum page size.
pub const MAX_PAGE_SIZE: u64 = 1000;
/// Default sort column.
pub const DEFAULT_SORT_BY: &str = "createdAt";

/// Request parameters for paginated queries.
///
/// Every field is optional so programmatic callers can ask for an
/// unbounded read; deserialization fills in the documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u64>,
    /// Number of items per page.
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: Option<u64>,
    /// Column to sort by. Ignored unless it names a known column.
    #[serde(default = "default_sort_by")]
    pub sort_by: Option<String>,
    /// Sort direction.
    #[serde(default)]
    pub order: SortDirection,
}

impl PageRequest {
    /// Create a page request with the default sort.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// A request that applies no limit, no offset and no sort.
    pub fn unpaged() -> Self {
        Self {
            page: None,
            limit: None,
            sort_by: None,
            order: SortDirection::default(),
        }
    }

    /// Replace the sort column and direction.
    pub fn sorted_by(mut self, column: impl Into<String>, order: SortDirection) -> Self {
        self.sort_by = Some(column.into());
        self.order = order;
        self
    }

    /// Number of rows to skip; zero whenever `page` or `limit` is absent.
    pub fn skip(&self) -> u64 {
        match (self.page, self.limit) {
            (Some(page), Some(limit)) => page.saturating_sub(1).saturating_mul(limit),
            _ => 0,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            sort_by: default_sort_by(),
            order: SortDirection::default(),
        }
    }
}

/// Summary of a paginated read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of matching items across all pages.
    pub total_items: u64,
    /// Page size, or `total_items` when no limit was applied.
    pub items_per_page: u64,
    /// Number of pages; 1 when no limit was applied.
    pub total_pages: u64,
    /// Current page number (1-based).
    pub current_page: u64,
}

impl PaginationMeta {
    /// Compute the metadata for `total` matching rows under `page`.
    pub fn from_total(total: u64, page: &PageRequest) -> Self {
        let (items_per_page, total_pages) = match page.limit {
            Some(limit) if limit > 0 => (limit, total.div_ceil(limit)),
            _ => (total, 1),
        };
        Self {
            total_items: total,
            items_per_page,
            total_pages,
            current_page: page.page.unwrap_or(DEFAULT_PAGE),
        }
    }
}

/// One page of items plus its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedData<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination summary.
    pub meta: PaginationMeta,
}

impl<T> PaginatedData<T> {
    /// Build a page from the `(items, total)` pair returned by a repository.
    pub fn new(items: Vec<T>, total: u64, page: &PageRequest) -> Self {
        Self {
            items,
            meta: PaginationMeta::from_total(total, page),
        }
    }

    /// Transform every item while keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedData<U> {
        PaginatedData {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

fn default_page() -> Option<u64> {
    Some(DEFAULT_PAGE)
}

fn default_limit() -> Option<u64> {
    Some(DEFAULT_PAGE_SIZE)
}

fn default_sort_by() -> Option<String> {
    Some(DEFAULT_SORT_BY.to_string())
}
