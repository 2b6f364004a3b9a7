//! Response DTOs.
//!
//! Single results are wrapped as `{ statusCode, message, data }`; pages as
//! `{ statusCode, message, data, total, page, limit }`.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use bookshelf_core::types::PaginatedData;

/// Message carried by every successful response.
pub const SUCCESS_MESSAGE: &str = "Success";

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// HTTP status code.
    pub status_code: u16,
    /// Outcome message.
    pub message: String,
    /// Response data.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` for a response with the given status.
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            message: SUCCESS_MESSAGE.to_string(),
            data,
        }
    }

    /// Wraps `data` for a `200 OK` response.
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// HTTP status code.
    pub status_code: u16,
    /// Outcome message.
    pub message: String,
    /// Items in this page.
    pub data: Vec<T>,
    /// Total number of matching items.
    pub total: u64,
    /// Current page.
    pub page: u64,
    /// Items per page.
    pub limit: u64,
}

impl<T> PaginatedResponse<T> {
    /// Flattens a page and its metadata for a `200 OK` response.
    pub fn ok(page: PaginatedData<T>) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            message: SUCCESS_MESSAGE.to_string(),
            total: page.meta.total_items,
            page: page.meta.current_page,
            limit: page.meta.items_per_page,
            data: page.items,
        }
    }
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database connectivity.
    pub database: String,
}
