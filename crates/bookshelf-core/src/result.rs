//! Convenience result type aliases for Bookshelf.

use crate::error::{AppError, RepositoryError};

/// A specialized `Result` type for service and API operations.
pub type AppResult<T> = Result<T, AppError>;

/// A specialized `Result` type for repository operations.
///
/// Kept separate from [`AppResult`] so callers can branch on
/// [`crate::error::Fault`] before the error is flattened into an [`AppError`].
pub type RepoResult<T> = Result<T, RepositoryError>;
