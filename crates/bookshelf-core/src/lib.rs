//! # bookshelf-core
//!
//! Core crate for Bookshelf. Contains the configuration schema, the
//! two-tier error taxonomy, pagination and sorting contracts, and the
//! entity-agnostic criteria/patch types consumed by the repository layer.
//!
//! This crate has **no** internal dependencies on other Bookshelf crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, Fault, RepositoryError};
pub use result::{AppResult, RepoResult};
