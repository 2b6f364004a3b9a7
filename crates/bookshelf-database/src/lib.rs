//! # bookshelf-database
//!
//! SQLite connection management, the generic [`Repository`] shared by every
//! entity type, and the Author/Book repositories built on top of it.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{AuthorRepository, BookRepository, Repository};
