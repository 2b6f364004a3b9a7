//! # bookshelf-entity
//!
//! Entity models for Bookshelf. Every stored record flattens the shared
//! [`EntityMeta`] (identity, timestamps, soft-delete marker) into its row
//! struct and implements [`Entity`], which exposes the table name and the
//! known-column set the repository validates sort and filter fields against.

pub mod author;
pub mod base;
pub mod book;

pub use author::{Author, AuthorFilter, AuthorPatch, AuthorWithBooks, NewAuthor};
pub use base::{ColumnDef, ColumnKind, Entity, EntityMeta, fold_case};
pub use book::{Book, BookFilter, BookPatch, BookWithAuthor, NewBook};
