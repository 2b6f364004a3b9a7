//! Repository implementations for all Bookshelf entities.

pub mod author;
pub mod base;
pub mod book;
pub mod sql;

pub use author::AuthorRepository;
pub use base::Repository;
pub use book::BookRepository;
pub use bookshelf_core::config::DeletedRowPolicy;
