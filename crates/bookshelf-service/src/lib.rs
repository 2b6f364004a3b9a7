//! # bookshelf-service
//!
//! Business logic for the Bookshelf catalog. Services sit between the HTTP
//! handlers and the repositories: they turn absence into not-found errors,
//! check cross-entity rules and compute pagination metadata.

pub mod author;
pub mod book;

pub use author::AuthorService;
pub use book::BookService;
