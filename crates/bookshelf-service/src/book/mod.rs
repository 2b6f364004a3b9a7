//! Book management.

pub mod service;

pub use service::BookService;
