//! Author management.

pub mod service;

pub use service::AuthorService;
