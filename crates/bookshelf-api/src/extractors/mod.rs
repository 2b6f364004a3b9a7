//! Custom Axum extractors.

pub mod path;
pub mod validated;

pub use path::parse_uuid;
pub use validated::{ValidatedJson, ValidatedQuery};
