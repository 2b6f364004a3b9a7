//! Sorting types for list endpoints.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order.
    #[serde(rename = "ASC")]
    Asc,
    /// Descending order.
    #[default]
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upper_case_only() {
        let asc: SortDirection = serde_json::from_str("\"ASC\"").expect("asc");
        let desc: SortDirection = serde_json::from_str("\"DESC\"").expect("desc");
        assert_eq!(asc, SortDirection::Asc);
        assert_eq!(desc, SortDirection::Desc);
        assert!(serde_json::from_str::<SortDirection>("\"asc\"").is_err());
        assert!(serde_json::from_str::<SortDirection>("\"desc\"").is_err());
        assert!(serde_json::from_str::<SortDirection>("\"sideways\"").is_err());
    }

    #[test]
    fn test_default_is_descending() {
        assert_eq!(SortDirection::default().as_sql(), "DESC");
    }
}
