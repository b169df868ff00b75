//! Wire types for the entity-service boundary
//!
//! All wire structs use camelCase JSON serialization to match the hosted
//! API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Sort specification for list/filter calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort on
    pub field: String,

    /// Sort descending
    pub descending: bool,
}

impl SortSpec {
    /// Ascending sort on a field
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Descending sort on a field
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Render in the hosted API's query convention (`-field` = descending)
    pub fn to_query(&self) -> String {
        if self.descending {
            format!("-{}", self.field)
        } else {
            self.field.clone()
        }
    }
}

/// Exact-match field predicate
///
/// The hosted API supports equality only at this boundary; there are no
/// range or comparison operators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Predicate {
    fields: BTreeMap<String, Value>,
}

impl Predicate {
    /// Empty predicate (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-match condition
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// True when the predicate has no conditions
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when the JSON object satisfies every condition
    pub fn matches(&self, record: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }
}

/// Authenticated user record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    /// Role as reported by the backend, if any
    #[serde(default)]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_spec_query() {
        assert_eq!(SortSpec::desc("created_date").to_query(), "-created_date");
        assert_eq!(SortSpec::asc("brief_title").to_query(), "brief_title");
    }

    #[test]
    fn test_predicate_matches() {
        let predicate = Predicate::new().eq("domain", "Finance").eq("status", "open");
        assert!(predicate.matches(&json!({"domain": "Finance", "status": "open", "x": 1})));
        assert!(!predicate.matches(&json!({"domain": "Finance", "status": "closed"})));
        assert!(!predicate.matches(&json!({"domain": "Finance"})));
    }

    #[test]
    fn test_empty_predicate_matches_all() {
        let predicate = Predicate::new();
        assert!(predicate.is_empty());
        assert!(predicate.matches(&json!({"anything": true})));
    }

    #[test]
    fn test_predicate_serializes_as_plain_object() {
        let predicate = Predicate::new().eq("domain", "Santé");
        let json = serde_json::to_value(&predicate).unwrap();
        assert_eq!(json, json!({"domain": "Santé"}));
    }
}
