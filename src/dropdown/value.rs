//! Selection value
//!
//! A dropdown's value is owned by the caller. In single-select mode it is
//! one identifier (empty string = nothing selected); in multi-select mode
//! it is an ordered list of identifiers without duplicates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current selection as the caller sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DropdownValue {
    Single(String),
    Multiple(Vec<String>),
}

impl Default for DropdownValue {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl DropdownValue {
    /// The empty value for the given mode
    pub fn empty(multiple: bool) -> Self {
        if multiple {
            Self::Multiple(Vec::new())
        } else {
            Self::Single(String::new())
        }
    }

    /// Coerce to the shape expected by the mode
    ///
    /// A value of the wrong shape is treated as empty. Duplicate
    /// identifiers in a list keep their first occurrence.
    pub fn normalized(&self, multiple: bool) -> Self {
        match (self, multiple) {
            (Self::Multiple(ids), true) => {
                let mut seen = Vec::with_capacity(ids.len());
                for id in ids {
                    if !seen.contains(id) {
                        seen.push(id.clone());
                    }
                }
                Self::Multiple(seen)
            }
            (Self::Single(id), false) => Self::Single(id.clone()),
            _ => Self::empty(multiple),
        }
    }

    /// Whether `id` counts as selected under the given mode
    pub fn contains(&self, id: &str, multiple: bool) -> bool {
        match (self, multiple) {
            (Self::Multiple(ids), true) => ids.iter().any(|v| v == id),
            (Self::Single(v), false) => v == id,
            _ => false,
        }
    }

    /// No identifier selected
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(v) => v.is_empty(),
            Self::Multiple(ids) => ids.is_empty(),
        }
    }

    /// JSON form used by the demo's action log and clipboard
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl fmt::Display for DropdownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl From<&str> for DropdownValue {
    fn from(v: &str) -> Self {
        Self::Single(v.to_string())
    }
}

impl From<String> for DropdownValue {
    fn from(v: String) -> Self {
        Self::Single(v)
    }
}

impl From<Vec<String>> for DropdownValue {
    fn from(ids: Vec<String>) -> Self {
        Self::Multiple(ids)
    }
}

impl From<Vec<&str>> for DropdownValue {
    fn from(ids: Vec<&str>) -> Self {
        Self::Multiple(ids.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_untagged() {
        let single: DropdownValue = serde_json::from_str(r#""3""#).unwrap();
        assert_eq!(single, DropdownValue::from("3"));

        let many: DropdownValue = serde_json::from_str(r#"["1","2"]"#).unwrap();
        assert_eq!(many, DropdownValue::from(vec!["1", "2"]));
        assert_eq!(many.to_json(), r#"["1","2"]"#);
    }

    #[test]
    fn test_wrong_shape_normalizes_to_empty() {
        assert_eq!(
            DropdownValue::from("1").normalized(true),
            DropdownValue::Multiple(vec![])
        );
        assert_eq!(
            DropdownValue::from(vec!["1"]).normalized(false),
            DropdownValue::Single(String::new())
        );
    }

    #[test]
    fn test_normalize_drops_duplicates() {
        let value = DropdownValue::from(vec!["2", "1", "2"]).normalized(true);
        assert_eq!(value, DropdownValue::from(vec!["2", "1"]));
    }

    #[test]
    fn test_contains_respects_mode() {
        let many = DropdownValue::from(vec!["1", "2"]);
        assert!(many.contains("2", true));
        assert!(!many.contains("2", false));

        let one = DropdownValue::from("2");
        assert!(one.contains("2", false));
        assert!(!one.contains("2", true));
    }
}
