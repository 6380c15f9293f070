//! Dropdown options
//!
//! An option is an identifier plus any number of free-form fields. Which
//! field is shown to the user is decided by the dropdown's `option_label`
//! setting, so the same option list can be displayed by name, code, etc.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name that always resolves to the option identifier
const VALUE_FIELD: &str = "value";

/// A single selectable option
///
/// Deserializes from JSON objects such as `{ "value": "1", "label": "Jakarta" }`.
/// Every key besides `value` lands in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// Unique identifier
    pub value: String,

    /// Caller-defined fields (label, description, anything else)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DropdownOption {
    /// Create an option with no fields
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            fields: Map::new(),
        }
    }

    /// Shorthand for the common `{ value, label }` shape
    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(value).with_field("label", label.into())
    }

    /// Builder: attach a field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Raw field lookup
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Text shown for this option when `field` is the display field
    ///
    /// Missing fields, `null` and `false` render as an empty string.
    /// Numbers and `true` are stringified, nested structures become
    /// compact JSON.
    pub fn display_text(&self, field: &str) -> String {
        if field == VALUE_FIELD {
            return self.value.clone();
        }

        match self.fields.get(field) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(true)) => "true".to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Parse an option list from a JSON array
pub fn options_from_json(json: &str) -> serde_json::Result<Vec<DropdownOption>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_flattens_fields() {
        let options = options_from_json(
            r#"[
                { "value": "1", "label": "Jakarta", "province": "DKI" },
                { "value": "2", "label": "Surabaya" }
            ]"#,
        )
        .unwrap();

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "1");
        assert_eq!(options[0].display_text("label"), "Jakarta");
        assert_eq!(options[0].display_text("province"), "DKI");
        assert!(options[1].field("province").is_none());
    }

    #[test]
    fn test_missing_field_is_empty() {
        let option = DropdownOption::new("7");
        assert_eq!(option.display_text("label"), "");
    }

    #[test]
    fn test_non_string_fields() {
        let option = DropdownOption::new("x")
            .with_field("population", 10_560_000)
            .with_field("capital", true)
            .with_field("archived", false)
            .with_field("note", Value::Null);

        assert_eq!(option.display_text("population"), "10560000");
        assert_eq!(option.display_text("capital"), "true");
        assert_eq!(option.display_text("archived"), "");
        assert_eq!(option.display_text("note"), "");
    }

    #[test]
    fn test_value_field_resolves_to_identifier() {
        let option = DropdownOption::labeled("42", "Answer");
        assert_eq!(option.display_text("value"), "42");
    }
}
