//! Form field schema objects
//!
//! These types mirror the form-definition document served by the backend.
//! They carry no behavior beyond small builders and accessors; visibility,
//! validation and progress live in their own modules and only read them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of input widget kinds a field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Select,
    Checkbox,
    Radio,
    Date,
    Textarea,
    Card,
    Slider,
    Autocomplete,
    Object,
}

impl FieldType {
    /// Fields whose value is expected to be a number (or a numeric string)
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Slider)
    }

    /// Fields edited through a free-text input
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text | Self::Textarea | Self::Autocomplete)
    }

    /// Fields whose value is picked from `options`
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Card | Self::Checkbox)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Date => "date",
            Self::Textarea => "textarea",
            Self::Card => "card",
            Self::Slider => "slider",
            Self::Autocomplete => "autocomplete",
            Self::Object => "object",
        }
    }
}

/// Generic value constraints attached to a field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression, matched anywhere in the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// A selectable option for choice fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: Value,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Visibility condition over another field's current value.
///
/// `in` is a Rust keyword, so the list variant is exposed as `any_of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowWhen {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Value>>,
}

/// Grouping key used to derive wizard steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    pub id: String,
    pub label: String,
}

/// Quick-pick value rendered next to an input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortcut {
    pub label: String,
    pub value: Value,
}

/// Remote suggestion source for autocomplete fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteConfig {
    pub endpoint: String,
    #[serde(default = "default_autocomplete_min_length")]
    pub min_length: usize,
    #[serde(default = "default_autocomplete_debounce")]
    pub debounce_ms: u64,
}

fn default_autocomplete_min_length() -> usize {
    2
}

fn default_autocomplete_debounce() -> u64 {
    300
}

/// Declarative description of a single form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_when: Option<ShowWhen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection: Option<Subsection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcuts: Option<Vec<Shortcut>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<AutocompleteConfig>,
}

impl FormField {
    /// Create an optional field with no constraints
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: label.into(),
            required: false,
            validation: None,
            options: None,
            show_when: None,
            subsection: None,
            mask: None,
            shortcuts: None,
            autocomplete: None,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Place the field in a subsection (and therefore in a wizard step)
    pub fn subsection(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.subsection = Some(Subsection {
            id: id.into(),
            label: label.into(),
        });
        self
    }

    /// Show the field only when `field` loosely equals `value`
    pub fn show_when_equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.show_when = Some(ShowWhen {
            field: field.into(),
            equals: Some(value.into()),
            any_of: None,
        });
        self
    }

    /// Show the field only when `field` loosely equals one of `values`
    pub fn show_when_in<V: Into<Value>>(
        mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.show_when = Some(ShowWhen {
            field: field.into(),
            equals: None,
            any_of: Some(values.into_iter().map(Into::into).collect()),
        });
        self
    }

    pub fn options<V: Into<Value>>(mut self, options: impl IntoIterator<Item = (V, &'static str)>) -> Self {
        self.options = Some(
            options
                .into_iter()
                .map(|(value, label)| FieldOption {
                    value: value.into(),
                    label: label.to_string(),
                    icon: None,
                    description: None,
                })
                .collect(),
        );
        self
    }

    /// Subsection id, if the field belongs to one
    pub fn step_id(&self) -> Option<&str> {
        self.subsection.as_ref().map(|s| s.id.as_str())
    }

    /// Name of the field this one depends on for visibility
    pub fn depends_on(&self) -> Option<&str> {
        self.show_when.as_ref().map(|c| c.field.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod field_type {
        use super::*;

        #[test]
        fn test_deserializes_lowercase_tags() {
            let t: FieldType = serde_json::from_value(json!("autocomplete")).unwrap();
            assert_eq!(t, FieldType::Autocomplete);
            assert_eq!(t.as_str(), "autocomplete");
        }

        #[test]
        fn test_rejects_unknown_tag() {
            let result: Result<FieldType, _> = serde_json::from_value(json!("color"));
            assert!(result.is_err());
        }

        #[test]
        fn test_numeric_kinds() {
            assert!(FieldType::Number.is_numeric());
            assert!(FieldType::Slider.is_numeric());
            assert!(!FieldType::Text.is_numeric());
            assert!(!FieldType::Date.is_numeric());
        }

        #[test]
        fn test_textual_and_choice_kinds() {
            assert!(FieldType::Autocomplete.is_textual());
            assert!(!FieldType::Select.is_textual());
            assert!(FieldType::Card.is_choice());
            assert!(!FieldType::Object.is_choice());
        }
    }

    mod form_field {
        use super::*;

        #[test]
        fn test_deserialize_full_field() {
            let field: FormField = serde_json::from_value(json!({
                "name": "workPostalCode",
                "type": "text",
                "label": "Work postal code",
                "required": true,
                "validation": { "minLength": 5, "maxLength": 5, "pattern": "^[0-9]{5}$" },
                "showWhen": { "field": "usageType", "in": ["private_work", "private_tours"] },
                "subsection": { "id": "usage", "label": "Usage" },
                "mask": "99999"
            }))
            .unwrap();

            assert_eq!(field.name, "workPostalCode");
            assert_eq!(field.field_type, FieldType::Text);
            assert!(field.required);
            let validation = field.validation.as_ref().unwrap();
            assert_eq!(validation.min_length, Some(5));
            assert_eq!(validation.pattern.as_deref(), Some("^[0-9]{5}$"));
            let cond = field.show_when.as_ref().unwrap();
            assert_eq!(cond.field, "usageType");
            assert!(cond.equals.is_none());
            assert_eq!(cond.any_of.as_ref().unwrap().len(), 2);
            assert_eq!(field.step_id(), Some("usage"));
            assert_eq!(field.depends_on(), Some("usageType"));
        }

        #[test]
        fn test_required_defaults_to_false() {
            let field: FormField = serde_json::from_value(json!({
                "name": "comment",
                "type": "textarea",
                "label": "Comment"
            }))
            .unwrap();
            assert!(!field.required);
            assert!(field.subsection.is_none());
        }

        #[test]
        fn test_autocomplete_defaults() {
            let field: FormField = serde_json::from_value(json!({
                "name": "city",
                "type": "autocomplete",
                "label": "City",
                "autocomplete": { "endpoint": "/cities" }
            }))
            .unwrap();
            let ac = field.autocomplete.unwrap();
            assert_eq!(ac.min_length, 2);
            assert_eq!(ac.debounce_ms, 300);
        }

        #[test]
        fn test_builder_sets_condition() {
            let field = FormField::new("childrenBirthYears", "Birth years", FieldType::Text)
                .required()
                .show_when_in("numberOfChildren", ["1", "2", "3_plus"]);
            assert!(field.required);
            let cond = field.show_when.unwrap();
            assert_eq!(cond.any_of.unwrap(), vec![json!("1"), json!("2"), json!("3_plus")]);
        }

        #[test]
        fn test_options_builder() {
            let field = FormField::new("numberOfChildren", "Children", FieldType::Radio)
                .options([("0", "None"), ("1", "One"), ("3_plus", "Three or more")]);
            let options = field.options.unwrap();
            assert_eq!(options.len(), 3);
            assert_eq!(options[2].value, json!("3_plus"));
            assert_eq!(options[2].label, "Three or more");
        }

        #[test]
        fn test_serialize_uses_wire_names() {
            let field = FormField::new("hasGarage", "Garage", FieldType::Checkbox)
                .show_when_equals("ownsHome", true);
            let value = serde_json::to_value(&field).unwrap();
            assert_eq!(value["type"], json!("checkbox"));
            assert_eq!(value["showWhen"]["equals"], json!(true));
            assert!(value.get("validation").is_none());
        }
    }
}
