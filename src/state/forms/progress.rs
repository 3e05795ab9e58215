//! Required-field fill ratio

use super::field::FormField;
use super::value::{is_filled, FormValues};
use super::visibility::is_visible;
use serde::{Deserialize, Serialize};

/// Which required fields count toward the denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPolicy {
    /// Every required field, hidden or not
    #[default]
    AllRequired,
    /// Only required fields that are currently visible
    VisibleRequired,
}

impl ProgressPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AllRequired => "all required fields",
            Self::VisibleRequired => "visible required fields",
        }
    }
}

/// Percentage of required fields filled, in [0, 100], two decimals
pub fn progress(fields: &[FormField], values: &FormValues) -> f64 {
    progress_with_policy(fields, values, ProgressPolicy::AllRequired)
}

pub fn progress_with_policy(fields: &[FormField], values: &FormValues, policy: ProgressPolicy) -> f64 {
    let required: Vec<&FormField> = fields
        .iter()
        .filter(|f| f.required)
        .filter(|f| match policy {
            ProgressPolicy::AllRequired => true,
            ProgressPolicy::VisibleRequired => is_visible(f, values),
        })
        .collect();

    if required.is_empty() {
        return 100.0;
    }

    let filled = required
        .iter()
        .filter(|f| is_filled(values.get(&f.name)))
        .count();

    round2(filled as f64 / required.len() as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FieldType;
    use serde_json::json;

    fn required(name: &str) -> FormField {
        FormField::new(name, name, FieldType::Text).required()
    }

    #[test]
    fn test_no_fields_is_complete() {
        assert_eq!(progress(&[], &FormValues::new()), 100.0);
    }

    #[test]
    fn test_only_optional_fields_is_complete() {
        let fields = vec![FormField::new("comment", "Comment", FieldType::Textarea)];
        assert_eq!(progress(&fields, &FormValues::new()), 100.0);
    }

    #[test]
    fn test_one_of_three() {
        let fields = vec![required("a"), required("b"), required("c")];
        let mut values = FormValues::new();
        values.insert("a".into(), json!("x"));
        assert_eq!(progress(&fields, &values), 33.33);
    }

    #[test]
    fn test_two_of_three() {
        let fields = vec![required("a"), required("b"), required("c")];
        let mut values = FormValues::new();
        values.insert("a".into(), json!("x"));
        values.insert("b".into(), json!(0));
        assert_eq!(progress(&fields, &values), 66.67);
    }

    #[test]
    fn test_empty_string_and_null_are_unfilled() {
        let fields = vec![required("a"), required("b")];
        let mut values = FormValues::new();
        values.insert("a".into(), json!(""));
        values.insert("b".into(), serde_json::Value::Null);
        assert_eq!(progress(&fields, &values), 0.0);
    }

    #[test]
    fn test_false_counts_as_filled() {
        let fields = vec![required("accept")];
        let mut values = FormValues::new();
        values.insert("accept".into(), json!(false));
        assert_eq!(progress(&fields, &values), 100.0);
    }

    mod policy {
        use super::*;

        fn fields() -> Vec<FormField> {
            vec![
                required("maritalStatus"),
                required("spouseBirthDate").show_when_equals("maritalStatus", "married"),
            ]
        }

        #[test]
        fn test_all_required_counts_hidden_fields() {
            let mut values = FormValues::new();
            values.insert("maritalStatus".into(), json!("single"));
            assert_eq!(progress(&fields(), &values), 50.0);
        }

        #[test]
        fn test_visible_required_ignores_hidden_fields() {
            let mut values = FormValues::new();
            values.insert("maritalStatus".into(), json!("single"));
            assert_eq!(
                progress_with_policy(&fields(), &values, ProgressPolicy::VisibleRequired),
                100.0
            );
        }

        #[test]
        fn test_policy_serde_names() {
            let policy: ProgressPolicy = serde_json::from_value(json!("visible_required")).unwrap();
            assert_eq!(policy, ProgressPolicy::VisibleRequired);
            assert_eq!(ProgressPolicy::default(), ProgressPolicy::AllRequired);
        }
    }
}
