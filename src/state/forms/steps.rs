//! Wizard step derivation from subsection grouping

use super::field::FormField;
use super::value::FormValues;
use super::visibility::is_visible;
use serde::Serialize;
use std::collections::HashMap;

/// An ordered group of fields presented together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardStep {
    pub id: String,
    pub label: String,
    pub fields: Vec<FormField>,
}

impl WizardStep {
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

/// Group fields into steps by subsection id.
///
/// Step order is the first-seen order of subsection ids; fields keep their
/// original relative order. Fields without a subsection belong to no step.
pub fn build_steps<'a, I>(fields: I) -> Vec<WizardStep>
where
    I: IntoIterator<Item = &'a FormField>,
{
    let mut steps: Vec<WizardStep> = Vec::new();
    let mut index_by_id: HashMap<&str, usize> = HashMap::new();

    for field in fields {
        let Some(subsection) = &field.subsection else {
            tracing::trace!(field = %field.name, "skipping field without subsection");
            continue;
        };
        let idx = *index_by_id.entry(subsection.id.as_str()).or_insert_with(|| {
            steps.push(WizardStep {
                id: subsection.id.clone(),
                label: subsection.label.clone(),
                fields: Vec::new(),
            });
            steps.len() - 1
        });
        steps[idx].fields.push(field.clone());
    }

    steps
}

/// Steps built from the currently visible fields, empty steps removed
pub fn visible_steps(fields: &[FormField], values: &FormValues) -> Vec<WizardStep> {
    build_steps(fields.iter().filter(|f| is_visible(f, values)))
        .into_iter()
        .filter(|step| !step.fields.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FieldType;
    use serde_json::json;

    fn field(name: &str, step: Option<&str>) -> FormField {
        let f = FormField::new(name, name, FieldType::Text);
        match step {
            Some(id) => f.subsection(id, format!("{id} label")),
            None => f,
        }
    }

    fn ids(steps: &[WizardStep]) -> Vec<&str> {
        steps.iter().map(|s| s.id.as_str()).collect()
    }

    mod build {
        use super::*;

        #[test]
        fn test_groups_in_first_seen_order() {
            let fields = vec![
                field("a", Some("driver")),
                field("b", Some("vehicle")),
                field("c", Some("driver")),
                field("d", Some("usage")),
            ];
            let steps = build_steps(&fields);
            assert_eq!(ids(&steps), vec!["driver", "vehicle", "usage"]);
            let driver: Vec<_> = steps[0].field_names().collect();
            assert_eq!(driver, vec!["a", "c"]);
            assert_eq!(steps[0].label, "driver label");
        }

        #[test]
        fn test_drops_fields_without_subsection() {
            let fields = vec![field("a", None), field("b", Some("s")), field("c", None)];
            let steps = build_steps(&fields);
            assert_eq!(steps.len(), 1);
            assert!(steps[0].contains("b"));
            assert!(!steps[0].contains("a"));
        }

        #[test]
        fn test_empty_input_has_no_steps() {
            assert!(build_steps(&Vec::<FormField>::new()).is_empty());
        }
    }

    mod visible {
        use super::*;

        #[test]
        fn test_hidden_only_step_disappears() {
            let fields = vec![
                field("maritalStatus", Some("driver")),
                field("spouseBirthDate", Some("spouse")).show_when_equals("maritalStatus", "married"),
                field("vehicleValue", Some("vehicle")),
            ];

            let mut values = FormValues::new();
            values.insert("maritalStatus".into(), json!("single"));
            assert_eq!(ids(&visible_steps(&fields, &values)), vec!["driver", "vehicle"]);

            values.insert("maritalStatus".into(), json!("married"));
            assert_eq!(
                ids(&visible_steps(&fields, &values)),
                vec!["driver", "spouse", "vehicle"]
            );
        }

        #[test]
        fn test_hidden_field_removed_from_its_step() {
            let fields = vec![
                field("usageType", Some("usage")),
                field("workPostalCode", Some("usage"))
                    .show_when_in("usageType", ["private_work", "private_tours"]),
            ];
            let mut values = FormValues::new();
            values.insert("usageType".into(), json!("private"));
            let steps = visible_steps(&fields, &values);
            assert_eq!(steps.len(), 1);
            assert_eq!(steps[0].fields.len(), 1);
        }
    }
}
