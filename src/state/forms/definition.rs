//! Form definitions: the per-category schema document

use super::field::FormField;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Malformed form definitions. These are programmer errors in the schema,
/// not something a user can fix from the wizard.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("invalid form definition document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),

    #[error("field `{field}` depends on unknown field `{depends_on}`")]
    UnknownDependency { field: String, depends_on: String },

    #[error("field `{0}` depends on itself")]
    SelfDependency(String),

    #[error("field `{0}` declares both `equals` and `in` in its show condition")]
    AmbiguousCondition(String),

    #[error("field `{field}` has an invalid pattern: {message}")]
    InvalidPattern { field: String, message: String },

    #[error("field `{0}` has a lower bound greater than its upper bound")]
    InvalidBounds(String),
}

/// A titled group of fields as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSection {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

/// The full schema for one comparison category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub category: String,
    #[serde(default)]
    pub sections: Vec<FormSection>,
}

impl FormDefinition {
    pub fn new(category: impl Into<String>, sections: Vec<FormSection>) -> Self {
        Self {
            category: category.into(),
            sections,
        }
    }

    /// Single-section definition, convenient for tests and tooling
    pub fn from_fields(category: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self::new(
            category,
            vec![FormSection {
                title: String::new(),
                fields,
            }],
        )
    }

    /// Parse and check a definition document
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: FormDefinition = serde_json::from_str(json)?;
        definition.check()?;
        Ok(definition)
    }

    /// All fields in document order, sections flattened
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Owned, flattened copy of the field list
    pub fn flatten(&self) -> Vec<FormField> {
        self.fields().cloned().collect()
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }

    /// Find a field by its name
    pub fn field_by_name(&self, name: &str) -> Option<&FormField> {
        self.fields().find(|f| f.name == name)
    }

    /// Verify the structural invariants of the schema.
    ///
    /// Returns the first violation found, in document order.
    pub fn check(&self) -> Result<(), DefinitionError> {
        let mut names = HashSet::new();
        for field in self.fields() {
            if !names.insert(field.name.as_str()) {
                return Err(DefinitionError::DuplicateField(field.name.clone()));
            }
        }

        for field in self.fields() {
            if let Some(cond) = &field.show_when {
                if cond.field == field.name {
                    return Err(DefinitionError::SelfDependency(field.name.clone()));
                }
                if !names.contains(cond.field.as_str()) {
                    return Err(DefinitionError::UnknownDependency {
                        field: field.name.clone(),
                        depends_on: cond.field.clone(),
                    });
                }
                if cond.equals.is_some() && cond.any_of.is_some() {
                    return Err(DefinitionError::AmbiguousCondition(field.name.clone()));
                }
            }

            if let Some(rules) = &field.validation {
                if let Some(pattern) = &rules.pattern {
                    Regex::new(pattern).map_err(|e| DefinitionError::InvalidPattern {
                        field: field.name.clone(),
                        message: e.to_string(),
                    })?;
                }
                let bad_range = matches!((rules.min, rules.max), (Some(lo), Some(hi)) if lo > hi);
                let bad_length =
                    matches!((rules.min_length, rules.max_length), (Some(lo), Some(hi)) if lo > hi);
                if bad_range || bad_length {
                    return Err(DefinitionError::InvalidBounds(field.name.clone()));
                }
            }

            if field.subsection.is_none() {
                tracing::warn!(
                    category = %self.category,
                    field = %field.name,
                    "field has no subsection and will not appear in any wizard step"
                );
            }
        }

        Ok(())
    }
}
