//! Wizard state and its reducer
//!
//! Every event produces a new [`WizardState`] with visible steps, errors
//! and progress recomputed in a single pass over the field list.

use super::definition::FormDefinition;
use super::field::FormField;
use super::progress::{progress_with_policy, ProgressPolicy};
use super::steps::{visible_steps, WizardStep};
use super::validation::{FieldValidator, ValidationErrors};
use super::value::FormValues;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

/// User-driven changes fed to the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    FieldChanged { name: String, value: Value },
    FieldCleared { name: String },
    /// Merge pre-filled values (profile autofill) without marking them touched
    Autofill(FormValues),
    NextStep,
    PreviousStep,
    GoToStep(usize),
    Reset,
}

impl WizardEvent {
    pub fn changed(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::FieldChanged {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn cleared(name: impl Into<String>) -> Self {
        Self::FieldCleared { name: name.into() }
    }
}

/// What the rendering layer needs for one visible field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView<'a> {
    pub field: &'a FormField,
    pub value: Option<&'a Value>,
    pub error: Option<&'a str>,
}

/// Snapshot of a wizard session
#[derive(Debug, Clone)]
pub struct WizardState {
    category: String,
    fields: Arc<Vec<FormField>>,
    validator: Arc<FieldValidator>,
    policy: ProgressPolicy,
    pub values: FormValues,
    pub visible_steps: Vec<WizardStep>,
    pub errors: ValidationErrors,
    pub progress: f64,
    pub current_step: usize,
    /// Fields the user has edited
    pub touched: BTreeSet<String>,
    /// Step ids whose errors are shown after a failed attempt to advance
    pub revealed_steps: BTreeSet<String>,
}

impl WizardState {
    /// Empty session for `definition`
    pub fn new(definition: &FormDefinition) -> Self {
        Self::with_values(definition, FormValues::new())
    }

    /// Session pre-seeded with autofill values
    pub fn with_values(definition: &FormDefinition, values: FormValues) -> Self {
        Self::build(
            definition.category.clone(),
            Arc::new(definition.flatten()),
            Arc::new(FieldValidator::new()),
            ProgressPolicy::default(),
            values,
        )
    }

    /// Replace the validator (custom rules, pinned clock)
    pub fn with_validator(self, validator: FieldValidator) -> Self {
        let mut next = self;
        next.validator = Arc::new(validator);
        next.recompute()
    }

    pub fn with_policy(self, policy: ProgressPolicy) -> Self {
        let mut next = self;
        next.policy = policy;
        next.recompute()
    }

    fn build(
        category: String,
        fields: Arc<Vec<FormField>>,
        validator: Arc<FieldValidator>,
        policy: ProgressPolicy,
        values: FormValues,
    ) -> Self {
        Self {
            category,
            fields,
            validator,
            policy,
            values,
            visible_steps: Vec::new(),
            errors: ValidationErrors::new(),
            progress: 0.0,
            current_step: 0,
            touched: BTreeSet::new(),
            revealed_steps: BTreeSet::new(),
        }
        .recompute()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn policy(&self) -> ProgressPolicy {
        self.policy
    }

    /// Apply one event and return the resulting state
    pub fn apply(self, event: WizardEvent) -> Self {
        let mut next = self;
        match event {
            WizardEvent::FieldChanged { name, value } => {
                next.values.insert(name.clone(), value);
                next.touched.insert(name);
            }
            WizardEvent::FieldCleared { name } => {
                next.values.remove(&name);
                next.touched.insert(name);
            }
            WizardEvent::Autofill(values) => {
                next.values.extend(values);
            }
            WizardEvent::NextStep => return next.advance(),
            WizardEvent::PreviousStep => {
                next.current_step = next.current_step.saturating_sub(1);
            }
            WizardEvent::GoToStep(index) => return next.jump_to(index),
            WizardEvent::Reset => {
                tracing::debug!(category = %next.category, "resetting wizard");
                next.values.clear();
                next.touched.clear();
                next.revealed_steps.clear();
                let mut next = next.recompute();
                next.current_step = 0;
                return next;
            }
        }
        next.recompute()
    }

    /// Rebuild derived data. The current step is tracked by id so that
    /// steps appearing or disappearing before it do not move the user.
    fn recompute(mut self) -> Self {
        let current_id = self.current().map(|s| s.id.clone());
        self.visible_steps = visible_steps(&self.fields, &self.values);
        self.errors = self.validator.validate_all(&self.fields, &self.values);
        self.progress = progress_with_policy(&self.fields, &self.values, self.policy);

        let position = current_id
            .as_deref()
            .and_then(|id| self.visible_steps.iter().position(|s| s.id == id));
        match position {
            Some(index) => self.current_step = index,
            None if self.current_step >= self.visible_steps.len() => {
                self.current_step = self.visible_steps.len().saturating_sub(1);
            }
            None => {}
        }
        self
    }

    fn advance(mut self) -> Self {
        let Some(step) = self.current() else {
            return self;
        };
        if self.step_has_errors(step) {
            let id = step.id.clone();
            tracing::debug!(step = %id, errors = self.errors.len(), "blocked on invalid step");
            self.revealed_steps.insert(id);
            return self;
        }
        if self.current_step + 1 < self.visible_steps.len() {
            self.current_step += 1;
        }
        self
    }

    fn jump_to(mut self, index: usize) -> Self {
        if index >= self.visible_steps.len() {
            return self;
        }
        // Forward jumps must not skip over an invalid step
        let blocked = self.visible_steps[..index]
            .iter()
            .position(|s| self.step_has_errors(s));
        match blocked {
            Some(first_invalid) if index > self.current_step => {
                let id = self.visible_steps[first_invalid].id.clone();
                self.current_step = first_invalid;
                self.revealed_steps.insert(id);
            }
            _ => self.current_step = index,
        }
        self
    }

    fn step_has_errors(&self, step: &WizardStep) -> bool {
        step.field_names().any(|n| self.errors.contains_key(n))
    }

    /// The step currently displayed, if any step is visible
    pub fn current(&self) -> Option<&WizardStep> {
        self.visible_steps.get(self.current_step)
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= self.visible_steps.len()
    }

    /// True when no visible field has an error
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fields of the current step with the error to show for each.
    ///
    /// Errors are only exposed once a field was touched or its step was
    /// revealed by a failed attempt to move on.
    pub fn current_fields(&self) -> Vec<FieldView<'_>> {
        let Some(step) = self.current() else {
            return Vec::new();
        };
        let revealed = self.revealed_steps.contains(&step.id);
        step.fields
            .iter()
            .map(|field| {
                let show_error = revealed || self.touched.contains(&field.name);
                FieldView {
                    field,
                    value: self.values.get(&field.name),
                    error: self
                        .errors
                        .get(&field.name)
                        .filter(|_| show_error)
                        .map(String::as_str),
                }
            })
            .collect()
    }
}
