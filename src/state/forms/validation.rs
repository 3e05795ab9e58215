//! Field and form validation
//!
//! Generic rules come from a field's `validation` block. Rules that only
//! make sense for one kind of input (numbers, dates) are registered per
//! [`FieldType`] through the [`FieldRule`] trait.

use super::field::{FieldType, FormField};
use super::value::{as_number, format_number, is_blank, FormValues};
use super::visibility::is_visible;
use crate::normalize::parse_date;
use chrono::{Local, NaiveDate};
use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Error message per field name
pub type ValidationErrors = BTreeMap<String, String>;

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_INVALID_FORMAT: &str = "Invalid format";
pub const MSG_NOT_A_NUMBER: &str = "Please enter a valid number";
pub const MSG_INVALID_DATE: &str = "Invalid date format";
pub const MSG_FUTURE_DATE: &str = "Date cannot be in the future";

/// Inputs shared by every rule during one validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub today: NaiveDate,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }
}

/// A type-specific check run on non-empty values
pub trait FieldRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Return an error message when `value` is not acceptable for `field`
    fn check(&self, field: &FormField, value: &Value, ctx: &ValidationContext) -> Option<String>;
}

/// Textual input on numeric fields must parse as a number
#[derive(Debug, Default)]
pub struct NumericRule;

impl FieldRule for NumericRule {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn check(&self, _field: &FormField, value: &Value, _ctx: &ValidationContext) -> Option<String> {
        match value {
            Value::Number(_) => None,
            Value::String(_) if as_number(value).is_some() => None,
            Value::String(_) | Value::Bool(_) => Some(MSG_NOT_A_NUMBER.to_string()),
            _ => None,
        }
    }
}

/// Dates must parse; birth dates may not be in the future
#[derive(Debug, Default)]
pub struct DateRule;

impl DateRule {
    fn is_birth_date(field: &FormField) -> bool {
        field.name.to_ascii_lowercase().contains("birth")
    }
}

impl FieldRule for DateRule {
    fn name(&self) -> &'static str {
        "date"
    }

    fn check(&self, field: &FormField, value: &Value, ctx: &ValidationContext) -> Option<String> {
        let Some(date) = value.as_str().and_then(parse_date) else {
            return Some(MSG_INVALID_DATE.to_string());
        };
        if Self::is_birth_date(field) && date > ctx.today {
            return Some(MSG_FUTURE_DATE.to_string());
        }
        None
    }
}

/// Per-field rule checker
pub struct FieldValidator {
    rules: HashMap<FieldType, Vec<Box<dyn FieldRule>>>,
    ctx: ValidationContext,
    /// Compiled `pattern` constraints keyed by source; `None` marks an invalid one
    patterns: Mutex<HashMap<String, Option<Regex>>>,
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: BTreeMap<&str, Vec<&str>> = self
            .rules
            .iter()
            .map(|(t, rules)| (t.as_str(), rules.iter().map(|r| r.name()).collect()))
            .collect();
        f.debug_struct("FieldValidator")
            .field("rules", &rules)
            .field("today", &self.ctx.today)
            .finish()
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldValidator {
    /// Validator with the built-in number and date rules
    pub fn new() -> Self {
        Self::empty()
            .with_rule(FieldType::Number, NumericRule)
            .with_rule(FieldType::Slider, NumericRule)
            .with_rule(FieldType::Date, DateRule)
    }

    /// Validator with only the generic rules
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
            ctx: ValidationContext::default(),
            patterns: Mutex::new(HashMap::new()),
        }
    }

    /// Register an additional rule for one field type
    pub fn with_rule(mut self, field_type: FieldType, rule: impl FieldRule + 'static) -> Self {
        self.rules.entry(field_type).or_default().push(Box::new(rule));
        self
    }

    /// Pin the reference date used by date rules
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.ctx.today = today;
        self
    }

    /// Validate one value; `None` means valid
    pub fn validate(&self, field: &FormField, value: Option<&Value>) -> Option<String> {
        if is_blank(value) {
            return field.required.then(|| MSG_REQUIRED.to_string());
        }
        // is_blank covers None
        let value = value?;

        if let Some(rules) = self.rules.get(&field.field_type) {
            for rule in rules {
                if let Some(message) = rule.check(field, value, &self.ctx) {
                    return Some(message);
                }
            }
        }

        let rules = field.validation.as_ref()?;

        if let Value::String(s) = value {
            let len = s.chars().count();
            if let Some(min) = rules.min_length {
                if len < min {
                    return Some(format!("Must be at least {min} characters"));
                }
            }
            if let Some(max) = rules.max_length {
                if len > max {
                    return Some(format!("Must be at most {max} characters"));
                }
            }
            if let Some(pattern) = &rules.pattern {
                if let Some(re) = self.compiled(field, pattern) {
                    if !re.is_match(s) {
                        return Some(MSG_INVALID_FORMAT.to_string());
                    }
                }
            }
        }

        let numeric = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(_) if field.field_type.is_numeric() => as_number(value),
            _ => None,
        };
        if let Some(n) = numeric {
            if let Some(min) = rules.min {
                if n < min {
                    return Some(format!("Must be at least {}", format_number(min)));
                }
            }
            if let Some(max) = rules.max {
                if n > max {
                    return Some(format!("Must be at most {}", format_number(max)));
                }
            }
        }

        None
    }

    /// Compile `pattern` once per validator. Invalid patterns are logged
    /// the first time and ignored afterwards.
    fn compiled(&self, field: &FormField, pattern: &str) -> Option<Regex> {
        let mut cache = self.patterns.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = cache.get(pattern) {
            return hit.clone();
        }
        let compiled = match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(field = %field.name, error = %e, "ignoring invalid pattern");
                None
            }
        };
        cache.insert(pattern.to_string(), compiled.clone());
        compiled
    }

    /// Validate every visible field; hidden fields never report errors
    pub fn validate_all(&self, fields: &[FormField], values: &FormValues) -> ValidationErrors {
        fields
            .iter()
            .filter(|f| is_visible(f, values))
            .filter_map(|f| {
                self.validate(f, values.get(&f.name))
                    .map(|message| (f.name.clone(), message))
            })
            .collect()
    }
}

/// Validate every visible field with the default rule set
pub fn validate_all(fields: &[FormField], values: &FormValues) -> ValidationErrors {
    FieldValidator::new().validate_all(fields, values)
}
