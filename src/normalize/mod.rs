//! Data normalization for the comparison backend
//!
//! Turns loosely-typed wizard values into the strict payload shape the
//! backend accepts. The pipeline is total: malformed optional data is
//! dropped or passed through, never raised as an error.

mod dates;
mod defaults;
mod enums;
mod guarantees;
mod numeric;

pub use dates::{is_date_field, normalize_date, parse_date, DATE_FIELDS};
pub use defaults::{apply_vehicle_defaults, has_secondary_driver};
pub use enums::{has_enum_table, map_enum_value, ENUM_FIELDS};
pub use guarantees::{collapse_guarantees, GUARANTEES_KEY, GUARANTEE_KEYS, GUARANTEE_PREFIX};
pub use numeric::{coerce_numeric, is_numeric_field, NUMERIC_FIELDS};

use crate::state::forms::FormValues;
use serde_json::Value;

/// Normalized values ready for submission
pub type BackendPayload = FormValues;

/// Required string fields the backend rejects when empty but accepts when absent
pub const OMIT_WHEN_EMPTY: &[&str] = &["firstName", "lastName", "postalCode", "city", "parkingCity"];

/// Comparison category, as used in definition and submission URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Auto,
    Moto,
    Home,
    Health,
    Other(String),
}

impl Category {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "car" => Self::Auto,
            "moto" | "motorcycle" => Self::Moto,
            "home" | "habitation" => Self::Home,
            "health" | "sante" => Self::Health,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::Moto => "moto",
            Self::Home => "home",
            Self::Health => "health",
            Self::Other(s) => s,
        }
    }

    /// Categories whose payload carries vehicle and driver defaults
    pub fn is_vehicle(&self) -> bool {
        matches!(self, Self::Auto | Self::Moto)
    }
}

/// Payload plus the names of fields dropped along the way
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationReport {
    pub payload: BackendPayload,
    pub dropped: Vec<String>,
}

/// Normalize raw wizard values for `category`
pub fn normalize(category: &str, raw: &FormValues) -> BackendPayload {
    normalize_with_report(category, raw).payload
}

/// Same as [`normalize`], also reporting which fields were dropped
pub fn normalize_with_report(category: &str, raw: &FormValues) -> NormalizationReport {
    let category = Category::parse(category);
    let mut payload = BackendPayload::new();
    let mut dropped = Vec::new();

    for (key, value) in raw {
        let value = remap_enum(key, value);

        if is_date_field(key) {
            match value.as_str().and_then(normalize_date) {
                Some(iso) => {
                    payload.insert(key.clone(), Value::String(iso));
                }
                None => {
                    if !value.is_null() {
                        tracing::debug!(field = %key, value = %value, "dropping unparseable date");
                    }
                    dropped.push(key.clone());
                }
            }
            continue;
        }

        let value = if is_numeric_field(key) {
            coerce_numeric(key, &value)
        } else {
            value
        };
        payload.insert(key.clone(), value);
    }

    if category.is_vehicle() {
        apply_vehicle_defaults(&mut payload);
    }

    collapse_guarantees(&mut payload);

    for key in OMIT_WHEN_EMPTY {
        let empty = match payload.get(*key) {
            Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            _ => false,
        };
        if empty {
            payload.remove(*key);
            dropped.push(key.to_string());
        }
    }

    tracing::debug!(
        category = category.as_str(),
        fields = payload.len(),
        dropped = dropped.len(),
        "normalized payload"
    );

    NormalizationReport { payload, dropped }
}

fn remap_enum(key: &str, value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(map_enum_value(key, s).to_string()),
        Value::Array(items) if has_enum_table(key) => {
            Value::Array(items.iter().map(|v| remap_enum(key, v)).collect())
        }
        other => other.clone(),
    }
}
