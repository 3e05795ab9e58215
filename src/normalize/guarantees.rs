//! Collapse prefixed guarantee toggles into a single nested object

use crate::state::forms::{is_truthy, FormValues};
use serde_json::{Map, Value};

/// Prefix shared by the individual guarantee toggles
pub const GUARANTEE_PREFIX: &str = "guarantee_";

/// Payload key of the grouped object
pub const GUARANTEES_KEY: &str = "optionalGuarantees";

/// Complete key set of the grouped object
pub const GUARANTEE_KEYS: &[&str] = &[
    "assistance",
    "driverProtection",
    "glassBreakage",
    "theft",
    "fire",
    "naturalDisasters",
    "legalProtection",
    "replacementVehicle",
    "personalBelongings",
];

/// Replace every `guarantee_<key>` flag with one `optionalGuarantees` object.
///
/// An existing grouped object is used as the base, so running this twice
/// yields the same payload. Keys outside [`GUARANTEE_KEYS`] are dropped.
pub fn collapse_guarantees(payload: &mut FormValues) {
    let existing = match payload.remove(GUARANTEES_KEY) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    let mut grouped = Map::new();
    for key in GUARANTEE_KEYS {
        let base = existing.get(*key).is_some_and(|v| is_truthy(Some(v)));
        grouped.insert(key.to_string(), Value::Bool(base));
    }

    let flags: Vec<String> = payload
        .keys()
        .filter(|k| k.starts_with(GUARANTEE_PREFIX))
        .cloned()
        .collect();

    for flag in flags {
        let value = payload.remove(&flag);
        let key = &flag[GUARANTEE_PREFIX.len()..];
        if GUARANTEE_KEYS.contains(&key) {
            grouped.insert(key.to_string(), Value::Bool(is_truthy(value.as_ref())));
        } else {
            tracing::warn!(flag = %flag, "dropping unknown guarantee flag");
        }
    }

    payload.insert(GUARANTEES_KEY.to_string(), Value::Object(grouped));
}
