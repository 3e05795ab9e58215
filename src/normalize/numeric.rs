//! String-to-number coercion for numeric backend fields

use serde_json::{Number, Value};

/// Fields the backend expects as JSON numbers
pub const NUMERIC_FIELDS: &[&str] = &[
    "numberOfChildren",
    "vehicleOwnershipYears",
    "vehicleValue",
    "annualMileage",
    "distanceHomeToWork",
    "bonusMalusCoefficient",
    "yearsInsured",
    "numberOfClaims",
    "vehiclePower",
    "purchasePrice",
];

pub fn is_numeric_field(name: &str) -> bool {
    NUMERIC_FIELDS.contains(&name)
}

/// Coerce a raw value for `field` into a number when possible.
///
/// Bucket tokens used by select widgets are special-cased; anything that
/// still cannot be parsed is returned unchanged.
pub fn coerce_numeric(field: &str, value: &Value) -> Value {
    let Value::String(raw) = value else {
        return value.clone();
    };
    let token = raw.trim();

    if let Some(n) = bucket_value(field, token) {
        return Value::from(n);
    }

    if token.contains('_') {
        if let Some(n) = token.split('_').next().and_then(|head| head.parse::<i64>().ok()) {
            return Value::from(n);
        }
    }

    if let Ok(n) = token.parse::<i64>() {
        return Value::from(n);
    }
    if let Some(n) = token
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
    {
        return Value::Number(n);
    }

    tracing::debug!(field, value = %token, "leaving unparseable numeric value as-is");
    value.clone()
}

fn bucket_value(field: &str, token: &str) -> Option<i64> {
    match (field, token) {
        ("numberOfChildren", "3_plus") => Some(3),
        ("vehicleOwnershipYears", "5_plus") => Some(5),
        ("vehicleOwnershipYears", "less_1") => Some(0),
        _ => None,
    }
}
