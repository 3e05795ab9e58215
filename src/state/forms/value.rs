//! Loosely-typed value helpers shared by the evaluators and the normalizer

use serde_json::{Map, Value};

/// Current values keyed by field name
pub type FormValues = Map<String, Value>;

/// String coercion used for loose comparisons.
///
/// `null` has no string form so that a missing dependency never matches a
/// concrete literal. Whole floats print without a fractional part, arrays
/// join their elements with commas.
pub fn loose_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() => format_number(f),
            _ => n.to_string(),
        }),
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|v| loose_string(v).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some("[object Object]".to_string()),
    }
}

/// Loose equality through string coercion of both operands
pub fn loosely_equal(actual: Option<&Value>, expected: &Value) -> bool {
    match (actual.and_then(loose_string), loose_string(expected)) {
        (Some(a), Some(e)) => a == e,
        _ => false,
    }
}

/// Format a float the way a person would type it: `3` rather than `3.0`
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Empty for the required check: missing, null, `""` or `[]`.
///
/// Whitespace is a value. Trimming is left to the input widget.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Counted as filled by the progress bar. Always the negation of
/// [`is_blank`], so a field never counts as done while still reporting
/// "required".
pub fn is_filled(value: Option<&Value>) -> bool {
    !is_blank(value)
}

/// Checkbox-style truthiness accepted from UI widgets
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f == 1.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "on" | "1"
        ),
        _ => false,
    }
}

/// Parse a number out of a JSON number or a plain numeric string
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod loose_equality {
        use super::*;

        #[test]
        fn test_bool_matches_string_literal() {
            assert!(loosely_equal(Some(&json!(true)), &json!("true")));
            assert!(loosely_equal(Some(&json!("true")), &json!(true)));
        }

        #[test]
        fn test_number_matches_string_literal() {
            assert!(loosely_equal(Some(&json!(2)), &json!("2")));
            assert!(loosely_equal(Some(&json!(2.0)), &json!("2")));
            assert!(!loosely_equal(Some(&json!(2.5)), &json!("2")));
        }

        #[test]
        fn test_missing_or_null_never_matches() {
            assert!(!loosely_equal(None, &json!("null")));
            assert!(!loosely_equal(Some(&Value::Null), &json!("null")));
            assert!(!loosely_equal(Some(&Value::Null), &json!("")));
        }

        #[test]
        fn test_arrays_join_with_commas() {
            assert_eq!(loose_string(&json!(["a", 1, true])).unwrap(), "a,1,true");
        }
    }

    mod emptiness {
        use super::*;

        #[test]
        fn test_blank_values() {
            assert!(is_blank(None));
            assert!(is_blank(Some(&Value::Null)));
            assert!(is_blank(Some(&json!(""))));
            assert!(is_blank(Some(&json!([]))));
            assert!(!is_blank(Some(&json!("   "))));
            assert!(!is_blank(Some(&json!(0))));
            assert!(!is_blank(Some(&json!(false))));
        }

        #[test]
        fn test_filled_values() {
            assert!(!is_filled(None));
            assert!(!is_filled(Some(&json!(""))));
            assert!(is_filled(Some(&json!(" "))));
            assert!(is_filled(Some(&json!(false))));
            assert!(!is_filled(Some(&json!([]))));
        }

        #[test]
        fn test_filled_is_never_blank() {
            let samples = [
                None,
                Some(json!(null)),
                Some(json!("")),
                Some(json!("  ")),
                Some(json!([])),
                Some(json!(["a"])),
                Some(json!(0)),
                Some(json!({})),
            ];
            for sample in &samples {
                assert_ne!(is_filled(sample.as_ref()), is_blank(sample.as_ref()), "{sample:?}");
            }
        }

        #[test]
        fn test_truthy_tokens() {
            assert!(is_truthy(Some(&json!(true))));
            assert!(is_truthy(Some(&json!("yes"))));
            assert!(is_truthy(Some(&json!("On"))));
            assert!(is_truthy(Some(&json!(1))));
            assert!(!is_truthy(Some(&json!("no"))));
            assert!(!is_truthy(None));
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(0.85), "0.85");
        assert_eq!(format_number(-12.0), "-12");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(as_number(&json!(" 42 ")), Some(42.0));
        assert_eq!(as_number(&json!(1.5)), Some(1.5));
        assert_eq!(as_number(&json!("abc")), None);
        assert_eq!(as_number(&json!(true)), None);
    }
}
