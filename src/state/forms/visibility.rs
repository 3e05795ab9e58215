//! Show-condition evaluation

use super::field::{FormField, ShowWhen};
use super::value::{loosely_equal, FormValues};

/// Whether `field` should currently be shown.
///
/// Fields without a condition are always visible. Comparisons go through
/// [`loosely_equal`], so `true` and `"true"` match.
pub fn is_visible(field: &FormField, values: &FormValues) -> bool {
    match &field.show_when {
        None => true,
        Some(cond) => condition_holds(cond, values),
    }
}

/// Evaluate a show condition against the current values
pub fn condition_holds(cond: &ShowWhen, values: &FormValues) -> bool {
    let actual = values.get(&cond.field);

    if let Some(expected) = &cond.equals {
        return loosely_equal(actual, expected);
    }
    if let Some(candidates) = &cond.any_of {
        return candidates.iter().any(|c| loosely_equal(actual, c));
    }

    // A condition with neither predicate hides nothing
    true
}

/// The subset of `fields` that is currently visible, in order
pub fn visible_fields<'a>(fields: &'a [FormField], values: &FormValues) -> Vec<&'a FormField> {
    fields.iter().filter(|f| is_visible(f, values)).collect()
}
