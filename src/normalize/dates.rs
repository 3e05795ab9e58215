//! Date parsing and ISO rewriting

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Fields the backend expects as ISO `YYYY-MM-DD` dates
pub const DATE_FIELDS: &[&str] = &[
    "birthDate",
    "licenseDate",
    "firstRegistrationDate",
    "purchaseDate",
    "contractStartDate",
    "spouseBirthDate",
    "spouseLicenseDate",
    "secondaryDriverBirthDate",
    "secondaryDriverLicenseDate",
    "previousInsuranceEndDate",
];

const FALLBACK_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y"];
const FALLBACK_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

pub fn is_date_field(name: &str) -> bool {
    DATE_FIELDS.contains(&name)
}

/// Parse user-entered dates.
///
/// Accepts ISO `YYYY-MM-DD`, `DD/MM/YYYY`, `MM/YYYY` (first of the month)
/// and a handful of fallback layouts. Impossible dates such as `31/02/2020`
/// are rejected.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }

    let parts: Vec<&str> = input.split('/').collect();
    match parts.as_slice() {
        [day, month, year] if is_digits(day, 1, 2) && is_digits(month, 1, 2) && is_digits(year, 4, 4) => {
            return NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?);
        }
        [month, year] if is_digits(month, 1, 2) && is_digits(year, 4, 4) => {
            return NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1);
        }
        _ => {}
    }

    parse_fallback(input)
}

/// Rewrite a date to ISO form, `None` when it cannot be understood
pub fn normalize_date(input: &str) -> Option<String> {
    parse_date(input).map(|d| d.format("%Y-%m-%d").to_string())
}

fn parse_fallback(input: &str) -> Option<NaiveDate> {
    for fmt in FALLBACK_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    for fmt in FALLBACK_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt.date());
        }
    }
    None
}

fn is_digits(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}
