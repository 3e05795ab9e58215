//! Per-field remapping of UI option tokens to backend tokens
//!
//! Every mapped value is a fixed point of its own table, so remapping an
//! already-normalized payload leaves it untouched.

type Table = &'static [(&'static str, &'static str)];

const CARD_HOLDER: Table = &[
    ("both", "you"),
    ("self", "you"),
    ("me", "you"),
    ("subscriber", "you"),
    ("partner", "spouse"),
    ("conjoint", "spouse"),
    ("third_party", "other"),
];

const DESIRED_COVERAGE_LEVEL: Table = &[
    ("tous_risques", "comprehensive"),
    ("all_risks", "comprehensive"),
    ("tiers", "third_party_basic"),
    ("tiers_simple", "third_party_basic"),
    ("third_party", "third_party_basic"),
    ("tiers_plus", "third_party_extended"),
    ("tiers_etendu", "third_party_extended"),
    ("intermediate", "third_party_extended"),
];

const LICENSE_TYPE: Table = &[
    ("b", "B"),
    ("a", "A"),
    ("a1", "A1"),
    ("a2", "A2"),
    ("am", "AM"),
    ("b1", "B1"),
    ("be", "BE"),
    ("c", "C"),
];

const GENDER: Table = &[
    ("homme", "male"),
    ("h", "male"),
    ("m", "male"),
    ("femme", "female"),
    ("f", "female"),
];

const MARITAL_STATUS: Table = &[
    ("marie", "married"),
    ("celibataire", "single"),
    ("pacse", "civil_partnership"),
    ("pacs", "civil_partnership"),
    ("concubinage", "cohabiting"),
    ("divorce", "divorced"),
    ("veuf", "widowed"),
];

const USAGE_TYPE: Table = &[
    ("personal", "private"),
    ("prive", "private"),
    ("commute", "private_work"),
    ("trajet_travail", "private_work"),
    ("professional", "private_professional"),
    ("tournees", "private_tours"),
];

/// Fields that have a remapping table
pub const ENUM_FIELDS: &[&str] = &[
    "cardHolder",
    "desiredCoverageLevel",
    "licenseType",
    "gender",
    "maritalStatus",
    "usageType",
];

fn table(field: &str) -> Option<Table> {
    match field {
        "cardHolder" => Some(CARD_HOLDER),
        "desiredCoverageLevel" => Some(DESIRED_COVERAGE_LEVEL),
        "licenseType" => Some(LICENSE_TYPE),
        "gender" => Some(GENDER),
        "maritalStatus" => Some(MARITAL_STATUS),
        "usageType" => Some(USAGE_TYPE),
        _ => None,
    }
}

/// Translate `value` for `field`; unmapped values pass through unchanged
pub fn map_enum_value<'a>(field: &str, value: &'a str) -> &'a str {
    table(field)
        .and_then(|t| t.iter().find(|(from, _)| *from == value))
        .map(|(_, to)| *to)
        .unwrap_or(value)
}

pub fn has_enum_table(field: &str) -> bool {
    table(field).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_holder_both_is_you() {
        assert_eq!(map_enum_value("cardHolder", "both"), "you");
    }

    #[test]
    fn test_coverage_level() {
        assert_eq!(
            map_enum_value("desiredCoverageLevel", "tous_risques"),
            "comprehensive"
        );
        assert_eq!(
            map_enum_value("desiredCoverageLevel", "tiers_plus"),
            "third_party_extended"
        );
    }

    #[test]
    fn test_license_type_uppercased() {
        assert_eq!(map_enum_value("licenseType", "b"), "B");
        assert_eq!(map_enum_value("licenseType", "B"), "B");
    }

    #[test]
    fn test_unmapped_passes_through() {
        assert_eq!(map_enum_value("cardHolder", "spouse"), "spouse");
        assert_eq!(map_enum_value("firstName", "both"), "both");
    }

    #[test]
    fn test_every_target_is_a_fixed_point() {
        for field in ENUM_FIELDS {
            let t = table(field).unwrap();
            for (_, to) in t {
                assert_eq!(map_enum_value(field, to), *to, "{field}: {to}");
            }
        }
    }
}
