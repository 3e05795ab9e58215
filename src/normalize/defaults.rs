//! Derived defaults for vehicle comparisons
//!
//! Each target is filled only when absent, from a correlated field that has
//! already gone through enum remapping.

use crate::state::forms::{is_blank, is_truthy, FormValues};
use serde_json::Value;

pub const DEFAULT_VEHICLE_VALUE: i64 = 15000;
pub const DEFAULT_DISTANCE_HOME_TO_WORK: i64 = 0;
pub const DEFAULT_POINTS_LOST: &str = "0";
pub const DEFAULT_WORK_IN_FRANCE: &str = "yes";
pub const DEFAULT_OWNER: &str = "you";
pub const DEFAULT_PLANNED_TRIPS: &str = "private_only";
pub const DEFAULT_COVERAGE_LEVEL: &str = "third_party_basic";

/// Fill every derived field that is missing from `payload`
pub fn apply_vehicle_defaults(payload: &mut FormValues) {
    let secondary = has_secondary_driver(payload);

    let civility = civility_from_gender(text(payload, "gender"));
    set_if_absent(payload, "civility", civility);

    let status = professional_status(text(payload, "profession"));
    set_if_absent(payload, "professionalStatus", status);

    let owner = text(payload, "cardHolder").unwrap_or(DEFAULT_OWNER).to_string();
    set_if_absent(payload, "owner", owner);

    set_if_absent(payload, "isSoleOwner", !secondary);
    set_if_absent(payload, "hasAdditionalDrivers", secondary);

    let trips = planned_trips(text(payload, "usageType"));
    set_if_absent(payload, "plannedTrips", trips);

    let (location, mode) = parking_from_night_type(text(payload, "nightParkingType"));
    set_if_absent(payload, "parkingLocation", location);
    set_if_absent(payload, "nightParkingMode", mode);

    let coverage = text(payload, "desiredCoverageLevel")
        .unwrap_or(DEFAULT_COVERAGE_LEVEL)
        .to_string();
    set_if_absent(payload, "coverageLevel", coverage);

    set_if_absent(payload, "vehicleValue", DEFAULT_VEHICLE_VALUE);
    set_if_absent(payload, "distanceHomeToWork", DEFAULT_DISTANCE_HOME_TO_WORK);
    set_if_absent(payload, "pointsLost", DEFAULT_POINTS_LOST);
    set_if_absent(payload, "workInFrance", DEFAULT_WORK_IN_FRANCE);
}

/// `M.` for male, `Mme` for any other stated gender, `M.` when unknown
pub fn civility_from_gender(gender: Option<&str>) -> &'static str {
    match gender {
        None => "M.",
        Some(g) if g.eq_ignore_ascii_case("male") => "M.",
        Some(_) => "Mme",
    }
}

/// Keyword match on a free-text profession
pub fn professional_status(profession: Option<&str>) -> &'static str {
    let Some(profession) = profession else {
        return "employee";
    };
    let p = profession.to_lowercase();
    if p.contains("salarié") || p.contains("salarie") {
        "employee"
    } else if p.contains("étudiant") || p.contains("etudiant") {
        "student"
    } else if p.contains("retraité") || p.contains("retraite") {
        "retired"
    } else if p.contains("chômeur") || p.contains("chomeur") || p.contains("sans emploi") {
        "unemployed"
    } else {
        "other"
    }
}

pub fn planned_trips(usage: Option<&str>) -> &'static str {
    match usage {
        Some("private_work") => "private_and_commute",
        Some("private_professional") => "professional",
        Some("private_tours") => "professional_tours",
        _ => DEFAULT_PLANNED_TRIPS,
    }
}

/// `(parkingLocation, nightParkingMode)` derived from the night parking type
pub fn parking_from_night_type(night: Option<&str>) -> (&'static str, &'static str) {
    let night = night.map(str::to_lowercase).unwrap_or_default();
    if night.contains("garage") {
        ("garage", "garage")
    } else if night.contains("closed") {
        ("covered_parking", "collective_closed")
    } else {
        ("street", "public_road")
    }
}

/// A secondary driver is declared either by the toggle or by their data
pub fn has_secondary_driver(values: &FormValues) -> bool {
    is_truthy(values.get("addSecondaryDriver"))
        || is_truthy(values.get("hasSecondaryDriver"))
        || !is_blank(values.get("secondaryDriverBirthDate"))
}

fn text<'a>(values: &'a FormValues, key: &str) -> Option<&'a str> {
    values
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn set_if_absent(payload: &mut FormValues, key: &str, value: impl Into<Value>) {
    if is_absent(payload, key) {
        payload.insert(key.to_string(), value.into());
    }
}

fn is_absent(payload: &FormValues, key: &str) -> bool {
    match payload.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> FormValues {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    mod civility {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_from_gender() {
            assert_eq!(civility_from_gender(Some("male")), "M.");
            assert_eq!(civility_from_gender(Some("female")), "Mme");
            assert_eq!(civility_from_gender(None), "M.");
        }
    }

    mod profession {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_keyword_matching() {
            assert_eq!(professional_status(Some("Salarié du privé")), "employee");
            assert_eq!(professional_status(Some("Étudiant")), "student");
            assert_eq!(professional_status(Some("retraité")), "retired");
            assert_eq!(professional_status(Some("Chômeur")), "unemployed");
            assert_eq!(professional_status(Some("Artisan")), "other");
            assert_eq!(professional_status(None), "employee");
        }
    }

    mod parking {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_substring_matching() {
            assert_eq!(
                parking_from_night_type(Some("private_garage")),
                ("garage", "garage")
            );
            assert_eq!(
                parking_from_night_type(Some("closed_parking")),
                ("covered_parking", "collective_closed")
            );
            assert_eq!(
                parking_from_night_type(Some("street")),
                ("street", "public_road")
            );
            assert_eq!(parking_from_night_type(None), ("street", "public_road"));
        }
    }

    mod apply {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_payload_gets_every_default() {
            let mut p = FormValues::new();
            apply_vehicle_defaults(&mut p);
            assert_eq!(
                Value::Object(p),
                json!({
                    "civility": "M.",
                    "professionalStatus": "employee",
                    "owner": "you",
                    "isSoleOwner": true,
                    "hasAdditionalDrivers": false,
                    "plannedTrips": "private_only",
                    "parkingLocation": "street",
                    "nightParkingMode": "public_road",
                    "coverageLevel": "third_party_basic",
                    "vehicleValue": 15000,
                    "distanceHomeToWork": 0,
                    "pointsLost": "0",
                    "workInFrance": "yes"
                })
            );
        }

        #[test]
        fn test_derives_from_correlated_fields() {
            let mut p = payload(json!({
                "gender": "female",
                "profession": "étudiante",
                "cardHolder": "spouse",
                "usageType": "private_work",
                "nightParkingType": "garage",
                "desiredCoverageLevel": "comprehensive",
                "addSecondaryDriver": "yes"
            }));
            apply_vehicle_defaults(&mut p);
            assert_eq!(p["civility"], json!("Mme"));
            assert_eq!(p["professionalStatus"], json!("student"));
            assert_eq!(p["owner"], json!("spouse"));
            assert_eq!(p["isSoleOwner"], json!(false));
            assert_eq!(p["hasAdditionalDrivers"], json!(true));
            assert_eq!(p["plannedTrips"], json!("private_and_commute"));
            assert_eq!(p["parkingLocation"], json!("garage"));
            assert_eq!(p["coverageLevel"], json!("comprehensive"));
        }

        #[test]
        fn test_present_values_are_kept() {
            let mut p = payload(json!({
                "civility": "Mme",
                "gender": "male",
                "vehicleValue": 32000,
                "pointsLost": "4"
            }));
            apply_vehicle_defaults(&mut p);
            assert_eq!(p["civility"], json!("Mme"));
            assert_eq!(p["vehicleValue"], json!(32000));
            assert_eq!(p["pointsLost"], json!("4"));
        }

        #[test]
        fn test_null_counts_as_absent() {
            let mut p = payload(json!({ "owner": null }));
            apply_vehicle_defaults(&mut p);
            assert_eq!(p["owner"], json!("you"));
        }
    }
}
