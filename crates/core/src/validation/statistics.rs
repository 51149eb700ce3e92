use serde_json::Value;

use super::{as_integer, is_integer, optional_string, ValidationReport};

/// Earliest accepted `yearsExperienceStart`.
pub const MIN_START_YEAR: i32 = 1900;

/// Validate a statistics payload against the given calendar year.
///
/// The year is a parameter so callers pass [`super::current_year`] and
/// tests stay deterministic.
pub fn validate_statistics(payload: &Value, current_year: i32) -> ValidationReport {
    let Some(obj) = payload.as_object() else {
        return ValidationReport::not_an_object();
    };
    let mut report = ValidationReport::default();

    if let Some(inspections) = obj.get("performedInspections") {
        if !as_integer(inspections).is_some_and(|n| n >= 0) {
            report.push("Performed inspections must be a non-negative integer");
        }
    }

    if let Some(start) = obj.get("yearsExperienceStart") {
        if !is_integer(start) {
            report.push("Years experience start must be an integer");
        }
        if let Some(year) = start.as_f64() {
            if year < f64::from(MIN_START_YEAR) || year > f64::from(current_year) {
                report.push(format!(
                    "Years experience start must be between {MIN_START_YEAR} and {current_year}"
                ));
            }
        }
    }

    if let Some(satisfaction) = obj.get("satisfactionPercentage") {
        let in_range = satisfaction
            .as_f64()
            .is_some_and(|pct| (0.0..=100.0).contains(&pct));
        if !in_range {
            report.push("Satisfaction percentage must be a number between 0 and 100");
        }
    }

    optional_string(obj, "googlePlaceId", "Google Place ID", &mut report);

    report
}
