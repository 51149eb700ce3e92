use serde_json::Value;

use super::{char_len, check_active, optional_string, Intent, ValidationReport};

/// Longest accepted notification text, in characters.
pub const MAX_TEXT_LEN: usize = 1000;

const TEXT_REQUIRED: &str = "Text is required and must be a non-empty string";

const COLOR_FIELDS: &[(&str, &str)] = &[
    ("backgroundColor", "Background color"),
    ("backgroundGradient", "Background gradient"),
    ("borderColor", "Border color"),
    ("textColor", "Text color"),
];

/// Validate a notification payload.
///
/// `text` must be present on [`Intent::Create`]; on updates it is only
/// checked when supplied.
pub fn validate_notification(payload: &Value, intent: Intent) -> ValidationReport {
    let Some(obj) = payload.as_object() else {
        return ValidationReport::not_an_object();
    };
    let mut report = ValidationReport::default();

    match obj.get("text") {
        None if intent == Intent::Create => report.push(TEXT_REQUIRED),
        None => {}
        Some(Value::String(text)) => {
            if text.trim().is_empty() {
                report.push(TEXT_REQUIRED);
            }
            if char_len(text) > MAX_TEXT_LEN {
                report.push(format!("Text must be {MAX_TEXT_LEN} characters or less"));
            }
        }
        Some(_) => report.push(TEXT_REQUIRED),
    }

    for (key, label) in COLOR_FIELDS {
        optional_string(obj, key, label, &mut report);
    }

    check_active(obj, &mut report);
    report
}
