use serde_json::Value;

use super::{char_len, check_active, is_http_url, is_integer, optional_string, ValidationReport};

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_URL_LEN: usize = 500;

const NAME_REQUIRED: &str = "Name is required and must be a non-empty string";

/// Validate the effective partner payload (incoming fields merged over the
/// stored row), so `name` is always required.
pub fn validate_partner(payload: &Value) -> ValidationReport {
    let Some(obj) = payload.as_object() else {
        return ValidationReport::not_an_object();
    };
    let mut report = ValidationReport::default();

    match obj.get("name") {
        Some(Value::String(name)) => {
            if name.trim().is_empty() {
                report.push(NAME_REQUIRED);
            }
            if char_len(name) > MAX_NAME_LEN {
                report.push(format!("Name must be {MAX_NAME_LEN} characters or less"));
            }
        }
        _ => report.push(NAME_REQUIRED),
    }

    if let Some(logo_url) = optional_string(obj, "logoUrl", "Logo URL", &mut report) {
        if char_len(logo_url) > MAX_URL_LEN {
            report.push(format!("Logo URL must be {MAX_URL_LEN} characters or less"));
        }
    }

    if let Some(link) = optional_string(obj, "link", "Link", &mut report) {
        if char_len(link) > MAX_URL_LEN {
            report.push(format!("Link must be {MAX_URL_LEN} characters or less"));
        }
        // An empty link means "no link".
        if !link.is_empty() && !is_http_url(link) {
            report.push("Link must be a valid URL");
        }
    }

    if let Some(sort_order) = obj.get("sortOrder") {
        if !is_integer(sort_order) {
            report.push("Sort order must be an integer");
        }
    }

    check_active(obj, &mut report);
    report
}
