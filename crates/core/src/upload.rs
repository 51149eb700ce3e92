//! Partner logo upload rules.
//!
//! Decoding, size limits and object naming for logos sent as base64 JSON.
//! The transfer to object storage lives in the db crate.

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;

use crate::error::CoreError;

/// Storage bucket holding partner logos.
pub const LOGO_BUCKET: &str = "partners";

/// Largest accepted decoded logo (5 MiB).
pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

/// Largest accepted upload request body (6 MiB, base64 overhead included).
pub const MAX_UPLOAD_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Content type used when the client does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

static DATA_URL_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:.*;base64,").expect("valid regex"));

static UNSAFE_NAME_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9._-]").expect("valid regex"));

/// Decode a base64 logo, accepting an optional `data:<type>;base64,` prefix.
pub fn decode_logo(data: &str) -> Result<Vec<u8>, CoreError> {
    let encoded = DATA_URL_PREFIX_RE.replace(data.trim(), "");
    let bytes = STANDARD
        .decode(encoded.as_bytes())
        .map_err(|_| CoreError::BadRequest("dataBase64 is not valid base64".into()))?;

    if bytes.len() > MAX_LOGO_BYTES {
        return Err(CoreError::BadRequest("File too large (max 5MB)".into()));
    }
    Ok(bytes)
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_NAME_CHARS_RE.replace_all(name, "_").into_owned()
}

/// Object path for an uploaded logo: `{unix_millis}_{sanitized_name}`.
pub fn logo_object_path(unix_millis: i64, file_name: &str) -> String {
    format!("{unix_millis}_{}", sanitize_file_name(file_name))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn decodes_plain_and_data_url_payloads() {
        assert_eq!(decode_logo("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(
            decode_logo("data:image/png;base64,aGVsbG8=").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn rejects_invalid_base64() {
        assert_matches!(decode_logo("%%%"), Err(CoreError::BadRequest(_)));
    }

    #[test]
    fn rejects_oversized_logo() {
        let encoded = STANDARD.encode(vec![0u8; MAX_LOGO_BYTES + 1]);
        assert_matches!(
            decode_logo(&encoded),
            Err(CoreError::BadRequest(msg)) if msg == "File too large (max 5MB)"
        );
    }

    #[test]
    fn accepts_logo_at_the_limit() {
        let encoded = STANDARD.encode(vec![0u8; MAX_LOGO_BYTES]);
        assert_eq!(decode_logo(&encoded).unwrap().len(), MAX_LOGO_BYTES);
    }

    #[test]
    fn sanitizes_file_names() {
        assert_eq!(sanitize_file_name("my logo (1).png"), "my_logo__1_.png");
        assert_eq!(sanitize_file_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_file_name("ok-name_1.svg"), "ok-name_1.svg");
    }

    #[test]
    fn object_path_is_timestamp_prefixed() {
        assert_eq!(
            logo_object_path(1_700_000_000_000, "logó.png"),
            "1700000000000_log_.png"
        );
    }
}
