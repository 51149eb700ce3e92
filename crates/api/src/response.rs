//! Shared response bodies for API handlers.

use serde::Serialize;

/// `{ "ok": true }` acknowledgement returned by every successful write.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// `{ "url": ... }` returned by the logo upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}
