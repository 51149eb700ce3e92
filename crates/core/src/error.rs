#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Missing id")]
    MissingId,

    #[error("Bad request: {0}")]
    BadRequest(String),
}
