use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Clients match on these, never on the message string.

/// Stable error code constants, sent as `code` in `{"code": ..., "message": ...}`.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const LOOKUP_FAILED: &str = "LOOKUP_FAILED";
    pub const WRITE_FAILED: &str = "WRITE_FAILED";
    pub const SEED_FAILED: &str = "SEED_FAILED";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Client-facing error category shared by every module.
///
/// Module errors (`PokemonError`, `SeedError`) convert into this type at the
/// HTTP boundary, and so do request bodies or query strings axum could not
/// decode. Each variant maps to a stable error code and an HTTP status:
///
/// ```json
/// {"code": "NOT_FOUND", "message": "pokemon with name \"mew\" not found"}
/// ```
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No record matched the lookup. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// A unique field is already taken. HTTP 409.
    #[error("{0}")]
    Conflict(String),

    /// Malformed or invalid input. HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// A read failed inside the store. HTTP 500.
    #[error("{0}")]
    LookupFailed(String),

    /// A write failed inside the store. HTTP 500.
    #[error("{0}")]
    WriteFailed(String),

    /// The seed run stopped before the catalog was reloaded. HTTP 500.
    #[error("{0}")]
    SeedFailed(String),

    /// The store could not be prepared (schema setup). HTTP 500.
    #[error("{0}")]
    Storage(String),
}

impl ServiceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Conflict(_) => error_code::ALREADY_EXISTS,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::LookupFailed(_) => error_code::LOOKUP_FAILED,
            ServiceError::WriteFailed(_) => error_code::WRITE_FAILED,
            ServiceError::SeedFailed(_) => error_code::SEED_FAILED,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::LookupFailed(_)
            | ServiceError::WriteFailed(_)
            | ServiceError::SeedFailed(_)
            | ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(e: JsonRejection) -> Self {
        ServiceError::Validation(e.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(e: QueryRejection) -> Self {
        ServiceError::Validation(e.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
