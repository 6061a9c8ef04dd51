//! Error types module
//!
//! All client-side errors are unified under the `AppError` enum: malformed
//! payloads, date normalization failures, illegal approver transitions, and
//! API responses surfaced by the HTTP client.

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid approver transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },
}
