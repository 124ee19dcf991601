// src/common/error.rs

use thiserror::Error;

// In-band status codes carried by every response envelope.
pub const CODE_OK: i32 = 0;
pub const CODE_NOT_AUTHORIZED: i32 = 401;
pub const CODE_NOT_FOUND: i32 = 404;
pub const CODE_TOKEN_EXPIRED: i32 = 498;
pub const CODE_INTERNAL: i32 = 500;
pub const CODE_EXECUTION: i32 = 501;
pub const CODE_VALIDATION: i32 = 510;

// The failure taxonomy of the service. Nothing here ever becomes a transport
// error: the dispatcher folds every variant into an in-band code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    // --- Authentication ---
    #[error("not authorized")]
    InvalidToken,

    #[error("token is expired")]
    ExpiredToken,

    // --- Authorization ---
    #[error("not authorized")]
    NotAuthorized,

    #[error("entity_name not supported: {0}")]
    UnsupportedEntity(String),

    // --- Caller data ---
    #[error("{0}")]
    Validation(String),

    // Covers both a missing row and a stale version.
    #[error("not found")]
    NotFound,

    // --- Store ---
    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Execution(String),
}

impl AppError {
    /// The in-band numeric code reported for this failure.
    pub fn code(&self) -> i32 {
        match self {
            AppError::InvalidToken | AppError::NotAuthorized | AppError::UnsupportedEntity(_) => {
                CODE_NOT_AUTHORIZED
            }
            AppError::ExpiredToken => CODE_TOKEN_EXPIRED,
            AppError::Validation(_) => CODE_VALIDATION,
            AppError::NotFound => CODE_NOT_FOUND,
            AppError::Internal(_) => CODE_INTERNAL,
            AppError::Execution(_) => CODE_EXECUTION,
        }
    }

    pub fn missing(field: &str) -> Self {
        AppError::Validation(format!("{} missing", field))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first offending field, in a stable order.
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();

        match fields.first() {
            Some(field) => AppError::missing(field),
            None => AppError::Validation("validation failed".to_string()),
        }
    }
}
