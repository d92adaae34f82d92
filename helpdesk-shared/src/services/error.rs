/// Errors raised by the user services
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use super::store::StoreError;

/// Machine-readable code for a missing user
pub const ERR_NO_USER_FOUND: &str = "ERR_NO_USER_FOUND";

/// Machine-readable code for rejected input
pub const ERR_VALIDATION: &str = "ERR_VALIDATION";

/// Machine-readable code for store failures
pub const ERR_STORE: &str = "ERR_STORE";

/// One failing input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Flattens `validator` output into one entry per failing rule, ordered by
/// field name
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                FieldError::new(
                    field.to_string(),
                    error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                )
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

/// Error type for the user services
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// No user with the given id
    #[error("{}", ERR_NO_USER_FOUND)]
    NotFound,

    /// Input failed validation; every failing field is listed
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// The store failed; not a domain error
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl UserServiceError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            UserServiceError::NotFound => ERR_NO_USER_FOUND,
            UserServiceError::Validation(_) => ERR_VALIDATION,
            UserServiceError::Store(_) => ERR_STORE,
        }
    }

    /// HTTP status hint
    pub fn status_code(&self) -> StatusCode {
        match self {
            UserServiceError::NotFound => StatusCode::NOT_FOUND,
            UserServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            UserServiceError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            UserServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for UserServiceError {
    fn from(errors: ValidationErrors) -> Self {
        UserServiceError::Validation(field_errors(&errors))
    }
}
