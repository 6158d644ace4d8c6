//! Error taxonomy for the service layer.
//!
//! Three request-level failure classes: validation (a value fails a
//! type/bounds check), authorization (role/ownership violation), and
//! not-found (an id does not resolve). Per-field authorization outcomes are
//! NOT errors — they come back as structured `Deny` data from
//! `profile::authorization` so the caller can commit the fields that passed
//! and surface the rest. A missing optional profile field is a valid state,
//! never an error.

use thiserror::Error;

use crate::db::DbError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Forbidden: {0}")]
    Authorization(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Store error: {0}")]
    Store(#[from] DbError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation { .. } => ErrorKind::Validation,
            ApiError::Authorization(_) => ErrorKind::Authorization,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Store(_) | ApiError::Config(_) => ErrorKind::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Validation,
    Authorization,
    NotFound,
    Internal,
}

/// Serializable error representation for the request layer.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub message: String,
    pub kind: ErrorKind,
}

impl From<&ApiError> for ErrorPayload {
    fn from(err: &ApiError) -> Self {
        ErrorPayload {
            message: err.to_string(),
            kind: err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_denial_renders_forbidden_prefix() {
        let err = ApiError::Authorization("not owner".to_string());
        assert_eq!(err.to_string(), "Forbidden: not owner");
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    #[test]
    fn payload_carries_kind_and_message() {
        let err = ApiError::not_found("profile", "u-9");
        let payload = ErrorPayload::from(&err);
        assert_eq!(payload.kind, ErrorKind::NotFound);
        assert!(payload.message.contains("u-9"));
    }

    #[test]
    fn store_errors_are_internal() {
        let err = ApiError::Store(DbError::Migration("bad".into()));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
