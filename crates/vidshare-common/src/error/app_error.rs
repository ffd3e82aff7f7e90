//! Application error types
//!
//! Failures that originate outside the domain (auth, input, infrastructure)
//! plus a transparent wrapper for [`DomainError`].

use std::fmt;
use vidshare_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors (401)
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Authentication required")]
    MissingAuth,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: limit is {limit_mb} MB")]
    PayloadTooLarge { limit_mb: u32 },

    // Infrastructure errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::MissingAuth => 401,
            Self::PayloadTooLarge { .. } => 413,
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,
            Self::Domain(e) => domain_status(e),
        }
    }

    /// Error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingAuth => "UNAUTHENTICATED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }

    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

fn domain_status(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_authorization() {
        403
    } else if e.is_validation() {
        400
    } else if e.is_conflict() {
        409
    } else {
        500
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidshare_core::{ResourceKind, Snowflake};

    #[test]
    fn test_unauthenticated_denied_and_missing_stay_distinct() {
        let unauthenticated = AppError::MissingAuth;
        let denied = AppError::Domain(DomainError::NotOwner {
            resource: ResourceKind::Video,
            id: Snowflake::new(1),
        });
        let missing = AppError::Domain(DomainError::VideoNotFound(Snowflake::new(1)));

        assert_eq!(unauthenticated.status_code(), 401);
        assert_eq!(denied.status_code(), 403);
        assert_eq!(missing.status_code(), 404);
        assert_eq!(unauthenticated.error_code(), "UNAUTHENTICATED");
        assert_eq!(denied.error_code(), "NOT_OWNER");
        assert_eq!(missing.error_code(), "UNKNOWN_VIDEO");
    }

    #[test]
    fn test_concurrent_update_is_conflict() {
        let err = AppError::Domain(DomainError::ConcurrentUpdate(Snowflake::new(3)));
        assert_eq!(err.status_code(), 409);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_infrastructure_errors_are_server_errors() {
        assert!(AppError::Database("pool closed".into()).is_server_error());
        assert!(AppError::Domain(DomainError::StorageError("x".into())).is_server_error());
        assert_eq!(AppError::PayloadTooLarge { limit_mb: 5 }.status_code(), 413);
    }

    #[test]
    fn test_validation_helper_is_client_error() {
        let err = AppError::validation("Password too weak");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.to_string(), "Validation error: Password too weak");
        assert!(err.is_client_error());
    }
}
