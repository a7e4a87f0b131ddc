//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::context::ContextError;
use platform::jwt::JwtError;
use platform::password::PasswordHashError;
use thiserror::Error;

use crate::domain::repository::StorageError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Caller-visible error classes
///
/// Login collapses unknown user, wrong password and unknown app into
/// `InvalidCredentials`. Registration reports a taken email as
/// `DuplicateUser`. Everything else a core operation returns is
/// `Internal`. `InvalidRequest` is produced by the HTTP layer only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    InvalidCredentials,
    DuplicateUser,
    InvalidRequest,
    Internal,
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user, wrong password, or unknown app
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("User already exists")]
    UserAlreadyExists,

    /// Malformed transport input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Token signing error: {0}")]
    Token(#[from] JwtError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),
}

impl AuthError {
    pub fn category(&self) -> AuthErrorKind {
        match self {
            AuthError::InvalidCredentials => AuthErrorKind::InvalidCredentials,
            AuthError::UserAlreadyExists => AuthErrorKind::DuplicateUser,
            AuthError::InvalidRequest(_) => AuthErrorKind::InvalidRequest,
            AuthError::Cancelled
            | AuthError::DeadlineExceeded
            | AuthError::Storage(_)
            | AuthError::Token(_)
            | AuthError::PasswordHash(_) => AuthErrorKind::Internal,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.category() == AuthErrorKind::Internal
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::UserAlreadyExists => ErrorKind::Conflict,
            AuthError::InvalidRequest(_) => ErrorKind::BadRequest,
            AuthError::Cancelled | AuthError::DeadlineExceeded => ErrorKind::RequestTimeout,
            AuthError::Storage(_) | AuthError::Token(_) | AuthError::PasswordHash(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Internal causes stay in the logs; the caller sees a generic message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Storage(_) | AuthError::Token(_) | AuthError::PasswordHash(_) => {
                AppError::internal("Internal error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Auth storage error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Auth token signing error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Auth password hashing error");
            }
            AuthError::Cancelled | AuthError::DeadlineExceeded => {
                tracing::warn!(error = %self, "Auth request aborted");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UserExists => AuthError::UserAlreadyExists,
            other => AuthError::Storage(other),
        }
    }
}

impl From<ContextError> for AuthError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Cancelled => AuthError::Cancelled,
            ContextError::DeadlineExceeded => AuthError::DeadlineExceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            AuthError::InvalidCredentials.category(),
            AuthErrorKind::InvalidCredentials
        );
        assert_eq!(
            AuthError::UserAlreadyExists.category(),
            AuthErrorKind::DuplicateUser
        );
        assert!(AuthError::Cancelled.is_internal());
        assert!(AuthError::DeadlineExceeded.is_internal());
        assert!(AuthError::Storage(StorageError::Backend("down".into())).is_internal());
        assert!(AuthError::Token(JwtError::MissingSecret).is_internal());
    }

    #[test]
    fn test_storage_conversion() {
        assert!(matches!(
            AuthError::from(StorageError::UserExists),
            AuthError::UserAlreadyExists
        ));
        assert!(matches!(
            AuthError::from(StorageError::UserNotFound),
            AuthError::Storage(StorageError::UserNotFound)
        ));
    }

    #[test]
    fn test_context_conversion() {
        assert!(matches!(
            AuthError::from(ContextError::Cancelled),
            AuthError::Cancelled
        ));
        assert!(matches!(
            AuthError::from(ContextError::DeadlineExceeded),
            AuthError::DeadlineExceeded
        ));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(AuthError::UserAlreadyExists.kind().status_code(), 409);
        assert_eq!(AuthError::InvalidRequest("x".into()).kind().status_code(), 400);
        assert_eq!(AuthError::Cancelled.kind().status_code(), 408);
        assert_eq!(
            AuthError::Storage(StorageError::Backend("x".into()))
                .kind()
                .status_code(),
            500
        );
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let err = AuthError::Storage(StorageError::Backend("connection refused on 10.0.0.5".into()));
        let app_err = err.to_app_error();
        assert_eq!(app_err.message(), "Internal error");
    }
}
