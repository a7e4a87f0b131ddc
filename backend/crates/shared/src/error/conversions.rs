//! Error conversions
//!
//! Feature-gated glue between [`AppError`] and the frameworks the
//! services run on.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// SQLx classification (feature-gated)
// ============================================================================

/// Coarse classification of a database error
///
/// Repositories use this to translate driver errors into their own
/// domain error contracts without matching on SQLSTATE codes everywhere.
#[cfg(feature = "sqlx")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorClass {
    /// Query expected a row and found none
    RowNotFound,
    /// Class 23505 - unique constraint violated
    UniqueViolation,
    /// Pool exhaustion, I/O failure, or server shutting down
    Unavailable,
    Other,
}

#[cfg(feature = "sqlx")]
pub fn classify_sqlx(err: &sqlx::Error) -> DbErrorClass {
    match err {
        sqlx::Error::RowNotFound => DbErrorClass::RowNotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DbErrorClass::Unavailable
        }
        sqlx::Error::Database(db_err) => {
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            match db_err.code().as_deref() {
                Some("23505") => DbErrorClass::UniqueViolation,
                Some("53000" | "53100" | "53200" | "53300") => DbErrorClass::Unavailable,
                Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                    DbErrorClass::Unavailable
                }
                _ => DbErrorClass::Other,
            }
        }
        _ => DbErrorClass::Other,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
        });

        (status, Json(body)).into_response()
    }
}


#[cfg(all(test, feature = "axum"))]
mod axum_tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use axum::response::IntoResponse;

    #[test]
    fn test_problem_details_status() {
        let response =
            AppError::new(ErrorKind::Conflict, "User already exists").into_response();
        assert_eq!(response.status().as_u16(), 409);
    }
}
