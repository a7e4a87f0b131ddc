//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities and storage/signing capability traits
//! - `application/` - Use cases and the `AuthService` facade
//! - `infra/` - PostgreSQL, in-memory, and JWT implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Operations
//! - `login`: email + password + app ID in, signed token out
//! - `register_new_user`: email + password in, user ID out
//! - `is_admin`: user ID in, admin flag out
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never stored or logged in clear text
//! - Unknown user, wrong password and unknown app are indistinguishable
//!   to the caller
//! - Tokens are HS256 JWTs signed with the target app's secret

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthService, config::AuthConfig};
pub use error::{AuthError, AuthErrorKind, AuthResult};
pub use infra::{InMemoryAuthStore, JwtTokenSigner, PgAuthStore};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::{app::App, user::User};
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryAuthStore;
    pub use crate::infra::postgres::PgAuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
