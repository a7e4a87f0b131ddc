//! Capability Traits
//!
//! Contracts for the collaborators the auth service depends on.
//! Implementations live in the infrastructure layer.

use std::time::Duration;

use platform::jwt::JwtError;
use thiserror::Error;

use crate::domain::entity::{app::App, user::User};
use crate::domain::value_object::{AppId, UserId, user_password::UserPassword};

/// Error contract shared by the storage capabilities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("user not found")]
    UserNotFound,

    #[error("user already exists")]
    UserExists,

    #[error("app not found")]
    AppNotFound,

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Persists new users
#[trait_variant::make(UserSaver: Send)]
pub trait LocalUserSaver {
    /// Store a user and return the assigned ID
    ///
    /// Fails with [`StorageError::UserExists`] when the email is taken.
    /// Uniqueness must be enforced atomically by the implementation.
    async fn save_user(
        &self,
        email: &str,
        pass_hash: &UserPassword,
    ) -> Result<UserId, StorageError>;
}

/// Reads users
#[trait_variant::make(UserProvider: Send)]
pub trait LocalUserProvider {
    /// Look up a user by exact email
    ///
    /// Fails with [`StorageError::UserNotFound`] when no user matches.
    async fn user(&self, email: &str) -> Result<User, StorageError>;

    /// Admin flag as stored for `user_id`
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError>;
}

/// Reads client application metadata
#[trait_variant::make(AppProvider: Send)]
pub trait LocalAppProvider {
    /// Fails with [`StorageError::AppNotFound`] when no app matches.
    async fn app(&self, app_id: AppId) -> Result<App, StorageError>;
}

/// Produces the signed token handed back from a successful login
pub trait TokenSigner: Send + Sync {
    /// Sign a token binding `user` to `app`, expiring `ttl` from now
    fn sign(&self, user: &User, app: &App, ttl: Duration) -> Result<String, JwtError>;
}
