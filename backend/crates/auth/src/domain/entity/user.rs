//! User Entity

use crate::domain::value_object::{UserId, user_password::UserPassword};

/// Registered user as read from storage
///
/// The auth service never mutates a user; it only reads one during
/// login or asks storage to create one during registration.
#[derive(Debug, Clone)]
pub struct User {
    /// Identifier assigned by storage
    pub id: UserId,
    /// Email, case-sensitive as stored
    pub email: String,
    /// Argon2id hash of the password
    pub pass_hash: UserPassword,
}

impl User {
    pub fn new(id: UserId, email: impl Into<String>, pass_hash: UserPassword) -> Self {
        Self {
            id,
            email: email.into(),
            pass_hash,
        }
    }
}
