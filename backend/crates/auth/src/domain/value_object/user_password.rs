//! User Password Value Object
//!
//! Domain wrappers around `platform::password`.

use platform::password::{ClearTextPassword, HashedPassword, HashingParams, PasswordHashError};
use std::fmt;

/// Password exactly as supplied by the caller
///
/// Memory is zeroized when dropped. Never logged, never stored.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(ClearTextPassword::new(raw.into()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for RawPassword {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for RawPassword {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Salted Argon2id hash, safe to store
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash `raw` with the given cost
    pub fn from_raw(
        raw: &RawPassword,
        params: &HashingParams,
        pepper: Option<&[u8]>,
    ) -> Result<Self, PasswordHashError> {
        raw.0.hash(params, pepper).map(Self)
    }

    /// Create from PHC string (from storage)
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time check of `raw` against this hash
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
