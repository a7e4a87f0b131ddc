//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, cost adjustable per call site)
//! - Zeroization of clear-text passwords
//! - Constant-time verification
//!
//! Hashes are stored as PHC strings, so the salt and the cost parameters
//! travel with the hash. Verification always uses the parameters embedded
//! in the stored hash, which lets the cost be raised for new registrations
//! without invalidating existing users.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// Cost parameters rejected by Argon2
    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParams(String),
}

// ============================================================================
// Cost Parameters
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl HashingParams {
    pub const fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Check the cost settings are accepted by Argon2
    pub fn validate(&self) -> Result<(), PasswordHashError> {
        self.hasher().map(|_| ())
    }

    fn hasher(&self) -> Result<Argon2<'static>, PasswordHashError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for HashingParams {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self::new(19_456, 2, 1)
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, HashingParams};
///
/// let password = ClearTextPassword::new("s3cret".to_string());
/// let hashed = password.hash(&HashingParams::new(1024, 1, 1), None).unwrap();
/// assert!(hashed.verify(&password, None));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a password received from a caller
    ///
    /// Unicode is normalized using NFKC so that visually identical input
    /// hashes identically regardless of the client's input method.
    pub fn new(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut combined = self.as_bytes().to_vec();
        if let Some(p) = pepper {
            combined.extend_from_slice(p);
        }
        combined
    }

    /// Hash the password using Argon2id
    ///
    /// ## Arguments
    /// * `params` - Cost parameters, embedded into the resulting PHC string
    /// * `pepper` - Optional application-wide secret
    pub fn hash(
        &self,
        params: &HashingParams,
        pepper: Option<&[u8]>,
    ) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = self.peppered(pepper);

        // 128-bit random salt
        let salt = SaltString::generate(OsRng);

        let result = params
            .hasher()?
            .hash_password(&password_bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        password_bytes.zeroize();
        result
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// Contains algorithm identifier, version, cost parameters, salt and hash.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Uses the cost parameters stored in the hash. Argon2 compares the
    /// digests in constant time. A malformed hash never verifies.
    ///
    /// ## Arguments
    /// * `password` - The clear text password to verify
    /// * `pepper` - Must match the one used during hashing
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let mut password_bytes = password.peppered(pepper);
        let valid = Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok();
        password_bytes.zeroize();

        valid
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: HashingParams = HashingParams::new(1024, 1, 1);

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("s3cret".to_string());
        let hashed = password.hash(&FAST, None).unwrap();

        assert!(hashed.verify(&password, None));

        let wrong = ClearTextPassword::new("wrong".to_string());
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_hash_is_salted() {
        let password = ClearTextPassword::new("s3cret".to_string());
        let a = password.hash(&FAST, None).unwrap();
        let b = password.hash(&FAST, None).unwrap();

        assert_ne!(a.as_phc_string(), b.as_phc_string());
        assert!(a.verify(&password, None));
        assert!(b.verify(&password, None));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let password = ClearTextPassword::new("plaintext-marker".to_string());
        let hashed = password.hash(&FAST, None).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(!hashed.as_phc_string().contains("plaintext-marker"));
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::new("s3cret".to_string());
        let pepper = b"app_secret_pepper";
        let hashed = password.hash(&FAST, Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"wrong")));
    }

    #[test]
    fn test_params_embedded_in_hash() {
        let password = ClearTextPassword::new("s3cret".to_string());
        let hashed = password.hash(&HashingParams::new(2048, 3, 1), None).unwrap();

        assert!(hashed.as_phc_string().contains("m=2048,t=3,p=1"));
        // Verification does not need to know the parameters
        assert!(hashed.verify(&password, None));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let password = ClearTextPassword::new("s3cret".to_string());
        let result = password.hash(&HashingParams::new(1024, 0, 1), None);
        assert!(matches!(result, Err(PasswordHashError::InvalidParams(_))));
        assert!(HashingParams::new(1024, 0, 1).validate().is_err());
        assert!(HashingParams::default().validate().is_ok());
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::new("s3cret".to_string());
        let hashed = password.hash(&FAST, None).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(matches!(
            HashedPassword::from_phc_string("not-a-hash"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth "ＡＢＣ" normalizes to "ABC"
        let fullwidth = ClearTextPassword::new("\u{FF21}\u{FF22}\u{FF23}".to_string());
        let ascii = ClearTextPassword::new("ABC".to_string());
        let hashed = fullwidth.hash(&FAST, None).unwrap();

        assert!(hashed.verify(&ascii, None));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("SecretPassword".to_string());
        let debug = format!("{:?}", password);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = password.hash(&FAST, None).unwrap();
        assert!(format!("{:?}", hashed).contains("[HASH]"));
    }
}
