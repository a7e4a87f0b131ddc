//! Infrastructure Layer
//!
//! Storage implementations and the JWT token signer.

pub mod jwt_signer;
pub mod memory;
pub mod postgres;

pub use jwt_signer::JwtTokenSigner;
pub use memory::InMemoryAuthStore;
pub use postgres::PgAuthStore;
