//! Domain Layer
//!
//! Entities, value objects, and the capability traits the auth service
//! consumes.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{app::App, user::User};
pub use repository::{AppProvider, StorageError, TokenSigner, UserProvider, UserSaver};
