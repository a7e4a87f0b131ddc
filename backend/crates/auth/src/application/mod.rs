//! Application Layer
//!
//! Use cases and the `AuthService` facade that wires them together.

pub mod config;
pub mod is_admin;
pub mod login;
pub mod register;
pub mod service;

// Re-exports
pub use config::AuthConfig;
pub use is_admin::IsAdminUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use service::AuthService;
