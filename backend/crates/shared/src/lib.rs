//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the SSO vocabulary:
//! - Transport-neutral error classification and the unified [`error::app_error::AppError`]
//! - Typed numeric IDs for users and client applications
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
