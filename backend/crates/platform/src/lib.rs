//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with adjustable cost)
//! - Signed session tokens (JWT, HS256)
//! - Request context (cancellation and deadlines)

pub mod context;
pub mod jwt;
pub mod password;
