//! Entities

pub mod app;
pub mod user;
