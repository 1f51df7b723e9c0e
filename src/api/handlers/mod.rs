//! HTTP request handlers.

pub mod downloads;
pub mod health;
pub mod projects;
