//! Project Depot - Backend Library
//!
//! Minimal file-hosting backend: zip archives in, metadata records and
//! counted downloads out.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
