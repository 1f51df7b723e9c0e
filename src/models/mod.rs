//! Domain models.

pub mod project;
