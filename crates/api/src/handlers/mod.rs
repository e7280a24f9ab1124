//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `isotrack_db`,
//! apply domain rules from `isotrack_core`, and map errors via
//! [`crate::error::AppError`].

pub mod annotation;
pub mod auth;
pub mod dashboard;
pub mod diagram;
pub mod inspection;
pub mod inspection_file;
pub mod isolation_plan;
pub mod isolation_point;
pub mod location;
pub mod measurement;
pub mod terminal;
