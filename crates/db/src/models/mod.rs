//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod annotation;
pub mod checklist_item;
pub mod diagram;
pub mod inspection;
pub mod inspection_file;
pub mod isolation_plan;
pub mod isolation_point;
pub mod location;
pub mod rollup;
pub mod terminal;
pub mod thickness_measurement;
pub mod user;
