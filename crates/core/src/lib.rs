//! Domain logic for the isotrack platform.
//!
//! Pure types and rules shared by the persistence and API layers: entity
//! lifecycles (isolation plans and points, annotation/inspection statuses),
//! the fixed inspection checklist template, and derived predicates
//! (critical thickness measurements, suggested annotation status).
//! No I/O lives here.

pub mod checklist;
pub mod error;
pub mod lifecycle;
pub mod measurement;
pub mod suggestion;
pub mod types;
