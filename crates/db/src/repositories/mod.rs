//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod annotation_repo;
pub mod diagram_repo;
pub mod inspection_file_repo;
pub mod inspection_repo;
pub mod isolation_plan_repo;
pub mod isolation_point_repo;
pub mod location_repo;
pub mod rollup_repo;
pub mod terminal_repo;
pub mod thickness_measurement_repo;
pub mod user_repo;

pub use annotation_repo::AnnotationRepo;
pub use diagram_repo::DiagramRepo;
pub use inspection_file_repo::{InspectionDocumentRepo, InspectionImageRepo};
pub use inspection_repo::InspectionRepo;
pub use isolation_plan_repo::IsolationPlanRepo;
pub use isolation_point_repo::IsolationPointRepo;
pub use location_repo::LocationRepo;
pub use rollup_repo::RollupRepo;
pub use terminal_repo::TerminalRepo;
pub use thickness_measurement_repo::ThicknessMeasurementRepo;
pub use user_repo::UserRepo;
