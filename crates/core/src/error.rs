//! Domain error type shared by the tracker, registry and ledger operations.

use crate::types::DbId;

/// Failure classes a domain operation can report.
///
/// Every operation returns a typed result carrying one of these; the HTTP
/// boundary decides how each class appears on the wire.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced record (annotation, inspection, plan, point, checklist
    /// item, measurement) does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A required field is missing, a supplied code is unknown, or a
    /// lifecycle transition is out of order.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness or set-exactly-once rule was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, malformed or expired credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
