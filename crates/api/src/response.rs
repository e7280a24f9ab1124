//! Response envelope for the dashboard endpoints.
//!
//! Entity CRUD endpoints return their records bare; the dashboard rollups
//! wrap their aggregate payload in `{ "data": ... }` so clients can tell
//! the rollup body apart from the `{ "error", "code" }` failure envelope.

use serde::Serialize;

/// `{ "data": T }` wrapper used by the rollup handlers.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
