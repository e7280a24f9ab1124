//! Handlers for the dashboard rollups.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use isotrack_core::error::CoreError;
use isotrack_core::lifecycle::AnnotationKind;
use isotrack_core::types::DbId;
use isotrack_db::models::rollup::{DashboardRollup, TerminalRollup};
use isotrack_db::repositories::RollupRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters accepted by both dashboard endpoints.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Restrict annotation-driven figures to one annotation type
    /// (`pipe`, `tank` or `component`).
    pub annotation_type: Option<String>,
}

impl DashboardQuery {
    /// Validate the filter against the known annotation kinds.
    fn filter(&self) -> Result<Option<&str>, AppError> {
        if let Some(kind) = &self.annotation_type {
            kind.parse::<AnnotationKind>().map_err(AppError::Core)?;
        }
        Ok(self.annotation_type.as_deref())
    }
}

/// GET /api/v1/dashboard
pub async fn global(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DataResponse<DashboardRollup>>> {
    let rollup = RollupRepo::dashboard(&state.pool, query.filter()?).await?;
    Ok(Json(DataResponse { data: rollup }))
}

/// GET /api/v1/terminals/{id}/dashboard
pub async fn terminal(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DataResponse<TerminalRollup>>> {
    let rollup = RollupRepo::terminal(&state.pool, id, query.filter()?)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Terminal",
            id,
        }))?;
    Ok(Json(DataResponse { data: rollup }))
}
