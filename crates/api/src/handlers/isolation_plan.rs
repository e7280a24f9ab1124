//! Handlers for the `/isolation-plans` resource.
//!
//! Plan status changes run through the lifecycle guard configured at
//! startup: strict mode rejects out-of-order transitions, lenient mode
//! records whatever the field crew reports.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use isotrack_core::error::CoreError;
use isotrack_core::lifecycle::{check_plan_approval, check_plan_transition, PlanStatus};
use isotrack_core::types::DbId;
use isotrack_db::models::isolation_plan::{
    CreateIsolationPlan, IsolationPlan, IsolationPlanDetail, IsolationPlanSummary,
    UpdateIsolationPlan,
};
use isotrack_db::repositories::{DiagramRepo, IsolationPlanRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/isolation-plans
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<IsolationPlanSummary>>> {
    let plans = IsolationPlanRepo::list(&state.pool).await?;
    Ok(Json(plans))
}

/// GET /api/v1/isolation-plans/active
///
/// Plans in status `approved` or `active`, soonest planned start first.
pub async fn list_active(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<IsolationPlanSummary>>> {
    let plans = IsolationPlanRepo::list_active(&state.pool).await?;
    Ok(Json(plans))
}

/// GET /api/v1/diagrams/{diagram_id}/isolation-plans
pub async fn list_by_diagram(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(diagram_id): Path<DbId>,
) -> AppResult<Json<Vec<IsolationPlanSummary>>> {
    let plans = IsolationPlanRepo::list_by_diagram(&state.pool, diagram_id).await?;
    Ok(Json(plans))
}

/// POST /api/v1/diagrams/{diagram_id}/isolation-plans
///
/// New plans start in `draft`; the authenticated user is recorded as
/// creator.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(diagram_id): Path<DbId>,
    Json(input): Json<CreateIsolationPlan>,
) -> AppResult<(StatusCode, Json<IsolationPlan>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Plan name must not be empty".into(),
        )));
    }

    DiagramRepo::find_by_id(&state.pool, diagram_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Diagram",
            id: diagram_id,
        }))?;

    let plan = IsolationPlanRepo::create(&state.pool, diagram_id, &input, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/isolation-plans/{id}
///
/// Full detail with creator/approver names and points in sequence order.
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<IsolationPlanDetail>> {
    let detail = IsolationPlanRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "IsolationPlan",
            id,
        }))?;
    Ok(Json(detail))
}

/// PUT /api/v1/isolation-plans/{id}
///
/// A requested status change is validated against the plan lifecycle
/// before anything is written.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIsolationPlan>,
) -> AppResult<Json<IsolationPlan>> {
    let current = IsolationPlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "IsolationPlan",
            id,
        }))?;

    if let Some(requested) = &input.status {
        let from = parse_stored_status(&current.status)?;
        let to: PlanStatus = requested.parse().map_err(AppError::Core)?;
        check_plan_transition(state.config.guard_mode, from, to).map_err(AppError::Core)?;
    }

    let plan = IsolationPlanRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "IsolationPlan",
            id,
        }))?;
    Ok(Json(plan))
}

/// POST /api/v1/isolation-plans/{id}/approve
///
/// Stamps the approver and timestamp at most once; a plan that already
/// carries an approval stamp is rejected with 409.
pub async fn approve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<IsolationPlan>> {
    let current = IsolationPlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "IsolationPlan",
            id,
        }))?;

    let status = parse_stored_status(&current.status)?;
    check_plan_approval(state.config.guard_mode, status).map_err(AppError::Core)?;

    let plan = IsolationPlanRepo::approve(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Plan is already approved".into()))
        })?;
    Ok(Json(plan))
}

/// DELETE /api/v1/isolation-plans/{id}
///
/// Points cascade with the plan. Deletion is not guarded by status.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = IsolationPlanRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "IsolationPlan",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Parse a status string that came from the database, where an unknown
/// code means corrupt data rather than bad input.
fn parse_stored_status(code: &str) -> Result<PlanStatus, AppError> {
    code.parse()
        .map_err(|_| AppError::InternalError(format!("Stored plan status '{code}' is invalid")))
}
