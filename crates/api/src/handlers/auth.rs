//! Handlers for the `/auth` resource (login, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use isotrack_core::error::CoreError;
use isotrack_db::models::user::UserInfo;
use isotrack_db::repositories::UserRepo;

use crate::auth::password::verify_password;
use crate::auth::session::SessionUser;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns an opaque session token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // `find_by_username` only matches active accounts, so a deactivated
    // user gets the same response as a wrong username.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    let token = state
        .sessions
        .issue(SessionUser {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
        })
        .await;

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.session_ttl_mins * 60,
        user: user.into(),
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    state.sessions.revoke_user(user.user_id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// Return the authenticated user's public profile.
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserInfo>> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(row.into()))
}
