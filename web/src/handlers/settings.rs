//! Account settings.

use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use lunamart_core::auth::{ProfileUpdate, UserProfile};
use serde::Deserialize;

/// The signed-in user's profile.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/settings/profile
/// ```
///
/// # Errors
///
/// 401 when nobody is signed in, 502 if the provider fails.
pub async fn profile(State(state): State<AppState>) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .auth
        .current_user()
        .await?
        .ok_or_else(|| AppError::unauthorized("no user is signed in"))?;
    Ok(Json(profile))
}

/// Applies a partial profile update (display name and/or photo URL).
///
/// # Endpoint
///
/// ```text
/// PATCH /api/v1/settings/profile
/// { "display_name": "Alpha" }
/// ```
///
/// # Errors
///
/// 401 when nobody is signed in, 502 if the provider fails.
pub async fn update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state.auth.update_profile(update).await?;
    Ok(Json(profile))
}

/// Password change request. The provider re-authenticates with the current
/// password before updating.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordChangeRequest {
    /// Current password.
    pub current: String,
    /// New password.
    pub new: String,
}

/// Changes the account password.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/settings/password
/// ```
///
/// # Errors
///
/// 401 when nobody is signed in or the current password is wrong, 502 if
/// the provider fails.
pub async fn change_password(
    State(state): State<AppState>,
    Json(request): Json<PasswordChangeRequest>,
) -> Result<StatusCode, AppError> {
    state
        .auth
        .change_password(request.current, request.new)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
