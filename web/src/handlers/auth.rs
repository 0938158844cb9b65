//! Sign-in.

use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State};
use lunamart_core::auth::UserProfile;
use serde::Deserialize;

/// Sign-in request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Signs in with email and password.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/auth/login
/// { "email": "alpha@gmail.com", "password": "..." }
/// ```
///
/// # Errors
///
/// 401 on bad credentials, 502 if the identity provider fails.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state.auth.sign_in(request.email, request.password).await?;
    tracing::info!(email = %profile.email, "signed in");
    Ok(Json(profile))
}
