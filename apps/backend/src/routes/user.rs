//! User endpoints: login/refresh pass-through and settings.

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::{LoginRequest, RefreshRequest, TokenResponse, UserSettings};
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /user/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let tokens = state
        .identity
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(tokens))
}

/// POST /user/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>> {
    let tokens = state.identity.refresh(&payload.refresh_token).await?;
    Ok(Json(tokens))
}

/// GET /user/settings
pub async fn settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<UserSettings>> {
    let settings = state.db.get_user_settings(auth.user_id).await?;
    Ok(Json(settings))
}
