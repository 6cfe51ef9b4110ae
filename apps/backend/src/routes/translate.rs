//! Translation endpoint

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{TranslateRequest, TranslateResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /translate
pub async fn translate(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedUser>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>> {
    if payload.phrase.trim().is_empty()
        || payload.source_language.trim().is_empty()
        || payload.target_language.trim().is_empty()
    {
        return Err(ApiError::BadRequest(
            "Missing required fields: phrase, source_language, target_language".to_string(),
        ));
    }

    let translated_phrase = state
        .translator
        .translate(
            &payload.phrase,
            &payload.source_language,
            &payload.target_language,
        )
        .await?;

    Ok(Json(TranslateResponse { translated_phrase }))
}
