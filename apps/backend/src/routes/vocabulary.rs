//! Vocabulary endpoints
//!
//! The review endpoint is the scheduler's caller: it assembles the item,
//! the stage table, and the user's day sets, runs the core and writes the
//! result back as a single update. A failed advance writes nothing.

use axum::{extract::State, Extension, Json};

use vokabel_core::{advance_review, dates};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::import;
use crate::AppState;

/// GET /vocabulary/review
pub async fn list_due(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<VocabularyWithPhrases>>> {
    let rows = state
        .db
        .get_due_vocabulary(auth.user_id, dates::today())
        .await?;
    Ok(Json(rows.into_iter().map(|r| r.to_api()).collect()))
}

/// GET /vocabulary/new
pub async fn list_new(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<VocabularyWithPhrases>>> {
    let rows = state.db.get_new_vocabulary(auth.user_id).await?;
    Ok(Json(rows.into_iter().map(|r| r.to_api()).collect()))
}

/// POST /vocabulary/review
pub async fn set_reviewed(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<VocabularyItem>> {
    let item = state.db.get_vocabulary(payload.id, auth.user_id).await?;

    let stages = state.db.get_stages().await?;
    let learn_days = state.db.get_learn_days(auth.user_id).await?;
    let review_days = state.db.get_review_days(auth.user_id).await?;

    let update = advance_review(
        &item.to_review_state(),
        &stages,
        &learn_days,
        &review_days,
        dates::today(),
    )?;

    let updated = state
        .db
        .apply_schedule_update(item.id, auth.user_id, &update)
        .await?;

    tracing::info!(
        "Reviewed vocabulary {}: stage {} -> {}",
        item.id,
        item.stage_id,
        updated.stage_id
    );

    Ok(Json(updated))
}

/// POST /vocabulary/delay
///
/// Sequential batch; results come back in input order and the first
/// failure aborts without rolling back earlier items.
pub async fn delay_many(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<DelayRequest>,
) -> Result<Json<Vec<VocabularyItem>>> {
    let today = dates::today();
    let items = state
        .db
        .get_vocabulary_many(&payload.ids, auth.user_id)
        .await?;

    let mut delayed = Vec::with_capacity(payload.ids.len());
    for id in &payload.ids {
        let item = items
            .iter()
            .find(|i| i.id == *id)
            .ok_or_else(|| ApiError::NotFound(format!("vocabulary {id}")))?;
        delayed.push(state.db.delay_vocabulary(item, payload.days, today).await?);
    }

    Ok(Json(delayed))
}

/// POST /vocabulary/reset
pub async fn reset_many(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<ResetRequest>,
) -> Result<Json<Vec<VocabularyItem>>> {
    let mut reset = Vec::with_capacity(payload.ids.len());

    for id in &payload.ids {
        reset.push(state.db.reset_vocabulary(*id, auth.user_id).await?);
    }

    Ok(Json(reset))
}

/// POST /vocabulary/restart
pub async fn restart_many(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<RestartRequest>,
) -> Result<Json<Vec<VocabularyItem>>> {
    let review_date = payload.review_date.unwrap_or_else(dates::today);
    let mut restarted = Vec::with_capacity(payload.ids.len());

    for id in &payload.ids {
        restarted.push(
            state
                .db
                .restart_vocabulary(*id, auth.user_id, review_date)
                .await?,
        );
    }

    Ok(Json(restarted))
}

/// DELETE /vocabulary
///
/// Cascades: item row, both phrase rows, then any stored audio objects.
/// An audio object that cannot be removed after the rows are gone is
/// reported as a partial failure, not swallowed.
pub async fn delete_many(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<DeleteVocabularyRequest>,
) -> Result<Json<DeleteVocabularyResponse>> {
    let mut deleted = Vec::with_capacity(payload.ids.len());

    for id in &payload.ids {
        let audio_urls = state.db.delete_vocabulary(*id, auth.user_id).await?;

        for filename in &audio_urls {
            state.storage.delete_audio(filename).await.map_err(|e| {
                ApiError::PartialDelete(format!(
                    "vocabulary {id} removed but audio object {filename} remains: {e}"
                ))
            })?;
        }

        deleted.push(*id);
    }

    Ok(Json(DeleteVocabularyResponse { deleted }))
}

/// POST /vocabulary/import/translated
pub async fn import_translated(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<ImportResponse>> {
    let settings = state.db.get_user_settings(auth.user_id).await?;
    let imported =
        import::import_translated(&state.db, auth.user_id, &settings, &payload.content).await?;

    tracing::info!("Imported {} translated pairs", imported);
    Ok(Json(ImportResponse { imported }))
}

/// POST /vocabulary/import/raw
pub async fn import_raw(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<ImportResponse>> {
    let settings = state.db.get_user_settings(auth.user_id).await?;
    let imported = import::import_raw(
        &state.db,
        &state.translator,
        auth.user_id,
        &settings,
        &payload.content,
    )
    .await?;

    tracing::info!("Imported {} raw phrases", imported);
    Ok(Json(ImportResponse { imported }))
}
