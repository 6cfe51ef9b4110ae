//! Audio endpoints: synthesis, backfill, retrieval, deletion.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};

use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// Object name for ad hoc generated audio. Random so concurrent requests
/// never overwrite each other.
fn new_audio_filename() -> String {
    format!("{}.mp3", Uuid::new_v4())
}

/// POST /audio/generate
///
/// Synthesizes the given text and stores it as a randomly named MP3 object.
pub async fn generate(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedUser>,
    Json(payload): Json<GenerateAudioRequest>,
) -> Result<Json<GenerateAudioResponse>> {
    if payload.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text is required".to_string()));
    }

    let audio = state.speech.synthesize(&payload.text).await?;
    let filename = new_audio_filename();

    state
        .storage
        .upload_audio(&filename, &audio)
        .await
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    Ok(Json(GenerateAudioResponse { filename }))
}

/// GET /audio/generate-all
///
/// Backfills audio for every phrase of the user's vocabulary that still
/// lacks it. Sequential; a failure partway leaves earlier phrases done.
pub async fn generate_all(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<GenerateAllAudioResponse>> {
    let phrases = state.db.get_phrases_missing_audio(auth.user_id).await?;

    let mut generated = Vec::with_capacity(phrases.len());
    for phrase in &phrases {
        let audio = state.speech.synthesize(&phrase.text).await?;
        let filename = format!("{}.mp3", phrase.id);

        state
            .storage
            .upload_audio(&filename, &audio)
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        state
            .db
            .set_phrase_audio(phrase.id, auth.user_id, &filename)
            .await?;

        tracing::info!("Generated audio for phrase {}: {}", phrase.id, filename);
        generated.push(phrase.id);
    }

    Ok(Json(GenerateAllAudioResponse { generated }))
}

/// POST /audio/delete
pub async fn delete(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedUser>,
    Json(payload): Json<DeleteAudiosRequest>,
) -> Result<Json<DeleteAudiosResponse>> {
    if payload.filenames.is_empty() {
        return Err(ApiError::BadRequest(
            "filenames array is required".to_string(),
        ));
    }

    for filename in &payload.filenames {
        state
            .storage
            .delete_audio(filename)
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;
    }

    Ok(Json(DeleteAudiosResponse {
        deleted: payload.filenames,
    }))
}

/// GET /audio/{filename}
pub async fn fetch(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedUser>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse> {
    let bytes = state.storage.download_audio(&filename).await.map_err(|e| {
        match e {
            crate::services::storage::StorageError::NotFound(f) => {
                ApiError::NotFound(format!("audio {f}"))
            }
            other => ApiError::Storage(other.to_string()),
        }
    })?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], bytes))
}
