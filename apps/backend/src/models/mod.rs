//! Database models and API types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub use vokabel_core::types::{ReviewState, ScheduleUpdate, Stage};

// === Database Entity Types ===

/// A phrase pair under spaced repetition, one row of `phrase_translations`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VocabularyItem {
    pub id: i64,
    pub user_id: Uuid,
    pub phrase_id: i64,
    pub translated_phrase_id: i64,
    pub stage_id: i32,
    pub review_date: Option<NaiveDate>,
    pub priority: i32,
    pub learned: bool,
    pub modified_at: Option<DateTime<Utc>>,
}

impl VocabularyItem {
    /// Extract the mutable scheduling state the core operates on.
    pub fn to_review_state(&self) -> ReviewState {
        ReviewState {
            stage_id: self.stage_id,
            review_date: self.review_date,
            learned: self.learned,
        }
    }
}

/// Source- or target-language phrase text with optional stored audio.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Phrase {
    pub id: i64,
    pub user_id: Uuid,
    pub text: String,
    pub language_id: i32,
    pub audio_url: Option<String>,
}

/// Static stage table row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StageRow {
    pub id: i32,
    pub days: i32,
}

impl StageRow {
    pub fn to_stage(&self) -> Stage {
        Stage {
            id: self.id,
            days: self.days as i64,
        }
    }
}

/// Language reference row mapping a language id to its display name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LanguageTranslation {
    pub id: i64,
    pub language_id: i32,
    pub translation: String,
}

/// Per-user language configuration, used by the import and translate glue.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSettings {
    pub user_id: Uuid,
    pub origin_language: String,
    pub target_language: String,
    pub origin_language_id: i32,
    pub target_language_id: i32,
}

/// Flat row shape of the phrase-joined vocabulary queries.
#[derive(Debug, Clone, FromRow)]
pub struct VocabularyJoinedRow {
    pub id: i64,
    pub stage_id: i32,
    pub review_date: Option<NaiveDate>,
    pub priority: i32,
    pub learned: bool,
    pub modified_at: Option<DateTime<Utc>>,
    pub original_id: i64,
    pub original_text: String,
    pub original_audio_url: Option<String>,
    pub translated_id: i64,
    pub translated_text: String,
    pub translated_audio_url: Option<String>,
}

impl VocabularyJoinedRow {
    pub fn to_api(self) -> VocabularyWithPhrases {
        VocabularyWithPhrases {
            id: self.id,
            stage_id: self.stage_id,
            review_date: self.review_date,
            priority: self.priority,
            learned: self.learned,
            modified_at: self.modified_at,
            original: PhraseSummary {
                id: self.original_id,
                text: self.original_text,
                audio_url: self.original_audio_url,
            },
            translated: PhraseSummary {
                id: self.translated_id,
                text: self.translated_text,
                audio_url: self.translated_audio_url,
            },
        }
    }
}

/// Vocabulary item with both phrases resolved, the due-list read model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyWithPhrases {
    pub id: i64,
    pub stage_id: i32,
    pub review_date: Option<NaiveDate>,
    pub priority: i32,
    pub learned: bool,
    pub modified_at: Option<DateTime<Utc>>,
    pub original: PhraseSummary,
    pub translated: PhraseSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseSummary {
    pub id: i64,
    pub text: String,
    pub audio_url: Option<String>,
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DelayRequest {
    pub ids: Vec<i64>,
    pub days: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RestartRequest {
    pub ids: Vec<i64>,
    /// Defaults to today when omitted.
    pub review_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteVocabularyRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteVocabularyResponse {
    pub deleted: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateAudioRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateAudioResponse {
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateAllAudioResponse {
    pub generated: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAudiosRequest {
    pub filenames: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAudiosResponse {
    pub deleted: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub phrase: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_phrase: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}
