//! PostgreSQL database operations
//!
//! Every vocabulary query filters by `user_id` in addition to the row id so
//! one user can never read or mutate another user's items.

use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use vokabel_core::{add_days, DaySet, ScheduleUpdate, Stage};

use crate::error::{ApiError, Result};
use crate::models::*;

const VOCABULARY_COLUMNS: &str = "id, user_id, phrase_id, translated_phrase_id, stage_id, \
     review_date, priority, learned, modified_at";

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Vocabulary Repository ===

    /// Get a vocabulary item by id, scoped to its owner.
    pub async fn get_vocabulary(&self, id: i64, user_id: Uuid) -> Result<VocabularyItem> {
        let item = sqlx::query_as::<_, VocabularyItem>(&format!(
            r#"
            SELECT {VOCABULARY_COLUMNS}
            FROM phrase_translations
            WHERE id = $1 AND user_id = $2
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("vocabulary {id}")))?;

        Ok(item)
    }

    /// Get several vocabulary items by id, scoped to their owner.
    pub async fn get_vocabulary_many(
        &self,
        ids: &[i64],
        user_id: Uuid,
    ) -> Result<Vec<VocabularyItem>> {
        let items = sqlx::query_as::<_, VocabularyItem>(&format!(
            r#"
            SELECT {VOCABULARY_COLUMNS}
            FROM phrase_translations
            WHERE id = ANY($1) AND user_id = $2
            "#,
        ))
        .bind(ids)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Items due on or before `today`, with both phrases resolved.
    ///
    /// Only audio-ready pairs are presented for review, ordered by
    /// priority, then review date, then id.
    pub async fn get_due_vocabulary(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<VocabularyJoinedRow>> {
        let rows = sqlx::query_as::<_, VocabularyJoinedRow>(
            r#"
            SELECT pt.id, pt.stage_id, pt.review_date, pt.priority, pt.learned, pt.modified_at,
                   o.id as original_id, o.text as original_text, o.audio_url as original_audio_url,
                   t.id as translated_id, t.text as translated_text, t.audio_url as translated_audio_url
            FROM phrase_translations pt
            JOIN phrases o ON o.id = pt.phrase_id
            JOIN phrases t ON t.id = pt.translated_phrase_id
            WHERE pt.user_id = $1
              AND pt.stage_id > 0 AND NOT pt.learned
              AND pt.review_date IS NOT NULL AND pt.review_date <= $2
              AND o.audio_url IS NOT NULL AND t.audio_url IS NOT NULL
            ORDER BY pt.priority ASC, pt.review_date ASC, pt.id ASC
            "#,
        )
        .bind(user_id)
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Stage-0 items that have never been reviewed, with both phrases.
    pub async fn get_new_vocabulary(&self, user_id: Uuid) -> Result<Vec<VocabularyJoinedRow>> {
        let rows = sqlx::query_as::<_, VocabularyJoinedRow>(
            r#"
            SELECT pt.id, pt.stage_id, pt.review_date, pt.priority, pt.learned, pt.modified_at,
                   o.id as original_id, o.text as original_text, o.audio_url as original_audio_url,
                   t.id as translated_id, t.text as translated_text, t.audio_url as translated_audio_url
            FROM phrase_translations pt
            JOIN phrases o ON o.id = pt.phrase_id
            JOIN phrases t ON t.id = pt.translated_phrase_id
            WHERE pt.user_id = $1 AND pt.stage_id = 0
              AND o.audio_url IS NOT NULL AND t.audio_url IS NOT NULL
            ORDER BY pt.priority ASC, pt.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Write back the scheduler's decision. The single mutating write of
    /// the review path; last write wins, there is no version check.
    pub async fn apply_schedule_update(
        &self,
        id: i64,
        user_id: Uuid,
        update: &ScheduleUpdate,
    ) -> Result<VocabularyItem> {
        let item = sqlx::query_as::<_, VocabularyItem>(&format!(
            r#"
            UPDATE phrase_translations
            SET stage_id = $3, review_date = $4, learned = $5, modified_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {VOCABULARY_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .bind(update.stage_id)
        .bind(update.review_date)
        .bind(update.learned)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("vocabulary {id}")))?;

        Ok(item)
    }

    /// Shift an item's review date forward by `days` without touching its
    /// stage. Manual user override, independent of the scheduler.
    pub async fn delay_vocabulary(
        &self,
        item: &VocabularyItem,
        days: i64,
        today: NaiveDate,
    ) -> Result<VocabularyItem> {
        let new_review_date = add_days(item.review_date, days, today);

        let item = sqlx::query_as::<_, VocabularyItem>(&format!(
            r#"
            UPDATE phrase_translations
            SET review_date = $3, modified_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {VOCABULARY_COLUMNS}
            "#,
        ))
        .bind(item.id)
        .bind(item.user_id)
        .bind(new_review_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("vocabulary {}", item.id)))?;

        Ok(item)
    }

    /// Force an item back to unstarted: stage 0, no review date, unlearned.
    pub async fn reset_vocabulary(&self, id: i64, user_id: Uuid) -> Result<VocabularyItem> {
        let item = sqlx::query_as::<_, VocabularyItem>(&format!(
            r#"
            UPDATE phrase_translations
            SET stage_id = 0, review_date = NULL, learned = FALSE, modified_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {VOCABULARY_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("vocabulary {id}")))?;

        Ok(item)
    }

    /// Force an item back into rotation at stage 1 with the given date.
    pub async fn restart_vocabulary(
        &self,
        id: i64,
        user_id: Uuid,
        review_date: NaiveDate,
    ) -> Result<VocabularyItem> {
        let item = sqlx::query_as::<_, VocabularyItem>(&format!(
            r#"
            UPDATE phrase_translations
            SET stage_id = 1, review_date = $3, learned = FALSE, modified_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {VOCABULARY_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .bind(review_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("vocabulary {id}")))?;

        Ok(item)
    }

    /// Delete a vocabulary item and its two phrase rows.
    ///
    /// Returns the stored audio object names so the caller can remove them
    /// from storage. A phrase delete failing after the parent row is gone
    /// surfaces as `PartialDelete` rather than being swallowed.
    pub async fn delete_vocabulary(&self, id: i64, user_id: Uuid) -> Result<Vec<String>> {
        let item = self.get_vocabulary(id, user_id).await?;

        let audio_urls: Vec<String> = sqlx::query_scalar::<_, Option<String>>(
            r#"
            SELECT audio_url FROM phrases
            WHERE id = ANY($1) AND user_id = $2
            "#,
        )
        .bind(vec![item.phrase_id, item.translated_phrase_id])
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .flatten()
        .collect();

        sqlx::query(
            r#"
            DELETE FROM phrase_translations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            DELETE FROM phrases
            WHERE id = ANY($1) AND user_id = $2
            "#,
        )
        .bind(vec![item.phrase_id, item.translated_phrase_id])
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            ApiError::PartialDelete(format!(
                "vocabulary {id} removed but phrases {} and {} remain: {e}",
                item.phrase_id, item.translated_phrase_id
            ))
        })?;

        Ok(audio_urls)
    }

    /// Insert a phrase, returning its id.
    pub async fn insert_phrase(
        &self,
        user_id: Uuid,
        text: &str,
        language_id: i32,
    ) -> Result<i64> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO phrases (user_id, text, language_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(text)
        .bind(language_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Insert an unstarted vocabulary item for a phrase pair.
    pub async fn insert_vocabulary(
        &self,
        user_id: Uuid,
        phrase_id: i64,
        translated_phrase_id: i64,
        priority: i32,
    ) -> Result<i64> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO phrase_translations
                (user_id, phrase_id, translated_phrase_id, stage_id, review_date, priority, learned)
            VALUES ($1, $2, $3, 0, NULL, $4, FALSE)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(phrase_id)
        .bind(translated_phrase_id)
        .bind(priority)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    // === Stage Repository ===

    /// The full static stage table.
    pub async fn get_stages(&self) -> Result<Vec<Stage>> {
        let rows = sqlx::query_as::<_, StageRow>(
            r#"
            SELECT id, days FROM stages ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(StageRow::to_stage).collect())
    }

    /// The full language reference table.
    pub async fn get_language_translations(&self) -> Result<Vec<LanguageTranslation>> {
        let rows = sqlx::query_as::<_, LanguageTranslation>(
            r#"
            SELECT id, language_id, translation
            FROM language_translations
            ORDER BY language_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // === Schedule Preference Repository ===

    /// Weekdays the user starts new items on. May legitimately be empty.
    pub async fn get_learn_days(&self, user_id: Uuid) -> Result<DaySet> {
        self.get_weekdays("learn_days", user_id).await
    }

    /// Weekdays the user reviews on. May legitimately be empty.
    pub async fn get_review_days(&self, user_id: Uuid) -> Result<DaySet> {
        self.get_weekdays("review_days", user_id).await
    }

    async fn get_weekdays(&self, table: &str, user_id: Uuid) -> Result<DaySet> {
        let days: Vec<i16> = sqlx::query_scalar(&format!(
            r#"
            SELECT weekday_id FROM {table} WHERE user_id = $1
            "#,
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(days.into_iter().map(|d| d as u8).collect())
    }

    // === User Settings Repository ===

    /// Language configuration for a user.
    pub async fn get_user_settings(&self, user_id: Uuid) -> Result<UserSettings> {
        let settings = sqlx::query_as::<_, UserSettings>(
            r#"
            SELECT user_id, origin_language, target_language,
                   origin_language_id, target_language_id
            FROM user_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("user settings".to_string()))?;

        Ok(settings)
    }

    // === Audio Repository ===

    /// Record the stored audio object for a phrase.
    pub async fn set_phrase_audio(
        &self,
        phrase_id: i64,
        user_id: Uuid,
        filename: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE phrases
            SET audio_url = $3
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(phrase_id)
        .bind(user_id)
        .bind(filename)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Phrases belonging to vocabulary pairs that still lack audio. Used by
    /// the audio backfill endpoint. DISTINCT because a phrase shared by
    /// several pairs must only be synthesized once.
    pub async fn get_phrases_missing_audio(&self, user_id: Uuid) -> Result<Vec<Phrase>> {
        let phrases = sqlx::query_as::<_, Phrase>(
            r#"
            SELECT DISTINCT p.id, p.user_id, p.text, p.language_id, p.audio_url
            FROM phrases p
            JOIN phrase_translations pt
              ON p.id = pt.phrase_id OR p.id = pt.translated_phrase_id
            WHERE pt.user_id = $1 AND p.audio_url IS NULL
            ORDER BY p.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(phrases)
    }
}
