//! Test fixtures and factory functions for creating test data.

use chrono::NaiveDate;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// Seed language settings for a user.
pub async fn seed_user_settings(pool: &PgPool, user_id: Uuid) {
    sqlx::query(
        r#"
        INSERT INTO user_settings
            (user_id, origin_language, target_language, origin_language_id, target_language_id)
        VALUES ($1, 'de', 'en-US', 3, 4)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await
    .expect("Failed to seed user settings");
}

/// Seed learn/review weekday sets for a user.
pub async fn seed_schedule_days(
    pool: &PgPool,
    user_id: Uuid,
    learn_days: &[i16],
    review_days: &[i16],
) {
    for day in learn_days {
        sqlx::query("INSERT INTO learn_days (user_id, weekday_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(day)
            .execute(pool)
            .await
            .expect("Failed to seed learn day");
    }
    for day in review_days {
        sqlx::query("INSERT INTO review_days (user_id, weekday_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(day)
            .execute(pool)
            .await
            .expect("Failed to seed review day");
    }
}

/// Seed a single phrase, returning its id.
pub async fn seed_phrase(
    pool: &PgPool,
    user_id: Uuid,
    text: &str,
    language_id: i32,
    audio_url: Option<&str>,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO phrases (user_id, text, language_id, audio_url)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(text)
    .bind(language_id)
    .bind(audio_url)
    .fetch_one(pool)
    .await
    .expect("Failed to seed phrase")
}

/// Seed an unstarted vocabulary item for an existing phrase pair.
pub async fn seed_pair(
    pool: &PgPool,
    user_id: Uuid,
    phrase_id: i64,
    translated_phrase_id: i64,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO phrase_translations
            (user_id, phrase_id, translated_phrase_id, stage_id, review_date, priority, learned)
        VALUES ($1, $2, $3, 0, NULL, 3, FALSE)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(phrase_id)
    .bind(translated_phrase_id)
    .fetch_one(pool)
    .await
    .expect("Failed to seed vocabulary item")
}

/// Seed a phrase pair and its vocabulary item, returning the item id.
pub async fn seed_vocabulary(
    pool: &PgPool,
    user_id: Uuid,
    stage_id: i32,
    review_date: Option<NaiveDate>,
) -> i64 {
    let phrase_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO phrases (user_id, text, language_id, audio_url)
        VALUES ($1, 'Wie geht es dir?', 3, '1.mp3')
        RETURNING id
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .expect("Failed to seed original phrase");

    let translated_phrase_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO phrases (user_id, text, language_id, audio_url)
        VALUES ($1, 'How are you?', 4, '2.mp3')
        RETURNING id
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .expect("Failed to seed translated phrase");

    sqlx::query_scalar(
        r#"
        INSERT INTO phrase_translations
            (user_id, phrase_id, translated_phrase_id, stage_id, review_date, priority, learned)
        VALUES ($1, $2, $3, $4, $5, 3, $6)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(phrase_id)
    .bind(translated_phrase_id)
    .bind(stage_id)
    .bind(review_date)
    .bind(stage_id == 6)
    .fetch_one(pool)
    .await
    .expect("Failed to seed vocabulary item")
}

/// Create a review request body.
pub fn review_request(id: i64) -> serde_json::Value {
    json!({ "id": id })
}

/// Create a batch delay request body.
pub fn delay_request(ids: Vec<i64>, days: i64) -> serde_json::Value {
    json!({ "ids": ids, "days": days })
}

/// Create a batch reset request body.
pub fn reset_request(ids: Vec<i64>) -> serde_json::Value {
    json!({ "ids": ids })
}

/// Create a batch restart request body.
pub fn restart_request(ids: Vec<i64>, review_date: Option<&str>) -> serde_json::Value {
    json!({ "ids": ids, "review_date": review_date })
}

/// Create a delete request body.
pub fn delete_request(ids: Vec<i64>) -> serde_json::Value {
    json!({ "ids": ids })
}

/// Create an import request body.
pub fn import_request(content: &str) -> serde_json::Value {
    json!({ "content": content })
}
