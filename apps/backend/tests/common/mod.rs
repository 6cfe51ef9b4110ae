//! Common test utilities and fixtures for integration tests.
//!
//! # Requirements
//! Integration tests require:
//! - PostgreSQL database (set DATABASE_URL env var)
//! - An identity provider for authenticated routes (set IDENTITY_* env
//!   vars); tests that only exercise rejection paths run without one

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use uuid::Uuid;

use vokabel_backend::db::Database;
use vokabel_backend::services::identity::IdentityClient;
use vokabel_backend::services::speech::SpeechClient;
use vokabel_backend::services::storage::StorageService;
use vokabel_backend::services::translate::TranslateClient;
use vokabel_backend::AppState;

/// Test context containing database connection and test server.
///
/// Requires DATABASE_URL; the external collaborators are configured from
/// env vars with placeholder fallbacks so the router can be built even
/// when only the database-backed paths are under test.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations().await.expect("Failed to run migrations");

        let db = Arc::new(db);

        set_placeholder_env();

        let storage = StorageService::new()
            .await
            .expect("Failed to create storage config");

        let state = AppState {
            db: db.clone(),
            storage: Arc::new(storage),
            identity: Arc::new(IdentityClient::from_env().expect("identity config")),
            speech: Arc::new(SpeechClient::from_env().expect("speech config")),
            translator: Arc::new(TranslateClient::from_env().expect("translate config")),
        };

        let app = vokabel_backend::build_router(state);

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Clean up test data for a user.
    ///
    /// Call this after tests to remove test data.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        // Delete in order due to foreign keys
        let _ = sqlx::query("DELETE FROM phrase_translations WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM phrases WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM learn_days WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM review_days WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM user_settings WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }
}

/// Fill in placeholder configuration for collaborators a test does not
/// exercise, without clobbering anything set in the environment.
fn set_placeholder_env() {
    let placeholders = [
        ("IDENTITY_URL", "http://localhost:9999"),
        ("IDENTITY_API_KEY", "test-key"),
        ("S3_BUCKET", "test-bucket"),
        ("S3_ACCESS_KEY", "test-key"),
        ("S3_SECRET_KEY", "test-secret"),
        ("S3_ENDPOINT", "http://localhost:9000"),
        ("ELEVENLABS_API_KEY", "test-key"),
        ("ELEVENLABS_VOICE_ID", "test-voice"),
        ("DEEPL_API_KEY", "test-key"),
    ];

    for (key, value) in placeholders {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }
}
