//! User and health endpoint tests.
//!
//! These tests require a running PostgreSQL database (DATABASE_URL).
//! Settings tests additionally need an identity provider (IDENTITY_*)
//! that resolves TEST_USER_TOKEN to TEST_USER_ID.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use uuid::Uuid;

use common::fixtures;
use common::TestContext;

/// Health check is reachable without a token.
#[tokio::test]
#[ignore = "requires database"]
async fn test_health_check_is_public() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
}

/// Settings require authentication.
#[tokio::test]
#[ignore = "requires database"]
async fn test_settings_without_token_is_unauthorized() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/user/settings").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Unauthorized");
}

/// The language reference table maps stored ids to display names.
#[tokio::test]
#[ignore = "requires database and identity provider"]
async fn test_language_translations_cover_stored_ids() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let token = std::env::var("TEST_USER_TOKEN").expect("TEST_USER_TOKEN must be set");

    let response = server
        .get("/languages/translations")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let languages = body.as_array().unwrap();

    // The seeded table covers the ids the settings fixtures use.
    for language_id in [3, 4] {
        let entry = languages
            .iter()
            .find(|l| l["language_id"] == language_id)
            .unwrap();
        assert!(!entry["translation"].as_str().unwrap().is_empty());
    }
}

/// Settings come back with the stored language pair.
#[tokio::test]
#[ignore = "requires database and identity provider"]
async fn test_settings_returns_language_pair() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let user_id: Uuid = std::env::var("TEST_USER_ID")
        .expect("TEST_USER_ID must be set")
        .parse()
        .expect("TEST_USER_ID must be a UUID");
    let token = std::env::var("TEST_USER_TOKEN").expect("TEST_USER_TOKEN must be set");

    fixtures::seed_user_settings(ctx.db.pool(), user_id).await;

    let response = server
        .get("/user/settings")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["origin_language"], "de");
    assert_eq!(body["target_language"], "en-US");

    ctx.cleanup_user(user_id).await;
}
