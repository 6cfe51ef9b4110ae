//! Audio repository tests.
//!
//! These tests require a running PostgreSQL database (DATABASE_URL); they
//! exercise the backfill query directly and never call the speech or
//! storage providers.

mod common;

use uuid::Uuid;

use common::fixtures;
use common::TestContext;

/// A phrase shared by several pairs shows up once in the backfill list, so
/// it is only synthesized and uploaded once.
#[tokio::test]
#[ignore = "requires database"]
async fn test_missing_audio_listing_dedupes_shared_phrases() {
    let ctx = TestContext::new().await;
    let user_id = Uuid::new_v4();

    let shared = fixtures::seed_phrase(ctx.db.pool(), user_id, "Guten Morgen", 3, None).await;
    let first = fixtures::seed_phrase(ctx.db.pool(), user_id, "Good morning", 4, None).await;
    let second = fixtures::seed_phrase(ctx.db.pool(), user_id, "Morning", 4, None).await;
    fixtures::seed_pair(ctx.db.pool(), user_id, shared, first).await;
    fixtures::seed_pair(ctx.db.pool(), user_id, shared, second).await;

    let phrases = ctx.db.get_phrases_missing_audio(user_id).await.unwrap();

    let mut ids: Vec<i64> = phrases.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![shared, first, second]);
    ids.dedup();
    assert_eq!(ids.len(), 3);

    ctx.cleanup_user(user_id).await;
}

/// Phrases that already have audio are not offered for backfill.
#[tokio::test]
#[ignore = "requires database"]
async fn test_missing_audio_listing_skips_covered_phrases() {
    let ctx = TestContext::new().await;
    let user_id = Uuid::new_v4();

    let covered =
        fixtures::seed_phrase(ctx.db.pool(), user_id, "Bis später", 3, Some("1.mp3")).await;
    let missing = fixtures::seed_phrase(ctx.db.pool(), user_id, "See you later", 4, None).await;
    fixtures::seed_pair(ctx.db.pool(), user_id, covered, missing).await;

    let phrases = ctx.db.get_phrases_missing_audio(user_id).await.unwrap();

    assert_eq!(phrases.len(), 1);
    assert_eq!(phrases[0].id, missing);

    ctx.cleanup_user(user_id).await;
}
