pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::services::identity::IdentityClient;
use crate::services::speech::SpeechClient;
use crate::services::storage::StorageService;
use crate::services::translate::TranslateClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub storage: Arc<StorageService>,
    pub identity: Arc<IdentityClient>,
    pub speech: Arc<SpeechClient>,
    pub translator: Arc<TranslateClient>,
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    tracing::info!("Initializing audio storage...");
    let storage = StorageService::new().await?;

    let state = AppState {
        db: Arc::new(db),
        storage: Arc::new(storage),
        identity: Arc::new(IdentityClient::from_env()?),
        speech: Arc::new(SpeechClient::from_env()?),
        translator: Arc::new(TranslateClient::from_env()?),
    };

    let app = build_router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the full router: public login/refresh/health plus everything
/// else behind the auth middleware.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Vocabulary routes
        .route("/vocabulary/review", get(routes::vocabulary::list_due))
        .route("/vocabulary/new", get(routes::vocabulary::list_new))
        .route("/vocabulary/review", post(routes::vocabulary::set_reviewed))
        .route("/vocabulary/delay", post(routes::vocabulary::delay_many))
        .route("/vocabulary/reset", post(routes::vocabulary::reset_many))
        .route("/vocabulary/restart", post(routes::vocabulary::restart_many))
        .route("/vocabulary", delete(routes::vocabulary::delete_many))
        .route(
            "/vocabulary/import/translated",
            post(routes::vocabulary::import_translated),
        )
        .route(
            "/vocabulary/import/raw",
            post(routes::vocabulary::import_raw),
        )
        // User routes
        .route("/user/settings", get(routes::user::settings))
        // Language reference routes
        .route(
            "/languages/translations",
            get(routes::languages::translations),
        )
        // Audio routes
        .route("/audio/generate", post(routes::audio::generate))
        .route("/audio/generate-all", get(routes::audio::generate_all))
        .route("/audio/delete", post(routes::audio::delete))
        .route("/audio/:filename", get(routes::audio::fetch))
        // Translate routes
        .route("/translate", post(routes::translate::translate))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/user/login", post(routes::user::login))
        .route("/user/refresh", post(routes::user::refresh))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
