//! Language reference endpoint

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::LanguageTranslation;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /languages/translations
///
/// Clients use this to render language names for the bare ids stored on
/// phrases and user settings.
pub async fn translations(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<LanguageTranslation>>> {
    let languages = state.db.get_language_translations().await?;
    Ok(Json(languages))
}
