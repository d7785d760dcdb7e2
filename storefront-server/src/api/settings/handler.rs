//! Site settings handlers

use axum::{Json, extract::State};
use shared::error::AppResult;
use shared::models::{Branding, BrandingUpdate, DefaultThemeSetting};

use crate::core::ServerState;

/// GET /api/settings/branding
pub async fn branding(State(state): State<ServerState>) -> Json<Branding> {
    Json(state.settings.get_branding().await)
}

/// PUT /api/admin/settings/branding
pub async fn update_branding(
    State(state): State<ServerState>,
    Json(payload): Json<BrandingUpdate>,
) -> AppResult<Json<Branding>> {
    Ok(Json(state.settings.update_branding(payload).await?))
}

/// GET /api/admin/settings/default-theme
pub async fn default_theme(State(state): State<ServerState>) -> Json<DefaultThemeSetting> {
    Json(DefaultThemeSetting {
        slug: state.themes.get_default_theme_slug().await,
    })
}

/// PUT /api/admin/settings/default-theme
pub async fn set_default_theme(
    State(state): State<ServerState>,
    Json(payload): Json<DefaultThemeSetting>,
) -> AppResult<Json<DefaultThemeSetting>> {
    let slug = state.themes.set_default_theme_slug(payload.slug).await?;
    Ok(Json(DefaultThemeSetting { slug }))
}
