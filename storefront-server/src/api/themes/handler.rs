//! Theme API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::models::{SelectThemeRequest, Theme, ThemeForm};
use uuid::Uuid;

use crate::api::Viewer;
use crate::core::ServerState;
use crate::presentation::PresentationSnapshot;
use crate::themes::presets::{self, PRESETS, PresetSummary};
use crate::themes::slug::generate_slug;

// ── Viewer ──

/// GET /api/themes
pub async fn list_active(
    State(state): State<ServerState>,
    Viewer(viewer): Viewer,
) -> Json<Vec<Theme>> {
    Json(state.providers.get(viewer).list_active_themes().await)
}

/// GET /api/themes/current
pub async fn current(
    State(state): State<ServerState>,
    Viewer(viewer): Viewer,
) -> Json<PresentationSnapshot> {
    let provider = state.providers.get(viewer);
    provider.initialize().await;
    Json(provider.snapshot())
}

/// PUT /api/themes/current
pub async fn select(
    State(state): State<ServerState>,
    Viewer(viewer): Viewer,
    Json(payload): Json<SelectThemeRequest>,
) -> AppResult<Json<PresentationSnapshot>> {
    let provider = state.providers.get(viewer);
    provider.set_user_theme(payload.theme_id).await?;
    Ok(Json(provider.snapshot()))
}

/// DELETE /api/themes/current
pub async fn reset(
    State(state): State<ServerState>,
    Viewer(viewer): Viewer,
) -> AppResult<Json<PresentationSnapshot>> {
    let provider = state.providers.get(viewer);
    provider.reset_to_default().await?;
    Ok(Json(provider.snapshot()))
}

/// GET /api/themes/current/stylesheet
pub async fn stylesheet(
    State(state): State<ServerState>,
    Viewer(viewer): Viewer,
) -> impl IntoResponse {
    let provider = state.providers.get(viewer);
    if provider.cached_slug().is_none() {
        provider.initialize().await;
    }
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        provider.stylesheet(),
    )
}

// ── Admin ──

/// GET /api/admin/themes
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Theme>>> {
    Ok(Json(state.themes.list_themes().await?))
}

/// GET /api/admin/themes/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Theme>> {
    Ok(Json(state.themes.get_theme(id).await?))
}

/// POST /api/admin/themes
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ThemeForm>,
) -> AppResult<Json<Theme>> {
    Ok(Json(state.themes.create_theme(payload).await?))
}

/// PUT /api/admin/themes/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ThemeForm>,
) -> AppResult<Json<Theme>> {
    Ok(Json(state.themes.update_theme(id, payload).await?))
}

/// DELETE /api/admin/themes/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<bool>> {
    state.themes.delete_theme(id).await?;
    Ok(Json(true))
}

/// POST /api/admin/themes/{id}/toggle-active
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Theme>> {
    Ok(Json(state.themes.toggle_active(id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SlugRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct SlugResponse {
    pub slug: String,
}

/// POST /api/admin/themes/slug
pub async fn suggest_slug(Json(payload): Json<SlugRequest>) -> Json<SlugResponse> {
    Json(SlugResponse {
        slug: generate_slug(&payload.name),
    })
}

/// GET /api/admin/theme-presets
pub async fn list_presets() -> Json<Vec<PresetSummary>> {
    Json(PRESETS.iter().map(PresetSummary::from).collect())
}

/// GET /api/admin/theme-presets/{key}
pub async fn preset_form(Path(key): Path<String>) -> AppResult<Json<ThemeForm>> {
    Ok(Json(presets::apply_preset(ThemeForm::default(), &key)?))
}
