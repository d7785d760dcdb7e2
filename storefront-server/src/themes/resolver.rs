//! Theme precedence
//!
//! 1. the viewer's stored selection
//! 2. the `default_website_theme` setting, when non-empty
//! 3. the `light` theme
//!
//! A failed or empty lookup at any step falls through to the next one.

use std::sync::Arc;

use shared::models::{DEFAULT_WEBSITE_THEME_KEY, FALLBACK_THEME_SLUG, Theme};
use uuid::Uuid;

use crate::db::DataStore;
use crate::error::degrade;

#[derive(Clone)]
pub struct ThemeResolver {
    store: Arc<dyn DataStore>,
}

impl ThemeResolver {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// `None` means "leave the presentation unstyled"
    pub async fn resolve_theme(&self, user_id: Option<Uuid>) -> Option<Theme> {
        if let Some(user_id) = user_id
            && let Some(theme) = self.preferred_theme(user_id).await
        {
            return Some(theme);
        }
        self.resolve_default().await
    }

    /// Rules 2 and 3 only
    pub async fn resolve_default(&self) -> Option<Theme> {
        if let Some(slug) = self.default_slug().await {
            if let Some(theme) = self.theme_by_slug(&slug).await {
                return Some(theme);
            }
            tracing::warn!(slug = %slug, "Default website theme not found, using fallback");
        }
        self.theme_by_slug(FALLBACK_THEME_SLUG).await
    }

    /// The configured site default, if set to a non-empty value
    pub async fn default_slug(&self) -> Option<String> {
        let settings = degrade(
            "default theme setting",
            self.store.get_settings(&[DEFAULT_WEBSITE_THEME_KEY]).await,
        )?;
        settings
            .into_iter()
            .find(|s| s.key == DEFAULT_WEBSITE_THEME_KEY)
            .and_then(|s| s.value)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Active themes by `sort_order`; failures degrade to an empty list
    pub async fn list_active_themes(&self) -> Vec<Theme> {
        degrade("active themes", self.store.list_active_themes().await).unwrap_or_default()
    }

    async fn preferred_theme(&self, user_id: Uuid) -> Option<Theme> {
        let pref = degrade("user theme", self.store.get_user_theme(user_id).await).flatten()?;
        let theme = degrade("theme by id", self.store.find_theme(pref.theme_id).await).flatten();
        if theme.is_none() {
            tracing::warn!(user_id = %user_id, theme_id = %pref.theme_id, "Selected theme missing");
        }
        theme
    }

    async fn theme_by_slug(&self, slug: &str) -> Option<Theme> {
        degrade("theme by slug", self.store.find_theme_by_slug(slug).await).flatten()
    }
}
