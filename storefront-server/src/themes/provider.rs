//! Per-viewer theme state
//!
//! A [`ThemeProvider`] binds one viewer (a user id, or nobody) to its own
//! [`Presentation`]. [`ThemeProviders`] hands them out from a concurrent map.
//!
//! Identified viewers are evicted once idle (no event subscribers and unused
//! for [`ViewerLimits::idle_ttl`]) or when the map reaches
//! [`ViewerLimits::capacity`]. An evicted viewer is rebuilt on its next
//! request; `initialize` re-resolves from the store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use shared::error::{AppError, ErrorCode};
use shared::models::{Theme, UserThemePreference};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::resolver::ThemeResolver;
use crate::db::DataStore;
use crate::error::{ServiceResult, degrade, persistence};
use crate::presentation::{
    CURRENT_THEME_SLUG_KEY, EventBus, Presentation, PresentationSnapshot, SiteEvent,
};

pub struct ThemeProvider {
    viewer: Option<Uuid>,
    store: Arc<dyn DataStore>,
    resolver: ThemeResolver,
    presentation: Presentation,
    last_used: Mutex<Instant>,
}

impl ThemeProvider {
    pub fn new(viewer: Option<Uuid>, store: Arc<dyn DataStore>, bus: EventBus) -> Self {
        Self {
            viewer,
            resolver: ThemeResolver::new(store.clone()),
            store,
            presentation: Presentation::new(bus),
            last_used: Mutex::new(Instant::now()),
        }
    }

    pub fn viewer(&self) -> Option<Uuid> {
        self.viewer
    }

    /// Resolve and apply on session start
    pub async fn initialize(&self) -> Option<Theme> {
        let theme = self.resolver.resolve_theme(self.viewer).await;
        match &theme {
            Some(theme) => self.apply_theme(theme),
            None => tracing::warn!(viewer = ?self.viewer, "No theme resolved, leaving root unstyled"),
        }
        theme
    }

    pub fn apply_theme(&self, theme: &Theme) {
        self.presentation.apply(theme);
    }

    /// Persist the viewer's selection, then apply it
    ///
    /// The theme must be active. Nothing is applied if the write fails.
    pub async fn set_user_theme(&self, theme_id: Uuid) -> ServiceResult<Theme> {
        let user_id = self.viewer.ok_or_else(AppError::not_authenticated)?;

        let theme = degrade("theme lookup", self.store.find_theme(theme_id).await)
            .flatten()
            .filter(|t| t.is_active)
            .ok_or_else(|| {
                AppError::new(ErrorCode::ThemeNotFound).with_detail("theme_id", theme_id.to_string())
            })?;

        let pref = UserThemePreference {
            user_id,
            theme_id,
            updated_at: Utc::now(),
        };
        self.store
            .upsert_user_theme(&pref)
            .await
            .map_err(persistence)?;

        tracing::info!(user_id = %user_id, slug = %theme.slug, "User theme selected");
        self.apply_theme(&theme);
        Ok(theme)
    }

    /// Drop the viewer's selection (if any) and apply the site default
    pub async fn reset_to_default(&self) -> ServiceResult<Option<Theme>> {
        if let Some(user_id) = self.viewer {
            self.store
                .delete_user_theme(user_id)
                .await
                .map_err(persistence)?;
            tracing::info!(user_id = %user_id, "User theme reset");
        }

        let theme = self.resolver.resolve_default().await;
        if let Some(theme) = &theme {
            self.apply_theme(theme);
        }
        Ok(theme)
    }

    pub async fn list_active_themes(&self) -> Vec<Theme> {
        self.resolver.list_active_themes().await
    }

    /// Slug last written to local storage, for first paint before resolution
    pub fn cached_slug(&self) -> Option<String> {
        self.presentation.local_item(CURRENT_THEME_SLUG_KEY)
    }

    pub fn snapshot(&self) -> PresentationSnapshot {
        self.presentation.snapshot()
    }

    pub fn stylesheet(&self) -> String {
        self.presentation.root().to_css()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.presentation.bus().subscribe()
    }

    fn notify(&self, event: SiteEvent) {
        self.presentation.bus().publish(event);
    }

    fn touch(&self) {
        *self.last_used.lock() = Instant::now();
    }

    fn has_subscribers(&self) -> bool {
        self.presentation.bus().receiver_count() > 0
    }

    fn is_idle(&self, ttl: Duration) -> bool {
        !self.has_subscribers() && self.last_used.lock().elapsed() >= ttl
    }
}

/// Bounds on the per-viewer map
#[derive(Debug, Clone, Copy)]
pub struct ViewerLimits {
    /// Map size that triggers eviction
    pub capacity: usize,
    /// Unused time after which a viewer without subscribers is dropped
    pub idle_ttl: Duration,
}

impl Default for ViewerLimits {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            idle_ttl: Duration::from_secs(30 * 60),
        }
    }
}

/// Viewer → provider map; `None` is the shared anonymous viewer
pub struct ThemeProviders {
    store: Arc<dyn DataStore>,
    channel_capacity: usize,
    limits: ViewerLimits,
    providers: DashMap<Option<Uuid>, Arc<ThemeProvider>>,
}

impl ThemeProviders {
    pub fn new(store: Arc<dyn DataStore>, channel_capacity: usize, limits: ViewerLimits) -> Self {
        Self {
            store,
            channel_capacity,
            limits: ViewerLimits {
                capacity: limits.capacity.max(1),
                ..limits
            },
            providers: DashMap::new(),
        }
    }

    pub fn get(&self, viewer: Option<Uuid>) -> Arc<ThemeProvider> {
        if let Some(existing) = self.providers.get(&viewer) {
            existing.touch();
            return existing.clone();
        }

        if self.providers.len() >= self.limits.capacity {
            self.evict();
        }
        let provider = self
            .providers
            .entry(viewer)
            .or_insert_with(|| {
                Arc::new(ThemeProvider::new(
                    viewer,
                    self.store.clone(),
                    EventBus::with_capacity(self.channel_capacity),
                ))
            })
            .clone();
        provider.touch();
        provider
    }

    /// Drop idle viewers; if the map is still full, drop every identified
    /// viewer without subscribers. The anonymous viewer is never dropped.
    fn evict(&self) {
        let before = self.providers.len();
        let ttl = self.limits.idle_ttl;
        self.providers
            .retain(|viewer, provider| viewer.is_none() || !provider.is_idle(ttl));
        if self.providers.len() >= self.limits.capacity {
            self.providers
                .retain(|viewer, provider| viewer.is_none() || provider.has_subscribers());
        }
        tracing::debug!(
            before,
            after = self.providers.len(),
            "Evicted idle theme viewers"
        );
    }

    pub fn anonymous(&self) -> Arc<ThemeProvider> {
        self.get(None)
    }

    /// Send `event` to every known viewer
    pub fn broadcast(&self, event: SiteEvent) {
        let providers: Vec<Arc<ThemeProvider>> =
            self.providers.iter().map(|e| e.value().clone()).collect();
        tracing::debug!(event = event.name(), viewers = providers.len(), "Broadcasting");
        for provider in providers {
            provider.notify(event);
        }
    }

    /// Re-resolve and apply the site default for anonymous viewers
    pub async fn refresh_anonymous(&self) -> Option<Theme> {
        self.anonymous().initialize().await
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
