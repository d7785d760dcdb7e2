//! Shared server state
//!
//! Every service is built once over the same `Arc<dyn DataStore>` and
//! shared by handlers through cheap `Clone`.

use std::sync::Arc;

use shared::error::{AppError, ErrorCode};

use super::config::{Config, StoreBackend};
use crate::db::{DataStore, MemoryStore, PgStore};
use crate::orders::{OrderManager, RevenueReports};
use crate::settings::SiteSettings;
use crate::storage::StorageClient;
use crate::themes::{ThemeAdmin, ThemeProviders};

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Arc<dyn DataStore>,
    pub providers: Arc<ThemeProviders>,
    pub themes: Arc<ThemeAdmin>,
    pub orders: Arc<OrderManager>,
    pub revenue: Arc<RevenueReports>,
    pub settings: Arc<SiteSettings>,
    pub storage: Arc<StorageClient>,
}

impl ServerState {
    /// Connect the configured store and build every service over it
    pub async fn initialize(config: Config) -> Result<Self, AppError> {
        let store: Arc<dyn DataStore> = match config.store_backend {
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| {
                        AppError::with_message(ErrorCode::ConfigError, "DATABASE_URL is not set")
                    })?;
                Arc::new(PgStore::connect(url).await?)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store, data is lost on restart");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Arc<dyn DataStore>) -> Self {
        let providers = Arc::new(ThemeProviders::new(
            store.clone(),
            config.event_channel_capacity,
            config.viewer_limits(),
        ));
        let storage = StorageClient::new(
            config.storage_base_url.clone(),
            config.storage_api_key.clone(),
            config.storage_bucket.clone(),
            config.signed_url_ttl,
        );

        Self {
            themes: Arc::new(ThemeAdmin::new(store.clone(), providers.clone())),
            orders: Arc::new(OrderManager::new(store.clone())),
            revenue: Arc::new(RevenueReports::new(store.clone())),
            settings: Arc::new(SiteSettings::new(store.clone(), providers.clone())),
            storage: Arc::new(storage),
            providers,
            store,
            config: Arc::new(config),
        }
    }
}
