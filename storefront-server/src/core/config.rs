//! Storefront server configuration
//!
//! | Variable | Default | Notes |
//! |----------|---------|-------|
//! | DATABASE_URL | - | required unless `STORE_BACKEND=memory` |
//! | STORE_BACKEND | postgres | `postgres` or `memory` |
//! | HTTP_PORT | 8080 | |
//! | ENVIRONMENT | development | development, staging or production |
//! | LOG_LEVEL | info | overridden by `RUST_LOG` |
//! | LOG_JSON | false | |
//! | LOG_DIR | - | unset means console only |
//! | STORAGE_BASE_URL | http://localhost:54321 | |
//! | STORAGE_API_KEY | - | required outside development |
//! | STORAGE_BUCKET | project-images | |
//! | SIGNED_URL_TTL_SECS | 60 | |
//! | REQUEST_TIMEOUT_MS | 30000 | |
//! | EVENT_CHANNEL_CAPACITY | 64 | per viewer |
//! | VIEWER_CAPACITY | 10000 | viewer map size that triggers eviction |
//! | VIEWER_IDLE_TTL_SECS | 1800 | |

use std::str::FromStr;
use std::time::Duration;

use crate::themes::ViewerLimits;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// In-process tables, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown STORE_BACKEND '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub storage_base_url: String,
    pub storage_api_key: Option<String>,
    pub storage_bucket: String,
    pub signed_url_ttl: Duration,
    pub request_timeout: Duration,
    pub event_channel_capacity: usize,
    pub viewer_capacity: usize,
    pub viewer_idle_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            database_url: None,
            http_port: 8080,
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            storage_base_url: "http://localhost:54321".into(),
            storage_api_key: None,
            storage_bucket: "project-images".into(),
            signed_url_ttl: Duration::from_secs(60),
            request_timeout: Duration::from_millis(30_000),
            event_channel_capacity: 64,
            viewer_capacity: 10_000,
            viewer_idle_ttl: Duration::from_secs(1800),
        }
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    env_opt(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<Option<String>, BoxError> {
        match env_opt(name) {
            Some(v) => Ok(Some(v)),
            None if environment != "development" => {
                Err(format!("{name} must be set in {environment} environment").into())
            }
            None => Ok(None),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = env_opt("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let store_backend = match env_opt("STORE_BACKEND") {
            Some(v) => v.parse::<StoreBackend>()?,
            None => StoreBackend::Postgres,
        };
        let database_url = env_opt("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err("DATABASE_URL must be set".into());
        }

        Ok(Self {
            store_backend,
            database_url,
            http_port: env_parse("HTTP_PORT", 8080),
            log_level: env_opt("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: env_parse("LOG_JSON", false),
            log_dir: env_opt("LOG_DIR"),
            storage_base_url: env_opt("STORAGE_BASE_URL")
                .unwrap_or_else(|| "http://localhost:54321".into()),
            storage_api_key: Self::require_secret("STORAGE_API_KEY", &environment)?,
            storage_bucket: env_opt("STORAGE_BUCKET").unwrap_or_else(|| "project-images".into()),
            signed_url_ttl: Duration::from_secs(env_parse("SIGNED_URL_TTL_SECS", 60)),
            request_timeout: Duration::from_millis(env_parse("REQUEST_TIMEOUT_MS", 30_000)),
            event_channel_capacity: env_parse("EVENT_CHANNEL_CAPACITY", 64usize).max(1),
            viewer_capacity: env_parse("VIEWER_CAPACITY", 10_000usize).max(1),
            viewer_idle_ttl: Duration::from_secs(env_parse("VIEWER_IDLE_TTL_SECS", 1800)),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn viewer_limits(&self) -> ViewerLimits {
        ViewerLimits {
            capacity: self.viewer_capacity,
            idle_ttl: self.viewer_idle_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert_eq!(" Postgres ".parse::<StoreBackend>(), Ok(StoreBackend::Postgres));
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_default_is_development_memory() {
        let config = Config::default();
        assert!(config.is_development());
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.storage_bucket, "project-images");
        assert_eq!(config.signed_url_ttl, Duration::from_secs(60));
    }
}
