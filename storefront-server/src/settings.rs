//! Site branding settings

use std::sync::Arc;

use chrono::Utc;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Branding, BrandingUpdate, FAVICON_URL_KEY, SITE_LOGO_KEY, SITE_LOGO_MAX_LEN,
    SITE_LOGO_URL_KEY, Setting,
};
use shared::util::non_blank;

use crate::db::DataStore;
use crate::error::{ServiceResult, degrade, persistence};
use crate::presentation::SiteEvent;
use crate::themes::ThemeProviders;

const BRANDING_KEYS: [&str; 3] = [SITE_LOGO_KEY, SITE_LOGO_URL_KEY, FAVICON_URL_KEY];

pub struct SiteSettings {
    store: Arc<dyn DataStore>,
    providers: Arc<ThemeProviders>,
}

impl SiteSettings {
    pub fn new(store: Arc<dyn DataStore>, providers: Arc<ThemeProviders>) -> Self {
        Self { store, providers }
    }

    /// Read failures degrade to the default branding
    pub async fn get_branding(&self) -> Branding {
        let mut branding = Branding::default();
        let Some(rows) = degrade("branding", self.store.get_settings(&BRANDING_KEYS).await) else {
            return branding;
        };
        for row in rows {
            match row.key.as_str() {
                SITE_LOGO_KEY => {
                    if let Some(logo) = non_blank(row.value) {
                        branding.site_logo = logo;
                    }
                }
                SITE_LOGO_URL_KEY => branding.site_logo_url = non_blank(row.value),
                FAVICON_URL_KEY => branding.favicon_url = non_blank(row.value),
                _ => {}
            }
        }
        branding
    }

    /// Upsert all three keys at once and tell every viewer
    pub async fn update_branding(&self, update: BrandingUpdate) -> ServiceResult<Branding> {
        let site_logo = update.site_logo.trim().to_string();
        if site_logo.chars().count() > SITE_LOGO_MAX_LEN {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("site_logo must be at most {SITE_LOGO_MAX_LEN} characters"),
            )
            .with_detail("field", "site_logo")
            .into());
        }

        let branding = Branding {
            site_logo,
            site_logo_url: non_blank(update.site_logo_url),
            favicon_url: non_blank(update.favicon_url),
        };

        let now = Utc::now();
        let rows = [
            (SITE_LOGO_KEY, Some(branding.site_logo.clone())),
            (SITE_LOGO_URL_KEY, branding.site_logo_url.clone()),
            (FAVICON_URL_KEY, branding.favicon_url.clone()),
        ]
        .map(|(key, value)| Setting {
            key: key.to_string(),
            value,
            updated_at: now,
        });
        self.store
            .upsert_settings(&rows)
            .await
            .map_err(persistence)?;

        tracing::info!(site_logo = %branding.site_logo, "Branding updated");
        self.providers.broadcast(SiteEvent::SiteLogoChanged);
        Ok(branding)
    }
}
