//! Site settings (key/value) and branding

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WEBSITE_THEME_KEY: &str = "default_website_theme";
pub const SITE_LOGO_KEY: &str = "site_logo";
pub const SITE_LOGO_URL_KEY: &str = "site_logo_url";
pub const FAVICON_URL_KEY: &str = "favicon_url";

pub const DEFAULT_SITE_LOGO: &str = "TBL";
pub const SITE_LOGO_MAX_LEN: usize = 50;

/// Setting row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Setting {
    pub key: String,
    pub value: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Site branding as shown by the storefront header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub site_logo: String,
    pub site_logo_url: Option<String>,
    pub favicon_url: Option<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            site_logo: DEFAULT_SITE_LOGO.to_string(),
            site_logo_url: None,
            favicon_url: None,
        }
    }
}

/// Update branding payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandingUpdate {
    pub site_logo: String,
    pub site_logo_url: Option<String>,
    pub favicon_url: Option<String>,
}
