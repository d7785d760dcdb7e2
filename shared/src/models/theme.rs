//! Theme Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// CSS custom property name → value
pub type CssVariables = BTreeMap<String, String>;

/// Slug of the theme used when neither a preference nor a site default resolves
pub const FALLBACK_THEME_SLUG: &str = "light";

/// CSS variable that mirrors `primary_color`
pub const PRIMARY_COLOR_VAR: &str = "--color-primary";

pub const DEFAULT_PRIMARY_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "theme_category", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCategory {
    Default,
    Seasonal,
    Minimal,
    Corporate,
    #[default]
    Custom,
}

/// Theme entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Theme {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub category: ThemeCategory,
    pub primary_color: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub css_variables: CssVariables,
    pub is_active: bool,
    pub is_seasonal: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Theme {
    /// Materialize a form into a theme row
    pub fn from_form(id: Uuid, form: ThemeForm, now: DateTime<Utc>) -> Self {
        Self {
            id,
            slug: form.slug,
            name: form.name,
            description: form.description,
            category: form.category,
            primary_color: form.primary_color,
            css_variables: form.css_variables,
            is_active: form.is_active,
            is_seasonal: form.is_seasonal,
            sort_order: form.sort_order,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite editable fields, keeping id and creation time
    pub fn apply_form(&mut self, form: ThemeForm, now: DateTime<Utc>) {
        self.slug = form.slug;
        self.name = form.name;
        self.description = form.description;
        self.category = form.category;
        self.primary_color = form.primary_color;
        self.css_variables = form.css_variables;
        self.is_active = form.is_active;
        self.is_seasonal = form.is_seasonal;
        self.sort_order = form.sort_order;
        self.updated_at = now;
    }
}

/// Create / update theme payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeForm {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: ThemeCategory,
    pub primary_color: String,
    pub css_variables: CssVariables,
    pub is_active: bool,
    pub is_seasonal: bool,
    pub sort_order: i32,
}

impl Default for ThemeForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            description: None,
            category: ThemeCategory::Custom,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            css_variables: default_css_variables(),
            is_active: true,
            is_seasonal: false,
            sort_order: 0,
        }
    }
}

impl From<&Theme> for ThemeForm {
    fn from(theme: &Theme) -> Self {
        Self {
            name: theme.name.clone(),
            slug: theme.slug.clone(),
            description: theme.description.clone(),
            category: theme.category,
            primary_color: theme.primary_color.clone(),
            css_variables: theme.css_variables.clone(),
            is_active: theme.is_active,
            is_seasonal: theme.is_seasonal,
            sort_order: theme.sort_order,
        }
    }
}

/// The six variables every theme form starts with
pub fn default_css_variables() -> CssVariables {
    [
        (PRIMARY_COLOR_VAR, DEFAULT_PRIMARY_COLOR),
        ("--color-secondary", "#10B981"),
        ("--color-background", "#FFFFFF"),
        ("--color-text-body", "#000000"),
        ("--font-family-base", "system-ui, -apple-system, sans-serif"),
        ("--border-radius-base", "0.5rem"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Per-user theme selection (at most one per user)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserThemePreference {
    pub user_id: Uuid,
    pub theme_id: Uuid,
    pub updated_at: DateTime<Utc>,
}

/// `PUT /api/themes/current` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectThemeRequest {
    pub theme_id: Uuid,
}

/// `PUT /api/admin/settings/default-theme` payload and response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultThemeSetting {
    pub slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form() {
        let form = ThemeForm::default();
        assert_eq!(form.category, ThemeCategory::Custom);
        assert_eq!(form.primary_color, "#3B82F6");
        assert!(form.is_active);
        assert_eq!(form.css_variables.len(), 6);
        assert_eq!(
            form.css_variables.get("--border-radius-base").map(String::as_str),
            Some("0.5rem")
        );
    }

    #[test]
    fn test_form_deserialize_fills_defaults() {
        let form: ThemeForm =
            serde_json::from_str(r#"{"name":"Dark","slug":"dark","category":"minimal"}"#).unwrap();
        assert_eq!(form.category, ThemeCategory::Minimal);
        assert_eq!(form.css_variables.len(), 6);
        assert!(form.is_active);
    }

    #[test]
    fn test_apply_form_keeps_identity() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut theme = Theme::from_form(id, ThemeForm::default(), now);
        let form = ThemeForm {
            name: "Renamed".into(),
            slug: "renamed".into(),
            ..ThemeForm::default()
        };
        theme.apply_form(form, now + chrono::Duration::seconds(5));
        assert_eq!(theme.id, id);
        assert_eq!(theme.created_at, now);
        assert_eq!(theme.slug, "renamed");
        assert!(theme.updated_at > theme.created_at);
    }
}
