//! Theme administration

use std::sync::Arc;

use chrono::Utc;
use shared::error::{AppError, ErrorCode};
use shared::models::{DEFAULT_WEBSITE_THEME_KEY, Setting, Theme, ThemeForm};
use shared::util::non_blank;
use uuid::Uuid;

use super::provider::ThemeProviders;
use super::resolver::ThemeResolver;
use crate::db::{DataStore, StoreError};
use crate::error::{ServiceError, ServiceResult, persistence};
use crate::presentation::{is_css_variable_name, is_css_variable_value};

pub struct ThemeAdmin {
    store: Arc<dyn DataStore>,
    providers: Arc<ThemeProviders>,
}

fn theme_not_found(id: Uuid) -> AppError {
    AppError::new(ErrorCode::ThemeNotFound).with_detail("id", id.to_string())
}

/// Map a failed theme write onto the admin-facing error
fn theme_write_error(e: StoreError) -> ServiceError {
    match e {
        StoreError::Conflict(_) => AppError::new(ErrorCode::ThemeSlugExists).into(),
        other => persistence(other),
    }
}

/// Name and slug are mandatory; checked before any store call
pub fn validate_form(mut form: ThemeForm) -> Result<ThemeForm, AppError> {
    form.name = form.name.trim().to_string();
    form.slug = form.slug.trim().to_string();
    if form.name.is_empty() {
        return Err(AppError::required("name"));
    }
    if form.slug.is_empty() {
        return Err(AppError::required("slug"));
    }
    form.description = non_blank(form.description);
    for (name, value) in &form.css_variables {
        if !is_css_variable_name(name) {
            return Err(AppError::validation(format!("Invalid CSS variable name '{name}'"))
                .with_detail("field", "css_variables")
                .with_detail("variable", name.as_str()));
        }
        if !is_css_variable_value(value) {
            return Err(AppError::validation(format!("Invalid value for CSS variable '{name}'"))
                .with_detail("field", "css_variables")
                .with_detail("variable", name.as_str()));
        }
    }
    Ok(form)
}

impl ThemeAdmin {
    pub fn new(store: Arc<dyn DataStore>, providers: Arc<ThemeProviders>) -> Self {
        Self { store, providers }
    }

    /// All themes by `sort_order`
    pub async fn list_themes(&self) -> ServiceResult<Vec<Theme>> {
        Ok(self.store.list_themes().await?)
    }

    pub async fn get_theme(&self, id: Uuid) -> ServiceResult<Theme> {
        self.store
            .find_theme(id)
            .await?
            .ok_or_else(|| theme_not_found(id).into())
    }

    pub async fn create_theme(&self, form: ThemeForm) -> ServiceResult<Theme> {
        let form = validate_form(form)?;
        let theme = Theme::from_form(Uuid::new_v4(), form, Utc::now());
        self.store
            .insert_theme(&theme)
            .await
            .map_err(theme_write_error)?;
        tracing::info!(theme_id = %theme.id, slug = %theme.slug, "Theme created");
        Ok(theme)
    }

    pub async fn update_theme(&self, id: Uuid, form: ThemeForm) -> ServiceResult<Theme> {
        let form = validate_form(form)?;
        let mut theme = self.get_theme(id).await?;
        theme.apply_form(form, Utc::now());
        self.store
            .update_theme(&theme)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => theme_not_found(id).into(),
                other => theme_write_error(other),
            })?;
        tracing::info!(theme_id = %id, slug = %theme.slug, "Theme updated");
        Ok(theme)
    }

    /// Flip `is_active`; returns the updated theme
    pub async fn toggle_active(&self, id: Uuid) -> ServiceResult<Theme> {
        let current = self.get_theme(id).await?;
        let theme = self
            .store
            .set_theme_active(id, !current.is_active, Utc::now())
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => theme_not_found(id).into(),
                other => persistence(other),
            })?;
        tracing::info!(theme_id = %id, is_active = theme.is_active, "Theme visibility toggled");
        Ok(theme)
    }

    pub async fn delete_theme(&self, id: Uuid) -> ServiceResult<()> {
        self.store.delete_theme(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => theme_not_found(id).into(),
            other => persistence(other),
        })?;
        tracing::info!(theme_id = %id, "Theme deleted");
        Ok(())
    }

    pub async fn get_default_theme_slug(&self) -> Option<String> {
        ThemeResolver::new(self.store.clone()).default_slug().await
    }

    /// Change the site default; `None` or blank clears it
    ///
    /// Anonymous viewers get the new default applied immediately.
    pub async fn set_default_theme_slug(&self, slug: Option<String>) -> ServiceResult<Option<String>> {
        let slug = non_blank(slug);
        if let Some(slug) = &slug
            && self.store.find_theme_by_slug(slug).await?.is_none()
        {
            return Err(AppError::with_message(
                ErrorCode::ThemeNotFound,
                format!("No theme with slug '{slug}'"),
            )
            .with_detail("slug", slug.as_str())
            .into());
        }

        let setting = Setting {
            key: DEFAULT_WEBSITE_THEME_KEY.to_string(),
            value: slug.clone(),
            updated_at: Utc::now(),
        };
        self.store
            .upsert_settings(std::slice::from_ref(&setting))
            .await
            .map_err(persistence)?;

        tracing::info!(slug = ?slug, "Default website theme changed");
        self.providers.refresh_anonymous().await;
        Ok(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_form_requires_name_and_slug() {
        let err = validate_form(ThemeForm {
            name: "   ".into(),
            slug: "dark".into(),
            ..ThemeForm::default()
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.details.unwrap().get("field").unwrap(), "name");

        let err = validate_form(ThemeForm {
            name: "Dark".into(),
            slug: "".into(),
            ..ThemeForm::default()
        })
        .unwrap_err();
        assert_eq!(err.details.unwrap().get("field").unwrap(), "slug");
    }

    #[test]
    fn test_validate_form_trims() {
        let form = validate_form(ThemeForm {
            name: " Dark ".into(),
            slug: " dark ".into(),
            description: Some("  ".into()),
            ..ThemeForm::default()
        })
        .unwrap();
        assert_eq!(form.name, "Dark");
        assert_eq!(form.slug, "dark");
        assert!(form.description.is_none());
    }

    #[test]
    fn test_validate_form_rejects_unsafe_css_variables() {
        let mut form = ThemeForm {
            name: "Dark".into(),
            slug: "dark".into(),
            ..ThemeForm::default()
        };
        form.css_variables
            .insert("--color-background".into(), "#000;} body { display: none".into());
        let err = validate_form(form.clone()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "css_variables");
        assert_eq!(details.get("variable").unwrap(), "--color-background");

        form.css_variables.insert("--color-background".into(), "#000".into());
        form.css_variables.insert("color".into(), "red".into());
        let err = validate_form(form).unwrap_err();
        assert_eq!(err.details.unwrap().get("variable").unwrap(), "color");
    }

    #[test]
    fn test_validate_form_accepts_defaults() {
        let form = validate_form(ThemeForm {
            name: "Dark".into(),
            slug: "dark".into(),
            ..ThemeForm::default()
        })
        .unwrap();
        assert_eq!(form.css_variables.len(), ThemeForm::default().css_variables.len());
    }
}
