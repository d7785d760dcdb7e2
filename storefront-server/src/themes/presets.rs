//! Built-in theme presets
//!
//! Applying a preset to a form is a local transform; nothing is persisted
//! until the form is saved.

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{CssVariables, PRIMARY_COLOR_VAR, ThemeCategory, ThemeForm};

const FONT_FAMILY_BASE: &str = "system-ui, -apple-system, sans-serif";
const BORDER_RADIUS_BASE: &str = "0.5rem";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreset {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ThemeCategory,
    pub is_seasonal: bool,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub text_body: &'static str,
}

impl ThemePreset {
    pub fn css_variables(&self) -> CssVariables {
        [
            (PRIMARY_COLOR_VAR, self.primary),
            ("--color-secondary", self.secondary),
            ("--color-background", self.background),
            ("--color-text-body", self.text_body),
            ("--font-family-base", FONT_FAMILY_BASE),
            ("--border-radius-base", BORDER_RADIUS_BASE),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }
}

pub const PRESETS: &[ThemePreset] = &[
    ThemePreset {
        key: "tet_lunar_new_year",
        name: "Tết Nguyên Đán",
        description: "Giao diện lễ Tết Nguyên Đán với màu đỏ và vàng",
        category: ThemeCategory::Seasonal,
        is_seasonal: true,
        primary: "#DC2626",
        secondary: "#FBBF24",
        background: "#FEF3C7",
        text_body: "#78350F",
    },
    ThemePreset {
        key: "noel_christmas",
        name: "Giáng Sinh",
        description: "Giao diện Giáng Sinh với màu đỏ và xanh lục",
        category: ThemeCategory::Seasonal,
        is_seasonal: true,
        primary: "#DC2626",
        secondary: "#15803D",
        background: "#F0F9FF",
        text_body: "#166534",
    },
    ThemePreset {
        key: "spring_season",
        name: "Mùa Xuân",
        description: "Giao diện Mùa Xuân tươi tắn",
        category: ThemeCategory::Seasonal,
        is_seasonal: true,
        primary: "#10B981",
        secondary: "#EC4899",
        background: "#F0FDF4",
        text_body: "#065F46",
    },
    ThemePreset {
        key: "summer_season",
        name: "Mùa Hè",
        description: "Giao diện Mùa Hè sáng sủa",
        category: ThemeCategory::Seasonal,
        is_seasonal: true,
        primary: "#F59E0B",
        secondary: "#06B6D4",
        background: "#FEFCE8",
        text_body: "#78350F",
    },
    ThemePreset {
        key: "autumn_season",
        name: "Mùa Thu",
        description: "Giao diện Mùa Thu ấm áp",
        category: ThemeCategory::Seasonal,
        is_seasonal: true,
        primary: "#EA580C",
        secondary: "#92400E",
        background: "#FEF3C7",
        text_body: "#78350F",
    },
    ThemePreset {
        key: "winter_season",
        name: "Mùa Đông",
        description: "Giao diện Mùa Đông lạnh lẽo",
        category: ThemeCategory::Seasonal,
        is_seasonal: true,
        primary: "#0369A1",
        secondary: "#6366F1",
        background: "#F0F9FF",
        text_body: "#0C2340",
    },
    ThemePreset {
        key: "green_white",
        name: "Xanh lá - Trắng",
        description: "Giao diện tinh tế với xanh lá cây và trắng",
        category: ThemeCategory::Custom,
        is_seasonal: false,
        primary: "#059669",
        secondary: "#10B981",
        background: "#F9FAFB",
        text_body: "#0F766E",
    },
];

pub fn find_preset(key: &str) -> Option<&'static ThemePreset> {
    PRESETS.iter().find(|p| p.key == key)
}

/// Overwrite the preset-owned fields of `form`; `is_active` and `sort_order` are kept
pub fn apply_preset(form: ThemeForm, key: &str) -> Result<ThemeForm, AppError> {
    let preset = find_preset(key).ok_or_else(|| {
        AppError::with_message(ErrorCode::PresetNotFound, format!("Unknown preset '{key}'"))
            .with_detail("key", key)
    })?;

    Ok(ThemeForm {
        name: preset.name.to_string(),
        slug: preset.key.to_string(),
        description: Some(preset.description.to_string()),
        category: preset.category,
        primary_color: preset.primary.to_string(),
        css_variables: preset.css_variables(),
        is_seasonal: preset.is_seasonal,
        ..form
    })
}

/// Edit one CSS variable; `--color-primary` also drives `primary_color`
pub fn set_css_variable(form: &mut ThemeForm, key: &str, value: &str) {
    form.css_variables.insert(key.to_string(), value.to_string());
    if key == PRIMARY_COLOR_VAR {
        form.primary_color = value.to_string();
    }
}

/// Preset listing entry
#[derive(Debug, Clone, Serialize)]
pub struct PresetSummary {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ThemeCategory,
    pub is_seasonal: bool,
    pub primary_color: &'static str,
}

impl From<&ThemePreset> for PresetSummary {
    fn from(p: &ThemePreset) -> Self {
        Self {
            key: p.key,
            name: p.name,
            description: p.description,
            category: p.category,
            is_seasonal: p.is_seasonal,
            primary_color: p.primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keys() {
        let keys: Vec<&str> = PRESETS.iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            [
                "tet_lunar_new_year",
                "noel_christmas",
                "spring_season",
                "summer_season",
                "autumn_season",
                "winter_season",
                "green_white",
            ]
        );
        for preset in PRESETS {
            let vars = preset.css_variables();
            assert_eq!(vars.len(), 6);
            assert_eq!(vars.get(PRIMARY_COLOR_VAR).map(String::as_str), Some(preset.primary));
        }
    }

    #[test]
    fn test_apply_preset_preserves_activity_and_order() {
        let form = ThemeForm {
            name: "Mine".into(),
            slug: "mine".into(),
            is_active: false,
            sort_order: 7,
            ..ThemeForm::default()
        };
        let form = apply_preset(form, "tet_lunar_new_year").unwrap();

        assert_eq!(form.slug, "tet_lunar_new_year");
        assert_eq!(form.name, "Tết Nguyên Đán");
        assert_eq!(form.category, ThemeCategory::Seasonal);
        assert_eq!(form.primary_color, "#DC2626");
        assert!(form.is_seasonal);
        assert!(!form.is_active);
        assert_eq!(form.sort_order, 7);
        assert_eq!(
            form.css_variables.get("--color-secondary").map(String::as_str),
            Some("#FBBF24")
        );
    }

    #[test]
    fn test_apply_green_white_is_not_seasonal() {
        let form = apply_preset(ThemeForm::default(), "green_white").unwrap();
        assert_eq!(form.category, ThemeCategory::Custom);
        assert!(!form.is_seasonal);
    }

    #[test]
    fn test_unknown_preset() {
        let err = apply_preset(ThemeForm::default(), "halloween").unwrap_err();
        assert_eq!(err.code, ErrorCode::PresetNotFound);
    }

    #[test]
    fn test_set_css_variable_syncs_primary_color() {
        let mut form = ThemeForm::default();
        set_css_variable(&mut form, "--color-primary", "#111111");
        assert_eq!(form.primary_color, "#111111");

        set_css_variable(&mut form, "--color-secondary", "#222222");
        assert_eq!(form.primary_color, "#111111");
        assert_eq!(
            form.css_variables.get("--color-secondary").map(String::as_str),
            Some("#222222")
        );
    }
}
