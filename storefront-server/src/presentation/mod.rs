//! Presentation state owner
//!
//! One [`Presentation`] per viewer holds what a browser document would:
//! the root element's CSS custom properties and `data-theme` attribute, plus
//! client-local storage. Writes are serialized by a lock (last write wins)
//! and every theme application publishes [`SiteEvent::ThemeChanged`].

pub mod bus;

pub use bus::{EventBus, SiteEvent};

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use shared::models::{CssVariables, Theme};

/// Client-local storage key holding the last applied slug
pub const CURRENT_THEME_SLUG_KEY: &str = "current_theme_slug";

/// Root element styling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RootStyle {
    pub data_theme: Option<String>,
    pub variables: CssVariables,
}

impl RootStyle {
    /// Render as a stylesheet scoped to the root element
    pub fn to_css(&self) -> String {
        let selector = match &self.data_theme {
            Some(slug) => format!(":root[data-theme=\"{}\"]", escape_attr(slug)),
            None => ":root".to_string(),
        };
        let mut css = format!("{selector} {{\n");
        for (name, value) in &self.variables {
            if !is_css_variable_name(name) || !is_css_variable_value(value) {
                tracing::warn!(variable = %name, "Skipping unsafe CSS variable");
                continue;
            }
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }
}

/// Custom property name: `--` then ASCII letters, digits, `-` or `_`
pub fn is_css_variable_name(name: &str) -> bool {
    name.strip_prefix("--").is_some_and(|rest| {
        !rest.is_empty()
            && rest
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

/// A value must stay inside its declaration
pub fn is_css_variable_value(value: &str) -> bool {
    !value
        .chars()
        .any(|c| matches!(c, '{' | '}' | ';' | '<' | '>' | '\\') || c.is_control())
}

fn escape_attr(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Snapshot returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct PresentationSnapshot {
    pub theme: Option<Theme>,
    pub root: RootStyle,
}

#[derive(Default)]
struct PresentationState {
    applied: Option<Theme>,
    root: RootStyle,
    local_storage: HashMap<String, String>,
}

pub struct Presentation {
    state: RwLock<PresentationState>,
    bus: EventBus,
}

impl Presentation {
    pub fn new(bus: EventBus) -> Self {
        Self {
            state: RwLock::new(PresentationState::default()),
            bus,
        }
    }

    /// Apply a theme to the root
    ///
    /// Variables of the previous theme that `theme` does not define are
    /// removed; the slug lands in local storage and in `data-theme`.
    pub fn apply(&self, theme: &Theme) {
        {
            let mut state = self.state.write();
            state
                .root
                .variables
                .retain(|name, _| theme.css_variables.contains_key(name));
            for (name, value) in &theme.css_variables {
                state.root.variables.insert(name.clone(), value.clone());
            }
            state.root.data_theme = Some(theme.slug.clone());
            state
                .local_storage
                .insert(CURRENT_THEME_SLUG_KEY.to_string(), theme.slug.clone());
            state.applied = Some(theme.clone());
        }
        tracing::debug!(slug = %theme.slug, "Theme applied");
        self.bus.publish(SiteEvent::ThemeChanged);
    }

    pub fn local_item(&self, key: &str) -> Option<String> {
        self.state.read().local_storage.get(key).cloned()
    }

    pub fn snapshot(&self) -> PresentationSnapshot {
        let state = self.state.read();
        PresentationSnapshot {
            theme: state.applied.clone(),
            root: state.root.clone(),
        }
    }

    pub fn root(&self) -> RootStyle {
        self.state.read().root.clone()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}
