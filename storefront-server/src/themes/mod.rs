//! Themes: resolution, per-viewer application and administration

pub mod admin;
pub mod presets;
pub mod provider;
pub mod resolver;
pub mod slug;

pub use admin::ThemeAdmin;
pub use provider::{ThemeProvider, ThemeProviders, ViewerLimits};
pub use resolver::ThemeResolver;
