//! Change notifications
//!
//! ```text
//! ThemeProvider / settings ──▶ publish() ──▶ broadcast::Sender<SiteEvent>
//!                                                   │
//!                                   ┌───────────────┼───────────────┐
//!                                   ▼               ▼               ▼
//!                               SSE stream      SSE stream        tests
//! ```
//!
//! Publishing never blocks: a subscriber that falls behind sees `Lagged`
//! and skips ahead.

use serde::Serialize;
use tokio::sync::broadcast;

/// Payload-less site notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteEvent {
    ThemeChanged,
    SiteLogoChanged,
}

impl SiteEvent {
    /// Event name on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Self::ThemeChanged => "theme-changed",
            Self::SiteLogoChanged => "site-logo-changed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SiteEvent>,
}

impl EventBus {
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish to every current subscriber; no subscribers is not an error
    pub fn publish(&self, event: SiteEvent) {
        match self.tx.send(event) {
            Ok(n) => tracing::debug!(event = event.name(), subscribers = n, "Event published"),
            Err(_) => tracing::trace!(event = event.name(), "Event dropped, no subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
