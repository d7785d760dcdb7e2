//! Server-sent site events
//!
//! `GET /api/events` streams `theme-changed` and `site-logo-changed` for the
//! requesting viewer. Events carry no payload; clients re-fetch what they
//! need. A subscriber that falls behind skips the missed events.

use std::convert::Infallible;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::Stream;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::api::Viewer;
use crate::core::ServerState;
use crate::presentation::SiteEvent;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/events", get(stream_events))
}

/// GET /api/events
pub async fn stream_events(
    State(state): State<ServerState>,
    Viewer(viewer): Viewer,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.providers.get(viewer).subscribe();
    tracing::debug!(viewer = ?viewer, "Event stream opened");
    Sse::new(event_stream(receiver)).keep_alive(KeepAlive::default())
}

fn event_stream(
    receiver: broadcast::Receiver<SiteEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    futures::stream::unfold(receiver, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let sse = Event::default().event(event.name()).data("");
                    return Some((Ok(sse), rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event stream lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::EventBus;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_stream_yields_published_events() {
        let bus = EventBus::with_capacity(8);
        let stream = event_stream(bus.subscribe());
        bus.publish(SiteEvent::ThemeChanged);
        bus.publish(SiteEvent::SiteLogoChanged);
        drop(bus);

        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn test_lagged_stream_keeps_going() {
        let bus = EventBus::with_capacity(1);
        let stream = event_stream(bus.subscribe());
        bus.publish(SiteEvent::ThemeChanged);
        bus.publish(SiteEvent::SiteLogoChanged);
        drop(bus);

        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 1);
    }
}
