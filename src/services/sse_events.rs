use serde::Serialize;
use tracing::warn;

use crate::{
    dto::sse::{ServerEvent, ThemeAppliedEvent, ThemeErrorEvent, ThemeLoadingEvent},
    state::{SseHub, root::PublishedTheme, theme_machine::RunToken},
};

/// Event name emitted when a run starts.
pub const EVENT_THEME_LOADING: &str = "theme.loading";
/// Event name emitted when a run publishes.
pub const EVENT_THEME_APPLIED: &str = "theme.applied";
/// Event name emitted when the latest run fails.
pub const EVENT_THEME_ERROR: &str = "theme.error";

/// Broadcast that a run started for `logo_url`.
pub fn broadcast_theme_loading(hub: &SseHub, run: RunToken, logo_url: &str) {
    let payload = ThemeLoadingEvent {
        run,
        logo_url: logo_url.to_string(),
    };
    send_event(hub, EVENT_THEME_LOADING, &payload);
}

/// Broadcast a freshly published theme.
pub fn broadcast_theme_applied(hub: &SseHub, published: &PublishedTheme) {
    send_event(hub, EVENT_THEME_APPLIED, &ThemeAppliedEvent::from(published));
}

/// Broadcast that the latest run failed.
pub fn broadcast_theme_error(hub: &SseHub, run: RunToken, message: &str) {
    let payload = ThemeErrorEvent {
        run,
        message: message.to_string(),
    };
    send_event(hub, EVENT_THEME_ERROR, &payload);
}

fn send_event(hub: &SseHub, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => hub.broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize theme SSE payload"),
    }
}
