use serde::Serialize;
use utoipa::ToSchema;

use crate::{dto::format_timestamp, state::root::PublishedTheme, theme::builder::ThemeVariableSet};

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    /// Event name, `None` for unnamed `message` events.
    pub event: Option<String>,
    /// Serialized payload.
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an SSE client when it connects.
pub struct Handshake {
    /// Identifier of the SSE stream.
    pub stream: String,
    /// Human-readable message confirming the subscription.
    pub message: String,
    /// Phase of the theme when the client connected.
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a run starts extracting colors.
pub struct ThemeLoadingEvent {
    /// Run token.
    pub run: u64,
    /// Logo being analysed.
    pub logo_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a run publishes a new variable set.
pub struct ThemeAppliedEvent {
    /// Run token.
    pub run: u64,
    /// Published variables, name to `H S% L%` triplet.
    #[schema(value_type = Object)]
    pub theme_variables: ThemeVariableSet,
    /// RFC 3339 publication time.
    pub applied_at: String,
}

impl From<&PublishedTheme> for ThemeAppliedEvent {
    fn from(published: &PublishedTheme) -> Self {
        Self {
            run: published.token,
            theme_variables: published.variables.clone(),
            applied_at: format_timestamp(published.applied_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the latest run failed.
pub struct ThemeErrorEvent {
    /// Run token.
    pub run: u64,
    /// User-facing message.
    pub message: String,
}
