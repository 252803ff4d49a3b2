use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with the health payload, logging why the service is degraded.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let phase = state.theme().phase().await;

    if state.is_degraded().await {
        warn!(
            theme = phase.as_str(),
            persistence_degraded = state.theme().is_persistence_degraded(),
            "health check reports degraded mode"
        );
        HealthResponse::degraded(phase.as_str())
    } else {
        HealthResponse::ok(phase.as_str())
    }
}
