use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Phase of the theme controller.
    pub theme: String,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(theme: &str) -> Self {
        Self {
            status: "ok".to_string(),
            theme: theme.to_string(),
        }
    }

    /// Create a health response indicating the system is in degraded mode.
    pub fn degraded(theme: &str) -> Self {
        Self {
            status: "degraded".to_string(),
            theme: theme.to_string(),
        }
    }
}
