/// OpenAPI documentation generation.
pub mod documentation;
/// Company feature flag lookups.
pub mod feature_service;
/// Health check service.
pub mod health_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events streaming service.
pub mod sse_service;
/// Single writer of the published theme.
pub mod theme_controller;
/// HTTP-facing theme operations.
pub mod theme_service;
