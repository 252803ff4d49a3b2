use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Adaptive Theme Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::theme::get_theme,
        crate::routes::theme::set_logo,
        crate::routes::theme::refresh_theme,
        crate::routes::theme::get_stylesheet,
        crate::routes::theme::check_contrast,
        crate::routes::features::get_features,
        crate::routes::sse::theme_stream,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::theme::SetLogoRequest,
            crate::dto::theme::RefreshRequest,
            crate::dto::theme::ThemeRunResponse,
            crate::dto::theme::ThemeSnapshotResponse,
            crate::dto::contrast::ContrastRequest,
            crate::dto::contrast::ContrastResponse,
            crate::dto::features::FeaturesResponse,
            crate::dto::sse::Handshake,
            crate::dto::sse::ThemeLoadingEvent,
            crate::dto::sse::ThemeAppliedEvent,
            crate::dto::sse::ThemeErrorEvent,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "theme", description = "Logo-driven theme generation"),
        (name = "features", description = "Company feature flags"),
        (name = "sse", description = "Server-sent events streams"),
    )
)]
pub struct ApiDoc;
