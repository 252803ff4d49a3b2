use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::features::FeaturesResponse, error::AppError, services::feature_service,
    state::SharedState,
};

/// Routes exposing company feature flags.
pub fn router() -> Router<SharedState> {
    Router::new().route("/companies/{id}/features", get(get_features))
}

/// Feature flags of a company merged over the configured defaults.
#[utoipa::path(
    get,
    path = "/companies/{id}/features",
    tag = "features",
    params(("id" = String, Path, description = "Identifier of the company")),
    responses(
        (status = 200, description = "Merged feature flags", body = FeaturesResponse),
        (status = 404, description = "Unknown company"),
        (status = 503, description = "Profile store unavailable or not configured")
    )
)]
pub async fn get_features(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<FeaturesResponse>, AppError> {
    Ok(Json(feature_service::get_features(&state, &id).await?))
}
