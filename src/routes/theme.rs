use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_valid::Valid;
use validator::Validate;

use crate::{
    dto::{
        contrast::{ContrastRequest, ContrastResponse},
        theme::{RefreshRequest, SetLogoRequest, ThemeRunResponse, ThemeSnapshotResponse},
    },
    error::AppError,
    services::theme_service,
    state::SharedState,
};

/// Routes driving theme generation and exposing its result.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/theme", get(get_theme))
        .route("/theme/logo", put(set_logo))
        .route("/theme/refresh", post(refresh_theme))
        .route("/theme/css", get(get_stylesheet))
        .route("/theme/contrast", post(check_contrast))
}

/// Current phase, published variables and latest error.
#[utoipa::path(
    get,
    path = "/theme",
    tag = "theme",
    responses((status = 200, description = "Current theme state", body = ThemeSnapshotResponse))
)]
pub async fn get_theme(State(state): State<SharedState>) -> Json<ThemeSnapshotResponse> {
    Json(theme_service::get_theme(&state).await)
}

/// Point the theme at a logo. A run starts only when the logo changed.
#[utoipa::path(
    put,
    path = "/theme/logo",
    tag = "theme",
    request_body = SetLogoRequest,
    responses(
        (status = 202, description = "Run started", body = ThemeRunResponse),
        (status = 200, description = "Logo unchanged or empty; nothing started", body = ThemeRunResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn set_logo(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SetLogoRequest>>,
) -> impl IntoResponse {
    let response = theme_service::set_logo(&state, payload).await;
    let status = if response.started {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };
    (status, Json(response))
}

/// Re-run extraction for the latest logo; the retry path after a failure.
#[utoipa::path(
    post,
    path = "/theme/refresh",
    tag = "theme",
    request_body = RefreshRequest,
    responses(
        (status = 202, description = "Run started", body = ThemeRunResponse),
        (status = 409, description = "No logo has been set")
    )
)]
pub async fn refresh_theme(
    State(state): State<SharedState>,
    payload: Option<Json<RefreshRequest>>,
) -> Result<(StatusCode, Json<ThemeRunResponse>), AppError> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    request.validate()?;
    let response = theme_service::refresh(&state, request).await?;
    Ok((StatusCode::ACCEPTED, Json(response)))
}

/// Published variables as a `:root` stylesheet.
#[utoipa::path(
    get,
    path = "/theme/css",
    tag = "theme",
    responses(
        (status = 200, description = "Stylesheet", content_type = "text/css", body = String),
        (status = 404, description = "Nothing published yet")
    )
)]
pub async fn get_stylesheet(State(state): State<SharedState>) -> Result<impl IntoResponse, AppError> {
    let css = theme_service::stylesheet(&state).await?;
    Ok(([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css))
}

/// Return a foreground reaching the minimum contrast against a background.
#[utoipa::path(
    post,
    path = "/theme/contrast",
    tag = "theme",
    request_body = ContrastRequest,
    responses(
        (status = 200, description = "Adjusted foreground", body = ContrastResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn check_contrast(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<ContrastRequest>>,
) -> Json<ContrastResponse> {
    Json(theme_service::check_contrast(&state, payload))
}
