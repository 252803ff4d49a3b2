//! Service helpers bridging the HTTP layer and the theme controller.

use crate::{
    dto::{
        contrast::{ContrastRequest, ContrastResponse},
        theme::{RefreshRequest, SetLogoRequest, ThemeRunResponse, ThemeSnapshotResponse},
    },
    error::ServiceError,
    services::theme_controller::RunHandle,
    state::SharedState,
    theme::contrast::ensure_contrast_hex,
};

/// Return the current theme state.
pub async fn get_theme(state: &SharedState) -> ThemeSnapshotResponse {
    state.theme().snapshot().await.into()
}

/// Point the theme at a new logo, starting a run when the logo changed.
pub async fn set_logo(state: &SharedState, request: SetLogoRequest) -> ThemeRunResponse {
    let handle = state
        .theme()
        .set_logo(request.logo_url.as_deref(), request.options())
        .await;
    run_response(state, handle).await
}

/// Re-run extraction for the latest logo.
pub async fn refresh(
    state: &SharedState,
    request: RefreshRequest,
) -> Result<ThemeRunResponse, ServiceError> {
    let handle = state
        .theme()
        .refresh(request.into())
        .await
        .ok_or_else(|| ServiceError::InvalidState("no logo has been set".into()))?;
    Ok(run_response(state, Some(handle)).await)
}

/// Render the published theme as a `:root` stylesheet.
pub async fn stylesheet(state: &SharedState) -> Result<String, ServiceError> {
    state
        .theme()
        .published()
        .await
        .map(|variables| variables.to_css())
        .ok_or_else(|| ServiceError::NotFound("no theme has been published".into()))
}

/// Enforce the minimum contrast on an arbitrary color pair.
pub fn check_contrast(state: &SharedState, request: ContrastRequest) -> ContrastResponse {
    let min_ratio = request
        .min_ratio
        .unwrap_or_else(|| state.config().min_contrast_ratio());
    let check = ensure_contrast_hex(&request.background, &request.foreground, min_ratio);
    ContrastResponse::new(check, min_ratio)
}

async fn run_response(state: &SharedState, handle: Option<RunHandle>) -> ThemeRunResponse {
    let phase = state.theme().phase().await;
    ThemeRunResponse {
        started: handle.is_some(),
        run: handle.map(|handle| handle.token()),
        status: phase.as_str().to_string(),
    }
}
