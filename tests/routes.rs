use std::sync::Arc;

use adaptive_theme_back::{
    config::AppConfig,
    extractor::{ExtractionResult, PaletteExtractor},
    routes,
    services::theme_controller::{RunOutcome, ThemeOptions},
    state::{AppState, SharedState},
    theme::{ColorValue, Palette, SwatchName},
};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use futures::future::{self, BoxFuture};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Resolves immediately for `ready.png`, never for anything else.
struct StubExtractor;

impl PaletteExtractor for StubExtractor {
    fn extract(&self, image_url: &str) -> BoxFuture<'static, ExtractionResult<Palette>> {
        if image_url.ends_with("ready.png") {
            let palette = Palette::from_colors([(SwatchName::Vibrant, ColorValue::new(255, 0, 0))]);
            Box::pin(future::ready(Ok(palette)))
        } else {
            Box::pin(future::pending())
        }
    }
}

fn test_state() -> SharedState {
    AppState::new(AppConfig::default(), Arc::new(StubExtractor), None)
}

fn app(state: &SharedState) -> Router {
    routes::router(state.clone())
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(state: &SharedState, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn send_json(state: &SharedState, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(state, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn healthcheck_reports_idle_theme() {
    let state = test_state();
    let (status, body) = send_json(&state, get("/healthcheck")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "theme": "idle" }));
}

#[tokio::test]
async fn idle_theme_has_nothing_published() {
    let state = test_state();
    let (status, body) = send_json(&state, get("/theme")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["run"], 0);
    assert_eq!(body["loading"], false);
    assert!(body["theme_variables"].is_null());

    let (status, _) = send(&state, get("/theme/css")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn changed_logo_starts_a_run_once() {
    let state = test_state();
    let payload = json!({ "logo_url": "https://cdn.example.com/slow.png" });

    let (status, body) = send_json(&state, json_request("PUT", "/theme/logo", payload.clone())).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({ "started": true, "run": 1, "status": "loading" }));

    let (status, body) = send_json(&state, json_request("PUT", "/theme/logo", payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["started"], false);
    assert!(body["run"].is_null());
}

#[tokio::test]
async fn empty_logo_is_accepted_without_a_run() {
    let state = test_state();
    let (status, body) =
        send_json(&state, json_request("PUT", "/theme/logo", json!({ "logo_url": "" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["started"], false);
    assert_eq!(body["status"], "idle");
}

#[tokio::test]
async fn blank_company_id_is_rejected() {
    let state = test_state();
    let payload = json!({
        "logo_url": "https://cdn.example.com/slow.png",
        "persist": true,
        "company_id": ""
    });
    let (status, _) = send(&state, json_request("PUT", "/theme/logo", payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(state.theme().snapshot().await.run, 0);
}

#[tokio::test]
async fn refresh_without_logo_conflicts() {
    let state = test_state();
    let request = Request::builder()
        .method("POST")
        .uri("/theme/refresh")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(&state, request).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("no logo"));
}

#[tokio::test]
async fn refresh_reruns_latest_logo() {
    let state = test_state();
    state
        .theme()
        .set_logo(Some("https://cdn.example.com/slow.png"), ThemeOptions::default())
        .await
        .unwrap();

    let (status, body) = send_json(&state, json_request("POST", "/theme/refresh", json!({}))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["run"], 2);
}

#[tokio::test]
async fn published_theme_is_served_as_css() {
    let state = test_state();
    let run = state
        .theme()
        .set_logo(Some("https://cdn.example.com/ready.png"), ThemeOptions::default())
        .await
        .unwrap();
    assert_eq!(run.wait().await, RunOutcome::Applied);

    let (status, body) = send_json(&state, get("/theme")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["theme_variables"]["primary"], "0 100% 50%");
    assert!(body["applied_at"].is_string());

    let response = app(&state).oneshot(get("/theme/css")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/css; charset=utf-8"
    );
    let css = response.into_body().collect().await.unwrap().to_bytes();
    let css = String::from_utf8(css.to_vec()).unwrap();
    assert!(css.starts_with(":root {"));
    assert!(css.contains("  --primary: 0 100% 50%;"));
}

#[tokio::test]
async fn contrast_check_adjusts_unreadable_foreground() {
    let state = test_state();
    let payload = json!({ "background": "#ffffff", "foreground": "#ffffff" });
    let (status, body) = send_json(&state, json_request("POST", "/theme/contrast", payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adjusted"], true);
    assert_eq!(body["min_ratio"], 4.5);
    assert!(body["ratio"].as_f64().unwrap() >= 4.5);
}

#[tokio::test]
async fn contrast_check_rejects_out_of_range_ratio() {
    let state = test_state();
    let payload = json!({ "background": "#000", "foreground": "#fff", "min_ratio": 30.0 });
    let (status, _) = send(&state, json_request("POST", "/theme/contrast", payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn features_need_a_profile_store() {
    let state = test_state();
    let (status, body) = send_json(&state, get("/companies/acme/features")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["message"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn features_reject_path_like_company_id() {
    let state = test_state();
    let (status, body) = send_json(&state, get("/companies/..%2Fadmin%3Fx=/features")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Company ID"));
}

#[tokio::test]
async fn openapi_document_lists_theme_routes() {
    let state = test_state();
    let (status, body) = send_json(&state, get("/api-doc/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/theme/logo"].is_object());
    assert!(body["paths"]["/sse/theme"].is_object());
}
