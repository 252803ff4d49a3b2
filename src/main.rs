//! Adaptive Theme Back binary entrypoint wiring the theme controller, REST and SSE layers.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adaptive_theme_back::{
    config::AppConfig,
    dao::profile_store::ProfileStore,
    extractor::ImageExtractor,
    routes,
    services::theme_controller::ThemeOptions,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let extractor = ImageExtractor::new(config.extractor().clone()).context("building extractor")?;
    let profile_store = build_profile_store();

    let app_state = AppState::new(config, Arc::new(extractor), profile_store);

    start_initial_theme(&app_state).await;
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Profile store from `PROFILE_API_URL`/`PROFILE_API_TOKEN`, when configured.
#[cfg(feature = "http-profile-store")]
fn build_profile_store() -> Option<Arc<dyn ProfileStore>> {
    use adaptive_theme_back::dao::profile_store::http::{HttpProfileStore, ProfileApiConfig};

    let config = match ProfileApiConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            info!(reason = %err, "profile store disabled");
            return None;
        }
    };

    match HttpProfileStore::new(config) {
        Ok(store) => {
            info!("profile store enabled");
            Some(Arc::new(store))
        }
        Err(err) => {
            warn!(error = %err, "failed to build profile store; persistence disabled");
            None
        }
    }
}

#[cfg(not(feature = "http-profile-store"))]
fn build_profile_store() -> Option<Arc<dyn ProfileStore>> {
    None
}

/// Kick off a first run from `THEME_LOGO_URL`, if set.
async fn start_initial_theme(state: &SharedState) {
    let Ok(logo_url) = env::var("THEME_LOGO_URL") else {
        return;
    };
    let options = ThemeOptions {
        persist: env::var("THEME_PERSIST")
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false),
        company_id: env::var("THEME_COMPANY_ID").ok(),
    };

    if let Some(handle) = state.theme().set_logo(Some(&logo_url), options).await {
        info!(run = handle.token(), logo_url = %logo_url, "initial theme run scheduled");
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
