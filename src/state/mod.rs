pub mod root;
mod sse;
pub mod theme_machine;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    dao::profile_store::ProfileStore,
    extractor::PaletteExtractor,
    services::theme_controller::ThemeController,
    theme::builder::ThemeBuilder,
};

pub use self::sse::{DEFAULT_SSE_CAPACITY, SseHub};
pub use self::theme_machine::{RunToken, ThemePhase};

pub type SharedState = Arc<AppState>;

/// Central application state: configuration, the theme controller and the
/// optional profile store.
pub struct AppState {
    config: AppConfig,
    controller: ThemeController,
    profile_store: Option<Arc<dyn ProfileStore>>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(
        config: AppConfig,
        extractor: Arc<dyn PaletteExtractor>,
        profile_store: Option<Arc<dyn ProfileStore>>,
    ) -> SharedState {
        let controller = ThemeController::new(
            extractor,
            profile_store.clone(),
            ThemeBuilder::new(config.enforcer()),
            SseHub::new(DEFAULT_SSE_CAPACITY),
        );
        Arc::new(Self {
            config,
            controller,
            profile_store,
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The single writer of the published theme.
    pub fn theme(&self) -> &ThemeController {
        &self.controller
    }

    /// Broadcast hub used for the theme SSE stream.
    pub fn theme_sse(&self) -> &SseHub {
        self.controller.events()
    }

    /// Obtain a handle to the profile store, if one is configured.
    pub fn profile_store(&self) -> Option<Arc<dyn ProfileStore>> {
        self.profile_store.clone()
    }

    /// Whether the service is running degraded: the latest run failed or a
    /// requested save could not be carried out.
    pub async fn is_degraded(&self) -> bool {
        self.controller.phase().await == ThemePhase::Error
            || self.controller.is_persistence_degraded()
    }
}
