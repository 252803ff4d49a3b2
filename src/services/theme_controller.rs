//! Orchestrates extract → map → enforce → publish → persist for the latest logo.
//!
//! Every run captures a [`RunToken`] when it starts. When it finishes, the token
//! is checked against the state machine under the same write lock that guards
//! the [`ThemeRoot`], so only the most recently started run can publish.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use time::OffsetDateTime;
use tokio::{
    sync::{RwLock, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    dao::profile_store::ProfileStore,
    extractor::PaletteExtractor,
    services::sse_events,
    state::{
        SseHub,
        root::{PublishedTheme, ThemeRoot},
        theme_machine::{RunToken, ThemePhase, ThemeStateMachine},
    },
    theme::builder::{ThemeBuilder, ThemeVariableSet},
};

/// Message exposed to users when a run fails.
pub const EXTRACTION_FAILED_MESSAGE: &str = "Could not extract colors from the logo";

/// Per-request options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeOptions {
    /// Save the published theme on the company profile.
    pub persist: bool,
    /// Company whose profile receives the theme.
    pub company_id: Option<String>,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Variables were published.
    Applied,
    /// Extraction failed; previous variables stay published.
    Failed,
    /// A newer run started first; the result was dropped.
    Discarded,
}

/// Handle on a spawned run.
#[derive(Debug)]
pub struct RunHandle {
    token: RunToken,
    task: JoinHandle<RunOutcome>,
}

impl RunHandle {
    /// Token identifying the run.
    pub fn token(&self) -> RunToken {
        self.token
    }

    /// Wait for the run to finish.
    pub async fn wait(self) -> RunOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(run = self.token, error = %err, "theme run task aborted");
                RunOutcome::Failed
            }
        }
    }
}

/// Everything a caller needs to render the current theme state.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSnapshot {
    /// Current phase.
    pub status: ThemePhase,
    /// Latest run token.
    pub run: RunToken,
    /// Logo of the latest run.
    pub logo_url: Option<String>,
    /// Published variables, kept across failures.
    pub theme_variables: Option<ThemeVariableSet>,
    /// When the published variables were applied.
    pub applied_at: Option<OffsetDateTime>,
    /// True while the latest run is in flight.
    pub loading: bool,
    /// User-facing message of the latest failure.
    pub error: Option<String>,
}

#[derive(Default)]
struct ThemeCore {
    machine: ThemeStateMachine,
    root: ThemeRoot,
}

struct Inner {
    extractor: Arc<dyn PaletteExtractor>,
    profile_store: Option<Arc<dyn ProfileStore>>,
    builder: ThemeBuilder,
    core: RwLock<ThemeCore>,
    events: SseHub,
    persistence_degraded: watch::Sender<bool>,
    /// Token of the most recent run that asked for a save.
    latest_save: AtomicU64,
}

/// Single writer of the published theme.
#[derive(Clone)]
pub struct ThemeController {
    inner: Arc<Inner>,
}

impl ThemeController {
    /// Build a controller publishing through `events`.
    pub fn new(
        extractor: Arc<dyn PaletteExtractor>,
        profile_store: Option<Arc<dyn ProfileStore>>,
        builder: ThemeBuilder,
        events: SseHub,
    ) -> Self {
        let (persistence_degraded, _rx) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                extractor,
                profile_store,
                builder,
                core: RwLock::new(ThemeCore::default()),
                events,
                persistence_degraded,
                latest_save: AtomicU64::new(0),
            }),
        }
    }

    /// Request a theme for `logo_url`.
    ///
    /// Starts a run only when the URL is non-empty and differs from the latest
    /// requested one. An empty or absent URL leaves everything untouched,
    /// including any run in flight.
    pub async fn set_logo(&self, logo_url: Option<&str>, options: ThemeOptions) -> Option<RunHandle> {
        let logo_url = logo_url.map(str::trim).filter(|url| !url.is_empty())?;

        let token = {
            let mut core = self.inner.core.write().await;
            if !core.machine.accepts(logo_url) {
                debug!(logo_url, "logo unchanged; no new theme run");
                return None;
            }
            let token = core.machine.begin(logo_url);
            sse_events::broadcast_theme_loading(&self.inner.events, token, logo_url);
            token
        };

        Some(self.spawn_run(token, logo_url.to_string(), options))
    }

    /// Re-run extraction for the latest logo. `None` when no logo was ever set.
    pub async fn refresh(&self, options: ThemeOptions) -> Option<RunHandle> {
        let (token, logo_url) = {
            let mut core = self.inner.core.write().await;
            let logo_url = core.machine.logo_url()?.to_string();
            let token = core.machine.begin(logo_url.as_str());
            sse_events::broadcast_theme_loading(&self.inner.events, token, &logo_url);
            (token, logo_url)
        };

        Some(self.spawn_run(token, logo_url, options))
    }

    /// Current state and published variables.
    pub async fn snapshot(&self) -> ThemeSnapshot {
        let core = self.inner.core.read().await;
        let status = core.machine.snapshot();
        let published = core.root.published();
        ThemeSnapshot {
            status: status.phase,
            run: status.token,
            logo_url: status.logo_url,
            theme_variables: published.map(|published| published.variables.clone()),
            applied_at: published.map(|published| published.applied_at),
            loading: status.phase == ThemePhase::Loading,
            error: status.error,
        }
    }

    /// Currently published variables.
    pub async fn published(&self) -> Option<ThemeVariableSet> {
        self.inner.core.read().await.root.variables().cloned()
    }

    /// Currently published theme with its metadata.
    pub async fn published_theme(&self) -> Option<PublishedTheme> {
        self.inner.core.read().await.root.published().cloned()
    }

    /// Current phase.
    pub async fn phase(&self) -> ThemePhase {
        self.inner.core.read().await.machine.phase()
    }

    /// Event stream the controller publishes to.
    pub fn events(&self) -> &SseHub {
        &self.inner.events
    }

    /// Whether persistence was requested but could not be carried out lately.
    pub fn is_persistence_degraded(&self) -> bool {
        *self.inner.persistence_degraded.borrow()
    }

    /// Subscribe to persistence degradation updates.
    pub fn persistence_watcher(&self) -> watch::Receiver<bool> {
        self.inner.persistence_degraded.subscribe()
    }

    fn spawn_run(&self, token: RunToken, logo_url: String, options: ThemeOptions) -> RunHandle {
        info!(run = token, logo_url = %logo_url, "theme run started");
        let controller = self.clone();
        let task = tokio::spawn(async move { controller.run(token, logo_url, options).await });
        RunHandle { token, task }
    }

    async fn run(self, token: RunToken, logo_url: String, options: ThemeOptions) -> RunOutcome {
        let extracted = self.inner.extractor.extract(&logo_url).await;

        let mut core = self.inner.core.write().await;
        match extracted {
            Ok(palette) => {
                if let Err(stale) = core.machine.complete(token) {
                    debug!(run = token, latest = stale.latest, "discarding stale theme run");
                    return RunOutcome::Discarded;
                }

                let variables = self.inner.builder.build(&palette);
                let published = core.root.apply(variables.clone(), token);
                sse_events::broadcast_theme_applied(&self.inner.events, published);
                drop(core);

                info!(run = token, logo_url = %logo_url, "theme applied");
                self.persist(token, variables, options);
                RunOutcome::Applied
            }
            Err(err) => {
                if let Err(stale) = core.machine.fail(token, EXTRACTION_FAILED_MESSAGE) {
                    debug!(
                        run = token,
                        latest = stale.latest,
                        error = %err,
                        "discarding stale failed theme run"
                    );
                    return RunOutcome::Discarded;
                }
                sse_events::broadcast_theme_error(&self.inner.events, token, EXTRACTION_FAILED_MESSAGE);
                drop(core);

                warn!(run = token, logo_url = %logo_url, error = %err, "theme extraction failed");
                RunOutcome::Failed
            }
        }
    }

    /// Fire-and-forget save of `variables`; failures are only logged.
    fn persist(&self, token: RunToken, variables: ThemeVariableSet, options: ThemeOptions) {
        if !options.persist {
            return;
        }
        let Some(company_id) = options.company_id.filter(|id| !id.trim().is_empty()) else {
            debug!(run = token, "persistence requested without company id; skipping");
            return;
        };
        self.inner.latest_save.fetch_max(token, Ordering::AcqRel);
        let Some(store) = self.inner.profile_store.clone() else {
            warn!(run = token, company_id = %company_id, "persistence requested but no profile store configured");
            self.inner.persistence_degraded.send_replace(true);
            return;
        };

        let controller = self.clone();
        tokio::spawn(async move {
            let result = store.save_theme(&company_id, variables).await;
            let latest = controller.inner.latest_save.load(Ordering::Acquire);
            if latest != token {
                debug!(run = token, latest, "save superseded by a newer run; persistence status unchanged");
            }
            let degraded = &controller.inner.persistence_degraded;
            match result {
                Ok(()) => {
                    info!(run = token, company_id = %company_id, "theme saved to company profile");
                    if latest == token {
                        degraded.send_replace(false);
                    }
                }
                Err(err) => {
                    warn!(
                        run = token,
                        company_id = %company_id,
                        error = %err,
                        "failed to save theme to company profile"
                    );
                    if latest == token {
                        degraded.send_replace(true);
                    }
                }
            }
        });
    }
}
