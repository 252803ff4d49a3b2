//! Theme run lifecycle: `idle`, `loading`, `ready`, `error`, guarded by run tokens.

use serde::Serialize;
use thiserror::Error;

/// Lifecycle of the published theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePhase {
    /// Nothing requested yet.
    Idle,
    /// A run is extracting colors for the latest logo.
    Loading,
    /// The latest run was applied.
    Ready,
    /// The latest run failed; earlier variables stay published.
    Error,
}

impl ThemePhase {
    /// Lowercase label used in logs and payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ThemePhase::Idle => "idle",
            ThemePhase::Loading => "loading",
            ThemePhase::Ready => "ready",
            ThemePhase::Error => "error",
        }
    }
}

/// Monotonically increasing identifier of a run.
pub type RunToken = u64;

/// Raised when a run finishes after a newer one started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("run {token} is stale; latest run is {latest}")]
pub struct StaleRun {
    /// Token of the finishing run.
    pub token: RunToken,
    /// Token of the most recently started run.
    pub latest: RunToken,
}

/// Snapshot of the machine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStatus {
    /// Current phase.
    pub phase: ThemePhase,
    /// Latest issued token, 0 before the first run.
    pub token: RunToken,
    /// Logo of the latest run.
    pub logo_url: Option<String>,
    /// Message of the latest failure, cleared when a new run starts.
    pub error: Option<String>,
}

/// Tracks the latest run and decides which completions may publish.
#[derive(Debug, Clone)]
pub struct ThemeStateMachine {
    phase: ThemePhase,
    latest: RunToken,
    logo_url: Option<String>,
    error: Option<String>,
}

impl Default for ThemeStateMachine {
    fn default() -> Self {
        Self {
            phase: ThemePhase::Idle,
            latest: 0,
            logo_url: None,
            error: None,
        }
    }
}

impl ThemeStateMachine {
    /// Create a machine in the idle phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> ThemePhase {
        self.phase
    }

    /// Logo of the most recent run.
    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref()
    }

    /// Whether `token` belongs to the most recently started run.
    pub fn is_current(&self, token: RunToken) -> bool {
        token == self.latest
    }

    /// Whether `logo_url` would start a new run: it must be non-empty and
    /// differ from the latest requested logo. Retrying the same logo goes
    /// through an explicit [`Self::begin`].
    pub fn accepts(&self, logo_url: &str) -> bool {
        !logo_url.trim().is_empty() && self.logo_url.as_deref() != Some(logo_url)
    }

    /// Start a run for `logo_url`, superseding any run in flight.
    pub fn begin(&mut self, logo_url: impl Into<String>) -> RunToken {
        self.latest += 1;
        self.phase = ThemePhase::Loading;
        self.logo_url = Some(logo_url.into());
        self.error = None;
        self.latest
    }

    /// Mark the run identified by `token` as applied.
    pub fn complete(&mut self, token: RunToken) -> Result<ThemePhase, StaleRun> {
        self.ensure_current(token)?;
        self.phase = ThemePhase::Ready;
        Ok(self.phase)
    }

    /// Mark the run identified by `token` as failed with a user-facing message.
    pub fn fail(&mut self, token: RunToken, message: impl Into<String>) -> Result<ThemePhase, StaleRun> {
        self.ensure_current(token)?;
        self.phase = ThemePhase::Error;
        self.error = Some(message.into());
        Ok(self.phase)
    }

    /// Create a snapshot of the current state.
    pub fn snapshot(&self) -> ThemeStatus {
        ThemeStatus {
            phase: self.phase,
            token: self.latest,
            logo_url: self.logo_url.clone(),
            error: self.error.clone(),
        }
    }

    fn ensure_current(&self, token: RunToken) -> Result<(), StaleRun> {
        if self.is_current(token) {
            Ok(())
        } else {
            Err(StaleRun {
                token,
                latest: self.latest,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_idle() {
        let sm = ThemeStateMachine::new();
        assert_eq!(sm.phase(), ThemePhase::Idle);
        assert_eq!(sm.snapshot().token, 0);
        assert!(sm.logo_url().is_none());
    }

    #[test]
    fn happy_path_reaches_ready() {
        let mut sm = ThemeStateMachine::new();
        let token = sm.begin("https://cdn.example.com/a.png");
        assert_eq!(sm.phase(), ThemePhase::Loading);
        assert_eq!(sm.complete(token), Ok(ThemePhase::Ready));
    }

    #[test]
    fn tokens_increase_monotonically() {
        let mut sm = ThemeStateMachine::new();
        let first = sm.begin("a");
        let second = sm.begin("b");
        assert!(second > first);
    }

    #[test]
    fn superseded_run_cannot_complete_or_fail() {
        let mut sm = ThemeStateMachine::new();
        let first = sm.begin("a");
        let second = sm.begin("b");

        assert_eq!(
            sm.complete(first),
            Err(StaleRun {
                token: first,
                latest: second
            })
        );
        assert!(sm.fail(first, "boom").is_err());
        assert_eq!(sm.phase(), ThemePhase::Loading);
        assert_eq!(sm.logo_url(), Some("b"));
    }

    #[test]
    fn failure_records_message_until_next_run() {
        let mut sm = ThemeStateMachine::new();
        let token = sm.begin("a");
        assert_eq!(sm.fail(token, "nope"), Ok(ThemePhase::Error));
        assert_eq!(sm.snapshot().error.as_deref(), Some("nope"));

        sm.begin("a");
        assert!(sm.snapshot().error.is_none());
    }

    #[test]
    fn accepts_only_new_urls() {
        let mut sm = ThemeStateMachine::new();
        assert!(!sm.accepts(""));
        assert!(!sm.accepts("   "));
        assert!(sm.accepts("a"));

        let token = sm.begin("a");
        assert!(!sm.accepts("a"));
        assert!(sm.accepts("b"));

        sm.complete(token).unwrap();
        assert!(!sm.accepts("a"));

        let token = sm.begin("b");
        sm.fail(token, "nope").unwrap();
        assert!(!sm.accepts("b"));
        assert!(sm.accepts("a"));
    }
}
