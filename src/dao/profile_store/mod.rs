#[cfg(feature = "http-profile-store")]
pub mod http;

use futures::future::BoxFuture;

use crate::dao::{models::FeatureFlags, storage::PersistenceResult};
use crate::theme::builder::ThemeVariableSet;

/// Abstraction over the remote company profile.
pub trait ProfileStore: Send + Sync {
    /// Store the published theme on the company profile.
    fn save_theme(
        &self,
        company_id: &str,
        theme: ThemeVariableSet,
    ) -> BoxFuture<'static, PersistenceResult<()>>;
    /// Read the feature flags declared on the company profile.
    fn load_features(&self, company_id: &str) -> BoxFuture<'static, PersistenceResult<FeatureFlags>>;
}
