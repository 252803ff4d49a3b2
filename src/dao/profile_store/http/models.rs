use serde::{Deserialize, Serialize};

use crate::{dao::models::FeatureFlags, theme::builder::ThemeVariableSet};

/// Partial update sent when a theme is persisted.
#[derive(Debug, Serialize)]
pub struct ThemePatch<'a> {
    pub theme: &'a ThemeVariableSet,
}

/// Subset of the company profile document read by this service.
#[derive(Debug, Deserialize)]
pub struct CompanyDocument {
    #[serde(default)]
    pub features: FeatureFlags,
}
