use serde::Serialize;
use utoipa::ToSchema;

use crate::dao::models::FeatureFlags;

/// Feature flags of a company, merged over the configured defaults.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeaturesResponse {
    /// Company the flags belong to.
    pub company_id: String,
    /// Flag name to enabled.
    #[schema(value_type = Object)]
    pub features: FeatureFlags,
}
