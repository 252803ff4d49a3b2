//! Read access to company feature flags.

use crate::{
    dao::models::FeatureFlags,
    dto::{features::FeaturesResponse, validation::validate_company_id},
    error::ServiceError,
    state::SharedState,
};

/// Feature flags of `company_id` layered over the configured defaults.
pub async fn get_features(
    state: &SharedState,
    company_id: &str,
) -> Result<FeaturesResponse, ServiceError> {
    validate_company_id(company_id).map_err(|err| {
        ServiceError::InvalidInput(
            err.message
                .map(|message| message.into_owned())
                .unwrap_or_else(|| err.code.into_owned()),
        )
    })?;
    let store = state.profile_store().ok_or(ServiceError::NotConfigured)?;
    let overrides = store.load_features(company_id).await?;

    Ok(FeaturesResponse {
        company_id: company_id.to_string(),
        features: FeatureFlags::merged(state.config().default_features(), &overrides),
    })
}
