use super::error::{ProfileDaoError, ProfileResult};

const BASE_URL_ENV: &str = "PROFILE_API_URL";
const TOKEN_ENV: &str = "PROFILE_API_TOKEN";

/// Runtime configuration describing how to reach the profile API.
#[derive(Debug, Clone)]
pub struct ProfileApiConfig {
    /// API root, e.g. `https://profiles.internal/api`.
    pub base_url: String,
    /// Bearer token, when the API requires one.
    pub token: Option<String>,
}

impl ProfileApiConfig {
    /// Construct a configuration from an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a bearer token sent with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> ProfileResult<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ProfileDaoError::MissingEnvVar { var: BASE_URL_ENV })?;

        let mut config = Self::new(base_url);
        if let Some(token) = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|value| !value.is_empty())
        {
            config = config.with_token(token);
        }

        Ok(config)
    }
}
