//! Error types raised by the HTTP profile store.

use reqwest::StatusCode;
use thiserror::Error;

use crate::dao::storage::PersistenceError;

/// Convenient result alias returning [`ProfileDaoError`] failures.
pub type ProfileResult<T> = Result<T, ProfileDaoError>;

/// Failures that can occur while talking to the profile API.
#[derive(Debug, Error)]
pub enum ProfileDaoError {
    /// Required environment variable is missing.
    #[error("missing profile API environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    /// `PROFILE_API_URL` is not a valid URL.
    #[error("invalid profile API base URL `{url}`")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// `PROFILE_API_URL` cannot carry path segments (e.g. `mailto:`).
    #[error("profile API base URL `{url}` cannot be used as a base")]
    UnsupportedBaseUrl { url: String },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build profile API client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// A request could not be sent.
    #[error("failed to send profile API request to `{path}`")]
    RequestSend {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with an unexpected status code.
    #[error("unexpected profile API response status {status} for `{path}`")]
    RequestStatus { path: String, status: StatusCode },
    /// Response payload could not be parsed into JSON.
    #[error("failed to decode profile API response for `{path}`")]
    DecodeResponse {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// The company profile does not exist.
    #[error("company profile `{company_id}` not found")]
    NotFound { company_id: String },
}

impl From<ProfileDaoError> for PersistenceError {
    fn from(err: ProfileDaoError) -> Self {
        match err {
            ProfileDaoError::NotFound { company_id } => PersistenceError::NotFound { company_id },
            other => PersistenceError::unavailable(other.to_string(), other),
        }
    }
}
