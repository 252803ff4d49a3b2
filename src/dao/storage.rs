use std::error::Error;
use thiserror::Error;

/// Result alias for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Error raised by profile stores regardless of the underlying transport.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backend could not be reached or rejected the request.
    #[error("profile store unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The requested company profile does not exist.
    #[error("company profile `{company_id}` not found")]
    NotFound { company_id: String },
}

impl PersistenceError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        PersistenceError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
