//! Failures raised while turning a logo reference into a palette.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`ExtractionError`] failures.
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// The image could not be fetched or decoded.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Empty reference.
    #[error("image reference is empty")]
    EmptyReference,
    /// Scheme other than http, https or file.
    #[error("unsupported image reference `{url}`")]
    UnsupportedScheme { url: String },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build image HTTP client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or the body could not be read.
    #[error("failed to fetch image `{url}`")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("unexpected status {status} fetching image `{url}`")]
    Status { url: String, status: StatusCode },
    /// The payload exceeds the configured limit.
    #[error("image `{url}` exceeds {limit} bytes")]
    TooLarge { url: String, limit: usize },
    /// Local file could not be read.
    #[error("failed to read image file `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Local reference is a directory, device or pipe.
    #[error("image path `{}` is not a regular file", path.display())]
    NotAFile { path: PathBuf },
    /// Unsupported or corrupt image data.
    #[error("failed to decode image")]
    Decode {
        #[source]
        source: image::ImageError,
    },
    /// The blocking decode task panicked or was cancelled.
    #[error("image decode task failed")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}
