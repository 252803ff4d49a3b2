//! Logo references and size-capped loading of their bytes.

use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::{fs::File, io::AsyncReadExt};

use super::error::{ExtractionError, ExtractionResult};

/// Where a logo reference points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// `http://` or `https://` URL.
    Remote(String),
    /// `file://` URL or plain filesystem path.
    Local(PathBuf),
}

impl ImageSource {
    /// Classify a logo reference.
    pub fn parse(reference: &str) -> ExtractionResult<Self> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return Err(ExtractionError::EmptyReference);
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::Remote(trimmed.to_string()));
        }
        if lower.starts_with("file://") {
            return Ok(Self::Local(PathBuf::from(&trimmed["file://".len()..])));
        }
        if lower.contains("://") || lower.starts_with("data:") {
            return Err(ExtractionError::UnsupportedScheme {
                url: trimmed.to_string(),
            });
        }

        Ok(Self::Local(PathBuf::from(trimmed)))
    }

    /// Read the raw image bytes, enforcing `limit`.
    pub async fn load(&self, client: &Client, limit: usize) -> ExtractionResult<Vec<u8>> {
        match self {
            ImageSource::Remote(url) => fetch_remote(client, url, limit).await,
            ImageSource::Local(path) => read_local(path, limit).await,
        }
    }
}

async fn fetch_remote(client: &Client, url: &str, limit: usize) -> ExtractionResult<Vec<u8>> {
    let fetch_error = |source| ExtractionError::Fetch {
        url: url.to_string(),
        source,
    };
    let too_large = || ExtractionError::TooLarge {
        url: url.to_string(),
        limit,
    };

    let mut response = client.get(url).send().await.map_err(fetch_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExtractionError::Status {
            url: url.to_string(),
            status,
        });
    }

    if response
        .content_length()
        .is_some_and(|length| length > limit as u64)
    {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(fetch_error)? {
        if body.len() + chunk.len() > limit {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

async fn read_local(path: &Path, limit: usize) -> ExtractionResult<Vec<u8>> {
    let read_error = |source| ExtractionError::Read {
        path: path.to_path_buf(),
        source,
    };
    let too_large = || ExtractionError::TooLarge {
        url: path.display().to_string(),
        limit,
    };

    // devices and pipes report a zero length, so only regular files are read
    let metadata = tokio::fs::metadata(path).await.map_err(read_error)?;
    if !metadata.is_file() {
        return Err(ExtractionError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    if metadata.len() > limit as u64 {
        return Err(too_large());
    }

    let file = File::open(path).await.map_err(read_error)?;
    let mut body = Vec::new();
    file.take(limit as u64 + 1)
        .read_to_end(&mut body)
        .await
        .map_err(read_error)?;
    if body.len() > limit {
        return Err(too_large());
    }

    Ok(body)
}
