//! Extractor tuning knobs.

use std::time::Duration;

/// Longest image side kept after downsampling.
pub const DEFAULT_MAX_DIMENSION: u32 = 128;
/// Upper bound on quantized candidate colors.
pub const DEFAULT_MAX_COLORS: usize = 64;
/// Timeout applied to remote image fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Largest accepted image payload.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Runtime configuration describing how logos are fetched and quantized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub max_dimension: u32,
    pub max_colors: usize,
    pub fetch_timeout: Duration,
    pub max_image_bytes: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_colors: DEFAULT_MAX_COLORS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl ExtractorConfig {
    /// Override the downsampling bound (at least 1 pixel).
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension.max(1);
        self
    }

    /// Override the quantization budget (at least 1 color).
    pub fn with_max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors.max(1);
        self
    }

    /// Override the remote fetch timeout.
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Override the payload size limit.
    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }
}
