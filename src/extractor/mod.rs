//! Logo palette extraction: fetch, decode, downsample, quantize, classify.

pub mod config;
pub mod error;
pub mod quantize;
pub mod source;

use futures::future::BoxFuture;
use image::GenericImageView;
use reqwest::Client;
use tracing::debug;

use crate::theme::swatch::Palette;

pub use self::{
    config::ExtractorConfig,
    error::{ExtractionError, ExtractionResult},
    source::ImageSource,
};

/// Produces a six-band palette from an image reference.
pub trait PaletteExtractor: Send + Sync {
    /// Fetch and analyse the image at `image_url`.
    fn extract(&self, image_url: &str) -> BoxFuture<'static, ExtractionResult<Palette>>;
}

/// Extractor backed by `reqwest` for remote logos and the filesystem for local ones.
#[derive(Debug, Clone)]
pub struct ImageExtractor {
    client: Client,
    config: ExtractorConfig,
}

impl ImageExtractor {
    /// Build an extractor with its own HTTP client.
    pub fn new(config: ExtractorConfig) -> ExtractionResult<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .map_err(|source| ExtractionError::ClientBuilder { source })?;
        Ok(Self { client, config })
    }

    /// Settings in use.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Synchronous decode and quantization of already loaded bytes.
    pub fn palette_from_bytes(&self, bytes: &[u8]) -> ExtractionResult<Palette> {
        palette_from_bytes(bytes, &self.config)
    }
}

impl PaletteExtractor for ImageExtractor {
    fn extract(&self, image_url: &str) -> BoxFuture<'static, ExtractionResult<Palette>> {
        let client = self.client.clone();
        let config = self.config.clone();
        let reference = image_url.to_string();
        Box::pin(async move {
            let source = ImageSource::parse(&reference)?;
            let bytes = source.load(&client, config.max_image_bytes).await?;
            debug!(url = %reference, bytes = bytes.len(), "logo loaded");

            tokio::task::spawn_blocking(move || palette_from_bytes(&bytes, &config))
                .await
                .map_err(|source| ExtractionError::Task { source })?
        })
    }
}

/// Decode `bytes` and extract the palette synchronously.
///
/// An image with no usable pixels (fully transparent or pure white) yields
/// [`Palette::empty`].
pub fn palette_from_bytes(bytes: &[u8], config: &ExtractorConfig) -> ExtractionResult<Palette> {
    let image =
        image::load_from_memory(bytes).map_err(|source| ExtractionError::Decode { source })?;

    let (width, height) = image.dimensions();
    let image = if width > config.max_dimension || height > config.max_dimension {
        image.thumbnail(config.max_dimension, config.max_dimension)
    } else {
        image
    };

    let pixels = image.to_rgba8();
    let candidates = quantize::quantize(pixels.pixels().map(|pixel| pixel.0), config.max_colors);
    Ok(quantize::classify(&candidates))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;
    use crate::theme::{color::ColorValue, swatch::SwatchName};

    fn encode(image: RgbaImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    fn two_tone() -> RgbaImage {
        RgbaImage::from_fn(40, 40, |x, _| {
            if x < 30 {
                Rgba([37, 99, 235, 255])
            } else {
                Rgba([30, 41, 59, 255])
            }
        })
    }

    #[test]
    fn extracts_dominant_vibrant_color() {
        let palette = palette_from_bytes(&encode(two_tone()), &ExtractorConfig::default()).unwrap();
        assert_eq!(
            palette.color(SwatchName::Vibrant),
            Some(ColorValue::new(37, 99, 235))
        );
    }

    #[test]
    fn transparent_image_yields_empty_palette() {
        let image = RgbaImage::from_pixel(16, 16, Rgba([10, 200, 10, 0]));
        let palette = palette_from_bytes(&encode(image), &ExtractorConfig::default()).unwrap();
        assert!(palette.is_empty());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = palette_from_bytes(b"not an image", &ExtractorConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractionError::Decode { .. }));
    }

    #[test]
    fn large_images_are_downsampled_deterministically() {
        let image = RgbaImage::from_fn(600, 300, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 180, 255])
        });
        let bytes = encode(image);
        let config = ExtractorConfig::default().with_max_dimension(32);
        let first = palette_from_bytes(&bytes, &config).unwrap();
        let second = palette_from_bytes(&bytes, &config).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn extracts_from_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, encode(two_tone())).unwrap();

        let extractor = ImageExtractor::new(ExtractorConfig::default()).unwrap();
        let palette = extractor
            .extract(&format!("file://{}", path.display()))
            .await
            .unwrap();
        assert!(palette.color(SwatchName::Vibrant).is_some());
    }

    #[tokio::test]
    async fn unsupported_reference_fails() {
        let extractor = ImageExtractor::new(ExtractorConfig::default()).unwrap();
        let err = extractor.extract("ftp://example.com/logo.png").await.unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedScheme { .. }));
    }
}
