//! Application-level configuration loading: contrast target, extractor tuning and default feature flags.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    dao::models::FeatureFlags,
    extractor::config::{
        DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_COLORS, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_IMAGE_BYTES,
        ExtractorConfig,
    },
    theme::contrast::{ContrastEnforcer, DEFAULT_MIN_RATIO},
};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "ADAPTIVE_THEME_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    min_contrast_ratio: f64,
    extractor: ExtractorConfig,
    features: FeatureFlags,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path())
    }

    /// Load the configuration from `path`, falling back to built-in defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        min_contrast_ratio = app_config.min_contrast_ratio,
                        features = app_config.features.len(),
                        "loaded theme configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Minimum contrast ratio every foreground must reach.
    pub fn min_contrast_ratio(&self) -> f64 {
        self.min_contrast_ratio
    }

    /// Contrast enforcer configured with [`Self::min_contrast_ratio`].
    pub fn enforcer(&self) -> ContrastEnforcer {
        ContrastEnforcer::new(self.min_contrast_ratio)
    }

    /// Logo fetching and quantization settings.
    pub fn extractor(&self) -> &ExtractorConfig {
        &self.extractor
    }

    /// Feature flags applied when a company profile does not declare them.
    pub fn default_features(&self) -> &FeatureFlags {
        &self.features
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            min_contrast_ratio: DEFAULT_MIN_RATIO,
            extractor: ExtractorConfig::default(),
            features: default_features(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    min_contrast_ratio: Option<f64>,
    extractor: RawExtractor,
    features: Option<FeatureFlags>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the `extractor` section.
struct RawExtractor {
    max_dimension: Option<u32>,
    max_colors: Option<usize>,
    fetch_timeout_ms: Option<u64>,
    max_image_bytes: Option<usize>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let RawExtractor {
            max_dimension,
            max_colors,
            fetch_timeout_ms,
            max_image_bytes,
        } = value.extractor;

        let extractor = ExtractorConfig::default()
            .with_max_dimension(max_dimension.unwrap_or(DEFAULT_MAX_DIMENSION))
            .with_max_colors(max_colors.unwrap_or(DEFAULT_MAX_COLORS))
            .with_fetch_timeout(
                fetch_timeout_ms
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_FETCH_TIMEOUT),
            )
            .with_max_image_bytes(max_image_bytes.unwrap_or(DEFAULT_MAX_IMAGE_BYTES));

        Self {
            // the enforcer normalises nonsense ratios
            min_contrast_ratio: ContrastEnforcer::new(
                value.min_contrast_ratio.unwrap_or(DEFAULT_MIN_RATIO),
            )
            .min_ratio(),
            extractor,
            features: value.features.unwrap_or_else(default_features),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in feature flags shipped with the binary.
fn default_features() -> FeatureFlags {
    [("adaptive_theme", true), ("theme_persistence", true)]
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = AppConfig::load_from(Path::new("/definitely/not/here/app.json"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.min_contrast_ratio(), 4.5);
        assert!(config.default_features().is_enabled("adaptive_theme"));
    }

    #[test]
    fn invalid_json_uses_defaults() {
        let file = write_config("{ not json");
        assert_eq!(AppConfig::load_from(file.path()), AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_selected_values() {
        let file = write_config(
            r#"{
                "min_contrast_ratio": 7.0,
                "extractor": { "max_colors": 16, "fetch_timeout_ms": 2500 },
                "features": { "map": true }
            }"#,
        );
        let config = AppConfig::load_from(file.path());

        assert_eq!(config.min_contrast_ratio(), 7.0);
        assert_eq!(config.extractor().max_colors, 16);
        assert_eq!(config.extractor().max_dimension, DEFAULT_MAX_DIMENSION);
        assert_eq!(config.extractor().fetch_timeout, Duration::from_millis(2500));
        assert!(config.default_features().is_enabled("map"));
        assert!(!config.default_features().is_enabled("adaptive_theme"));
    }

    #[test]
    fn nonsense_ratio_is_normalised() {
        let file = write_config(r#"{ "min_contrast_ratio": -3 }"#);
        assert_eq!(AppConfig::load_from(file.path()).min_contrast_ratio(), 4.5);
    }
}
