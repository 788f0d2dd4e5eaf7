//! Shared configuration loader for the pressdown toolchain.
//!
//! `defaults/pressdown.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`PressdownConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use pressdown::ConvertOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/pressdown.default.toml");

/// Top-level configuration consumed by pressdown applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PressdownConfig {
    pub convert: ConvertConfig,
}

/// Mirrors the knobs exposed by the conversion pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub include_other_types: bool,
    pub save_attached_images: bool,
    pub save_scraped_images: bool,
    pub include_time_with_date: bool,
    /// Empty string means "no custom format".
    pub custom_date_formatting: String,
    pub filter_categories: Vec<String>,
}

impl From<ConvertConfig> for ConvertOptions {
    fn from(config: ConvertConfig) -> Self {
        ConvertOptions {
            include_other_types: config.include_other_types,
            save_attached_images: config.save_attached_images,
            save_scraped_images: config.save_scraped_images,
            include_time_with_date: config.include_time_with_date,
            custom_date_formatting: if config.custom_date_formatting.is_empty() {
                None
            } else {
                Some(config.custom_date_formatting)
            },
            filter_categories: config.filter_categories,
        }
    }
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        config.clone().into()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PressdownConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PressdownConfig, ConfigError> {
    Loader::new().build()
}
