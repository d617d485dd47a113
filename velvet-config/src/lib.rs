//! Shared configuration loader for the velvet toolchain.
//!
//! `defaults/velvet.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`VelvetConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use velvet_babel::formats::blocks::GALLERY_MIN_IMAGES;
use velvet_babel::formats::npf::PRETTY;

const DEFAULT_TOML: &str = include_str!("../defaults/velvet.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "velvet.toml";

/// Top-level configuration consumed by velvet applications.
#[derive(Debug, Clone, Deserialize)]
pub struct VelvetConfig {
    pub log: LogConfig,
    pub convert: ConvertConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default `env_logger` filter.
    pub level: String,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub npf: NpfConfig,
    pub blocks: BlocksConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NpfConfig {
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlocksConfig {
    pub gallery_min_images: usize,
}

impl ConvertConfig {
    /// Serialization options for the named target format.
    ///
    /// Formats without configurable knobs get an empty map.
    pub fn format_options(&self, format: &str) -> HashMap<String, String> {
        let mut options = HashMap::new();
        match format {
            "npf" => {
                options.insert(PRETTY.to_string(), self.npf.pretty.to_string());
            }
            "blocks" => {
                options.insert(
                    GALLERY_MIN_IMAGES.to_string(),
                    self.blocks.gallery_min_images.to_string(),
                );
            }
            _ => {}
        }
        options
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
    pub fn build(self) -> Result<VelvetConfig, ConfigError> {
        let config: VelvetConfig = self.builder.build()?.try_deserialize()?;
        if config.convert.blocks.gallery_min_images == 0 {
            return Err(ConfigError::Message(
                "convert.blocks.gallery_min_images must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<VelvetConfig, ConfigError> {
    Loader::new().build()
}
