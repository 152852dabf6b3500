//! Notifier Configuration Module
//!
//! Provides configuration loading and validation for the file notifier.
//! Supports host settings maps and TOML files with environment overrides.

use crate::defaults::{
    DEFAULT_CONFIG_PATH, ENV_PREFIX, INCLUDE_RECEIPT_CONTENT_KEY, LEGACY_DIRECTORY_KEY,
    TARGET_DIRECTORY_KEY, TRUTHY_VALUES,
};
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Settings of one notifier, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotifierConfig {
    /// Directory the SMD files are written to
    pub target_directory: PathBuf,

    /// Copy all receipt content instead of only the first element
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub include_receipt_content: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error! No target directory specified")]
    MissingTargetDirectory,

    #[error("Configuration error! Specified directory [{}] is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Configuration error! Specified directory [{}] is not writable", path.display())]
    NotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error! Specified directory [{}] is not available", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NotifierConfig {
    pub fn new(target_directory: impl Into<PathBuf>, include_receipt_content: bool) -> Self {
        Self {
            target_directory: target_directory.into(),
            include_receipt_content,
        }
    }

    /// Build from the gateway's settings map.
    ///
    /// `targetDirectory` is required, `deliveryDirectory` is accepted in its
    /// place. `includeReceiptContent` is optional and false unless truthy.
    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let target_directory = settings
            .get(TARGET_DIRECTORY_KEY)
            .or_else(|| {
                let legacy = settings.get(LEGACY_DIRECTORY_KEY);
                if legacy.is_some() {
                    warn!(
                        "Setting '{}' is deprecated, use '{}'",
                        LEGACY_DIRECTORY_KEY, TARGET_DIRECTORY_KEY
                    );
                }
                legacy
            })
            .filter(|dir| !dir.trim().is_empty())
            .ok_or(ConfigError::MissingTargetDirectory)?;

        let include_receipt_content = settings
            .get(INCLUDE_RECEIPT_CONTENT_KEY)
            .is_some_and(|value| is_true(value));

        Ok(Self::new(target_directory, include_receipt_content))
    }

    /// Load from a TOML file with `SMD_NOTIFIER_*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
        info!("Loading notifier config: {:?}", path);

        let config = Config::builder()
            .add_source(File::from(path).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let mut loaded: NotifierConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        loaded.expand_env_vars()?;
        Ok(loaded)
    }

    /// Expand `$VAR` and `${VAR}` references in the target directory
    pub fn expand_env_vars(&mut self) -> Result<()> {
        let raw = self
            .target_directory
            .to_str()
            .context("Target directory is not valid UTF-8")?;
        let expanded = shellexpand::env(raw).context("Failed to expand target directory")?;
        self.target_directory = PathBuf::from(expanded.as_ref());
        Ok(())
    }

    /// Check the target directory can take SMD files, creating it if absent.
    ///
    /// An existing directory is tested by creating and removing a scratch file
    /// in it.
    pub fn ensure_target_directory(&self) -> Result<(), ConfigError> {
        let path = &self.target_directory;
        match fs::metadata(path) {
            Ok(metadata) if !metadata.is_dir() => {
                Err(ConfigError::NotADirectory { path: path.clone() })
            }
            Ok(_) => {
                // Scratch file, removed again on drop
                tempfile::Builder::new()
                    .prefix(".smd-check")
                    .tempfile_in(path)
                    .map_err(|source| ConfigError::NotWritable {
                        path: path.clone(),
                        source,
                    })?;
                debug!("Target directory {:?} is ready", path);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(path).map_err(|source| ConfigError::Unavailable {
                    path: path.clone(),
                    source,
                })?;
                info!("Created target directory {:?}", path);
                Ok(())
            }
            Err(source) => Err(ConfigError::Unavailable {
                path: path.clone(),
                source,
            }),
        }
    }
}

/// True for `yes`, `y`, `true` or `1`, ignoring case
pub fn is_true(value: &str) -> bool {
    TRUTHY_VALUES
        .iter()
        .any(|truthy| value.eq_ignore_ascii_case(truthy))
}

/// Accept booleans, integers and truthy strings for flag settings
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value == 1,
        Flag::Text(value) => is_true(&value),
    })
}

/// Convenience function to load and prepare configuration
pub fn load_config(path: Option<&Path>) -> Result<NotifierConfig> {
    let config = NotifierConfig::load(path)?;
    config
        .ensure_target_directory()
        .context("Target directory check failed")?;
    Ok(config)
}
