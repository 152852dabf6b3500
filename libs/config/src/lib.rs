//! # Notifier Configuration
//!
//! Configuration for the signal meta-data file notifier, supplied once at
//! start-up and read-only afterwards.
//!
//! ## Sources
//!
//! - **Host settings**: a string map handed over by the gateway
//!   (`targetDirectory`, `includeReceiptContent`)
//! - **TOML file**: `target_directory`, `include_receipt_content`, overridable
//!   through `SMD_NOTIFIER_*` environment variables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use notifier_config::NotifierConfig;
//! use std::collections::HashMap;
//!
//! let mut settings = HashMap::new();
//! settings.insert("targetDirectory".to_string(), "/var/spool/smd".to_string());
//! settings.insert("includeReceiptContent".to_string(), "yes".to_string());
//!
//! let config = NotifierConfig::from_settings(&settings)?;
//! config.ensure_target_directory()?;
//! assert!(config.include_receipt_content);
//! # Ok::<(), notifier_config::ConfigError>(())
//! ```

pub mod defaults;
pub mod notifier_config;

pub use notifier_config::{is_true, load_config, ConfigError, NotifierConfig};
