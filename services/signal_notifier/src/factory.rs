//! Factory for signal notifiers
//!
//! Validates the configuration once, then hands out any number of notifiers
//! sharing it.

use crate::notifier::SignalNotifier;
use notifier_config::{ConfigError, NotifierConfig};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct SignalNotifierFactory {
    config: Arc<NotifierConfig>,
}

impl SignalNotifierFactory {
    /// Initialize from the gateway's settings map
    pub fn init(settings: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_config(NotifierConfig::from_settings(settings)?)
    }

    /// Initialize from an already loaded configuration
    pub fn from_config(config: NotifierConfig) -> Result<Self, ConfigError> {
        config.ensure_target_directory()?;
        info!(
            "Signal notifier ready: target={:?} include_receipt_content={}",
            config.target_directory, config.include_receipt_content
        );
        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn create_deliverer(&self) -> SignalNotifier {
        SignalNotifier::new(Arc::clone(&self.config))
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }
}
