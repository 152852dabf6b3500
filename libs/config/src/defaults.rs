//! Setting names and default values
//!
//! Host settings use the gateway's camel-case keys; the TOML file and
//! environment use snake case.

/// Host setting naming the directory SMD files are written to
pub const TARGET_DIRECTORY_KEY: &str = "targetDirectory";

/// Older name of [`TARGET_DIRECTORY_KEY`], still accepted
pub const LEGACY_DIRECTORY_KEY: &str = "deliveryDirectory";

/// Host setting enabling full receipt content in notifications
pub const INCLUDE_RECEIPT_CONTENT_KEY: &str = "includeReceiptContent";

/// Values accepted as "true" for boolean settings, compared case-insensitively
pub const TRUTHY_VALUES: [&str; 4] = ["yes", "y", "true", "1"];

/// Prefix of environment variables overriding file settings
pub const ENV_PREFIX: &str = "SMD_NOTIFIER";

/// Configuration file read when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "config/notifier.toml";
