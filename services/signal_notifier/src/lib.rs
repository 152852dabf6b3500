//! # Signal Notifier
//!
//! Delivers received receipt and error signals to a business application by
//! writing each one as a signal meta-data (SMD) XML file into a configured
//! directory.
//!
//! ## Flow
//!
//! ```text
//! MessageUnit → classify → SignalDocumentBuilder → UniqueFileAllocator → XmlWriter → <id>.smd.xml
//! ```
//!
//! File names derive from the sanitized message id. When the name is taken
//! the file becomes `<id>-1.smd.xml`, `<id>-2.smd.xml` and so on; existing
//! files are never overwritten.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use signal_notifier::{MessageDeliverer, SignalNotifierFactory};
//! use std::collections::HashMap;
//!
//! let settings = HashMap::from([("targetDirectory".to_string(), "/var/spool/smd".to_string())]);
//! let factory = SignalNotifierFactory::init(&settings)?;
//! let deliverer = factory.create_deliverer();
//! assert!(!deliverer.supports_async_delivery());
//! # Ok::<(), notifier_config::ConfigError>(())
//! ```

use signal_types::MessageUnit;
use std::fmt::Debug;

pub mod allocator;
pub mod error;
pub mod factory;
pub mod notifier;

pub use allocator::{sanitize_message_id, AllocatedFile, UniqueFileAllocator};
pub use error::{DeliveryError, Stage};
pub use factory::SignalNotifierFactory;
pub use notifier::SignalNotifier;

/// A way of handing message units over to the business application
pub trait MessageDeliverer: Send + Sync + Debug {
    /// Deliver one message unit, returning once delivery has finished
    fn deliver(&self, unit: &MessageUnit) -> Result<(), DeliveryError>;

    /// Whether `deliver` may return before delivery has finished
    fn supports_async_delivery(&self) -> bool {
        false
    }
}
