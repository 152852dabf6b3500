//! Signal notifier: writes one SMD file per received signal
//!
//! Each delivery runs Classify → Build → Allocate → Serialize → Done and
//! shares nothing mutable with other deliveries, so one notifier can be used
//! from many threads at once. Uniqueness of the output file comes from the
//! allocator's create-new semantics, not from locking.

use crate::allocator::{sanitize_message_id, AllocatedFile, UniqueFileAllocator};
use crate::error::{DeliveryError, Stage};
use crate::MessageDeliverer;
use notifier_config::NotifierConfig;
use signal_types::MessageUnit;
use smd_codec::{write_document, SignalDocumentBuilder, SMD_FILE_EXTENSION};
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

#[derive(Debug, Clone)]
pub struct SignalNotifier {
    config: Arc<NotifierConfig>,
    builder: SignalDocumentBuilder,
    allocator: UniqueFileAllocator,
}

impl SignalNotifier {
    pub fn new(config: Arc<NotifierConfig>) -> Self {
        let builder = SignalDocumentBuilder::new(config.include_receipt_content);
        Self {
            config,
            builder,
            allocator: UniqueFileAllocator::new(),
        }
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Deliver a signal and return the path of the file written.
    ///
    /// Only receipts and errors are accepted; anything else fails before a
    /// file is created. A write failure leaves the partially written file in
    /// place.
    pub fn notify(&self, unit: &MessageUnit) -> Result<PathBuf, DeliveryError> {
        let message_id = unit.message_id();
        debug!("Creating SMD for {} (msgId={})", unit.kind(), message_id);

        trace!(stage = ?Stage::Classify, "msgId={}", message_id);
        let signal = unit.as_signal().ok_or_else(|| {
            warn!(
                "Unsupported message unit {} (msgId={}), only signals can be delivered",
                unit.kind(),
                message_id
            );
            DeliveryError::UnsupportedMessageKind {
                kind: unit.kind(),
                message_id: message_id.to_string(),
            }
        })?;

        trace!(stage = ?Stage::Build, "msgId={}", message_id);
        let document = self.builder.build(signal).map_err(|source| {
            error!(
                "Could not build SMD for {} (msgId={}): {}",
                signal.kind(),
                message_id,
                source
            );
            DeliveryError::DocumentConstruction {
                message_id: message_id.to_string(),
                source,
            }
        })?;

        trace!(stage = ?Stage::Allocate, "msgId={}", message_id);
        let directory = &self.config.target_directory;
        let stem = directory.join(sanitize_message_id(message_id));
        let AllocatedFile { path, file } = self
            .allocator
            .allocate_with_extension(&stem, SMD_FILE_EXTENSION)
            .map_err(|source| {
                error!(
                    "Could not create SMD file in {:?} (msgId={}): {}",
                    directory, message_id, source
                );
                DeliveryError::DestinationUnavailable {
                    directory: directory.clone(),
                    message_id: message_id.to_string(),
                    source,
                }
            })?;

        trace!(stage = ?Stage::Serialize, "msgId={} path={:?}", message_id, path);
        if let Err(source) = write_document(&document, BufWriter::new(file)) {
            error!("Error writing SMD file {:?} (msgId={}): {}", path, message_id, source);
            return Err(DeliveryError::WriteFailed {
                path,
                message_id: message_id.to_string(),
                source,
            });
        }

        trace!(stage = ?Stage::Done, "msgId={}", message_id);
        debug!("{} (msgId={}) delivered to {:?}", signal.kind(), message_id, path);
        Ok(path)
    }
}

impl MessageDeliverer for SignalNotifier {
    fn deliver(&self, unit: &MessageUnit) -> Result<(), DeliveryError> {
        self.notify(unit).map(|_| ())
    }
}
