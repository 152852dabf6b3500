//! Delivery error types

use smd_codec::{BuildError, WriteError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Steps of a single notification, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Classify,
    Build,
    Allocate,
    Serialize,
    Done,
}

/// Failure to deliver a message unit as an SMD file
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("This delivery method can not be used for {kind} message units (msgId={message_id})")]
    UnsupportedMessageKind {
        kind: &'static str,
        message_id: String,
    },

    #[error("Could not create meta-data document for signal message (msgId={message_id})")]
    DocumentConstruction {
        message_id: String,
        #[source]
        source: BuildError,
    },

    #[error("Could not create SMD file in {} (msgId={message_id})", directory.display())]
    DestinationUnavailable {
        directory: PathBuf,
        message_id: String,
        #[source]
        source: io::Error,
    },

    #[error("Error writing SMD file {} (msgId={message_id})", path.display())]
    WriteFailed {
        path: PathBuf,
        message_id: String,
        #[source]
        source: WriteError,
    },
}

impl DeliveryError {
    /// Stage the delivery was in when it failed
    pub fn stage(&self) -> Stage {
        match self {
            DeliveryError::UnsupportedMessageKind { .. } => Stage::Classify,
            DeliveryError::DocumentConstruction { .. } => Stage::Build,
            DeliveryError::DestinationUnavailable { .. } => Stage::Allocate,
            DeliveryError::WriteFailed { .. } => Stage::Serialize,
        }
    }

    pub fn message_id(&self) -> &str {
        match self {
            DeliveryError::UnsupportedMessageKind { message_id, .. }
            | DeliveryError::DocumentConstruction { message_id, .. }
            | DeliveryError::DestinationUnavailable { message_id, .. }
            | DeliveryError::WriteFailed { message_id, .. } => message_id,
        }
    }
}
