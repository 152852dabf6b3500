//! Errors raised while building and encoding signal meta-data documents

use thiserror::Error;

/// Failure to copy an element tree into the serializer representation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Tree nests deeper than the converter will recurse
    #[error("Element tree exhausted conversion resources: nesting exceeds {limit} levels at <{element}>")]
    DepthExceeded { limit: usize, element: String },
}

/// Failure to build a signal meta-data document
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Receipt has no content element to include in first-child mode
    #[error("Receipt {message_id} has no content element to include")]
    EmptyReceiptContent { message_id: String },

    /// The document tree could not be constructed
    #[error("Document construction unavailable: {reason}")]
    ConstructionUnavailable {
        reason: String,
        #[source]
        source: ConvertError,
    },
}

/// Failure while writing an encoded document
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error while writing document: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    pub fn construction_unavailable(reason: impl Into<String>, source: ConvertError) -> Self {
        BuildError::ConstructionUnavailable {
            reason: reason.into(),
            source,
        }
    }

    /// True for caller contract violations rather than environment failures
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, BuildError::EmptyReceiptContent { .. })
    }
}
