//! # Signal Document Builder
//!
//! ## Purpose
//!
//! Maps the two signal kinds onto one normalized [`SignalMetaData`] document.
//!
//! - **Error signals**: every reported error becomes one `ErrorEntry`, in order,
//!   with the severity written by its symbolic name. Descriptions without text
//!   are left out entirely.
//! - **Receipts**: by default only the first content element is included, which
//!   tells the business application what kind of receipt arrived without
//!   shipping the whole (possibly large) acknowledgement. With full content
//!   enabled every content element is copied in order.
//!
//! ## Timestamps
//!
//! Instants are converted to UTC. An instant chrono cannot represent results in
//! a document without a timestamp instead of a failure.

use crate::convert::convert;
use crate::document::{DescriptionEntry, ErrorEntry, MessageInfo, ReceiptEntry, SignalMetaData, SmdPayload};
use crate::error::BuildError;
use chrono::{DateTime, Utc};
use signal_types::{instant_to_utc, ErrorDetail, ErrorSignal, Receipt, Signal};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Builds signal meta-data documents with a fixed receipt content policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalDocumentBuilder {
    include_full_content: bool,
}

impl SignalDocumentBuilder {
    pub fn new(include_full_content: bool) -> Self {
        Self {
            include_full_content,
        }
    }

    pub fn include_full_content(&self) -> bool {
        self.include_full_content
    }

    /// Build the document for either signal kind
    pub fn build(&self, signal: Signal<'_>) -> Result<SignalMetaData, BuildError> {
        match signal {
            Signal::Receipt(receipt) => Self::from_receipt(receipt, self.include_full_content),
            Signal::Error(error) => Ok(Self::from_error(error)),
        }
    }

    /// Document for an error signal; one entry per reported error
    pub fn from_error(error: &ErrorSignal) -> SignalMetaData {
        let errors: Vec<ErrorEntry> = error.errors.iter().map(error_entry).collect();
        debug!(
            "Built SMD for error signal {} with {} error(s)",
            error.message_id,
            errors.len()
        );

        SignalMetaData {
            message_info: message_info(&error.message_id, &error.ref_to_message_id, error.timestamp),
            payload: SmdPayload::Errors(errors),
        }
    }

    /// Document for a receipt.
    ///
    /// Without `include_full_content` the receipt must carry at least one
    /// content element; an empty receipt is rejected as a contract violation.
    pub fn from_receipt(
        receipt: &Receipt,
        include_full_content: bool,
    ) -> Result<SignalMetaData, BuildError> {
        let content = if include_full_content {
            receipt
                .content
                .iter()
                .map(convert)
                .collect::<Result<Vec<_>, _>>()
        } else {
            let first = receipt
                .content
                .first()
                .ok_or_else(|| BuildError::EmptyReceiptContent {
                    message_id: receipt.message_id.clone(),
                })?;
            convert(first).map(|element| vec![element])
        }
        .map_err(|e| BuildError::construction_unavailable("could not copy receipt content", e))?;

        debug!(
            "Built SMD for receipt {} with {} of {} content element(s)",
            receipt.message_id,
            content.len(),
            receipt.content.len()
        );

        Ok(SignalMetaData {
            message_info: message_info(
                &receipt.message_id,
                &receipt.ref_to_message_id,
                receipt.timestamp,
            ),
            payload: SmdPayload::Receipt(ReceiptEntry { content }),
        })
    }
}

/// Convert a signal instant for the document, `None` if it is not representable
pub fn convert_timestamp(instant: SystemTime) -> Option<DateTime<Utc>> {
    let converted = instant_to_utc(instant);
    if converted.is_none() {
        warn!("Signal timestamp {:?} can not be represented, omitting it", instant);
    }
    converted
}

fn message_info(message_id: &str, ref_to_message_id: &str, timestamp: SystemTime) -> MessageInfo {
    MessageInfo {
        timestamp: convert_timestamp(timestamp),
        message_id: message_id.to_string(),
        ref_to_message_id: ref_to_message_id.to_string(),
    }
}

fn error_entry(error: &ErrorDetail) -> ErrorEntry {
    ErrorEntry {
        code: error.code.clone(),
        severity: error.severity.as_str().to_string(),
        detail: error.detail.clone(),
        short_description: error.short_description.clone(),
        category: error.category.clone(),
        origin: error.origin.clone(),
        description: error
            .description
            .as_ref()
            .filter(|d| !d.is_blank())
            .map(|d| DescriptionEntry {
                text: d.text.clone(),
                language: d.language.clone(),
            }),
    }
}
