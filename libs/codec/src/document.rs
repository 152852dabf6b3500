//! Signal meta-data document model
//!
//! A [`SignalMetaData`] carries the message info of the signal plus exactly one
//! payload: the list of errors of an error signal or the content of a receipt.
//! `SmdPayload` being an enum makes "both" and "neither" unrepresentable.

use crate::constants::{names, XML_NAMESPACE};
use crate::tree::{XmlAttribute, XmlElement, XmlNode};
use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct SignalMetaData {
    pub message_info: MessageInfo,
    pub payload: SmdPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageInfo {
    /// `None` when the signal's instant could not be represented
    pub timestamp: Option<DateTime<Utc>>,
    pub message_id: String,
    pub ref_to_message_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SmdPayload {
    Errors(Vec<ErrorEntry>),
    Receipt(ReceiptEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub code: String,
    /// Symbolic severity name, e.g. `FAILURE`
    pub severity: String,
    pub detail: String,
    pub short_description: String,
    pub category: String,
    pub origin: String,
    pub description: Option<DescriptionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionEntry {
    pub text: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptEntry {
    pub content: Vec<XmlElement>,
}

impl SignalMetaData {
    pub fn errors(&self) -> Option<&[ErrorEntry]> {
        match &self.payload {
            SmdPayload::Errors(errors) => Some(errors),
            SmdPayload::Receipt(_) => None,
        }
    }

    pub fn receipt(&self) -> Option<&ReceiptEntry> {
        match &self.payload {
            SmdPayload::Receipt(receipt) => Some(receipt),
            SmdPayload::Errors(_) => None,
        }
    }

    /// Render the document as the tree handed to the writer
    pub fn to_xml(&self) -> XmlElement {
        let mut root = XmlElement::smd(names::SIGNAL_MESSAGE).with_child(self.message_info.to_xml());
        match &self.payload {
            SmdPayload::Errors(errors) => {
                for error in errors {
                    root.push_child(error.to_xml());
                }
            }
            SmdPayload::Receipt(receipt) => root.push_child(receipt.to_xml()),
        }
        root
    }
}

impl MessageInfo {
    /// `xs:dateTime` text of the timestamp, UTC with millisecond precision
    pub fn timestamp_text(&self) -> Option<String> {
        self.timestamp
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    fn to_xml(&self) -> XmlElement {
        let mut info = XmlElement::smd(names::MESSAGE_INFO);
        if let Some(timestamp) = self.timestamp_text() {
            info.push_child(XmlElement::smd_text(names::TIMESTAMP, timestamp));
        }
        info.push_child(XmlElement::smd_text(names::MESSAGE_ID, self.message_id.as_str()));
        if !self.ref_to_message_id.is_empty() {
            info.push_child(XmlElement::smd_text(
                names::REF_TO_MESSAGE_ID,
                self.ref_to_message_id.as_str(),
            ));
        }
        info
    }
}

impl ErrorEntry {
    fn to_xml(&self) -> XmlElement {
        let mut error = XmlElement::smd(names::ERROR);
        // (name, value, required by the schema)
        let attributes = [
            (names::CATEGORY, &self.category, false),
            (names::ERROR_CODE, &self.code, true),
            (names::ORIGIN, &self.origin, false),
            (names::SEVERITY, &self.severity, true),
            (names::SHORT_DESCRIPTION, &self.short_description, false),
        ];
        for (name, value, required) in attributes {
            if required || !value.is_empty() {
                error = error.with_attribute(name, value.as_str());
            }
        }

        if let Some(description) = &self.description {
            let mut element = XmlElement::smd_text(names::DESCRIPTION, description.text.as_str());
            if !description.language.is_empty() {
                element.attributes.push(XmlAttribute::qualified(
                    XML_NAMESPACE,
                    names::LANG,
                    description.language.as_str(),
                ));
            }
            error.push_child(element);
        }
        if !self.detail.is_empty() {
            error.push_child(XmlElement::smd_text(names::ERROR_DETAIL, self.detail.as_str()));
        }
        error
    }
}

impl ReceiptEntry {
    fn to_xml(&self) -> XmlElement {
        let mut receipt = XmlElement::smd(names::RECEIPT);
        receipt
            .children
            .extend(self.content.iter().cloned().map(XmlNode::Element));
        receipt
    }
}
