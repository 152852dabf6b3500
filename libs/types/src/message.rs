//! Message units received by the gateway
//!
//! Only the two signal kinds (receipts and errors) can be turned into a signal
//! meta-data document. User messages and pull requests are modelled so callers
//! can hand any received unit to a deliverer and get a proper rejection.

use crate::element::ElementNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// Any message unit the gateway can deliver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageUnit {
    UserMessage(UserMessage),
    PullRequest(PullRequest),
    Receipt(Receipt),
    Error(ErrorSignal),
}

/// Borrowed view of a message unit that is a signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal<'a> {
    Receipt(&'a Receipt),
    Error(&'a ErrorSignal),
}

/// Primary content message; carried only so it can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    pub message_id: String,
}

/// Pull request signal; not a notification subject either
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub message_id: String,
}

/// Receipt signal acknowledging a user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub message_id: String,
    #[serde(default)]
    pub ref_to_message_id: String,
    #[serde(with = "crate::time::rfc3339")]
    pub timestamp: SystemTime,
    /// Substantive receipt content, normally at least one element
    pub content: Vec<ElementNode>,
}

/// Error signal reporting one or more processing errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSignal {
    pub message_id: String,
    #[serde(default)]
    pub ref_to_message_id: String,
    #[serde(with = "crate::time::rfc3339")]
    pub timestamp: SystemTime,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// A single error reported in an error signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub severity: Severity,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Warning,
    Failure,
}

/// Human readable error description with its language tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub text: String,
    #[serde(default)]
    pub language: String,
}

impl MessageUnit {
    pub fn message_id(&self) -> &str {
        match self {
            MessageUnit::UserMessage(m) => &m.message_id,
            MessageUnit::PullRequest(m) => &m.message_id,
            MessageUnit::Receipt(m) => &m.message_id,
            MessageUnit::Error(m) => &m.message_id,
        }
    }

    /// Name of the message unit kind, used in log lines and errors
    pub fn kind(&self) -> &'static str {
        match self {
            MessageUnit::UserMessage(_) => "UserMessage",
            MessageUnit::PullRequest(_) => "PullRequest",
            MessageUnit::Receipt(_) => "Receipt",
            MessageUnit::Error(_) => "ErrorMessage",
        }
    }

    /// Classify the unit, returning `None` for anything that is not a receipt or error
    pub fn as_signal(&self) -> Option<Signal<'_>> {
        match self {
            MessageUnit::Receipt(receipt) => Some(Signal::Receipt(receipt)),
            MessageUnit::Error(error) => Some(Signal::Error(error)),
            MessageUnit::UserMessage(_) | MessageUnit::PullRequest(_) => None,
        }
    }
}

impl Signal<'_> {
    pub fn message_id(&self) -> &str {
        match self {
            Signal::Receipt(r) => &r.message_id,
            Signal::Error(e) => &e.message_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Signal::Receipt(_) => "Receipt",
            Signal::Error(_) => "ErrorMessage",
        }
    }
}

impl Severity {
    /// Symbolic name as written to the meta-data document
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Failure => "FAILURE",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Description {
    /// True when there is no text worth writing out
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
