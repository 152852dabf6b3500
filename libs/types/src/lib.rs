//! # Signal Types
//!
//! Already-decoded message units as handed over by the messaging gateway.
//!
//! ## Design Philosophy
//!
//! - **Read-only input**: the notifier never mutates a message unit, it only
//!   reads the fields it needs to build a signal meta-data document
//! - **Closed set of kinds**: `MessageUnit` is a sum type, so classification is a
//!   `match` rather than runtime type inspection
//! - **Owned XML content**: receipt content is a plain owned element tree with
//!   no back references, preserving attribute and child order
//!
//! ## Quick Start
//!
//! ```rust
//! use signal_types::{ElementNode, MessageUnit, Receipt};
//! use std::time::SystemTime;
//!
//! let content = ElementNode::new("NonRepudiationInformation")
//!     .with_namespace("http://docs.oasis-open.org/ebxml-bp/ebbp-signals-2.0")
//!     .with_prefix("ebbp");
//!
//! let unit = MessageUnit::Receipt(Receipt {
//!     message_id: "rcpt-01@gateway".to_string(),
//!     ref_to_message_id: "msg-01@partner".to_string(),
//!     timestamp: SystemTime::now(),
//!     content: vec![content],
//! });
//!
//! assert!(unit.as_signal().is_some());
//! ```

pub mod element;
pub mod message;
pub mod time;

pub use element::{Attribute, ElementNode, Node};
pub use message::{
    Description, ErrorDetail, ErrorSignal, MessageUnit, PullRequest, Receipt, Severity, Signal,
    UserMessage,
};
pub use time::instant_to_utc;
