//! # SMD Codec - Signal Meta-Data Documents
//!
//! ## Purpose
//!
//! Turns received signals (receipts and errors) into the normalized signal
//! meta-data document a business application consumes, and encodes that
//! document as indented XML in the fixed SMD namespace.
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types  →  [SignalDocumentBuilder]  →  SignalMetaData  →  [XmlWriter]  →  bytes
//!  Receipt            ↓                                              ↑
//!  ErrorSignal   convert(ElementNode) → XmlElement ─────────────────┘
//! ```
//!
//! ## What This Crate Contains
//! - `convert`: lossless copy of a receipt's element tree into the serializer tree
//! - `SignalDocumentBuilder`: maps either signal kind onto one document schema
//! - `SignalMetaData`: the document model, with exactly one payload kind
//! - `XmlWriter`: namespace-aware indented XML output over `quick-xml`
//!
//! ## What This Crate Does NOT Contain
//! - File naming or file creation (belongs in the notifier service)
//! - Configuration loading (belongs in libs/config)

pub mod builder;
pub mod constants;
pub mod convert;
pub mod document;
pub mod error;
pub mod tree;
pub mod writer;

pub use builder::{convert_timestamp, SignalDocumentBuilder};
pub use constants::{SMD_FILE_EXTENSION, SMD_NAMESPACE};
pub use convert::{convert, MAX_ELEMENT_DEPTH};
pub use document::{DescriptionEntry, ErrorEntry, MessageInfo, ReceiptEntry, SignalMetaData, SmdPayload};
pub use error::{BuildError, ConvertError, WriteError};
pub use tree::{XmlAttribute, XmlElement, XmlName, XmlNode};
pub use writer::{write_document, XmlWriter};
