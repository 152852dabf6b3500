//! Names of the SMD schema version this crate implements

/// Namespace of every element defined by the signal meta-data schema
pub const SMD_NAMESPACE: &str = "http://holodeck-b2b.org/schemas/2015/08/smd";

/// Suffix appended to the sanitized message id to name an SMD file
pub const SMD_FILE_EXTENSION: &str = ".smd.xml";

/// Namespace bound to the reserved `xml` prefix
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace of namespace declarations themselves
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Element and attribute names of the SMD schema
pub mod names {
    pub const SIGNAL_MESSAGE: &str = "SignalMessage";
    pub const MESSAGE_INFO: &str = "MessageInfo";
    pub const TIMESTAMP: &str = "Timestamp";
    pub const MESSAGE_ID: &str = "MessageId";
    pub const REF_TO_MESSAGE_ID: &str = "RefToMessageId";
    pub const ERROR: &str = "Error";
    pub const DESCRIPTION: &str = "Description";
    pub const ERROR_DETAIL: &str = "ErrorDetail";
    pub const RECEIPT: &str = "Receipt";

    pub const CATEGORY: &str = "category";
    pub const ERROR_CODE: &str = "errorCode";
    pub const ORIGIN: &str = "origin";
    pub const SEVERITY: &str = "severity";
    pub const SHORT_DESCRIPTION: &str = "shortDescription";
    pub const LANG: &str = "lang";
}

/// Spaces per nesting level in written documents
pub const INDENT_SIZE: usize = 4;
