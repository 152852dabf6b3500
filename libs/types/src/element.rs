//! Generic XML element tree
//!
//! Receipt content arrives as arbitrary XML. The gateway decodes it into this
//! tree; the order of attributes and children is significant and kept as-is.

use serde::{Deserialize, Serialize};

/// An XML element with its namespace, prefix, attributes and children.
///
/// A `namespace_uri` of `None` means the element is in no namespace, which is
/// not the same as `Some(String::new())`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_uri: Option<String>,
    pub local_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

/// Attribute of an [`ElementNode`]; unqualified when `namespace_uri` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_uri: Option<String>,
    pub local_name: String,
    pub value: String,
}

/// Child node of an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Element(ElementNode),
    Text(String),
}

impl ElementNode {
    /// Create an element without namespace, attributes or children
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            namespace_uri: None,
            local_name: local_name.into(),
            prefix: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace_uri: impl Into<String>) -> Self {
        self.namespace_uri = Some(namespace_uri.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Append an unqualified attribute
    pub fn with_attribute(mut self, local_name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(local_name, value));
        self
    }

    /// Append an attribute in the given namespace
    pub fn with_ns_attribute(
        mut self,
        namespace_uri: impl Into<String>,
        local_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes
            .push(Attribute::namespaced(namespace_uri, local_name, value));
        self
    }

    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Iterate over the element children, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }
}

impl Attribute {
    pub fn new(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace_uri: None,
            local_name: local_name.into(),
            value: value.into(),
        }
    }

    pub fn namespaced(
        namespace_uri: impl Into<String>,
        local_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace_uri: Some(namespace_uri.into()),
            local_name: local_name.into(),
            value: value.into(),
        }
    }
}
