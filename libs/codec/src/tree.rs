//! Serializer-side XML tree
//!
//! Everything the writer emits is first built as an [`XmlElement`] tree: the
//! SMD elements themselves and the receipt content copied in by
//! [`convert`](crate::convert::convert). Namespace declarations are not part of
//! the tree; the writer derives them from element and attribute namespaces.

use crate::constants::SMD_NAMESPACE;

/// Qualified element name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlName {
    /// `None` is "no namespace", distinct from `Some("")`
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: XmlName,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(namespace: Option<String>, local_name: impl Into<String>) -> Self {
        Self {
            name: XmlName {
                namespace,
                prefix: None,
                local_name: local_name.into(),
            },
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element of the SMD schema, in the default namespace
    pub fn smd(local_name: &str) -> Self {
        Self::new(Some(SMD_NAMESPACE.to_string()), local_name)
    }

    /// SMD element holding only text
    pub fn smd_text(local_name: &str, text: impl Into<String>) -> Self {
        Self::smd(local_name).with_text(text)
    }

    pub fn with_attribute(mut self, local_name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(XmlAttribute::unqualified(local_name, value));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given local name
    pub fn find(&self, local_name: &str) -> Option<&XmlElement> {
        self.child_elements()
            .find(|child| child.name.local_name == local_name)
    }

    /// Concatenated text children of this element only
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Value of the first attribute with this local name
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local_name == local_name)
            .map(|a| a.value.as_str())
    }
}

impl XmlAttribute {
    pub fn unqualified(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
            value: value.into(),
        }
    }

    pub fn qualified(
        namespace: impl Into<String>,
        local_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_helpers() {
        let element = XmlElement::smd("Error")
            .with_attribute("errorCode", "EBMS:0301")
            .with_child(XmlElement::smd_text("ErrorDetail", "missing receipt"))
            .with_text("a")
            .with_text("b");

        assert_eq!(element.name.namespace.as_deref(), Some(SMD_NAMESPACE));
        assert_eq!(element.attribute("errorCode"), Some("EBMS:0301"));
        assert_eq!(element.attribute("severity"), None);
        assert_eq!(element.find("ErrorDetail").unwrap().text(), "missing receipt");
        assert!(element.find("Description").is_none());
        assert_eq!(element.text(), "ab");
    }
}
