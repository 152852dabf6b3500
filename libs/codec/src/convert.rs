//! Element tree conversion
//!
//! Copies a decoded [`ElementNode`] subtree into the serializer's
//! [`XmlElement`] tree. The copy is owned and independent of the source;
//! namespace, prefix, attribute order, child order and text (including
//! whitespace-only text and empty elements) are kept exactly.

use crate::error::ConvertError;
use crate::tree::{XmlAttribute, XmlElement, XmlName, XmlNode};
use signal_types::{Attribute, ElementNode, Node};

/// Deepest element nesting the converter recurses into
pub const MAX_ELEMENT_DEPTH: usize = 512;

/// Convert an element and all of its descendants.
///
/// The only failure is running out of recursion budget on pathologically
/// deep trees; that is reported and never retried.
pub fn convert(source: &ElementNode) -> Result<XmlElement, ConvertError> {
    convert_at(source, 1)
}

fn convert_at(source: &ElementNode, depth: usize) -> Result<XmlElement, ConvertError> {
    if depth > MAX_ELEMENT_DEPTH {
        return Err(ConvertError::DepthExceeded {
            limit: MAX_ELEMENT_DEPTH,
            element: source.local_name.clone(),
        });
    }

    let mut children = Vec::with_capacity(source.children.len());
    for child in &source.children {
        children.push(match child {
            Node::Element(element) => XmlNode::Element(convert_at(element, depth + 1)?),
            Node::Text(text) => XmlNode::Text(text.clone()),
        });
    }

    Ok(XmlElement {
        name: XmlName {
            namespace: source.namespace_uri.clone(),
            prefix: source.prefix.clone(),
            local_name: source.local_name.clone(),
        },
        attributes: source.attributes.iter().map(convert_attribute).collect(),
        children,
    })
}

fn convert_attribute(attribute: &Attribute) -> XmlAttribute {
    match &attribute.namespace_uri {
        Some(namespace) => {
            XmlAttribute::qualified(namespace.as_str(), attribute.local_name.as_str(), attribute.value.as_str())
        }
        None => XmlAttribute::unqualified(attribute.local_name.as_str(), attribute.value.as_str()),
    }
}
