//! Indented, namespace-aware XML output
//!
//! The tree carries namespaces, not declarations. While writing, the writer
//! keeps a stack of in-scope prefix bindings and declares on each element only
//! what is not already bound:
//!
//! - prefixed elements declare `xmlns:p` unless `p` is bound to the same URI
//! - unprefixed namespaced elements (re)declare the default namespace
//! - elements in no namespace reset an active default with `xmlns=""`
//! - namespaced attributes reuse an in-scope prefix or get a fresh `nsN` one
//! - the reserved `xml` prefix is never declared
//!
//! An empty namespace string is written the same as no namespace. If two
//! attributes of one element end up with the same written name, the first one
//! is kept and the others are dropped with a warning.
//!
//! Indentation is applied to every element start, including elements inside
//! mixed content: `<p><b/>tail</p>` is written with a line break and indent
//! before `<b/>`. Text nodes themselves are written unchanged.

use crate::constants::{INDENT_SIZE, XMLNS_NAMESPACE, XML_NAMESPACE};
use crate::document::SignalMetaData;
use crate::error::WriteError;
use crate::tree::{XmlElement, XmlNode};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use tracing::warn;

/// Write a signal meta-data document to `sink` as indented UTF-8 XML
pub fn write_document<W: Write>(document: &SignalMetaData, sink: W) -> Result<W, WriteError> {
    XmlWriter::new(sink).write(&document.to_xml())
}

/// Streams one [`XmlElement`] tree, with declaration, to an `io::Write`
pub struct XmlWriter<W: Write> {
    writer: Writer<W>,
    scope: NamespaceScope,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: Writer::new_with_indent(sink, b' ', INDENT_SIZE),
            scope: NamespaceScope::default(),
        }
    }

    /// Write the whole document and hand back the flushed sink
    pub fn write(mut self, root: &XmlElement) -> Result<W, WriteError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        self.write_element(root)?;

        let mut sink = self.writer.into_inner();
        sink.write_all(b"\n")?;
        sink.flush()?;
        Ok(sink)
    }

    fn write_element(&mut self, element: &XmlElement) -> Result<(), WriteError> {
        self.scope.enter();
        let mut declarations: Vec<(String, String)> = Vec::new();

        let qname = self.element_qname(element, &mut declarations);
        let attributes = self.attribute_pairs(element, &mut declarations);

        let mut start = BytesStart::new(qname.as_str());
        for (name, value) in declarations.iter().chain(attributes.iter()) {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if element.children.is_empty() {
            self.writer.write_event(Event::Empty(start))?;
        } else {
            self.writer.write_event(Event::Start(start))?;
            for child in &element.children {
                match child {
                    XmlNode::Element(child) => self.write_element(child)?,
                    XmlNode::Text(text) => {
                        self.writer.write_event(Event::Text(BytesText::new(text)))?
                    }
                }
            }
            self.writer
                .write_event(Event::End(BytesEnd::new(qname.as_str())))?;
        }

        self.scope.leave();
        Ok(())
    }

    /// Qualified element name, binding its namespace in the current scope if needed
    fn element_qname(&mut self, element: &XmlElement, declarations: &mut Vec<(String, String)>) -> String {
        let name = &element.name;
        let namespace = name.namespace.as_deref().filter(|ns| !ns.is_empty());
        let prefix = name.prefix.as_deref().filter(|p| !p.is_empty());

        match (namespace, prefix) {
            (Some(_), Some("xml")) => format!("xml:{}", name.local_name),
            (Some(uri), Some(prefix)) => {
                if self.scope.resolve(prefix) != Some(uri) {
                    self.scope.bind(prefix, uri);
                    declarations.push((format!("xmlns:{}", prefix), uri.to_string()));
                }
                format!("{}:{}", prefix, name.local_name)
            }
            (Some(uri), None) => {
                if self.scope.resolve("") != Some(uri) {
                    self.scope.bind("", uri);
                    declarations.push(("xmlns".to_string(), uri.to_string()));
                }
                name.local_name.clone()
            }
            (None, _) => {
                if self.scope.resolve("").is_some_and(|default| !default.is_empty()) {
                    self.scope.bind("", "");
                    declarations.push(("xmlns".to_string(), String::new()));
                }
                name.local_name.clone()
            }
        }
    }

    /// Attribute name/value pairs in source order, declaring prefixes as needed
    fn attribute_pairs(
        &mut self,
        element: &XmlElement,
        declarations: &mut Vec<(String, String)>,
    ) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(element.attributes.len());
        for attribute in &element.attributes {
            let name = match attribute.namespace.as_deref().filter(|ns| !ns.is_empty()) {
                None => attribute.local_name.clone(),
                Some(XML_NAMESPACE) => format!("xml:{}", attribute.local_name),
                // declarations are generated, never copied
                Some(XMLNS_NAMESPACE) => continue,
                Some(uri) => {
                    let prefix = match self.scope.prefix_for(uri) {
                        Some(prefix) => prefix,
                        None => {
                            let prefix = self.scope.fresh_prefix();
                            self.scope.bind(&prefix, uri);
                            declarations.push((format!("xmlns:{}", prefix), uri.to_string()));
                            prefix
                        }
                    };
                    format!("{}:{}", prefix, attribute.local_name)
                }
            };
            if pairs
                .iter()
                .chain(declarations.iter())
                .any(|(existing, _)| *existing == name)
            {
                warn!(
                    "Dropping duplicate attribute {} on <{}>",
                    name, element.name.local_name
                );
                continue;
            }
            pairs.push((name, attribute.value.clone()));
        }
        pairs
    }
}

/// Prefix bindings visible at the element being written; `""` is the default namespace
#[derive(Debug, Default)]
struct NamespaceScope {
    bindings: Vec<(String, String)>,
    frames: Vec<usize>,
}

impl NamespaceScope {
    fn enter(&mut self) {
        self.frames.push(self.bindings.len());
    }

    fn leave(&mut self) {
        if let Some(len) = self.frames.pop() {
            self.bindings.truncate(len);
        }
    }

    fn bind(&mut self, prefix: &str, uri: &str) {
        self.bindings.push((prefix.to_string(), uri.to_string()));
    }

    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// A non-default prefix currently bound to `uri`
    fn prefix_for(&self, uri: &str) -> Option<String> {
        self.bindings
            .iter()
            .rev()
            .filter(|(p, u)| !p.is_empty() && u == uri)
            .find(|(p, _)| self.resolve(p) == Some(uri))
            .map(|(p, _)| p.clone())
    }

    fn fresh_prefix(&self) -> String {
        (1..)
            .map(|n| format!("ns{}", n))
            .find(|candidate| self.resolve(candidate).is_none())
            .unwrap_or_default()
    }
}
