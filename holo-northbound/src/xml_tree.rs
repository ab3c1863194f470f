//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::io::Write;

use xml::reader::{ParserConfig, XmlEvent as ReaderEvent};
use xml::writer::{EmitterConfig, EventWriter, XmlEvent as WriterEvent};

use crate::error::{ParseError, StructuralError};

// Owned XML element tree.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub namespace: Option<String>,
    pub attributes: Vec<XmlAttribute>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XmlAttribute {
    pub name: String,
    pub namespace: Option<String>,
    pub value: String,
}

// ===== impl XmlElement =====

impl XmlElement {
    pub fn new(name: &str, namespace: Option<&str>) -> XmlElement {
        XmlElement {
            name: name.to_owned(),
            namespace: namespace.map(str::to_owned),
            ..Default::default()
        }
    }

    // Parses a complete XML document and returns its root element.
    pub fn parse(text: &str) -> Result<XmlElement, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyDocument);
        }

        let reader = ParserConfig::new()
            .ignore_comments(true)
            .coalesce_characters(true)
            .cdata_to_characters(true)
            .create_reader(text.as_bytes());

        let mut stack: Vec<XmlElement> = vec![];
        let mut root = None;
        for event in reader {
            match event? {
                ReaderEvent::StartElement {
                    name, attributes, ..
                } => {
                    let attributes = attributes
                        .into_iter()
                        .map(|attr| XmlAttribute {
                            name: attr.name.local_name,
                            namespace: attr.name.namespace,
                            value: attr.value,
                        })
                        .collect();
                    stack.push(XmlElement {
                        name: name.local_name,
                        namespace: name.namespace,
                        attributes,
                        ..Default::default()
                    });
                }
                ReaderEvent::EndElement { .. } => {
                    let Some(mut element) = stack.pop() else {
                        return Err(ParseError::Xml(
                            "unbalanced end element".to_owned(),
                        ));
                    };
                    // Drop indentation between child elements.
                    if !element.children.is_empty()
                        && element.text.trim().is_empty()
                    {
                        element.text.clear();
                    }
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                ReaderEvent::Characters(text)
                | ReaderEvent::Whitespace(text) => {
                    if let Some(element) = stack.last_mut() {
                        element.text.push_str(&text);
                    }
                }
                _ => (),
            }
        }

        root.ok_or(ParseError::EmptyDocument)
    }

    // Returns the first child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    // Returns whether this element has neither children nor text.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.trim().is_empty()
    }

    // Returns whether this element has the same name and namespace as the
    // given one. A missing namespace matches any namespace.
    pub fn same_node(&self, other: &XmlElement) -> bool {
        self.name == other.name
            && match (&self.namespace, &other.namespace) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
    }

    // Writes this element and its descendants. The default namespace is only
    // declared when it differs from the parent's.
    pub(crate) fn write<W: Write>(
        &self,
        writer: &mut EventWriter<W>,
        parent_ns: Option<&str>,
    ) -> Result<(), xml::writer::Error> {
        let namespace = self.namespace.as_deref();
        let mut start = WriterEvent::start_element(self.name.as_str());
        if let Some(ns) = namespace.filter(|ns| Some(*ns) != parent_ns) {
            start = start.default_ns(ns);
        }
        for attr in self.attributes.iter().filter(|a| a.namespace.is_none()) {
            start = start.attr(attr.name.as_str(), attr.value.as_str());
        }
        writer.write(start)?;
        if !self.text.is_empty() {
            writer.write(WriterEvent::characters(&self.text))?;
        }
        for child in &self.children {
            child.write(writer, namespace.or(parent_ns))?;
        }
        writer.write(WriterEvent::end_element())
    }

    pub fn to_xml(&self) -> Result<String, StructuralError> {
        let mut writer = new_writer();
        self.write(&mut writer, None)?;
        finish(writer)
    }
}

// ===== global functions =====

pub(crate) fn new_writer() -> EventWriter<Vec<u8>> {
    EmitterConfig::new()
        .perform_indent(false)
        .write_document_declaration(false)
        .create_writer(Vec::new())
}

pub(crate) fn finish(
    writer: EventWriter<Vec<u8>>,
) -> Result<String, StructuralError> {
    String::from_utf8(writer.into_inner())
        .map_err(|error| StructuralError::Encode(error.to_string()))
}
