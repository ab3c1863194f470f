//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::io::Write;

use holo_yang::{NETCONF_BASE_NS, SchemaNode};
use xml::name::Name;
use xml::writer::{EventWriter, XmlEvent};

use crate::client::Datastore;
use crate::codec::{EditOperation, Pair, PairValue, Segment};
use crate::error::StructuralError;
use crate::session::{CAPABILITY_BASE_1_0, CAPABILITY_BASE_1_1};
use crate::xml_tree;

// NETCONF operation carrying encoded pairs.
#[derive(Debug)]
pub enum Rpc<'a> {
    GetConfig {
        source: Datastore,
        filter: &'a [Pair],
    },
    Get {
        filter: &'a [Pair],
    },
    EditConfig {
        target: Datastore,
        config: &'a [Pair],
    },
    CloseSession,
}

// ===== impl Rpc =====

impl Rpc<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Rpc::GetConfig { .. } => "get-config",
            Rpc::Get { .. } => "get",
            Rpc::EditConfig { .. } => "edit-config",
            Rpc::CloseSession => "close-session",
        }
    }
}

// ===== helper functions =====

fn start<W: Write>(
    writer: &mut EventWriter<W>,
    name: &str,
) -> Result<(), xml::writer::Error> {
    writer.write(XmlEvent::start_element(name))
}

fn end<W: Write>(
    writer: &mut EventWriter<W>,
) -> Result<(), xml::writer::Error> {
    writer.write(XmlEvent::end_element())
}

fn text_element<W: Write>(
    writer: &mut EventWriter<W>,
    name: &str,
    text: &str,
) -> Result<(), xml::writer::Error> {
    start(writer, name)?;
    writer.write(XmlEvent::characters(text))?;
    end(writer)
}

fn start_node<W: Write>(
    writer: &mut EventWriter<W>,
    snode: &SchemaNode,
    parent_ns: &str,
    operation: Option<EditOperation>,
) -> Result<(), xml::writer::Error> {
    let mut event = XmlEvent::start_element(snode.name);
    if snode.module.namespace != parent_ns {
        event = event.default_ns(snode.module.namespace);
    }
    if let Some(operation) = operation {
        event =
            event.attr(Name::prefixed("operation", "nc"), operation.as_str());
    }
    writer.write(event)
}

// Renders a sequence of pairs as nested elements.
//
// Consecutive pairs sharing a path prefix share the corresponding elements,
// so the pairs must come in pre-order as produced by the codec.
fn write_pairs<W: Write>(
    writer: &mut EventWriter<W>,
    pairs: &[Pair],
    parent_ns: &str,
) -> Result<(), xml::writer::Error> {
    let mut stack: Vec<&Segment> = vec![];
    for pair in pairs {
        let leaf = pair.is_leaf();
        let containers = match leaf {
            true => &pair.path[..pair.path.len() - 1],
            false => &pair.path[..],
        };

        // Close the elements that aren't ancestors of this pair.
        let common = stack
            .iter()
            .zip(containers)
            .take_while(|(open, segment)| **open == *segment)
            .count();
        while stack.len() > common {
            end(writer)?;
            stack.pop();
        }

        // Open the missing ones.
        for (idx, segment) in containers.iter().enumerate().skip(common) {
            let ns = match idx {
                0 => parent_ns,
                _ => containers[idx - 1].snode.module.namespace,
            };
            let operation = match !leaf && idx == containers.len() - 1 {
                true => pair.operation,
                false => None,
            };
            start_node(writer, segment.snode, ns, operation)?;
            stack.push(segment);
        }

        if let Some(segment) = pair.path.last()
            && leaf
        {
            let ns = containers
                .last()
                .map(|parent| parent.snode.module.namespace)
                .unwrap_or(parent_ns);
            start_node(writer, segment.snode, ns, pair.operation)?;
            if let PairValue::Value(text) = &pair.value
                && !text.is_empty()
            {
                writer.write(XmlEvent::characters(text))?;
            }
            end(writer)?;
        }
    }

    for _ in stack {
        end(writer)?;
    }

    Ok(())
}

// ===== global functions =====

// Encodes a NETCONF <rpc> request.
pub fn encode_rpc(
    message_id: u64,
    rpc: &Rpc<'_>,
) -> Result<String, StructuralError> {
    let mut writer = xml_tree::new_writer();
    let message_id = message_id.to_string();
    writer.write(
        XmlEvent::start_element("rpc")
            .default_ns(NETCONF_BASE_NS)
            .ns("nc", NETCONF_BASE_NS)
            .attr("message-id", &message_id),
    )?;
    start(&mut writer, rpc.name())?;

    match rpc {
        Rpc::GetConfig { source, filter } => {
            start(&mut writer, "source")?;
            start(&mut writer, source.as_str())?;
            end(&mut writer)?;
            end(&mut writer)?;
            write_filter(&mut writer, filter)?;
        }
        Rpc::Get { filter } => {
            write_filter(&mut writer, filter)?;
        }
        Rpc::EditConfig { target, config } => {
            start(&mut writer, "target")?;
            start(&mut writer, target.as_str())?;
            end(&mut writer)?;
            end(&mut writer)?;
            start(&mut writer, "config")?;
            write_pairs(&mut writer, config, NETCONF_BASE_NS)?;
            end(&mut writer)?;
        }
        Rpc::CloseSession => (),
    }

    end(&mut writer)?;
    end(&mut writer)?;
    xml_tree::finish(writer)
}

fn write_filter<W: Write>(
    writer: &mut EventWriter<W>,
    filter: &[Pair],
) -> Result<(), xml::writer::Error> {
    writer.write(XmlEvent::start_element("filter").attr("type", "subtree"))?;
    write_pairs(writer, filter, NETCONF_BASE_NS)?;
    end(writer)
}

// Encodes pairs as a standalone <data> document.
pub fn encode_data(pairs: &[Pair]) -> Result<String, StructuralError> {
    let mut writer = xml_tree::new_writer();
    writer.write(
        XmlEvent::start_element("data")
            .default_ns(NETCONF_BASE_NS)
            .ns("nc", NETCONF_BASE_NS),
    )?;
    write_pairs(&mut writer, pairs, NETCONF_BASE_NS)?;
    end(&mut writer)?;
    xml_tree::finish(writer)
}

// Encodes the client <hello> message.
pub fn encode_hello() -> Result<String, StructuralError> {
    let mut writer = xml_tree::new_writer();
    writer.write(XmlEvent::start_element("hello").default_ns(NETCONF_BASE_NS))?;
    start(&mut writer, "capabilities")?;
    text_element(&mut writer, "capability", CAPABILITY_BASE_1_0)?;
    text_element(&mut writer, "capability", CAPABILITY_BASE_1_1)?;
    end(&mut writer)?;
    end(&mut writer)?;
    xml_tree::finish(writer)
}
