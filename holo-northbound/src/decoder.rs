//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::HashMap;

use holo_yang::{LeafType, NETCONF_BASE_NS, SchemaNode, SchemaNodeKind};

use crate::codec::{Pair, PairValue, Segment, display_path};
use crate::debug::Debug;
use crate::error::{ParseError, RpcError};
use crate::xml_tree::XmlElement;

// Decoded <rpc-reply> content.
#[derive(Debug, Eq, PartialEq)]
pub enum Reply {
    Ok,
    Data(XmlElement),
    Error(Vec<RpcError>),
}

// Number of list entries seen so far under a parent element, indexed by list
// node and key values.
type EntryCount =
    HashMap<(&'static str, &'static str, Vec<(&'static str, String)>), usize>;

// ===== helper functions =====

fn is_base(element: &XmlElement) -> bool {
    element.namespace.as_deref() == Some(NETCONF_BASE_NS)
}

fn child_text(element: &XmlElement, name: &str) -> Option<String> {
    element.child(name).map(|child| child.text.trim().to_owned())
}

fn decode_rpc_error(element: &XmlElement) -> RpcError {
    let info = element
        .child("error-info")
        .map(|info| {
            info.children
                .iter()
                .map(|child| (child.name.clone(), child.text.trim().to_owned()))
                .collect()
        })
        .unwrap_or_default();

    RpcError {
        error_type: child_text(element, "error-type").unwrap_or_default(),
        tag: child_text(element, "error-tag").unwrap_or_default(),
        severity: child_text(element, "error-severity").unwrap_or_default(),
        app_tag: child_text(element, "error-app-tag"),
        path: child_text(element, "error-path"),
        message: child_text(element, "error-message"),
        info,
    }
}

// Returns whether the element corresponds to the given schema node.
fn matches_node(element: &XmlElement, snode: &SchemaNode) -> bool {
    element.name == snode.name
        && element
            .namespace
            .as_deref()
            .is_none_or(|ns| ns == snode.module.namespace)
}

fn decode_node(
    element: &XmlElement,
    entry_count: &mut EntryCount,
    snode: &'static SchemaNode,
    path: &mut Vec<Segment>,
    pairs: &mut Vec<Pair>,
) -> Result<(), ParseError> {
    match snode.kind {
        SchemaNodeKind::Leaf | SchemaNodeKind::LeafList => {
            let value = match snode.leaf_type.as_ref().map(LeafType::real_type)
            {
                Some(LeafType::Empty) => PairValue::Presence,
                _ => PairValue::Value(element.text.clone()),
            };
            path.push(Segment::new(snode));
            pairs.push(Pair {
                path: path.clone(),
                value,
                operation: None,
            });
            path.pop();
            return Ok(());
        }
        SchemaNodeKind::Container => {
            path.push(Segment::new(snode));
        }
        SchemaNodeKind::List => {
            let keys = entry_keys(element, snode, path)?;
            // Entries sharing the same keys are told apart by position.
            let count = entry_count
                .entry((snode.module.namespace, snode.name, keys.clone()))
                .or_default();
            let instance = *count;
            *count += 1;
            path.push(Segment {
                snode,
                keys,
                instance,
            });
        }
    }

    pairs.push(Pair {
        path: path.clone(),
        value: PairValue::Marker,
        operation: None,
    });
    let mut entry_count = EntryCount::new();
    for child in &element.children {
        match snode.child(&child.name, child.namespace.as_deref()) {
            Some(csnode) => {
                decode_node(child, &mut entry_count, csnode, path, pairs)?
            }
            None => {
                Debug::UnknownNodeSkipped(
                    &child.name,
                    child.namespace.as_deref(),
                )
                .log();
            }
        }
    }
    path.pop();

    Ok(())
}

fn entry_keys(
    element: &XmlElement,
    snode: &'static SchemaNode,
    path: &[Segment],
) -> Result<Vec<(&'static str, String)>, ParseError> {
    snode
        .keys
        .iter()
        .map(|key| match child_text(element, key) {
            Some(text) => Ok((*key, text)),
            None => {
                let mut path = path.to_vec();
                path.push(Segment::new(snode));
                Err(ParseError::MissingListKey(
                    display_path(&path),
                    (*key).to_owned(),
                ))
            }
        })
        .collect()
}

// ===== global functions =====

// Parses an <rpc-reply> and checks that it answers the given request.
pub fn decode_reply(text: &str, message_id: u64) -> Result<Reply, ParseError> {
    let root = XmlElement::parse(text)?;
    if root.name != "rpc-reply" || !is_base(&root) {
        return Err(ParseError::UnexpectedRoot(root.name));
    }
    let reply_id = root.attribute("message-id");
    if reply_id != Some(message_id.to_string().as_str()) {
        return Err(ParseError::MessageIdMismatch(
            message_id,
            reply_id.map(str::to_owned),
        ));
    }

    let errors: Vec<_> = root
        .children
        .iter()
        .filter(|child| child.name == "rpc-error")
        .map(decode_rpc_error)
        .collect();
    if !errors.is_empty() {
        return Ok(Reply::Error(errors));
    }

    let mut children = root.children.into_iter();
    match children.find(|child| child.name == "data" || child.name == "ok") {
        Some(data) if data.name == "data" => Ok(Reply::Data(data)),
        Some(_) => Ok(Reply::Ok),
        None => Err(ParseError::UnexpectedReply),
    }
}

// Converts the content of a <data> element into pairs, keeping only the
// subtree rooted at the top-level node of the given schema node.
//
// Unknown nodes are skipped. A reply holding content but nothing under a
// known top-level node is rejected.
pub fn decode_data(
    data: &XmlElement,
    snode: &'static SchemaNode,
) -> Result<Vec<Pair>, ParseError> {
    let root = snode.root();
    let mut pairs = vec![];
    let mut path = vec![];
    let mut unknown = None;
    let mut entry_count = EntryCount::new();
    for child in &data.children {
        if matches_node(child, root) {
            decode_node(child, &mut entry_count, root, &mut path, &mut pairs)?;
        } else {
            Debug::UnknownNodeSkipped(&child.name, child.namespace.as_deref())
                .log();
            if unknown.is_none() {
                unknown = Some(child);
            }
        }
    }

    match unknown {
        Some(child) if pairs.is_empty() => {
            let name = match &child.namespace {
                Some(ns) => format!("{{{}}}{}", ns, child.name),
                None => child.name.clone(),
            };
            Err(ParseError::UnknownSchemaRoot(name))
        }
        _ => Ok(pairs),
    }
}

// Parses a <hello> message and returns the advertised capabilities.
pub fn decode_hello(text: &str) -> Result<Vec<String>, ParseError> {
    let root = XmlElement::parse(text)?;
    if root.name != "hello" || !is_base(&root) {
        return Err(ParseError::UnexpectedRoot(root.name));
    }

    let capabilities = root
        .child("capabilities")
        .map(|capabilities| {
            capabilities
                .children
                .iter()
                .filter(|child| child.name == "capability")
                .map(|child| child.text.trim().to_owned())
                .collect()
        })
        .unwrap_or_default();

    Ok(capabilities)
}
