//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use holo_yang::{LeafType, SchemaNode};
use serde_json::{Map, Value as JsonValue, json};

use crate::entity::{Entity, Field, LeafValue, Value};
use crate::value;

// ===== helper functions =====

// Returns the member name of a node, qualified with its module name when
// the module differs from the parent's.
fn member_name(snode: &SchemaNode, parent: Option<&SchemaNode>) -> String {
    match parent {
        Some(parent) if std::ptr::eq(parent.module, snode.module) => {
            snode.name.to_owned()
        }
        _ => format!("{}:{}", snode.module.name, snode.name),
    }
}

fn scalar(value: &Value, ltype: &LeafType) -> JsonValue {
    match (ltype.real_type(), value) {
        (LeafType::Bool, Value::Bool(value)) => JsonValue::Bool(*value),
        (
            LeafType::Int8 | LeafType::Int16 | LeafType::Int32,
            Value::Int(value),
        ) => json!(value),
        (
            LeafType::Uint8 | LeafType::Uint16 | LeafType::Uint32,
            Value::Uint(value),
        ) => json!(value),
        // 64-bit numbers and everything else are encoded as strings.
        _ => match value::to_text(value, ltype) {
            Ok(text) => JsonValue::String(text),
            Err(_) => JsonValue::String(value.to_string()),
        },
    }
}

fn entity_members(entity: &dyn Entity) -> Map<String, JsonValue> {
    let parent = entity.schema();
    let mut members = Map::new();
    for field in entity.fields() {
        let snode = field.schema();
        let ltype = snode.leaf_type.as_ref().unwrap_or(&LeafType::String);
        let member = match field {
            Field::Leaf(leaf) => match leaf.leaf_value() {
                LeafValue::Scalar(value) => scalar(value, ltype),
                LeafValue::Presence => json!([null]),
                LeafValue::Reference(path) => {
                    JsonValue::String(path.to_string())
                }
                LeafValue::Absent => continue,
            },
            Field::LeafList(leaf_list) => {
                if leaf_list.values().is_empty() {
                    continue;
                }
                leaf_list
                    .values()
                    .iter()
                    .map(|value| scalar(value, ltype))
                    .collect()
            }
            Field::Container(child) => {
                if !child.has_data() {
                    continue;
                }
                JsonValue::Object(entity_members(child))
            }
            Field::List(list) => {
                if list.is_empty() {
                    continue;
                }
                list.entries()
                    .into_iter()
                    .map(|entry| JsonValue::Object(entity_members(entry)))
                    .collect()
            }
        };
        members.insert(member_name(snode, Some(parent)), member);
    }
    members
}

// ===== global functions =====

// Renders an entity tree as JSON following the RFC 7951 conventions.
pub fn to_json(entity: &dyn Entity) -> JsonValue {
    let snode = entity.schema();
    let mut root = Map::new();
    root.insert(
        member_name(snode, snode.parent),
        JsonValue::Object(entity_members(entity)),
    );
    JsonValue::Object(root)
}
