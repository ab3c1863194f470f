//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Conversion between entity trees and ordered (path, value) pairs.
//!
//! Encoding runs in two phases. The first phase walks the whole tree and
//! resolves every reference leaf into the current value of its target. The
//! second phase performs a pre-order traversal emitting the pairs required
//! by the requested operation. Decoding applies a sequence of pairs to an
//! entity skeleton and prunes whatever ended up empty.

use std::collections::{HashMap, HashSet};

use derive_new::new;
use holo_yang::{LeafType, SchemaNode, SchemaNodeKind};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::client::ValidationLevel;
use crate::debug::Debug;
use crate::entity::{
    Entity, EntityList, Field, FieldMut, FilterState, LeafValue, Value, YLeaf,
};
use crate::error::{ParseError, StructuralError};
use crate::path::{InstancePath, PathSegment};
use crate::value;

// One level of an instance path.
#[derive(Clone, Debug, Eq, new, PartialEq)]
pub struct Segment {
    pub snode: &'static SchemaNode,
    // Key values of list entries, in schema key order.
    #[new(default)]
    pub keys: Vec<(&'static str, String)>,
    // Position among the preceding sibling entries sharing the same keys.
    #[new(default)]
    pub instance: usize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PairValue {
    // Container or list entry establishing the hierarchy.
    Marker,
    // Leaf requested without a value.
    Select,
    Value(String),
    // Existing empty-typed leaf.
    Presence,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pair {
    pub path: Vec<Segment>,
    pub value: PairValue,
    pub operation: Option<EditOperation>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditOperation {
    Create,
    Merge,
    Replace,
    Delete,
    Remove,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncodeMode {
    // Subtree filter of a read request.
    Read,
    // Plain data tree, without edit operations.
    Data,
    Edit(EditOperation),
}

// Value recorded for a leaf during reference resolution.
#[derive(Debug)]
enum IndexEntry {
    Text(String),
    Reference(String),
}

// Reference leaf awaiting resolution.
#[derive(Debug)]
struct PendingReference {
    leaf: usize,
    path: String,
    target: String,
}

#[derive(Debug)]
struct ReferenceCollector {
    root: &'static SchemaNode,
    path: Vec<Segment>,
    index: HashMap<String, IndexEntry>,
    pending: Vec<PendingReference>,
}

#[derive(Debug)]
struct PairEncoder {
    references: HashMap<usize, String>,
    strict: bool,
    path: Vec<Segment>,
    pairs: Vec<Pair>,
}

// ===== impl Pair =====

impl Pair {
    // Returns whether this pair addresses a leaf or leaf-list.
    pub fn is_leaf(&self) -> bool {
        self.path.last().is_some_and(|segment| {
            matches!(
                segment.snode.kind,
                SchemaNodeKind::Leaf | SchemaNodeKind::LeafList
            )
        })
    }
}

// ===== impl EditOperation =====

impl EditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditOperation::Create => "create",
            EditOperation::Merge => "merge",
            EditOperation::Replace => "replace",
            EditOperation::Delete => "delete",
            EditOperation::Remove => "remove",
        }
    }

    pub fn is_removal(&self) -> bool {
        matches!(self, EditOperation::Delete | EditOperation::Remove)
    }
}

impl std::fmt::Display for EditOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ===== impl ReferenceCollector =====

impl ReferenceCollector {
    fn walk(&mut self, entity: &dyn Entity) -> Result<(), StructuralError> {
        for field in entity.fields() {
            match field {
                Field::Leaf(leaf) => self.record_leaf(leaf)?,
                Field::LeafList(..) => (),
                Field::Container(child) => {
                    self.path.push(Segment::new(child.schema()));
                    self.walk(child)?;
                    self.path.pop();
                }
                Field::List(list) => {
                    for entry in list.entries() {
                        let keys = entry
                            .key_leaves()
                            .into_iter()
                            .filter_map(|leaf| {
                                let text = match leaf.leaf_value() {
                                    LeafValue::Scalar(value) => {
                                        value::to_text(value, leaf_type(leaf))
                                            .ok()?
                                    }
                                    _ => return None,
                                };
                                Some((leaf.schema().name, text))
                            })
                            .collect();
                        self.path.push(Segment {
                            snode: list.schema(),
                            keys,
                            instance: 0,
                        });
                        self.walk(entry)?;
                        self.path.pop();
                    }
                }
            }
        }

        Ok(())
    }

    fn record_leaf(&mut self, leaf: &YLeaf) -> Result<(), StructuralError> {
        self.path.push(Segment::new(leaf.schema()));
        let path = display_path(&self.path);
        match leaf.leaf_value() {
            LeafValue::Scalar(value) => {
                if let Ok(text) = value::to_text(value, leaf_type(leaf)) {
                    self.index.entry(path).or_insert(IndexEntry::Text(text));
                }
            }
            LeafValue::Reference(target) => {
                let target = self.canonicalize(target).ok_or_else(|| {
                    StructuralError::UnresolvedReference(
                        path.clone(),
                        target.to_string(),
                    )
                })?;
                self.index
                    .entry(path.clone())
                    .or_insert(IndexEntry::Reference(target.clone()));
                self.pending.push(PendingReference {
                    leaf: leaf_id(leaf),
                    path,
                    target,
                });
            }
            LeafValue::Absent | LeafValue::Presence => (),
        }
        self.path.pop();

        Ok(())
    }

    // Converts the target of a reference into the canonical form used as
    // index key. Relative paths start at the reference leaf itself.
    fn canonicalize(&self, target: &InstancePath) -> Option<String> {
        let mut path = match target.absolute {
            true => vec![],
            false => self.path.clone(),
        };

        for segment in &target.segments {
            let (module, name, keys) = match segment {
                PathSegment::Parent => {
                    path.pop()?;
                    continue;
                }
                PathSegment::Node { module, name, keys } => {
                    (module, name, keys)
                }
            };
            let module_matches = |snode: &SchemaNode| {
                module.as_ref().is_none_or(|module| {
                    *module == snode.module.name
                        || *module == snode.module.prefix
                })
            };

            let snode = match path.last() {
                Some(parent) => parent
                    .snode
                    .children
                    .iter()
                    .copied()
                    .find(|child| {
                        child.name == name.as_str() && module_matches(child)
                    })?,
                None => {
                    let root = self.root;
                    (root.name == name.as_str() && module_matches(root))
                        .then_some(root)?
                }
            };
            let keys = snode
                .keys
                .iter()
                .filter_map(|key| {
                    keys.iter()
                        .find(|(name, _)| name.as_str() == *key)
                        .map(|(_, value)| (*key, value.clone()))
                })
                .collect();
            path.push(Segment {
                snode,
                keys,
                instance: 0,
            });
        }

        Some(display_path(&path))
    }

    // Resolves all pending references, following chains of references and
    // detecting cycles.
    fn resolve(self) -> Result<HashMap<usize, String>, StructuralError> {
        let mut resolved = HashMap::new();
        for reference in &self.pending {
            let mut visited = HashSet::from([reference.path.as_str()]);
            let mut current = reference.target.as_str();
            let text = loop {
                match self.index.get(current) {
                    Some(IndexEntry::Text(text)) => break text,
                    Some(IndexEntry::Reference(next)) => {
                        if !visited.insert(current) {
                            return Err(StructuralError::ReferenceCycle(
                                reference.path.clone(),
                            ));
                        }
                        current = next.as_str();
                    }
                    None => {
                        return Err(StructuralError::UnresolvedReference(
                            reference.path.clone(),
                            reference.target.clone(),
                        ));
                    }
                }
            };

            Debug::ReferenceResolved(&reference.path, text).log();
            resolved.insert(reference.leaf, text.clone());
        }

        Ok(resolved)
    }
}

// ===== impl PairEncoder =====

impl PairEncoder {
    fn encode(
        &mut self,
        entity: &dyn Entity,
        mode: EncodeMode,
    ) -> Result<(), StructuralError> {
        // Ancestors of a nested entity are plain containers establishing the
        // hierarchy.
        for depth in 1..=self.path.len() {
            self.pairs.push(Pair {
                path: self.path[..depth].to_vec(),
                value: PairValue::Marker,
                operation: None,
            });
        }

        let snode = entity.schema();
        let keys = match snode.kind {
            SchemaNodeKind::List => {
                let required =
                    mode != EncodeMode::Read && !snode.keys.is_empty();
                self.entry_keys(entity, required)?
            }
            _ => vec![],
        };
        self.path.push(Segment {
            snode,
            keys,
            instance: 0,
        });

        match mode {
            EncodeMode::Read => {
                self.push_marker(None);
                self.encode_read(entity)?;
            }
            EncodeMode::Edit(operation) if operation.is_removal() => {
                let partial = has_content(entity);
                self.push_marker((!partial).then_some(operation));
                self.encode_delete(entity, operation)?;
            }
            EncodeMode::Data => {
                self.push_marker(None);
                self.encode_write(entity)?;
            }
            EncodeMode::Edit(operation) => {
                self.push_marker(Some(operation));
                self.encode_write(entity)?;
            }
        }

        self.path.pop();
        Ok(())
    }

    // Emits every leaf carrying a value, along with the containers and list
    // entries needed to reach it.
    fn encode_write(
        &mut self,
        entity: &dyn Entity,
    ) -> Result<(), StructuralError> {
        for field in ordered_fields(entity) {
            match field {
                Field::Leaf(leaf) => match leaf.leaf_value() {
                    LeafValue::Absent => (),
                    LeafValue::Presence => {
                        self.push_leaf(
                            leaf.schema(),
                            PairValue::Presence,
                            None,
                        );
                    }
                    LeafValue::Scalar(..) | LeafValue::Reference(..) => {
                        if let Some(text) = self.leaf_text(leaf)? {
                            self.push_leaf(
                                leaf.schema(),
                                PairValue::Value(text),
                                None,
                            );
                        }
                    }
                },
                Field::LeafList(leaf_list) => {
                    let snode = leaf_list.schema();
                    for value in leaf_list.values() {
                        let text = self.value_text(snode, value)?;
                        self.push_leaf(snode, PairValue::Value(text), None);
                    }
                }
                Field::Container(child) => {
                    if child.has_data() {
                        self.path.push(Segment::new(child.schema()));
                        self.push_marker(None);
                        self.encode_write(child)?;
                        self.path.pop();
                    }
                }
                Field::List(list) => {
                    let segments = self.list_segments(list, true)?;
                    let entries = list.entries().into_iter();
                    for (entry, segment) in entries.zip(segments) {
                        self.path.push(segment);
                        self.push_marker(None);
                        self.encode_write(entry)?;
                        self.path.pop();
                    }
                }
            }
        }

        Ok(())
    }

    // Emits a subtree filter describing what the caller wants to read back.
    fn encode_read(
        &mut self,
        entity: &dyn Entity,
    ) -> Result<(), StructuralError> {
        for field in ordered_fields(entity) {
            match field {
                Field::Leaf(leaf) => match leaf.filter_state() {
                    FilterState::Unset => (),
                    FilterState::Read => {
                        self.push_leaf(leaf.schema(), PairValue::Select, None);
                    }
                    FilterState::HasValue => {
                        // Leaves with values become content-match nodes.
                        let value = match self.leaf_text(leaf)? {
                            Some(text) => PairValue::Value(text),
                            None => PairValue::Select,
                        };
                        self.push_leaf(leaf.schema(), value, None);
                    }
                },
                Field::LeafList(leaf_list) => {
                    if leaf_list.filter_state() != FilterState::Unset {
                        self.push_leaf(
                            leaf_list.schema(),
                            PairValue::Select,
                            None,
                        );
                    }
                }
                Field::Container(child) => {
                    if child.is_touched() {
                        self.path.push(Segment::new(child.schema()));
                        self.push_marker(None);
                        self.encode_read(child)?;
                        self.path.pop();
                    }
                }
                Field::List(list) => {
                    let whole = list.filter_state() != FilterState::Unset;
                    if list.is_empty() {
                        if whole {
                            self.path.push(Segment::new(list.schema()));
                            self.push_marker(None);
                            self.path.pop();
                        }
                        continue;
                    }

                    let segments = self.list_segments(list, false)?;
                    let entries = list.entries().into_iter();
                    for (entry, segment) in entries.zip(segments) {
                        if whole || entry.is_touched() {
                            self.path.push(segment);
                            self.push_marker(None);
                            self.encode_read(entry)?;
                            self.path.pop();
                        }
                    }
                }
            }
        }

        Ok(())
    }

    // Tags the most specific touched nodes with the removal operation. List
    // keys are always emitted so that entries can be identified.
    fn encode_delete(
        &mut self,
        entity: &dyn Entity,
        operation: EditOperation,
    ) -> Result<(), StructuralError> {
        for field in ordered_fields(entity) {
            match field {
                Field::Leaf(leaf) if leaf.schema().is_list_key() => {
                    if let Some(text) = self.leaf_text(leaf)? {
                        self.push_leaf(
                            leaf.schema(),
                            PairValue::Value(text),
                            None,
                        );
                    }
                }
                Field::Leaf(leaf) => {
                    if leaf.filter_state() != FilterState::Unset {
                        self.push_leaf(
                            leaf.schema(),
                            PairValue::Select,
                            Some(operation),
                        );
                    }
                }
                Field::LeafList(leaf_list) => {
                    let snode = leaf_list.schema();
                    if leaf_list.has_data() {
                        for value in leaf_list.values() {
                            let text = self.value_text(snode, value)?;
                            self.push_leaf(
                                snode,
                                PairValue::Value(text),
                                Some(operation),
                            );
                        }
                    } else if leaf_list.filter_state() != FilterState::Unset {
                        self.push_leaf(
                            snode,
                            PairValue::Select,
                            Some(operation),
                        );
                    }
                }
                Field::Container(child) => {
                    if child.is_touched() {
                        let partial = has_content(child);
                        self.path.push(Segment::new(child.schema()));
                        self.push_marker((!partial).then_some(operation));
                        self.encode_delete(child, operation)?;
                        self.path.pop();
                    }
                }
                Field::List(list) => {
                    // A list requested as a whole addresses all of its
                    // entries.
                    if list.is_empty() {
                        if list.filter_state() != FilterState::Unset {
                            self.path.push(Segment::new(list.schema()));
                            self.push_marker(Some(operation));
                            self.path.pop();
                        }
                        continue;
                    }

                    let segments = self.list_segments(list, true)?;
                    let entries = list.entries().into_iter();
                    for (entry, segment) in entries.zip(segments) {
                        let partial = has_content(entry);
                        self.path.push(segment);
                        self.push_marker((!partial).then_some(operation));
                        self.encode_delete(entry, operation)?;
                        self.path.pop();
                    }
                }
            }
        }

        Ok(())
    }

    // Computes the segments of all entries of a list, numbering entries that
    // share the same key values.
    fn list_segments(
        &self,
        list: &dyn EntityList,
        required: bool,
    ) -> Result<Vec<Segment>, StructuralError> {
        let snode = list.schema();
        let keyed = !snode.keys.is_empty();
        let mut segments: Vec<Segment> = vec![];
        for entry in list.entries() {
            let keys = self.entry_keys(entry, required && keyed)?;
            let instance = segments
                .iter()
                .filter(|segment| segment.keys == keys)
                .count();
            if instance > 0 && keyed && required && self.strict {
                let mut path = self.path.clone();
                path.push(Segment {
                    snode,
                    keys,
                    instance,
                });
                return Err(StructuralError::DuplicateListKeys(display_path(
                    &path,
                )));
            }
            segments.push(Segment {
                snode,
                keys,
                instance,
            });
        }

        Ok(segments)
    }

    fn entry_keys(
        &self,
        entry: &dyn Entity,
        required: bool,
    ) -> Result<Vec<(&'static str, String)>, StructuralError> {
        let snode = entry.schema();
        let leaves = entry.key_leaves();
        let mut keys = vec![];
        for key in snode.keys {
            let leaf = leaves.iter().find(|leaf| leaf.schema().name == *key);
            let text = match leaf {
                Some(leaf) => self.leaf_text(leaf)?,
                None => None,
            };
            match text {
                Some(text) if !text.is_empty() => keys.push((*key, text)),
                _ if required => {
                    let mut path = self.path.clone();
                    path.push(Segment::new(snode));
                    return Err(StructuralError::MissingListKey(
                        display_path(&path),
                    ));
                }
                _ => (),
            }
        }

        Ok(keys)
    }

    // Returns the textual value of a leaf, using the resolved value for
    // reference leaves.
    fn leaf_text(
        &self,
        leaf: &YLeaf,
    ) -> Result<Option<String>, StructuralError> {
        match leaf.leaf_value() {
            LeafValue::Scalar(value) => {
                self.value_text(leaf.schema(), value).map(Some)
            }
            LeafValue::Reference(..) => {
                Ok(self.references.get(&leaf_id(leaf)).cloned())
            }
            LeafValue::Absent | LeafValue::Presence => Ok(None),
        }
    }

    fn value_text(
        &self,
        snode: &'static SchemaNode,
        value: &Value,
    ) -> Result<String, StructuralError> {
        let ltype = snode.leaf_type.as_ref().unwrap_or(&LeafType::String);
        value::to_text(value, ltype).map_err(|reason| {
            let mut path = self.path.clone();
            path.push(Segment::new(snode));
            StructuralError::InvalidValue(display_path(&path), reason)
        })
    }

    fn push_marker(&mut self, operation: Option<EditOperation>) {
        self.pairs.push(Pair {
            path: self.path.clone(),
            value: PairValue::Marker,
            operation,
        });
    }

    fn push_leaf(
        &mut self,
        snode: &'static SchemaNode,
        value: PairValue,
        operation: Option<EditOperation>,
    ) {
        let mut path = self.path.clone();
        path.push(Segment::new(snode));
        self.pairs.push(Pair {
            path,
            value,
            operation,
        });
    }
}

// ===== helper functions =====

fn leaf_type(leaf: &YLeaf) -> &'static LeafType {
    leaf.schema().leaf_type.as_ref().unwrap_or(&LeafType::String)
}

// Identity of a leaf within the tree being encoded.
fn leaf_id(leaf: &YLeaf) -> usize {
    leaf as *const YLeaf as usize
}

// Returns the fields of an entity in emission order: list keys first, then
// the remaining fields in schema declaration order.
fn ordered_fields(entity: &dyn Entity) -> Vec<Field<'_>> {
    let snode = entity.schema();
    let mut fields = entity.fields();
    if snode.kind == SchemaNodeKind::List {
        fields.sort_by_key(|field| {
            let fsnode = field.schema();
            match fsnode.kind {
                SchemaNodeKind::Leaf => snode
                    .keys
                    .iter()
                    .position(|key| *key == fsnode.name)
                    .unwrap_or(usize::MAX),
                _ => usize::MAX,
            }
        });
    }
    fields
}

// Returns whether anything besides list keys was touched in this entity.
fn has_content(entity: &dyn Entity) -> bool {
    entity.fields().iter().any(|field| match field {
        Field::Leaf(leaf) if leaf.schema().is_list_key() => false,
        _ => field.is_touched(),
    })
}

fn ancestor_path(
    snode: &'static SchemaNode,
) -> Result<Vec<Segment>, StructuralError> {
    let mut path = vec![];
    for ancestor in snode.ancestors() {
        if ancestor.kind != SchemaNodeKind::Container {
            return Err(StructuralError::SchemaMismatch(snode.path()));
        }
        path.push(Segment::new(ancestor));
    }
    path.reverse();
    Ok(path)
}

// Renders an instance path, qualifying node names with their module name
// whenever the module changes.
pub fn display_path(path: &[Segment]) -> String {
    let mut output = String::new();
    let mut module = None;
    for segment in path {
        output.push('/');
        let snode = segment.snode;
        if module != Some(snode.module.name) {
            output.push_str(snode.module.name);
            output.push(':');
            module = Some(snode.module.name);
        }
        output.push_str(snode.name);
        for (key, value) in &segment.keys {
            output.push_str(&format!("[{key}='{value}']"));
        }
    }
    output
}

// ===== global functions =====

// Encodes an entity tree into an ordered sequence of pairs.
pub fn encode(
    entity: &dyn Entity,
    mode: EncodeMode,
    validation: ValidationLevel,
) -> Result<Vec<Pair>, StructuralError> {
    let prefix = ancestor_path(entity.schema())?;

    // Resolve all references before emitting anything.
    let mut collector = ReferenceCollector {
        root: entity.schema().root(),
        path: prefix.clone(),
        index: HashMap::new(),
        pending: vec![],
    };
    let snode = entity.schema();
    collector.path.push(Segment {
        snode,
        keys: vec![],
        instance: 0,
    });
    if snode.kind == SchemaNodeKind::List {
        let keys = entity
            .key_leaves()
            .into_iter()
            .filter_map(|leaf| {
                let value = leaf.value()?;
                let text = value::to_text(value, leaf_type(leaf)).ok()?;
                Some((leaf.schema().name, text))
            })
            .collect();
        if let Some(segment) = collector.path.last_mut() {
            segment.keys = keys;
        }
    }
    collector.walk(entity)?;
    let references = collector.resolve()?;

    let mut encoder = PairEncoder {
        references,
        strict: validation == ValidationLevel::Strict,
        path: prefix,
        pairs: vec![],
    };
    encoder.encode(entity, mode)?;

    Ok(encoder.pairs)
}

// Applies a sequence of decoded pairs to an entity skeleton.
//
// Pairs outside the scope of the skeleton are ignored. List entries are
// matched by key values and created as needed. Containers and list entries
// left without any data are pruned afterwards.
pub fn decode(
    pairs: &[Pair],
    entity: &mut dyn Entity,
) -> Result<(), ParseError> {
    let snode = entity.schema();
    let ancestors = ancestor_path(snode)
        .map_err(|_| ParseError::UnknownSchemaRoot(snode.path()))?;
    let depth = ancestors.len();

    let mut root_segment: Option<&Segment> = None;
    for pair in pairs {
        let Some(segment) = pair.path.get(depth) else {
            continue;
        };
        if segment.snode != snode
            || pair.path[..depth]
                .iter()
                .zip(&ancestors)
                .any(|(a, b)| a.snode != b.snode)
        {
            continue;
        }

        // A list entry skeleton holds a single entry.
        match root_segment {
            Some(root) if root != segment => continue,
            Some(_) => (),
            None => {
                if snode.kind == SchemaNodeKind::List {
                    set_entry_keys(entity, segment, &pair.path[..=depth])?;
                }
                root_segment = Some(segment);
            }
        }

        apply_pair(entity, &pair.path[depth + 1..], pair, depth + 1)?;
    }

    prune(entity);
    if !entity.has_data() {
        entity.set_filter_state(FilterState::Unset);
    }

    Ok(())
}

fn apply_pair(
    entity: &mut dyn Entity,
    rest: &[Segment],
    pair: &Pair,
    depth: usize,
) -> Result<(), ParseError> {
    entity.set_filter_state(FilterState::HasValue);

    let Some((segment, rest)) = rest.split_first() else {
        return Ok(());
    };
    let field = entity
        .fields_mut()
        .into_iter()
        .find(|field| field.schema() == segment.snode);
    let Some(field) = field else {
        Debug::UnknownNodeSkipped(
            segment.snode.name,
            Some(segment.snode.module.namespace),
        )
        .log();
        return Ok(());
    };

    match field {
        FieldMut::Container(child) => apply_pair(child, rest, pair, depth + 1),
        FieldMut::List(list) => {
            let entry =
                find_or_create_entry(list, segment, &pair.path[..=depth])?;
            apply_pair(entry, rest, pair, depth + 1)
        }
        FieldMut::Leaf(leaf) if rest.is_empty() => {
            let ltype = leaf_type(leaf);
            match &pair.value {
                _ if *ltype.real_type() == LeafType::Empty => {
                    leaf.set_presence();
                }
                PairValue::Presence => leaf.set_presence(),
                PairValue::Value(text) => {
                    let value = value::from_text(text, ltype).ok_or_else(|| {
                        ParseError::InvalidValue(
                            display_path(&pair.path),
                            text.clone(),
                        )
                    })?;
                    leaf.set(value);
                }
                PairValue::Marker | PairValue::Select => (),
            }
            Ok(())
        }
        FieldMut::LeafList(leaf_list) if rest.is_empty() => {
            if let PairValue::Value(text) = &pair.value {
                let ltype = leaf_list
                    .schema()
                    .leaf_type
                    .as_ref()
                    .unwrap_or(&LeafType::String);
                let value = value::from_text(text, ltype).ok_or_else(|| {
                    ParseError::InvalidValue(
                        display_path(&pair.path),
                        text.clone(),
                    )
                })?;
                leaf_list.push(value);
            }
            Ok(())
        }
        FieldMut::Leaf(..) | FieldMut::LeafList(..) => Ok(()),
    }
}

// Decodes the key values carried by a list entry segment.
fn decode_keys(
    snode: &'static SchemaNode,
    segment: &Segment,
    path: &[Segment],
) -> Result<Vec<(&'static str, Value)>, ParseError> {
    segment
        .keys
        .iter()
        .map(|(key, text)| {
            let ltype = snode
                .children
                .iter()
                .find(|child| child.name == *key)
                .and_then(|child| child.leaf_type.as_ref())
                .unwrap_or(&LeafType::String);
            value::from_text(text, ltype)
                .map(|value| (*key, value))
                .ok_or_else(|| {
                    ParseError::InvalidValue(display_path(path), text.clone())
                })
        })
        .collect()
}

fn keys_match(entry: &dyn Entity, keys: &[(&'static str, Value)]) -> bool {
    let leaves = entry.key_leaves();
    keys.iter().all(|(key, value)| {
        leaves
            .iter()
            .any(|leaf| {
                leaf.schema().name == *key && leaf.value() == Some(value)
            })
    })
}

fn set_entry_keys(
    entry: &mut dyn Entity,
    segment: &Segment,
    path: &[Segment],
) -> Result<(), ParseError> {
    let keys = decode_keys(entry.schema(), segment, path)?;
    for (key, value) in keys {
        if let Some(FieldMut::Leaf(leaf)) = entry.field_mut(key) {
            leaf.set(value);
        }
    }
    Ok(())
}

fn find_or_create_entry<'a>(
    list: &'a mut dyn EntityList,
    segment: &Segment,
    path: &[Segment],
) -> Result<&'a mut dyn Entity, ParseError> {
    let snode = list.schema();
    let keys = decode_keys(snode, segment, path)?;

    let mut matches: Vec<usize> = list
        .entries()
        .into_iter()
        .positions(|entry| keys_match(entry, &keys))
        .collect();
    while matches.len() <= segment.instance {
        let entry = list.push_default();
        for (key, value) in &keys {
            if let Some(FieldMut::Leaf(leaf)) = entry.field_mut(key) {
                leaf.set(value.clone());
            }
        }
        matches.push(list.len() - 1);
    }

    let index = matches[segment.instance];
    list.entries_mut()
        .into_iter()
        .nth(index)
        .ok_or(ParseError::UnexpectedReply)
}

// Removes list entries without data and resets the filter state of empty
// containers.
fn prune(entity: &mut dyn Entity) {
    for field in entity.fields_mut() {
        match field {
            FieldMut::Container(child) => {
                prune(child);
                if !child.has_data() {
                    child.set_filter_state(FilterState::Unset);
                }
            }
            FieldMut::List(list) => {
                for entry in list.entries_mut() {
                    prune(entry);
                }
                let empty: Vec<usize> = list
                    .entries()
                    .into_iter()
                    .positions(|entry| !entry.has_data())
                    .collect();
                if !empty.is_empty() {
                    let path = list.schema().path();
                    for index in empty.into_iter().rev() {
                        Debug::ListEntryPruned(&path).log();
                        list.remove(index);
                    }
                }
                let state = match list.is_empty() {
                    true => FilterState::Unset,
                    false => FilterState::HasValue,
                };
                list.set_filter_state(state);
            }
            FieldMut::Leaf(..) | FieldMut::LeafList(..) => (),
        }
    }
}
