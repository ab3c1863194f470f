//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Generic entity tree.
//!
//! Schema-derived types are plain structs whose fields are leaves
//! ([`YLeaf`]), leaf-lists ([`YLeafList`]), child containers (other entities)
//! and lists ([`YList`]). The [`Entity`] trait gives the rest of the engine
//! schema-driven introspection over those fields, and the [`entity!`] macro
//! generates both the structs and their trait implementations.

use enum_as_inner::EnumAsInner;
use holo_yang::{LeafType, SchemaNode};

use crate::error::StructuralError;
use crate::path::InstancePath;

// Per-node record of how the caller touched a node.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FilterState {
    // Not touched by the caller.
    #[default]
    Unset,
    // Explicitly requested by a read operation.
    Read,
    // Holds a caller-supplied or decoded value.
    HasValue,
}

// Scalar leaf value.
#[derive(Clone, Debug, Eq, EnumAsInner, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Bool(bool),
    Binary(Vec<u8>),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum LeafValue {
    #[default]
    Absent,
    Scalar(Value),
    // Existence marker of an empty-typed leaf.
    Presence,
    // Alias of another leaf's value, resolved when the tree is encoded.
    Reference(InstancePath),
}

#[derive(Clone, Debug)]
pub struct YLeaf {
    snode: &'static SchemaNode,
    filter: FilterState,
    value: LeafValue,
}

#[derive(Clone, Debug)]
pub struct YLeafList {
    snode: &'static SchemaNode,
    filter: FilterState,
    values: Vec<Value>,
}

#[derive(Debug)]
pub struct YList<E> {
    snode: &'static SchemaNode,
    filter: FilterState,
    entries: Vec<E>,
}

// Borrowed view of an entity field.
#[derive(Debug)]
pub enum Field<'a> {
    Leaf(&'a YLeaf),
    LeafList(&'a YLeafList),
    Container(&'a dyn Entity),
    List(&'a dyn EntityList),
}

// Mutable view of an entity field.
#[derive(Debug)]
pub enum FieldMut<'a> {
    Leaf(&'a mut YLeaf),
    LeafList(&'a mut YLeafList),
    Container(&'a mut dyn Entity),
    List(&'a mut dyn EntityList),
}

/// Schema-derived container or list entry.
pub trait Entity: std::fmt::Debug + Send + Sync {
    /// Schema node of the container or list this entity is an instance of.
    fn schema(&self) -> &'static SchemaNode;

    fn filter_state(&self) -> FilterState;

    fn set_filter_state(&mut self, state: FilterState);

    /// Fields in schema declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;

    /// Requests this whole subtree in a read operation.
    fn read(&mut self) {
        self.set_filter_state(FilterState::Read);
    }

    /// Returns whether any leaf in this subtree carries a value.
    fn has_data(&self) -> bool {
        self.fields().iter().any(Field::has_data)
    }

    /// Returns whether this entity or any of its descendants was touched by
    /// the caller.
    fn is_touched(&self) -> bool {
        self.filter_state() != FilterState::Unset
            || self.fields().iter().any(Field::is_touched)
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        self.fields()
            .into_iter()
            .find(|field| field.schema().name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
        self.fields_mut()
            .into_iter()
            .find(|field| field.schema().name == name)
    }

    /// Returns the key leaves of this list entry in schema key order.
    fn key_leaves(&self) -> Vec<&YLeaf> {
        let snode = self.schema();
        let fields = self.fields();
        snode
            .keys
            .iter()
            .filter_map(|key| {
                fields.iter().find_map(|field| match field {
                    Field::Leaf(leaf) if leaf.snode.name == *key => Some(*leaf),
                    _ => None,
                })
            })
            .collect()
    }

    /// Clears all values and filter markers in this subtree.
    fn clear(&mut self) {
        self.set_filter_state(FilterState::Unset);
        for field in self.fields_mut() {
            match field {
                FieldMut::Leaf(leaf) => leaf.clear(),
                FieldMut::LeafList(leaf_list) => leaf_list.clear(),
                FieldMut::Container(entity) => entity.clear(),
                FieldMut::List(list) => list.clear(),
            }
        }
    }
}

/// Statically typed entity that knows its schema node without an instance.
pub trait EntityType: Entity + Default + 'static {
    fn schema_node() -> &'static SchemaNode;
}

/// Type-erased view of a list field.
pub trait EntityList: std::fmt::Debug + Send + Sync {
    fn schema(&self) -> &'static SchemaNode;

    fn filter_state(&self) -> FilterState;

    fn set_filter_state(&mut self, state: FilterState);

    fn entries(&self) -> Vec<&dyn Entity>;

    fn entries_mut(&mut self) -> Vec<&mut dyn Entity>;

    /// Appends a new default entry and returns it.
    fn push_default(&mut self) -> &mut dyn Entity;

    fn remove(&mut self, index: usize);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}

// Conversion from a struct field into its type-erased view.
pub trait AsField {
    fn as_field(&self) -> Field<'_>;

    fn as_field_mut(&mut self) -> FieldMut<'_>;
}

// ===== impl Value =====

impl Value {
    // Normalizes integer signedness according to the given leaf type.
    fn normalize(self, ltype: Option<&LeafType>) -> Value {
        let Some(ltype) = ltype.map(LeafType::real_type) else {
            return self;
        };
        match (self, ltype) {
            (
                Value::Int(value),
                LeafType::Uint8
                | LeafType::Uint16
                | LeafType::Uint32
                | LeafType::Uint64,
            ) if value >= 0 => Value::Uint(value as u64),
            (
                Value::Uint(value),
                LeafType::Int8
                | LeafType::Int16
                | LeafType::Int32
                | LeafType::Int64,
            ) if value <= i64::MAX as u64 => Value::Int(value as i64),
            (value, _) => value,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Uint(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Binary(value) => write!(f, "{value:02x?}"),
        }
    }
}

macro_rules! impl_value_from {
    ($variant:ident, $conv:ty, $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Value {
                    Value::$variant(<$conv>::from(value))
                }
            }
        )*
    };
}

impl_value_from!(Int, i64, i8, i16, i32, i64);
impl_value_from!(Uint, u64, u8, u16, u32, u64);
impl_value_from!(String, String, &str, String);
impl_value_from!(Bool, bool, bool);
impl_value_from!(Binary, Vec<u8>, Vec<u8>, &[u8]);

// ===== impl YLeaf =====

impl YLeaf {
    pub fn new(snode: &'static SchemaNode) -> YLeaf {
        YLeaf {
            snode,
            filter: FilterState::Unset,
            value: LeafValue::Absent,
        }
    }

    pub fn schema(&self) -> &'static SchemaNode {
        self.snode
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter
    }

    pub fn leaf_value(&self) -> &LeafValue {
        &self.value
    }

    // Sets a scalar value.
    pub fn set(&mut self, value: impl Into<Value>) {
        let value = value.into().normalize(self.snode.leaf_type.as_ref());
        self.value = LeafValue::Scalar(value);
        self.filter = FilterState::HasValue;
    }

    // Marks an empty-typed leaf as existing.
    pub fn set_presence(&mut self) {
        self.value = LeafValue::Presence;
        self.filter = FilterState::HasValue;
    }

    // Makes this leaf an alias of the leaf identified by the given instance
    // path.
    pub fn set_reference(&mut self, path: &str) -> Result<(), StructuralError> {
        let path = InstancePath::parse(path)?;
        self.value = LeafValue::Reference(path);
        self.filter = FilterState::HasValue;
        Ok(())
    }

    // Requests this leaf in a read operation.
    pub fn read(&mut self) {
        self.value = LeafValue::Absent;
        self.filter = FilterState::Read;
    }

    pub fn clear(&mut self) {
        self.value = LeafValue::Absent;
        self.filter = FilterState::Unset;
    }

    pub fn value(&self) -> Option<&Value> {
        match &self.value {
            LeafValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value()
            .and_then(Value::as_string)
            .map(String::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.value().and_then(Value::as_int).copied()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.value().and_then(Value::as_uint).copied()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value().and_then(Value::as_bool).copied()
    }

    pub fn is_present(&self) -> bool {
        self.value == LeafValue::Presence
    }

    pub fn has_data(&self) -> bool {
        self.value != LeafValue::Absent
    }
}

impl PartialEq for YLeaf {
    fn eq(&self, other: &YLeaf) -> bool {
        self.value == other.value
    }
}

impl AsField for YLeaf {
    fn as_field(&self) -> Field<'_> {
        Field::Leaf(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Leaf(self)
    }
}

// ===== impl YLeafList =====

impl YLeafList {
    pub fn new(snode: &'static SchemaNode) -> YLeafList {
        YLeafList {
            snode,
            filter: FilterState::Unset,
            values: vec![],
        }
    }

    pub fn schema(&self) -> &'static SchemaNode {
        self.snode
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        let value = value.into().normalize(self.snode.leaf_type.as_ref());
        self.values.push(value);
        self.filter = FilterState::HasValue;
    }

    pub fn extend<V: Into<Value>>(
        &mut self,
        values: impl IntoIterator<Item = V>,
    ) {
        for value in values {
            self.push(value);
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn read(&mut self) {
        self.values.clear();
        self.filter = FilterState::Read;
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.filter = FilterState::Unset;
    }

    pub fn has_data(&self) -> bool {
        !self.values.is_empty()
    }
}

impl PartialEq for YLeafList {
    fn eq(&self, other: &YLeafList) -> bool {
        self.values == other.values
    }
}

impl AsField for YLeafList {
    fn as_field(&self) -> Field<'_> {
        Field::LeafList(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::LeafList(self)
    }
}

// ===== impl YList =====

impl<E: EntityType> YList<E> {
    pub fn new() -> YList<E> {
        YList {
            snode: E::schema_node(),
            filter: FilterState::Unset,
            entries: vec![],
        }
    }

    // Appends an entry. Entries keep their insertion order.
    pub fn push(&mut self, entry: E) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, E> {
        self.entries.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut E> {
        self.entries.get_mut(index)
    }

    // Requests all entries of this list in a read operation.
    pub fn read(&mut self) {
        self.filter = FilterState::Read;
    }
}

impl<E: EntityType> Default for YList<E> {
    fn default() -> YList<E> {
        YList::new()
    }
}

impl<E: EntityType> Extend<E> for YList<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }
}

impl<E: PartialEq> PartialEq for YList<E> {
    fn eq(&self, other: &YList<E>) -> bool {
        self.entries == other.entries
    }
}

impl<E> std::ops::Index<usize> for YList<E> {
    type Output = E;

    fn index(&self, index: usize) -> &E {
        &self.entries[index]
    }
}

impl<E> std::ops::IndexMut<usize> for YList<E> {
    fn index_mut(&mut self, index: usize) -> &mut E {
        &mut self.entries[index]
    }
}

impl<'a, E> IntoIterator for &'a YList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<E: EntityType> EntityList for YList<E> {
    fn schema(&self) -> &'static SchemaNode {
        self.snode
    }

    fn filter_state(&self) -> FilterState {
        self.filter
    }

    fn set_filter_state(&mut self, state: FilterState) {
        self.filter = state;
    }

    fn entries(&self) -> Vec<&dyn Entity> {
        self.entries.iter().map(|entry| entry as &dyn Entity).collect()
    }

    fn entries_mut(&mut self) -> Vec<&mut dyn Entity> {
        self.entries
            .iter_mut()
            .map(|entry| entry as &mut dyn Entity)
            .collect()
    }

    fn push_default(&mut self) -> &mut dyn Entity {
        self.entries.push(E::default());
        let index = self.entries.len() - 1;
        &mut self.entries[index]
    }

    fn remove(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.filter = FilterState::Unset;
    }
}

impl<E: EntityType> AsField for YList<E> {
    fn as_field(&self) -> Field<'_> {
        Field::List(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::List(self)
    }
}

// ===== impl Field =====

impl Field<'_> {
    pub fn schema(&self) -> &'static SchemaNode {
        match self {
            Field::Leaf(leaf) => leaf.schema(),
            Field::LeafList(leaf_list) => leaf_list.schema(),
            Field::Container(entity) => entity.schema(),
            Field::List(list) => list.schema(),
        }
    }

    pub fn has_data(&self) -> bool {
        match self {
            Field::Leaf(leaf) => leaf.has_data(),
            Field::LeafList(leaf_list) => leaf_list.has_data(),
            Field::Container(entity) => entity.has_data(),
            Field::List(list) => {
                list.entries().iter().any(|entry| entry.has_data())
            }
        }
    }

    pub fn is_touched(&self) -> bool {
        match self {
            Field::Leaf(leaf) => leaf.filter_state() != FilterState::Unset,
            Field::LeafList(leaf_list) => {
                leaf_list.filter_state() != FilterState::Unset
            }
            Field::Container(entity) => entity.is_touched(),
            Field::List(list) => {
                list.filter_state() != FilterState::Unset
                    || list.entries().iter().any(|entry| entry.is_touched())
            }
        }
    }
}

impl FieldMut<'_> {
    pub fn schema(&self) -> &'static SchemaNode {
        match self {
            FieldMut::Leaf(leaf) => leaf.schema(),
            FieldMut::LeafList(leaf_list) => leaf_list.schema(),
            FieldMut::Container(entity) => entity.schema(),
            FieldMut::List(list) => list.schema(),
        }
    }
}

// ===== macros =====

/// Declares a schema-derived entity struct.
///
/// Every field is declared with its kind followed by either the schema node
/// static (leafs and leaf-lists) or the entity type (containers and lists):
///
/// ```ignore
/// entity! {
///     pub struct Ldata: LDATA {
///         number: leaf ldata::NUMBER,
///         name: leaf ldata::NAME,
///         subl1: list ldata::Subl1,
///     }
/// }
/// ```
///
/// The generated struct also carries a `yfilter` field holding the
/// entity's own [`FilterState`].
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $schema:path {
            $($field:ident : $kind:ident $arg:path),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis struct $name {
            pub yfilter: $crate::entity::FilterState,
            $(pub $field: $crate::entity_field_type!($kind $arg),)*
        }

        // Entities compare by content only.
        impl PartialEq for $name {
            fn eq(&self, other: &$name) -> bool {
                true $(&& self.$field == other.$field)*
            }
        }

        impl Default for $name {
            fn default() -> $name {
                $name {
                    yfilter: $crate::entity::FilterState::Unset,
                    $($field: $crate::entity_field_default!($kind $arg),)*
                }
            }
        }

        impl $crate::entity::Entity for $name {
            fn schema(&self) -> &'static $crate::holo_yang::SchemaNode {
                &$schema
            }

            fn filter_state(&self) -> $crate::entity::FilterState {
                self.yfilter
            }

            fn set_filter_state(
                &mut self,
                state: $crate::entity::FilterState,
            ) {
                self.yfilter = state;
            }

            fn fields(&self) -> Vec<$crate::entity::Field<'_>> {
                use $crate::entity::AsField;
                vec![$(self.$field.as_field()),*]
            }

            fn fields_mut(&mut self) -> Vec<$crate::entity::FieldMut<'_>> {
                use $crate::entity::AsField;
                vec![$(self.$field.as_field_mut()),*]
            }
        }

        impl $crate::entity::EntityType for $name {
            fn schema_node() -> &'static $crate::holo_yang::SchemaNode {
                &$schema
            }
        }

        impl $crate::entity::AsField for $name {
            fn as_field(&self) -> $crate::entity::Field<'_> {
                $crate::entity::Field::Container(self)
            }

            fn as_field_mut(&mut self) -> $crate::entity::FieldMut<'_> {
                $crate::entity::FieldMut::Container(self)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! entity_field_type {
    (leaf $snode:path) => { $crate::entity::YLeaf };
    (leaf_list $snode:path) => { $crate::entity::YLeafList };
    (container $ty:path) => { $ty };
    (list $ty:path) => { $crate::entity::YList<$ty> };
}

#[doc(hidden)]
#[macro_export]
macro_rules! entity_field_default {
    (leaf $snode:path) => { $crate::entity::YLeaf::new(&$snode) };
    (leaf_list $snode:path) => { $crate::entity::YLeafList::new(&$snode) };
    (container $ty:path) => { <$ty as Default>::default() };
    (list $ty:path) => { $crate::entity::YList::<$ty>::new() };
}
