//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Static schema descriptors.
//!
//! Every schema-derived type is described by a `SchemaNode` living in static
//! memory. Generated bindings declare one static per schema node and link
//! them together through `parent` and `children` references, which makes the
//! whole schema tree available without any runtime loading step.

use tracing::debug;

// YANG module metadata.
#[derive(Debug, Eq, PartialEq)]
pub struct SchemaModule {
    pub name: &'static str,
    pub prefix: &'static str,
    pub namespace: &'static str,
    pub revision: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchemaNodeKind {
    Container,
    List,
    Leaf,
    LeafList,
}

// Built-in YANG types supported by leafs and leaf-lists.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LeafType {
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Bool,
    Empty,
    Binary,
    // Number of fraction digits.
    Decimal64(u8),
    // Allowed enum names.
    Enumeration(&'static [&'static str]),
    IdentityRef,
    // Target path and type of the referenced leaf.
    LeafRef(&'static str, &'static LeafType),
}

pub struct SchemaNode {
    pub name: &'static str,
    pub module: &'static SchemaModule,
    pub kind: SchemaNodeKind,
    pub parent: Option<&'static SchemaNode>,
    pub children: &'static [&'static SchemaNode],
    pub keys: &'static [&'static str],
    pub leaf_type: Option<LeafType>,
}

#[derive(Debug, Eq, PartialEq)]
pub enum SchemaError {
    EmptyPath,
    AbsolutePath(String),
}

// ===== impl LeafType =====

impl LeafType {
    // Returns the type of the value actually stored, following leafrefs.
    pub fn real_type(&self) -> &LeafType {
        match self {
            LeafType::LeafRef(_, real) => real.real_type(),
            _ => self,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LeafType::String => "string",
            LeafType::Int8 => "int8",
            LeafType::Int16 => "int16",
            LeafType::Int32 => "int32",
            LeafType::Int64 => "int64",
            LeafType::Uint8 => "uint8",
            LeafType::Uint16 => "uint16",
            LeafType::Uint32 => "uint32",
            LeafType::Uint64 => "uint64",
            LeafType::Bool => "boolean",
            LeafType::Empty => "empty",
            LeafType::Binary => "binary",
            LeafType::Decimal64(..) => "decimal64",
            LeafType::Enumeration(..) => "enumeration",
            LeafType::IdentityRef => "identityref",
            LeafType::LeafRef(..) => "leafref",
        }
    }
}

// ===== impl SchemaNode =====

impl SchemaNode {
    // Returns the absolute schema path of this node.
    //
    // Node names are qualified with their module name at the top level and
    // whenever the module changes from the parent node (e.g. augmentations).
    pub fn path(&self) -> String {
        let mut segments = vec![];
        let mut snode = Some(self);
        while let Some(node) = snode {
            match node.parent {
                Some(parent) if std::ptr::eq(parent.module, node.module) => {
                    segments.push(node.name.to_owned());
                }
                _ => {
                    let segment = format!("{}:{}", node.module.name, node.name);
                    segments.push(segment);
                }
            }
            snode = node.parent;
        }

        segments.iter().rev().fold(String::new(), |mut path, segment| {
            path.push('/');
            path.push_str(segment);
            path
        })
    }

    // Returns an iterator over the ancestors of this node, starting from the
    // parent.
    pub fn ancestors(&self) -> impl Iterator<Item = &'static SchemaNode> {
        std::iter::successors(self.parent, |snode| snode.parent)
    }

    // Returns the top-level ancestor of this node, or the node itself.
    pub fn root(&'static self) -> &'static SchemaNode {
        self.ancestors().last().unwrap_or(self)
    }

    // Looks up a direct child by name, optionally qualified by namespace.
    pub fn child(
        &self,
        name: &str,
        namespace: Option<&str>,
    ) -> Option<&'static SchemaNode> {
        self.children.iter().copied().find(|child| {
            child.name == name
                && namespace.is_none_or(|ns| ns == child.module.namespace)
        })
    }

    // Looks up a descendant schema node using a relative schema path.
    //
    // Path segments may be qualified with a module name or prefix, and ".."
    // moves up one level.
    pub fn find(
        &'static self,
        path: &str,
    ) -> Result<Option<&'static SchemaNode>, SchemaError> {
        if path.is_empty() {
            return Err(SchemaError::EmptyPath);
        }
        if path.starts_with('/') {
            return Err(SchemaError::AbsolutePath(path.to_owned()));
        }

        let mut snode = self;
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            if segment == ".." {
                match snode.parent {
                    Some(parent) => snode = parent,
                    None => return Ok(None),
                }
                continue;
            }

            let (module, name) = match segment.split_once(':') {
                Some((module, name)) => (Some(module), name),
                None => (None, segment),
            };
            let child = snode.children.iter().copied().find(|child| {
                child.name == name
                    && module.is_none_or(|module| {
                        module == child.module.name
                            || module == child.module.prefix
                    })
            });
            match child {
                Some(child) => snode = child,
                None => {
                    debug!(%path, %segment, "schema node not found");
                    return Ok(None);
                }
            }
        }

        Ok(Some(snode))
    }

    pub fn is_list_key(&self) -> bool {
        self.parent.is_some_and(|parent| {
            parent.kind == SchemaNodeKind::List
                && parent.keys.contains(&self.name)
        })
    }

    // Returns whether this node was grafted onto its parent by a different
    // module.
    pub fn is_augmentation(&self) -> bool {
        self.parent
            .is_some_and(|parent| !std::ptr::eq(parent.module, self.module))
    }
}

impl PartialEq for SchemaNode {
    fn eq(&self, other: &SchemaNode) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for SchemaNode {}

impl std::fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaNode")
            .field("path", &self.path())
            .field("kind", &self.kind)
            .finish()
    }
}

// ===== impl SchemaError =====

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::EmptyPath => write!(f, "path is empty"),
            SchemaError::AbsolutePath(path) => {
                write!(f, "path must be a relative path: {path}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

// ===== schema declaration macros =====

// The macros below expand to plain struct literals so that the slices of
// child references get the lifetime of the enclosing static.

#[macro_export]
macro_rules! schema_container {
    ($name:literal, $module:expr, $parent:expr, [$($child:expr),* $(,)?]) => {
        $crate::SchemaNode {
            name: $name,
            module: &$module,
            kind: $crate::SchemaNodeKind::Container,
            parent: $parent,
            children: &[$(&$child),*],
            keys: &[],
            leaf_type: None,
        }
    };
}

#[macro_export]
macro_rules! schema_list {
    ($name:literal, $module:expr, $parent:expr, keys [$($key:literal),*],
     [$($child:expr),* $(,)?]) => {
        $crate::SchemaNode {
            name: $name,
            module: &$module,
            kind: $crate::SchemaNodeKind::List,
            parent: Some(&$parent),
            children: &[$(&$child),*],
            keys: &[$($key),*],
            leaf_type: None,
        }
    };
}

#[macro_export]
macro_rules! schema_leaf {
    ($name:literal, $module:expr, $parent:expr, $type:expr) => {
        $crate::SchemaNode {
            name: $name,
            module: &$module,
            kind: $crate::SchemaNodeKind::Leaf,
            parent: Some(&$parent),
            children: &[],
            keys: &[],
            leaf_type: Some($type),
        }
    };
}

#[macro_export]
macro_rules! schema_leaf_list {
    ($name:literal, $module:expr, $parent:expr, $type:expr) => {
        $crate::SchemaNode {
            name: $name,
            module: &$module,
            kind: $crate::SchemaNodeKind::LeafList,
            parent: Some(&$parent),
            children: &[],
            keys: &[],
            leaf_type: Some($type),
        }
    };
}
