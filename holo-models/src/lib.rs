//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Entity bindings generated from the holo sanity YANG modules.
//!
//! Each module is mirrored by a Rust module holding one `SchemaNode` static
//! per schema node and one entity struct per container or list.

pub mod sanity;
pub mod sanity_augm;

use holo_northbound::Entity;
use holo_yang::{SchemaModule, SchemaNode};

// Modules implemented by this crate.
pub static MODULES: &[&SchemaModule] =
    &[&sanity::MODULE, &sanity_augm::MODULE];

// Top-level schema nodes, used to identify the root of received data.
pub static TOP_LEVEL_NODES: &[&SchemaNode] = &[&sanity::RUNNER];

// ===== global functions =====

// Returns an empty entity for the given top-level node, which can be
// qualified with its module name.
pub fn top_level_entity(name: &str) -> Option<Box<dyn Entity>> {
    let (module, name) = match name.split_once(':') {
        Some((module, name)) => (Some(module), name),
        None => (None, name),
    };
    let snode = TOP_LEVEL_NODES.iter().copied().find(|snode| {
        snode.name == name
            && module.is_none_or(|module| {
                module == snode.module.name || module == snode.module.prefix
            })
    })?;

    if std::ptr::eq(snode, &sanity::RUNNER) {
        return Some(Box::new(sanity::Runner::default()));
    }
    None
}
