//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Model-driven NETCONF client.
//!
//! Applications describe configuration and state data as trees of
//! schema-derived entities. The [`client::CrudService`] translates those
//! trees into NETCONF requests, sends them over a [`session::Session`] and
//! rehydrates the replies into fresh entity trees.

mod debug;
mod value;

pub mod client;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod entity;
pub mod error;
pub mod json;
pub mod path;
pub mod session;
pub mod xml_tree;

pub use holo_yang;

pub use crate::client::{Config, CrudService, Datastore, ValidationLevel};
pub use crate::codec::EditOperation;
pub use crate::entity::{
    Entity, EntityList, EntityType, FilterState, Value, YLeaf, YLeafList, YList,
};
pub use crate::error::{Error, Result};
