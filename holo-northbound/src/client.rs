//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![allow(clippy::derivable_impls)]

use std::sync::atomic::{self, AtomicU64};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::codec::{self, EditOperation, EncodeMode};
use crate::debug::Debug;
use crate::decoder::{self, Reply};
use crate::encoder::{self, Rpc};
use crate::entity::{Entity, EntityType};
use crate::error::{Error, ParseError, Result, StructuralError};
use crate::session::Session;

// Client configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // Datastore modified by edit operations.
    pub target: Datastore,
    // Datastore queried by read operations.
    pub source: Datastore,
    // Request timeout in seconds.
    pub timeout: u64,
    pub validation: ValidationLevel,
    // Operation used by delete requests.
    pub delete_operation: EditOperation,
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Datastore {
    #[default]
    Running,
    Candidate,
    Startup,
}

// Local checks performed before sending edit requests.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    // Duplicate list keys are passed through to the server.
    #[default]
    None,
    // Duplicate list keys are rejected locally.
    Strict,
}

// CRUD operations over entity trees.
//
// Every operation is a single request/reply exchange over the given session.
// The service itself only keeps the message-id counter.
#[derive(Debug)]
pub struct CrudService {
    config: Config,
    message_id: AtomicU64,
}

// ===== impl Config =====

impl Default for Config {
    fn default() -> Config {
        Config {
            target: Datastore::Running,
            source: Datastore::Running,
            timeout: 30,
            validation: ValidationLevel::None,
            delete_operation: EditOperation::Delete,
        }
    }
}

// ===== impl Datastore =====

impl Datastore {
    pub fn as_str(&self) -> &'static str {
        match self {
            Datastore::Running => "running",
            Datastore::Candidate => "candidate",
            Datastore::Startup => "startup",
        }
    }
}

impl std::fmt::Display for Datastore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ===== impl CrudService =====

impl CrudService {
    pub fn new(config: Config) -> CrudService {
        CrudService {
            config,
            message_id: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // Creates the given tree. The server rejects nodes that already exist.
    pub fn create(
        &self,
        session: &mut dyn Session,
        entity: &dyn Entity,
    ) -> Result<()> {
        self.edit(session, entity, EditOperation::Create)
    }

    // Merges the given tree into the target datastore.
    pub fn update(
        &self,
        session: &mut dyn Session,
        entity: &dyn Entity,
    ) -> Result<()> {
        self.edit(session, entity, EditOperation::Merge)
    }

    // Deletes the most specific nodes set in the given tree.
    pub fn delete(
        &self,
        session: &mut dyn Session,
        entity: &dyn Entity,
    ) -> Result<()> {
        self.edit(session, entity, self.config.delete_operation)
    }

    // Sends an <edit-config> request applying the given operation to the
    // tree.
    pub fn edit(
        &self,
        session: &mut dyn Session,
        entity: &dyn Entity,
        operation: EditOperation,
    ) -> Result<()> {
        let pairs = codec::encode(
            entity,
            EncodeMode::Edit(operation),
            self.config.validation,
        )?;
        let rpc = Rpc::EditConfig {
            target: self.config.target,
            config: &pairs,
        };
        match self.request(session, &rpc)? {
            Reply::Ok => Ok(()),
            _ => Err(ParseError::UnexpectedReply.into()),
        }
    }

    // Reads configuration data matching the given filter from the source
    // datastore.
    //
    // Returns `Ok(None)` when the server holds nothing matching the filter.
    pub fn read<E: EntityType>(
        &self,
        session: &mut dyn Session,
        filter: &E,
    ) -> Result<Option<E>> {
        let mut entity = E::default();
        match self.read_into(session, filter, &mut entity, false)? {
            true => Ok(Some(entity)),
            false => Ok(None),
        }
    }

    // Same as `read`, but also returns state data.
    pub fn read_all<E: EntityType>(
        &self,
        session: &mut dyn Session,
        filter: &E,
    ) -> Result<Option<E>> {
        let mut entity = E::default();
        match self.read_into(session, filter, &mut entity, true)? {
            true => Ok(Some(entity)),
            false => Ok(None),
        }
    }

    // Reads data matching the filter into the target skeleton, which must
    // have the same schema node as the filter.
    //
    // Returns whether anything was found.
    pub fn read_into(
        &self,
        session: &mut dyn Session,
        filter: &dyn Entity,
        target: &mut dyn Entity,
        all: bool,
    ) -> Result<bool> {
        if !std::ptr::eq(filter.schema(), target.schema()) {
            let error = StructuralError::SchemaMismatch(target.schema().path());
            return Err(error.into());
        }

        let pairs =
            codec::encode(filter, EncodeMode::Read, self.config.validation)?;
        let rpc = match all {
            true => Rpc::Get { filter: &pairs },
            false => Rpc::GetConfig {
                source: self.config.source,
                filter: &pairs,
            },
        };
        let data = match self.request(session, &rpc)? {
            Reply::Data(data) => data,
            _ => return Err(ParseError::UnexpectedReply.into()),
        };

        let pairs = decoder::decode_data(&data, target.schema())?;
        codec::decode(&pairs, target)?;

        Ok(target.has_data())
    }

    // Sends a <close-session> request.
    pub fn close_session(&self, session: &mut dyn Session) -> Result<()> {
        match self.request(session, &Rpc::CloseSession)? {
            Reply::Ok => Ok(()),
            _ => Err(ParseError::UnexpectedReply.into()),
        }
    }

    fn request(
        &self,
        session: &mut dyn Session,
        rpc: &Rpc<'_>,
    ) -> Result<Reply> {
        let message_id =
            self.message_id.fetch_add(1, atomic::Ordering::Relaxed);
        let request = encoder::encode_rpc(message_id, rpc)?;

        Debug::RequestTx(message_id, &request).log();
        let timeout = Duration::from_secs(self.config.timeout);
        let reply = session.send(&request, timeout)?;
        Debug::ReplyRx(message_id, &reply).log();

        match decoder::decode_reply(&reply, message_id)? {
            Reply::Error(errors) => Err(Error::Rpc(errors)),
            reply => Ok(reply),
        }
    }
}

impl Default for CrudService {
    fn default() -> CrudService {
        CrudService::new(Config::default())
    }
}
