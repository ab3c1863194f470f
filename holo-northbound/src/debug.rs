//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{debug, debug_span, trace, trace_span};

use crate::session::framing::Framing;

#[derive(Debug)]
pub enum Debug<'a> {
    RequestTx(u64, &'a str),
    ReplyRx(u64, &'a str),
    ReferenceResolved(&'a str, &'a str),
    UnknownNodeSkipped(&'a str, Option<&'a str>),
    ListEntryPruned(&'a str),
    SessionEstablished(&'a str, Framing),
}

// ===== impl Debug =====

impl Debug<'_> {
    pub fn log(&self) {
        match self {
            Debug::RequestTx(message_id, data) => {
                trace_span!("northbound").in_scope(|| {
                    trace!(%message_id, %data, "{}", self);
                });
            }
            Debug::ReplyRx(message_id, data) => {
                trace_span!("northbound").in_scope(|| {
                    trace!(%message_id, %data, "{}", self);
                });
            }
            Debug::ReferenceResolved(path, value) => {
                trace_span!("northbound").in_scope(|| {
                    trace!(%path, %value, "{}", self);
                });
            }
            Debug::UnknownNodeSkipped(name, namespace) => {
                trace_span!("northbound").in_scope(|| {
                    debug!(%name, ?namespace, "{}", self);
                });
            }
            Debug::ListEntryPruned(path) => {
                trace_span!("northbound")
                    .in_scope(|| trace!(%path, "{}", self));
            }
            Debug::SessionEstablished(address, framing) => {
                debug_span!("session").in_scope(|| {
                    debug!(%address, ?framing, "{}", self);
                });
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::RequestTx(..) => {
                write!(f, "sending request")
            }
            Debug::ReplyRx(..) => {
                write!(f, "received reply")
            }
            Debug::ReferenceResolved(..) => {
                write!(f, "reference resolved")
            }
            Debug::UnknownNodeSkipped(..) => {
                write!(f, "skipping unknown data node")
            }
            Debug::ListEntryPruned(..) => {
                write!(f, "pruning empty list entry")
            }
            Debug::SessionEstablished(..) => {
                write!(f, "session established")
            }
        }
    }
}
