//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod framing;
pub mod tcp;

use std::time::Duration;

use crate::error::TransportError;

pub const CAPABILITY_BASE_1_0: &str = "urn:ietf:params:netconf:base:1.0";
pub const CAPABILITY_BASE_1_1: &str = "urn:ietf:params:netconf:base:1.1";

// Request/reply channel to a single NETCONF server.
//
// At most one request is outstanding at any time. Implementations are
// responsible for message framing and for enforcing the timeout.
pub trait Session: Send {
    fn send(
        &mut self,
        request: &str,
        timeout: Duration,
    ) -> Result<String, TransportError>;
}
