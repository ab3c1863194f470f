//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::debug::Debug;
use crate::decoder;
use crate::encoder;
use crate::error::TransportError;
use crate::session::framing::Framing;
use crate::session::{CAPABILITY_BASE_1_1, Session};

// NETCONF session over a plain TCP connection.
//
// The order of the fields in this struct is important. The stream must be
// dropped before the runtime that drives it.
#[derive(Debug)]
pub struct TcpSession {
    stream: TcpStream,
    buf: BytesMut,
    framing: Framing,
    capabilities: Vec<String>,
    runtime: tokio::runtime::Runtime,
}

// ===== impl TcpSession =====

impl TcpSession {
    // Connects to the server and exchanges hello messages.
    //
    // Chunked framing is selected when both peers support base:1.1, unless
    // the caller forces end-of-message framing.
    pub fn connect(
        address: &str,
        framing: Framing,
        timeout: Duration,
    ) -> Result<TcpSession, TransportError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let stream = runtime.block_on(async {
            tokio::time::timeout(timeout, TcpStream::connect(address))
                .await
                .map_err(|_| TransportError::Timeout)?
                .map_err(TransportError::from)
        })?;

        let mut session = TcpSession {
            stream,
            buf: BytesMut::with_capacity(65536),
            framing: Framing::EndOfMessage,
            capabilities: vec![],
            runtime,
        };

        // Hello messages always use end-of-message framing.
        let hello = encoder::encode_hello()
            .map_err(|error| TransportError::Hello(error.to_string()))?;
        let reply = session.exchange(&hello, timeout)?;
        let capabilities = decoder::decode_hello(&reply)
            .map_err(|error| TransportError::Hello(error.to_string()))?;
        if framing == Framing::Chunked
            && capabilities.iter().any(|cap| cap == CAPABILITY_BASE_1_1)
        {
            session.framing = Framing::Chunked;
        }
        session.capabilities = capabilities;
        Debug::SessionEstablished(address, session.framing).log();

        Ok(session)
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    // Capabilities advertised by the server in its hello message.
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    // Returns whether the server advertised support for the module with the
    // given namespace.
    pub fn supports_module(&self, namespace: &str) -> bool {
        self.capabilities.iter().any(|capability| {
            capability
                .split_once('?')
                .map_or(capability.as_str(), |(uri, _)| uri)
                == namespace
        })
    }

    fn exchange(
        &mut self,
        request: &str,
        timeout: Duration,
    ) -> Result<String, TransportError> {
        let mut output = BytesMut::new();
        self.framing.encode(request, &mut output)?;

        let exchange =
            exchange(&mut self.stream, &mut self.buf, self.framing, &output);
        self.runtime.block_on(async {
            tokio::time::timeout(timeout, exchange)
                .await
                .map_err(|_| TransportError::Timeout)?
        })
    }
}

impl Session for TcpSession {
    fn send(
        &mut self,
        request: &str,
        timeout: Duration,
    ) -> Result<String, TransportError> {
        self.exchange(request, timeout)
    }
}

// ===== helper functions =====

async fn exchange(
    stream: &mut TcpStream,
    buf: &mut BytesMut,
    framing: Framing,
    request: &[u8],
) -> Result<String, TransportError> {
    stream.write_all(request).await?;
    loop {
        if let Some(reply) = framing.decode(buf)? {
            return Ok(reply);
        }
        if stream.read_buf(buf).await? == 0 {
            return Err(TransportError::ConnectionClosed);
        }
    }
}
