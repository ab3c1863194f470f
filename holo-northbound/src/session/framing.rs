//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::FramingError;

// End-of-message delimiter used by NETCONF base:1.0.
pub const EOM_DELIMITER: &[u8] = b"]]>]]>";

// Maximum chunk size allowed by RFC 6242.
const CHUNK_SIZE_MAX: u64 = 4294967295;

// NETCONF message framing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framing {
    #[default]
    EndOfMessage,
    Chunked,
}

// ===== impl Framing =====

impl Framing {
    // Appends a framed message to the buffer.
    //
    // Chunked messages must carry at least one chunk, so empty messages are
    // rejected.
    pub fn encode(
        &self,
        msg: &str,
        buf: &mut BytesMut,
    ) -> Result<(), FramingError> {
        if msg.is_empty() {
            return Err(FramingError::EmptyMessage);
        }

        match self {
            Framing::EndOfMessage => {
                buf.put_slice(msg.as_bytes());
                buf.put_slice(EOM_DELIMITER);
            }
            Framing::Chunked => {
                buf.put_slice(format!("\n#{}\n", msg.len()).as_bytes());
                buf.put_slice(msg.as_bytes());
                buf.put_slice(b"\n##\n");
            }
        }

        Ok(())
    }

    // Extracts the next complete message from the buffer.
    //
    // Returns `Ok(None)` and leaves the buffer untouched when more data is
    // needed.
    pub fn decode(
        &self,
        buf: &mut BytesMut,
    ) -> Result<Option<String>, FramingError> {
        match self {
            Framing::EndOfMessage => decode_eom(buf),
            Framing::Chunked => decode_chunked(buf),
        }
    }
}

// ===== helper functions =====

fn decode_eom(buf: &mut BytesMut) -> Result<Option<String>, FramingError> {
    let Some(pos) = buf
        .windows(EOM_DELIMITER.len())
        .position(|window| window == EOM_DELIMITER)
    else {
        return Ok(None);
    };

    let msg = buf.split_to(pos);
    buf.advance(EOM_DELIMITER.len());
    String::from_utf8(msg.to_vec())
        .map(Some)
        .map_err(|_| FramingError::InvalidUtf8)
}

fn decode_chunked(buf: &mut BytesMut) -> Result<Option<String>, FramingError> {
    let mut msg = vec![];
    let mut pos = 0;
    loop {
        let rest = &buf[pos..];
        if rest.len() < 4 {
            return Ok(None);
        }
        if &rest[..2] != b"\n#" {
            return Err(FramingError::InvalidChunkHeader);
        }

        // End of chunks. A message holds at least one chunk.
        if rest[2] == b'#' {
            if rest[3] != b'\n' || pos == 0 {
                return Err(FramingError::InvalidChunkHeader);
            }
            buf.advance(pos + 4);
            return String::from_utf8(msg)
                .map(Some)
                .map_err(|_| FramingError::InvalidUtf8);
        }

        // Chunk size: up to ten digits terminated by a newline.
        let Some(len) = rest[2..].iter().position(|byte| *byte == b'\n') else {
            if rest.len() > 2 + 10 {
                return Err(FramingError::InvalidChunkHeader);
            }
            return Ok(None);
        };
        let digits = &rest[2..2 + len];
        if digits.is_empty()
            || digits.len() > 10
            || digits[0] == b'0'
            || !digits.iter().all(u8::is_ascii_digit)
        {
            return Err(FramingError::InvalidChunkHeader);
        }
        let size = digits
            .iter()
            .fold(0u64, |size, digit| size * 10 + u64::from(digit - b'0'));
        if size > CHUNK_SIZE_MAX {
            return Err(FramingError::InvalidChunkSize(size));
        }

        let start = 2 + len + 1;
        let end = start + size as usize;
        if rest.len() < end {
            return Ok(None);
        }
        msg.extend_from_slice(&rest[start..end]);
        pos += end;
    }
}
