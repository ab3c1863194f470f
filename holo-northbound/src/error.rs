//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::warn;

pub type Result<T> = std::result::Result<T, Error>;

// Northbound client errors.
#[derive(Debug)]
pub enum Error {
    Structural(StructuralError),
    Transport(TransportError),
    Parse(ParseError),
    Rpc(Vec<RpcError>),
}

// Caller errors detected before anything is sent to the device.
#[derive(Debug, Eq, PartialEq)]
pub enum StructuralError {
    MissingListKey(String),
    DuplicateListKeys(String),
    UnresolvedReference(String, String),
    ReferenceCycle(String),
    InvalidPath(String),
    InvalidValue(String, String),
    SchemaMismatch(String),
    Encode(String),
}

// Session send/receive errors.
#[derive(Debug)]
pub enum TransportError {
    Io(std::io::Error),
    Timeout,
    ConnectionClosed,
    Framing(FramingError),
    Hello(String),
}

#[derive(Debug, Eq, PartialEq)]
pub enum FramingError {
    EmptyMessage,
    InvalidChunkHeader,
    InvalidChunkSize(u64),
    InvalidUtf8,
}

// Reply parsing errors.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    Xml(String),
    EmptyDocument,
    UnexpectedRoot(String),
    UnknownSchemaRoot(String),
    MessageIdMismatch(u64, Option<String>),
    MissingListKey(String, String),
    InvalidValue(String, String),
    UnexpectedReply,
}

// Error reported by the remote device in an <rpc-error> element.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RpcError {
    pub error_type: String,
    pub tag: String,
    pub severity: String,
    pub app_tag: Option<String>,
    pub path: Option<String>,
    pub message: Option<String>,
    pub info: Vec<(String, String)>,
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::Structural(error) => {
                warn!(%error, "{}", self);
            }
            Error::Transport(error) => {
                warn!(%error, "{}", self);
            }
            Error::Parse(error) => {
                warn!(%error, "{}", self);
            }
            Error::Rpc(errors) => {
                for error in errors {
                    warn!(
                        error_type = %error.error_type,
                        tag = %error.tag,
                        path = ?error.path,
                        message = ?error.message,
                        "{}", self
                    );
                }
            }
        }
    }

    // Returns whether the remote device rejected the request with the given
    // error tag.
    pub fn has_rpc_tag(&self, tag: &str) -> bool {
        match self {
            Error::Rpc(errors) => errors.iter().any(|error| error.tag == tag),
            _ => false,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Structural(..) => {
                write!(f, "invalid entity tree")
            }
            Error::Transport(..) => {
                write!(f, "session transport failure")
            }
            Error::Parse(..) => {
                write!(f, "failed to parse reply")
            }
            Error::Rpc(errors) => {
                write!(f, "request rejected by the device")?;
                if let Some(error) = errors.first() {
                    write!(f, ": {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Structural(error) => Some(error),
            Error::Transport(error) => Some(error),
            Error::Parse(error) => Some(error),
            Error::Rpc(..) => None,
        }
    }
}

impl From<StructuralError> for Error {
    fn from(error: StructuralError) -> Error {
        Error::Structural(error)
    }
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Error {
        Error::Transport(error)
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Error {
        Error::Parse(error)
    }
}

// ===== impl StructuralError =====

impl std::fmt::Display for StructuralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructuralError::MissingListKey(path) => {
                write!(f, "list entry without key values: {path}")
            }
            StructuralError::DuplicateListKeys(path) => {
                write!(f, "duplicate list entry: {path}")
            }
            StructuralError::UnresolvedReference(path, target) => {
                write!(f, "unresolved reference at {path}: {target}")
            }
            StructuralError::ReferenceCycle(path) => {
                write!(f, "reference cycle detected at {path}")
            }
            StructuralError::InvalidPath(path) => {
                write!(f, "invalid instance path: {path}")
            }
            StructuralError::InvalidValue(path, reason) => {
                write!(f, "invalid value at {path}: {reason}")
            }
            StructuralError::SchemaMismatch(path) => {
                write!(f, "entity doesn't match the expected schema: {path}")
            }
            StructuralError::Encode(error) => {
                write!(f, "failed to encode XML: {error}")
            }
        }
    }
}

impl std::error::Error for StructuralError {}

impl From<xml::writer::Error> for StructuralError {
    fn from(error: xml::writer::Error) -> StructuralError {
        StructuralError::Encode(error.to_string())
    }
}

// ===== impl TransportError =====

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Io(error) => write!(f, "I/O error: {error}"),
            TransportError::Timeout => write!(f, "timed out waiting for reply"),
            TransportError::ConnectionClosed => {
                write!(f, "connection closed by peer")
            }
            TransportError::Framing(error) => {
                write!(f, "framing error: {error}")
            }
            TransportError::Hello(error) => {
                write!(f, "hello exchange failed: {error}")
            }
        }
    }
}

impl std::error::Error for TransportError {}

impl From<std::io::Error> for TransportError {
    fn from(error: std::io::Error) -> TransportError {
        TransportError::Io(error)
    }
}

impl From<FramingError> for TransportError {
    fn from(error: FramingError) -> TransportError {
        TransportError::Framing(error)
    }
}

// ===== impl FramingError =====

impl std::fmt::Display for FramingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FramingError::EmptyMessage => {
                write!(f, "empty message")
            }
            FramingError::InvalidChunkHeader => {
                write!(f, "invalid chunk header")
            }
            FramingError::InvalidChunkSize(size) => {
                write!(f, "invalid chunk size: {size}")
            }
            FramingError::InvalidUtf8 => {
                write!(f, "message is not valid UTF-8")
            }
        }
    }
}

impl std::error::Error for FramingError {}

// ===== impl ParseError =====

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Xml(error) => write!(f, "malformed XML: {error}"),
            ParseError::EmptyDocument => write!(f, "empty document"),
            ParseError::UnexpectedRoot(name) => {
                write!(f, "unexpected root element: {name}")
            }
            ParseError::UnknownSchemaRoot(name) => {
                write!(f, "data doesn't match any known schema node: {name}")
            }
            ParseError::MessageIdMismatch(expected, received) => {
                write!(
                    f,
                    "message-id mismatch (expected {expected}, received {})",
                    received.as_deref().unwrap_or("none")
                )
            }
            ParseError::MissingListKey(path, key) => {
                write!(f, "list entry without key '{key}': {path}")
            }
            ParseError::InvalidValue(path, value) => {
                write!(f, "invalid value '{value}' at {path}")
            }
            ParseError::UnexpectedReply => {
                write!(f, "unexpected reply content")
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<xml::reader::Error> for ParseError {
    fn from(error: xml::reader::Error) -> ParseError {
        ParseError::Xml(error.to_string())
    }
}

// ===== impl RpcError =====

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.tag, self.error_type)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " [{path}]")?;
        }
        Ok(())
    }
}
