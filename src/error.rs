//! Error types for redwire
//!
//! Provides a unified error type for decoding and transport operations.

use thiserror::Error;

use crate::protocol::ReplyKind;

/// Result type alias using RedwireError
pub type Result<T> = std::result::Result<T, RedwireError>;

/// Unified error type for redwire operations
#[derive(Debug, Error)]
pub enum RedwireError {
    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    /// The buffer ended before a field terminator or declared payload.
    #[error("Incomplete frame: {0}")]
    IncompleteFrame(String),

    #[error("Frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },

    // -------------------------------------------------------------------------
    // Decoding Errors
    // -------------------------------------------------------------------------
    /// Non-numeric text where an integer was required.
    #[error("Content of the response is not an integer, got {0:?}")]
    Format(String),

    /// The length line of a bulk string could not be read.
    #[error("Cannot read size of the bulk element: {source}")]
    SizeRead {
        #[source]
        source: Box<RedwireError>,
    },

    #[error("Invalid {kind} length: {length}")]
    InvalidLength { kind: ReplyKind, length: i64 },

    #[error("Unknown type detected, got {:?}", tag_char(.0))]
    UnknownType(u8),

    /// Array element whose kind is not integer, simple string or bulk string.
    #[error("Only integer, simple string and bulk string elements are supported, got {0}")]
    UnsupportedElementType(ReplyKind),

    #[error("Expected {expected} type, got {actual}")]
    TypeMismatch {
        expected: ReplyKind,
        actual: ReplyKind,
    },

    /// Error reply sent by the server.
    #[error("{0}")]
    Server(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection closed by peer")]
    ConnectionClosed,

    #[error("Connection is not initialized, call connect first")]
    NotConnected,

    #[error("Deadline exceeded before the command was sent")]
    DeadlineExceeded,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

fn tag_char(tag: &u8) -> char {
    char::from(*tag)
}

impl RedwireError {
    pub(crate) fn incomplete(what: impl Into<String>) -> Self {
        RedwireError::IncompleteFrame(what.into())
    }

    /// Returns the server-supplied message if this is a server error reply.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RedwireError::Server(message) => Some(message),
            _ => None,
        }
    }
}
