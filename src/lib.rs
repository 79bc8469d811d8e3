//! # redwire
//!
//! A decoder for RESP (REdis Serialization Protocol) replies, with:
//! - Typed entry points for integer, simple string, bulk string and array replies
//! - Binary-safe bulk strings
//! - Distinct errors for every protocol violation
//! - A blocking TCP client that frames replies off the socket
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                               │
//! │               (commands, deadlines, close)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Connection                             │
//! │          (encode command, read one complete frame)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ &[u8]
//!                       ▼
//!               ┌───────────────┐
//!               │    Decoder    │
//!               │ (tag → value) │
//!               └───────┬───────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │  TaggedValue  │
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use redwire::protocol::{decode_array, decode_integer, TaggedValue};
//!
//! assert_eq!(decode_integer(b":14\r\n").unwrap(), 14);
//!
//! let items = decode_array(b"*2\r\n:1\r\n+two\r\n").unwrap();
//! assert_eq!(items[0], TaggedValue::Integer(1));
//! assert_eq!(items[1], TaggedValue::SimpleString("two".into()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RedwireError, Result};
pub use config::ClientConfig;
pub use client::Client;
pub use protocol::{ReplyKind, TaggedValue};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of redwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
