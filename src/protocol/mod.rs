//! Protocol Module
//!
//! Decodes replies of the RESP wire protocol and encodes outgoing commands.
//!
//! ## Reply Format
//! ```text
//! ┌──────────┬─────────────────────────────┬──────────┐
//! │ Tag (1)  │          Payload            │  CR LF   │
//! └──────────┴─────────────────────────────┴──────────┘
//! ```
//!
//! ### Tags
//! - `+`: Simple string - Payload: text
//! - `-`: Error         - Payload: error message
//! - `:`: Integer       - Payload: decimal digits, optional sign
//! - `$`: Bulk string   - Payload: length CR LF + `length` raw bytes
//! - `*`: Array         - Payload: count CR LF + `count` replies
//!
//! A bulk string length of -1 is the null bulk string and carries no bytes.
//! Array elements are limited to integers, simple strings and bulk strings.

mod command;
mod codec;
mod cursor;
mod decoder;
mod kind;
mod value;

pub use command::Command;
pub use codec::{encode_command, read_frame, write_command, MAX_NESTING_DEPTH};
pub use decoder::{
    decode_array, decode_bulk_string, decode_integer, decode_reply, decode_simple_string,
};
pub use kind::ReplyKind;
pub use value::TaggedValue;
