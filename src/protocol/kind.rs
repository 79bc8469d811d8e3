//! Reply kinds
//!
//! Maps the leading tag byte of a reply to the shape of its payload.

use std::fmt;

/// Tag byte for simple strings
pub const SIMPLE_STRING_TAG: u8 = b'+';

/// Tag byte for error replies
pub const ERROR_TAG: u8 = b'-';

/// Tag byte for integers
pub const INTEGER_TAG: u8 = b':';

/// Tag byte for bulk strings
pub const BULK_STRING_TAG: u8 = b'$';

/// Tag byte for arrays
pub const ARRAY_TAG: u8 = b'*';

/// Reply kinds
///
/// `Unknown` is a sentinel for unrecognized tag bytes and is never a valid
/// decode target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyKind {
    SimpleString,
    Error,
    Integer,
    BulkString,
    Array,
    Unknown,
}

impl ReplyKind {
    /// Resolve a tag byte into a reply kind. Never fails.
    #[inline]
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            SIMPLE_STRING_TAG => ReplyKind::SimpleString,
            ERROR_TAG => ReplyKind::Error,
            INTEGER_TAG => ReplyKind::Integer,
            BULK_STRING_TAG => ReplyKind::BulkString,
            ARRAY_TAG => ReplyKind::Array,
            _ => ReplyKind::Unknown,
        }
    }

    /// Whether values of this kind may appear as array elements
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            ReplyKind::Integer | ReplyKind::SimpleString | ReplyKind::BulkString
        )
    }
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReplyKind::SimpleString => "simple string",
            ReplyKind::Error => "error",
            ReplyKind::Integer => "integer",
            ReplyKind::BulkString => "bulk string",
            ReplyKind::Array => "array",
            ReplyKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
