//! Decoded reply values

use bytes::Bytes;

use super::ReplyKind;

/// A decoded reply, one variant per decodable kind.
///
/// Values own their content; nothing borrows from the frame they were
/// decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedValue {
    /// :123 replies
    Integer(i64),

    /// +OK style replies
    SimpleString(String),

    /// $... replies, `None` for the null bulk string
    BulkString(Option<Bytes>),

    /// *... replies holding scalar elements only
    Array(Vec<TaggedValue>),
}

impl TaggedValue {
    /// The reply kind this value was decoded from
    pub fn kind(&self) -> ReplyKind {
        match self {
            TaggedValue::Integer(_) => ReplyKind::Integer,
            TaggedValue::SimpleString(_) => ReplyKind::SimpleString,
            TaggedValue::BulkString(_) => ReplyKind::BulkString,
            TaggedValue::Array(_) => ReplyKind::Array,
        }
    }

    /// Text view of simple strings and non-null bulk strings
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TaggedValue::SimpleString(text) => Some(text.as_bytes()),
            TaggedValue::BulkString(Some(data)) => Some(&data[..]),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TaggedValue::BulkString(None))
    }
}
