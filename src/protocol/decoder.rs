//! Reply decoder
//!
//! Decodes one complete, in-memory reply frame into typed values.
//!
//! Every entry point opens its own cursor over the caller's buffer,
//! so decoding holds no state between calls and the buffer is only borrowed
//! for the duration of the call.
//!
//! ## Terminator handling
//! Line fields are read up to and including the CR. The LF that follows is
//! skipped by whoever reads the next field: the bulk string decoder skips the
//! LF of its length line, and the array decoder skips the residual terminator
//! after each element. A top-level bulk string leaves its trailing CR LF
//! unconsumed.

use bytes::Bytes;

use super::cursor::FrameCursor;
use super::{ReplyKind, TaggedValue};
use crate::error::{RedwireError, Result};

// =============================================================================
// Typed Entry Points
// =============================================================================

/// Decode an integer reply, e.g. `:14\r\n`
pub fn decode_integer(frame: &[u8]) -> Result<i64> {
    let mut cursor = FrameCursor::new(frame);
    expect_kind(&mut cursor, ReplyKind::Integer)?;
    read_integer(&mut cursor)
}

/// Decode a simple string reply, e.g. `+OK\r\n`
pub fn decode_simple_string(frame: &[u8]) -> Result<String> {
    let mut cursor = FrameCursor::new(frame);
    expect_kind(&mut cursor, ReplyKind::SimpleString)?;
    read_simple_string(&mut cursor)
}

/// Decode a bulk string reply, e.g. `$6\r\nfoobar\r\n`
///
/// Returns `Ok(None)` for the null bulk string `$-1\r\n`.
pub fn decode_bulk_string(frame: &[u8]) -> Result<Option<Bytes>> {
    let mut cursor = FrameCursor::new(frame);
    expect_kind(&mut cursor, ReplyKind::BulkString)?;
    read_bulk_string(&mut cursor)
}

/// Decode an array of scalar replies, e.g. `*2\r\n:1\r\n+two\r\n`
///
/// Elements may only be integers, simple strings or bulk strings. If the
/// frame runs out before the declared count is reached, the elements decoded
/// so far are returned.
pub fn decode_array(frame: &[u8]) -> Result<Vec<TaggedValue>> {
    let mut cursor = FrameCursor::new(frame);
    expect_kind(&mut cursor, ReplyKind::Array)?;
    read_array(&mut cursor)
}

/// Decode a reply of any supported kind
///
/// Error replies are returned as [`RedwireError::Server`].
pub fn decode_reply(frame: &[u8]) -> Result<TaggedValue> {
    let mut cursor = FrameCursor::new(frame);
    let tag = read_tag(&mut cursor)?;
    let kind = ReplyKind::from_tag(tag);
    tracing::trace!("Decoding {} reply ({} bytes)", kind, frame.len());

    match kind {
        ReplyKind::Integer => read_integer(&mut cursor).map(TaggedValue::Integer),
        ReplyKind::SimpleString => read_simple_string(&mut cursor).map(TaggedValue::SimpleString),
        ReplyKind::BulkString => read_bulk_string(&mut cursor).map(TaggedValue::BulkString),
        ReplyKind::Array => read_array(&mut cursor).map(TaggedValue::Array),
        ReplyKind::Error => Err(RedwireError::Server(read_error(&mut cursor)?)),
        ReplyKind::Unknown => Err(RedwireError::UnknownType(tag)),
    }
}

// =============================================================================
// Tag Handling
// =============================================================================

fn read_tag(cursor: &mut FrameCursor<'_>) -> Result<u8> {
    cursor
        .next_byte()
        .ok_or_else(|| RedwireError::incomplete("empty frame"))
}

/// Read the leading tag of a frame, rejecting unknown tags
fn read_kind(cursor: &mut FrameCursor<'_>) -> Result<ReplyKind> {
    let tag = read_tag(cursor)?;
    match ReplyKind::from_tag(tag) {
        ReplyKind::Unknown => Err(RedwireError::UnknownType(tag)),
        kind => Ok(kind),
    }
}

/// Check the leading tag against the caller's expectation
///
/// An error reply in place of the expected kind is surfaced as a server
/// error regardless of what was expected.
fn expect_kind(cursor: &mut FrameCursor<'_>, expected: ReplyKind) -> Result<()> {
    let actual = read_kind(cursor)?;
    if actual == expected {
        return Ok(());
    }

    match actual {
        ReplyKind::Error => Err(RedwireError::Server(read_error(cursor)?)),
        _ => Err(RedwireError::TypeMismatch { expected, actual }),
    }
}

// =============================================================================
// Field Decoders
// =============================================================================

fn read_integer(cursor: &mut FrameCursor<'_>) -> Result<i64> {
    parse_i64(cursor.read_line()?)
}

fn read_simple_string(cursor: &mut FrameCursor<'_>) -> Result<String> {
    let line = cursor.read_line()?;
    Ok(String::from_utf8_lossy(line).into_owned())
}

fn read_error(cursor: &mut FrameCursor<'_>) -> Result<String> {
    let line = cursor.read_line()?;
    Ok(String::from_utf8_lossy(line).into_owned())
}

/// Read a bulk string body: length line, LF, then exactly `length` bytes.
/// The CR LF after the content is left for the caller.
fn read_bulk_string(cursor: &mut FrameCursor<'_>) -> Result<Option<Bytes>> {
    let length = read_integer(cursor).map_err(|source| RedwireError::SizeRead {
        source: Box::new(source),
    })?;

    if length == -1 {
        return Ok(None);
    }
    if length < 0 {
        return Err(RedwireError::InvalidLength {
            kind: ReplyKind::BulkString,
            length,
        });
    }

    cursor.skip(1);
    let length = usize::try_from(length).unwrap_or(usize::MAX);
    let data = cursor.take(length)?;
    Ok(Some(Bytes::copy_from_slice(data)))
}

fn read_array(cursor: &mut FrameCursor<'_>) -> Result<Vec<TaggedValue>> {
    let count = read_integer(cursor)?;
    if count < 0 {
        return Err(RedwireError::InvalidLength {
            kind: ReplyKind::Array,
            length: count,
        });
    }
    cursor.skip(1);

    // The declared count bounds the allocation, and so does the frame: every
    // element needs at least one byte.
    let capacity = usize::try_from(count)
        .unwrap_or(usize::MAX)
        .min(cursor.remaining());
    let mut items = Vec::with_capacity(capacity);

    for _ in 0..count {
        let Some(tag) = cursor.next_byte() else {
            tracing::debug!(
                "Frame exhausted after {} of {} array elements",
                items.len(),
                count
            );
            break;
        };

        let kind = ReplyKind::from_tag(tag);
        if !kind.is_scalar() {
            return Err(RedwireError::UnsupportedElementType(kind));
        }

        let item = match kind {
            ReplyKind::Integer => TaggedValue::Integer(read_integer(cursor)?),
            ReplyKind::SimpleString => TaggedValue::SimpleString(read_simple_string(cursor)?),
            _ => TaggedValue::BulkString(read_bulk_string(cursor)?),
        };
        // A non-null bulk element still has its own CR ahead of the residual LF
        if kind == ReplyKind::BulkString && !item.is_null() {
            cursor.skip_if(b'\r');
        }

        items.push(item);
        cursor.skip(1);
    }

    Ok(items)
}

/// Parse a base-10 signed integer with an optional leading sign
pub(crate) fn parse_i64(line: &[u8]) -> Result<i64> {
    std::str::from_utf8(line)
        .ok()
        .and_then(|text| text.parse::<i64>().ok())
        .ok_or_else(|| RedwireError::Format(String::from_utf8_lossy(line).into_owned()))
}
