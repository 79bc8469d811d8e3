//! Protocol codec
//!
//! Command encoding and reply framing for stream transports.
//!
//! ## Command Format
//! Commands are sent as an array of bulk strings:
//! ```text
//! *<argc>\r\n
//! $<len>\r\n<arg>\r\n      (repeated argc times)
//! ```
//!
//! ## Reply Framing
//! The decoder works on complete frames only. [`read_frame`] pulls exactly
//! one reply off a buffered stream, using just enough of the header lines to
//! know how many bytes belong to the frame.

use std::io::{BufRead, ErrorKind, Read, Write};

use super::decoder::parse_i64;
use super::{Command, ReplyKind};
use crate::error::{RedwireError, Result};

/// Max array nesting followed while framing a reply
pub const MAX_NESTING_DEPTH: usize = 32;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command as an array of bulk strings
pub fn encode_command(command: &Command) -> Vec<u8> {
    let args = command.args();
    let payload_len: usize = args.iter().map(|arg| arg.len() + 16).sum();

    let mut message = Vec::with_capacity(16 + payload_len);
    message.push(b'*');
    message.extend_from_slice(args.len().to_string().as_bytes());
    message.extend_from_slice(b"\r\n");
    for arg in args {
        message.push(b'$');
        message.extend_from_slice(arg.len().to_string().as_bytes());
        message.extend_from_slice(b"\r\n");
        message.extend_from_slice(arg);
        message.extend_from_slice(b"\r\n");
    }

    message
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = encode_command(command);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Reply Framing
// =============================================================================

/// Read one complete reply frame from a stream
///
/// Returns the raw bytes of the frame, terminators included, ready for the
/// decoder. Fails with `ConnectionClosed` if the stream ends before the first
/// byte and with `IncompleteFrame` if it ends in the middle of a frame.
pub fn read_frame<R: BufRead>(reader: &mut R, max_frame_size: usize) -> Result<Vec<u8>> {
    if reader.fill_buf()?.is_empty() {
        return Err(RedwireError::ConnectionClosed);
    }

    let mut frame = Vec::new();
    read_frame_into(reader, &mut frame, max_frame_size, 0)?;
    Ok(frame)
}

fn read_frame_into<R: BufRead>(
    reader: &mut R,
    frame: &mut Vec<u8>,
    max_frame_size: usize,
    depth: usize,
) -> Result<()> {
    let start = frame.len();
    read_header_line(reader, frame, max_frame_size)?;

    let tag = frame[start];
    let header = &frame[start + 1..frame.len() - 2];

    match ReplyKind::from_tag(tag) {
        ReplyKind::SimpleString | ReplyKind::Error | ReplyKind::Integer => Ok(()),
        ReplyKind::BulkString => {
            let length = parse_i64(header)?;
            if length < 0 {
                return Ok(());
            }
            let body_len = usize::try_from(length)
                .unwrap_or(usize::MAX)
                .saturating_add(2);
            ensure_fits(frame.len().saturating_add(body_len), max_frame_size)?;

            let body_start = frame.len();
            frame.resize(body_start + body_len, 0);
            reader
                .read_exact(&mut frame[body_start..])
                .map_err(|err| match err.kind() {
                    ErrorKind::UnexpectedEof => RedwireError::incomplete(format!(
                        "stream ended inside a {} byte bulk string",
                        length
                    )),
                    _ => RedwireError::Io(err),
                })
        }
        ReplyKind::Array => {
            if depth >= MAX_NESTING_DEPTH {
                return Err(RedwireError::UnsupportedElementType(ReplyKind::Array));
            }
            let count = parse_i64(header)?;
            for _ in 0..count.max(0) {
                read_frame_into(reader, frame, max_frame_size, depth + 1)?;
            }
            Ok(())
        }
        ReplyKind::Unknown => Err(RedwireError::UnknownType(tag)),
    }
}

/// Append one CR LF terminated line to `frame`, bounded by the frame limit
fn read_header_line<R: BufRead>(
    reader: &mut R,
    frame: &mut Vec<u8>,
    max_frame_size: usize,
) -> Result<()> {
    let start = frame.len();
    ensure_fits(start, max_frame_size)?;

    // One byte past the limit tells an oversized line apart from EOF.
    let limit = ((max_frame_size - start) as u64).saturating_add(1);
    reader.by_ref().take(limit).read_until(b'\n', frame)?;
    ensure_fits(frame.len(), max_frame_size)?;

    let line = &frame[start..];
    if line.len() < 3 || !line.ends_with(b"\r\n") {
        return Err(RedwireError::incomplete(format!(
            "stream ended inside a header line ({} bytes read)",
            line.len()
        )));
    }
    Ok(())
}

fn ensure_fits(size: usize, max: usize) -> Result<()> {
    if size > max {
        return Err(RedwireError::FrameTooLarge { size, max });
    }
    Ok(())
}
