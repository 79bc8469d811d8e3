//! Forward-only cursor over a reply frame

use crate::error::{RedwireError, Result};

/// Cursor over an in-memory frame. The position only ever moves forward.
#[derive(Debug)]
pub(crate) struct FrameCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FrameCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Consume and return the next byte
    #[inline]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skip up to `n` bytes, stopping at the end of the frame
    #[inline]
    pub fn skip(&mut self, n: usize) {
        self.pos += n.min(self.remaining());
    }

    /// Consume the next byte only if it equals `byte`
    #[inline]
    pub fn skip_if(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Read line content up to the next CR.
    ///
    /// The cursor ends just past the CR; the LF that follows is left for the
    /// caller.
    pub fn read_line(&mut self) -> Result<&'a [u8]> {
        let rest = &self.buf[self.pos..];
        let Some(end) = rest.iter().position(|&b| b == b'\r') else {
            return Err(RedwireError::incomplete(format!(
                "missing line terminator after {} bytes",
                rest.len()
            )));
        };
        self.pos += end + 1;
        Ok(&rest[..end])
    }

    /// Read exactly `n` raw bytes
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(RedwireError::incomplete(format!(
                "expected {} bytes, got {}",
                n,
                self.remaining()
            )));
        }
        let data = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(data)
    }
}
