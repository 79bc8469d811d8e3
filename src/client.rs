//! Blocking client
//!
//! A thin facade over one [`Connection`] that sends commands and decodes the
//! replies through the protocol decoder.

use std::time::Instant;

use bytes::Bytes;

use crate::config::ClientConfig;
use crate::error::{RedwireError, Result};
use crate::network::Connection;
use crate::protocol::{decode_bulk_string, decode_reply, Command, ReplyKind, TaggedValue};

/// Blocking client holding a single connection
///
/// After [`close`](Client::close), or after an exchange fails partway through,
/// every call fails with [`RedwireError::NotConnected`].
pub struct Client {
    config: ClientConfig,
    conn: Option<Connection>,
}

impl Client {
    /// Connect with the default configuration
    pub fn connect(addr: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::builder().addr(addr).build())
    }

    /// Connect with a custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let conn = Connection::open(&config)?;
        Ok(Self {
            config,
            conn: Some(conn),
        })
    }

    /// Configured server address
    pub fn addr(&self) -> &str {
        &self.config.addr
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Send a command and return the raw reply frame
    ///
    /// With a deadline, the write and the read must both finish before it;
    /// otherwise the configured socket timeouts apply.
    ///
    /// A deadline that has already passed fails with `DeadlineExceeded` and
    /// leaves the connection usable. Any other failure may leave part of a
    /// reply on the socket, so the connection is dropped.
    pub fn send_command(&mut self, command: &Command, deadline: Option<Instant>) -> Result<Vec<u8>> {
        let conn = self.conn.as_mut().ok_or(RedwireError::NotConnected)?;
        let result = match conn.set_deadline(deadline) {
            Ok(()) => conn.send(command),
            Err(RedwireError::DeadlineExceeded) => return Err(RedwireError::DeadlineExceeded),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            self.discard_connection(e);
        }
        result
    }

    /// Send a command and decode whatever reply comes back
    pub fn query(&mut self, command: &Command, deadline: Option<Instant>) -> Result<TaggedValue> {
        let frame = self.send_command(command, deadline)?;
        decode_reply(&frame)
    }

    /// ECHO a message; the server answers with a bulk string
    pub fn echo(&mut self, message: impl Into<Vec<u8>>) -> Result<Option<Bytes>> {
        let frame = self.send_command(&Command::echo(message), None)?;
        decode_bulk_string(&frame)
    }

    /// PING the server
    ///
    /// Returns `PONG`, or the payload when one was given.
    pub fn ping(&mut self, message: Option<&[u8]>) -> Result<Bytes> {
        let command = Command::Ping {
            message: message.map(<[u8]>::to_vec),
        };
        match self.query(&command, None)? {
            TaggedValue::SimpleString(text) => Ok(Bytes::from(text)),
            TaggedValue::BulkString(Some(data)) => Ok(data),
            other => Err(RedwireError::TypeMismatch {
                expected: ReplyKind::SimpleString,
                actual: other.kind(),
            }),
        }
    }

    fn discard_connection(&mut self, cause: &RedwireError) {
        if let Some(conn) = self.conn.take() {
            tracing::debug!("Dropping connection to {} after: {}", self.config.addr, cause);
            if let Err(e) = conn.close() {
                tracing::debug!("Error closing connection to {}: {}", self.config.addr, e);
            }
        }
    }

    /// Close the connection. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        match self.conn.take() {
            Some(conn) => conn.close(),
            None => Ok(()),
        }
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::debug!("Error closing connection to {}: {}", self.config.addr, e);
        }
    }
}
