//! Connection Handler
//!
//! Owns a single TCP connection to the server.

use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use crate::config::ClientConfig;
use crate::error::{RedwireError, Result};
use crate::protocol::{read_frame, write_command, Command};

/// TCP stream half bounded by an optional absolute deadline
///
/// The socket timeout restarts on every `read()` or `write()`, so before each
/// call it is cut down to the time left until the deadline. Once the deadline
/// has passed, calls fail with `ErrorKind::TimedOut` without touching the
/// socket.
struct DeadlineStream {
    stream: TcpStream,
    deadline: Option<Instant>,
}

impl DeadlineStream {
    fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            deadline: None,
        }
    }

    fn remaining(&self) -> io::Result<Option<Duration>> {
        let Some(deadline) = self.deadline else {
            return Ok(None);
        };
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(io::Error::new(ErrorKind::TimedOut, "deadline exceeded"));
        }
        Ok(Some(remaining))
    }
}

impl Read for DeadlineStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(remaining) = self.remaining()? {
            self.stream.set_read_timeout(Some(remaining))?;
        }
        self.stream.read(buf)
    }
}

impl Write for DeadlineStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(remaining) = self.remaining()? {
            self.stream.set_write_timeout(Some(remaining))?;
        }
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

/// A single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<DeadlineStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<DeadlineStream>,

    /// Largest reply frame accepted from the server
    max_frame_size: usize,

    /// Timeouts from the config, restored after a per-call deadline
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Connect to the configured server
    ///
    /// Sets up buffered I/O and configures timeouts
    pub fn open(config: &ClientConfig) -> Result<Self> {
        let addr = resolve(&config.addr)?;

        let stream = if config.connect_timeout_ms > 0 {
            TcpStream::connect_timeout(&addr, Duration::from_millis(config.connect_timeout_ms))?
        } else {
            TcpStream::connect(addr)?
        };

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        let mut conn = Self {
            reader: BufReader::new(DeadlineStream::new(read_stream)),
            writer: BufWriter::new(DeadlineStream::new(write_stream)),
            max_frame_size: config.max_frame_size,
            read_timeout: millis(config.read_timeout_ms),
            write_timeout: millis(config.write_timeout_ms),
            peer_addr: addr.to_string(),
        };
        conn.apply_timeouts(conn.read_timeout, conn.write_timeout)?;

        tracing::debug!("Connected to {}", conn.peer_addr);
        Ok(conn)
    }

    /// Bound every following read and write by an absolute deadline
    ///
    /// The whole exchange must finish before `deadline`, however the server
    /// paces its bytes. `None` restores the configured timeouts.
    pub fn set_deadline(&mut self, deadline: Option<Instant>) -> Result<()> {
        if let Some(deadline) = deadline {
            if deadline <= Instant::now() {
                tracing::warn!("Deadline already passed for {}", self.peer_addr);
                return Err(RedwireError::DeadlineExceeded);
            }
        }

        self.reader.get_mut().deadline = deadline;
        self.writer.get_mut().deadline = deadline;
        if deadline.is_none() {
            self.apply_timeouts(self.read_timeout, self.write_timeout)?;
        }
        Ok(())
    }

    /// Send a command and read back one complete reply frame
    pub fn send(&mut self, command: &Command) -> Result<Vec<u8>> {
        tracing::trace!("Sending {} to {}", command.name(), self.peer_addr);
        write_command(&mut self.writer, command).map_err(|e| self.log_io_error("writing", e))?;

        let frame = read_frame(&mut self.reader, self.max_frame_size)
            .map_err(|e| self.log_io_error("reading", e))?;
        tracing::trace!("Received {} byte reply from {}", frame.len(), self.peer_addr);
        Ok(frame)
    }

    /// Shut down both halves of the socket
    pub fn close(self) -> Result<()> {
        tracing::debug!("Closing connection to {}", self.peer_addr);
        match self.reader.get_ref().stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // Peer already went away
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn apply_timeouts(
        &mut self,
        read_timeout: Option<Duration>,
        write_timeout: Option<Duration>,
    ) -> Result<()> {
        self.reader.get_ref().stream.set_read_timeout(read_timeout)?;
        self.writer.get_ref().stream.set_write_timeout(write_timeout)?;
        Ok(())
    }

    fn log_io_error(&self, action: &str, err: RedwireError) -> RedwireError {
        match &err {
            RedwireError::Io(e)
                if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
            {
                // Read timeout (Windows uses TimedOut instead of WouldBlock)
                tracing::debug!("Timed out {} {}", action, self.peer_addr);
            }
            RedwireError::Io(e)
                if matches!(
                    e.kind(),
                    ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::BrokenPipe
                ) =>
            {
                tracing::debug!("Connection to {} lost while {}: {}", self.peer_addr, action, e);
            }
            RedwireError::ConnectionClosed => {
                tracing::debug!("Server {} closed the connection", self.peer_addr);
            }
            _ => {
                tracing::warn!("Error {} {}: {}", action, self.peer_addr, err);
            }
        }
        err
    }
}

fn resolve(addr: &str) -> Result<SocketAddr> {
    addr.to_socket_addrs()
        .map_err(|e| RedwireError::InvalidAddress(format!("{}: {}", addr, e)))?
        .next()
        .ok_or_else(|| RedwireError::InvalidAddress(addr.to_string()))
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}
