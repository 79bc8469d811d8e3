//! Command definitions
//!
//! Represents commands sent to the server.

/// A command to send to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Echo a message back
    Echo { message: Vec<u8> },

    /// Ping (health check), optionally with a payload to echo
    Ping { message: Option<Vec<u8>> },

    /// Any other command, given as its raw arguments
    Raw { args: Vec<Vec<u8>> },
}

impl Command {
    pub fn echo(message: impl Into<Vec<u8>>) -> Self {
        Command::Echo {
            message: message.into(),
        }
    }

    pub fn ping() -> Self {
        Command::Ping { message: None }
    }

    /// Build a command from its name and arguments, e.g. `["GET", "key"]`
    pub fn raw<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Vec<u8>>,
    {
        Command::Raw {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Command name and arguments in wire order
    pub fn args(&self) -> Vec<&[u8]> {
        match self {
            Command::Echo { message } => vec![&b"ECHO"[..], message.as_slice()],
            Command::Ping { message: Some(message) } => vec![&b"PING"[..], message.as_slice()],
            Command::Ping { message: None } => vec![&b"PING"[..]],
            Command::Raw { args } => args.iter().map(Vec::as_slice).collect(),
        }
    }

    /// Command name for logging
    pub fn name(&self) -> String {
        match self.args().first() {
            Some(name) => String::from_utf8_lossy(name).to_uppercase(),
            None => String::new(),
        }
    }
}
