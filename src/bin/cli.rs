//! redwire CLI Client
//!
//! Command-line interface for sending commands to a Redis-compatible server.

use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use redwire::{Client, ClientConfig, RedwireError, TaggedValue};
use redwire::protocol::Command;
use tracing_subscriber::{fmt, EnvFilter};

/// redwire CLI
#[derive(Parser, Debug)]
#[command(name = "redwire-cli")]
#[command(about = "CLI for Redis-compatible servers")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:6379")]
    server: String,

    /// Deadline for the whole command in milliseconds (0 disables)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Echo a message
    Echo {
        /// The message to echo
        message: String,
    },

    /// Ping the server
    Ping {
        /// Optional payload to echo back
        message: Option<String>,
    },

    /// Send any command, e.g. `raw GET key`
    Raw {
        /// Command name followed by its arguments
        #[arg(required = true, num_args = 1..)]
        args: Vec<String>,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,redwire=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("redwire CLI v{}", redwire::VERSION);

    let config = ClientConfig::builder()
        .addr(&args.server)
        .connect_timeout_ms(args.timeout_ms)
        .build();

    let mut client = match Client::with_config(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Cannot connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };

    let deadline = (args.timeout_ms > 0)
        .then(|| Instant::now() + Duration::from_millis(args.timeout_ms));

    let command = match args.command {
        Commands::Echo { message } => Command::echo(message),
        Commands::Ping { message } => Command::Ping {
            message: message.map(String::into_bytes),
        },
        Commands::Raw { args } => Command::raw(args),
    };

    let result = client.query(&command, deadline);
    if let Err(e) = client.close() {
        tracing::debug!("Error closing connection: {}", e);
    }

    match result {
        Ok(value) => println!("{}", render(&value)),
        Err(RedwireError::Server(message)) => {
            println!("(error) {}", message);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("{} failed: {}", command.name(), e);
            std::process::exit(1);
        }
    }
}

/// Render a reply the way redis-cli does
fn render(value: &TaggedValue) -> String {
    match value {
        TaggedValue::Integer(n) => format!("(integer) {}", n),
        TaggedValue::SimpleString(text) => text.clone(),
        TaggedValue::BulkString(Some(data)) => format!("{:?}", String::from_utf8_lossy(data)),
        TaggedValue::BulkString(None) => "(nil)".to_string(),
        TaggedValue::Array(items) if items.is_empty() => "(empty array)".to_string(),
        TaggedValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| format!("{}) {}", idx + 1, render(item)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
