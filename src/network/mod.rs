//! Network Module
//!
//! TCP transport for the client.
//!
//! ## Responsibilities
//! - Connect with configured timeouts
//! - Write encoded commands
//! - Read one complete reply frame per command
//! - Turn per-call deadlines into socket timeouts

mod connection;

pub use connection::Connection;
