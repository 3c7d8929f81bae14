//! Line protocol that lets a player live in another process.
//!
//! One command per line, fields separated by spaces and sub-fields by commas
//! or colons. Integers travel as unsigned lowercase hexadecimal and text as
//! Base64 of its UTF-8 bytes.

pub mod client;
pub mod command;
pub mod error;
pub mod message;
pub mod serializer;
pub mod server;

pub use client::RemotePlayerClient;
pub use command::JassCommand;
pub use error::ProtocolError;
pub use message::{Reply, Request};
pub use server::RemotePlayerServer;

/// Port the server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 5108;
