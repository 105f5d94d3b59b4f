//! Command packets for the ATEM switcher protocol.
//!
//! This crate sits on top of `atem-buffer` and provides the packet contract
//! every command implements, declarative command layouts loaded from protocol
//! definition files, and a handful of hand-written commands.
//!
//! ## Encoding
//!
//! Every command has a fixed body size. Encoding starts from a zero-filled
//! buffer of that size and writes each field at its offset; decoding wraps a
//! copy of the received bytes and reads the fields back.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;
pub mod config;
pub mod error;
pub mod layout;
pub mod packet;

// Re-export main types
pub use commands::{AuxSource, ProductId, ProgramInput, TransitionPosition};
pub use config::{ProtocolConfig, DEFAULT_PROTOCOL_FILE, PROTOCOL_FILE_ENV};
pub use error::PacketError;
pub use layout::{CommandLayout, FieldDef, FieldKind, FieldValue, Fields};
pub use packet::Packet;

pub use atem_buffer::{BufferError, PacketBuffer};
