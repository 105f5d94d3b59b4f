//! Fixed-length packet buffer codec for ATEM command packets.
//!
//! This crate provides the byte-level building blocks every command packet is
//! encoded and decoded with: a fixed-size buffer with strict bounds checking,
//! and typed accessors for the scalar field kinds the protocol uses.
//!
//! ## Field Kinds
//!
//! - **Integers**: 8/16/32/64-bit, signed or unsigned, network byte order
//! - **Flags**: single bits inside an unsigned bitfield, bit 0 = LSB
//! - **Fixed-point floats**: decimals stored as integers scaled by `10^factor`
//! - **Strings**: fixed-width UTF-8, NUL-padded on write, NUL-stripped on read
//!
//! ## Example
//!
//! ```
//! use atem_buffer::PacketBuffer;
//!
//! let mut buf = PacketBuffer::new(8);
//! buf.write_int(0, 127, 8, false)?;
//! buf.write_int(1, -2, 8, true)?;
//! buf.write_flag(2, 16, 3, true)?;
//! buf.write_string(4, 4, "ME1")?;
//!
//! assert_eq!(buf.as_bytes(), &[0x7F, 0xFE, 0x00, 0x08, b'M', b'E', b'1', 0]);
//! assert_eq!(buf.read_int(1, 8, true)?, -2);
//! assert_eq!(buf.read_string(4, 4)?, "ME1");
//! # Ok::<(), atem_buffer::BufferError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod error;
pub mod width;

mod flag;
mod float;
mod string;

// Re-export main types
pub use buffer::PacketBuffer;
pub use error::BufferError;
pub use float::MAX_FACTOR;
pub use width::IntWidth;
