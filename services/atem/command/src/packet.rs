//! The contract every fixed-size command packet implements.

use crate::PacketError;
use atem_buffer::PacketBuffer;
use bytes::Bytes;

/// A fixed-size command packet
pub trait Packet: Sized {
    /// Four-character command identifier
    const NAME: &'static str;

    /// Encoded size in bytes
    const SIZE: usize;

    /// Parse a packet from its raw bytes
    fn from_bytes(raw: &[u8]) -> Result<Self, PacketError>;

    /// Encode the packet into its raw bytes
    fn to_bytes(&self) -> Result<Bytes, PacketError>;

    /// Zero-filled buffer sized for this packet
    fn buffer() -> PacketBuffer {
        PacketBuffer::new(Self::SIZE)
    }

    /// Wrap `raw` in a buffer after checking its length
    fn wrap(raw: &[u8]) -> Result<PacketBuffer, PacketError> {
        if raw.len() != Self::SIZE {
            return Err(PacketError::Size {
                command: Self::NAME.to_string(),
                expected: Self::SIZE,
                actual: raw.len(),
            });
        }
        Ok(PacketBuffer::from_bytes(raw))
    }
}
