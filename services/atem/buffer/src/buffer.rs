//! Fixed-length packet buffer and integer codec.
//!
//! A [`PacketBuffer`] owns exactly `len` bytes for its whole lifetime. All
//! multi-byte scalars are read and written in network byte order.

use crate::{BufferError, IntWidth};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

/// Fixed-length, byte-addressable packet buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketBuffer {
    data: BytesMut,
}

impl PacketBuffer {
    /// Create a zero-filled buffer of `len` bytes
    pub fn new(len: usize) -> Self {
        Self {
            data: BytesMut::zeroed(len),
        }
    }

    /// Create a buffer holding a copy of `raw`
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self {
            data: BytesMut::from(raw),
        }
    }

    /// Declared length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer has zero length
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its contents
    pub fn into_bytes(self) -> Bytes {
        self.data.freeze()
    }

    /// Check that `width` bytes starting at `offset` lie inside the buffer
    pub fn check_bounds(&self, offset: usize, width: usize) -> Result<(), BufferError> {
        match offset.checked_add(width) {
            Some(end) if end <= self.len() => Ok(()),
            _ => {
                debug!(
                    "Rejected access offset={} width={} len={}",
                    offset,
                    width,
                    self.len()
                );
                Err(BufferError::Bounds {
                    offset,
                    width,
                    len: self.len(),
                })
            }
        }
    }

    /// Bounds-checked view of a byte range
    pub(crate) fn slice(&self, offset: usize, width: usize) -> Result<&[u8], BufferError> {
        self.check_bounds(offset, width)?;
        Ok(&self.data[offset..offset + width])
    }

    /// Bounds-checked mutable view of a byte range
    pub(crate) fn slice_mut(
        &mut self,
        offset: usize,
        width: usize,
    ) -> Result<&mut [u8], BufferError> {
        self.check_bounds(offset, width)?;
        Ok(&mut self.data[offset..offset + width])
    }

    /// Write a `bits`-wide integer at `offset`
    ///
    /// Fails without touching the buffer if the width is unsupported, the
    /// range falls outside the buffer, or `value` does not fit.
    pub fn write_int(
        &mut self,
        offset: usize,
        value: impl Into<i128>,
        bits: u32,
        signed: bool,
    ) -> Result<(), BufferError> {
        let value = value.into();
        let width = IntWidth::try_from(bits)?;
        self.check_bounds(offset, width.bytes())?;
        width.check_range(value, signed)?;

        // Low bytes of the two's complement form; the range check above
        // guarantees nothing significant is cut off.
        let mut dst = self.slice_mut(offset, width.bytes())?;
        dst.put_uint(value as u64, width.bytes());

        trace!("write_int offset={} bits={} value={}", offset, bits, value);
        Ok(())
    }

    /// Read a `bits`-wide integer at `offset`
    pub fn read_int(&self, offset: usize, bits: u32, signed: bool) -> Result<i128, BufferError> {
        let width = IntWidth::try_from(bits)?;
        let mut src = self.slice(offset, width.bytes())?;

        let value = if signed {
            src.get_int(width.bytes()) as i128
        } else {
            src.get_uint(width.bytes()) as i128
        };
        Ok(value)
    }
}

impl AsRef<[u8]> for PacketBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
