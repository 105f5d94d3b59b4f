//! Single-bit access into multi-byte bitfields.
//!
//! A bitfield is an unsigned integer of one of the supported widths. Bit 0 is
//! the least significant bit of that integer, independent of byte order.

use crate::{BufferError, IntWidth, PacketBuffer};
use tracing::trace;

fn check_bit(bits: u32, bit: u32) -> Result<(), BufferError> {
    let width = IntWidth::try_from(bits)?;
    if bit >= width.bits() {
        return Err(BufferError::BitPosition { bit, bits });
    }
    Ok(())
}

impl PacketBuffer {
    /// Read bit `bit` of the `bits`-wide bitfield at `offset`
    pub fn read_flag(&self, offset: usize, bits: u32, bit: u32) -> Result<bool, BufferError> {
        check_bit(bits, bit)?;
        let field = self.read_int(offset, bits, false)?;
        Ok(field & (1i128 << bit) != 0)
    }

    /// Set or clear bit `bit` of the `bits`-wide bitfield at `offset`
    ///
    /// Every other bit of the field is written back unchanged.
    pub fn write_flag(
        &mut self,
        offset: usize,
        bits: u32,
        bit: u32,
        value: bool,
    ) -> Result<(), BufferError> {
        check_bit(bits, bit)?;
        let field = self.read_int(offset, bits, false)?;

        let adjusted = if value {
            field | (1i128 << bit)
        } else {
            field & !(1i128 << bit)
        };

        trace!(
            "write_flag offset={} bits={} bit={} value={}",
            offset,
            bits,
            bit,
            value
        );
        self.write_int(offset, adjusted, bits, false)
    }
}
