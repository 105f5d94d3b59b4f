//! Fixed-point decimals stored as scaled integers.
//!
//! A value `v` with scale factor `f` is stored as the integer `v * 10^f`.

use crate::{BufferError, IntWidth, PacketBuffer};

/// Largest scale factor; `10^19` is the largest power of ten a 64-bit
/// unsigned field can hold
pub const MAX_FACTOR: u32 = 19;

fn scale(factor: u32) -> Result<f64, BufferError> {
    if factor > MAX_FACTOR {
        return Err(BufferError::Factor(factor));
    }
    Ok(10f64.powi(factor as i32))
}

impl PacketBuffer {
    /// Read a fixed-point decimal from the `bits`-wide integer at `offset`
    pub fn read_float(
        &self,
        offset: usize,
        bits: u32,
        factor: u32,
        signed: bool,
    ) -> Result<f64, BufferError> {
        let scale = scale(factor)?;
        let raw = self.read_int(offset, bits, signed)?;
        Ok(raw as f64 / scale)
    }

    /// Write `value` as a `bits`-wide integer scaled by `10^factor`
    ///
    /// The scaled value is rounded to the nearest integer, halves away from
    /// zero.
    pub fn write_float(
        &mut self,
        offset: usize,
        bits: u32,
        factor: u32,
        value: f64,
        signed: bool,
    ) -> Result<(), BufferError> {
        let width = IntWidth::try_from(bits)?;
        let scaled = (value * scale(factor)?).round();

        // `as` saturates, so compare in float space before converting
        if !scaled.is_finite()
            || scaled < width.min(signed) as f64
            || scaled > width.max(signed) as f64
        {
            return Err(BufferError::range(scaled, bits, signed));
        }

        self.write_int(offset, scaled as i128, bits, signed)
    }
}
