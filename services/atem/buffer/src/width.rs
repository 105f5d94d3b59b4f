//! Supported integer widths.
//!
//! Every scalar access in the codec goes through [`IntWidth`], so byte counts
//! and value ranges are decided in exactly one place.

use crate::BufferError;

/// Fixed integer width on the wire
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    /// 8-bit integer
    W8 = 8,
    /// 16-bit integer
    W16 = 16,
    /// 32-bit integer
    W32 = 32,
    /// 64-bit integer
    W64 = 64,
}

impl IntWidth {
    /// All supported widths, narrowest first
    pub const ALL: [IntWidth; 4] = [IntWidth::W8, IntWidth::W16, IntWidth::W32, IntWidth::W64];

    /// Width in bits
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Width in bytes
    pub fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Smallest value representable at this width
    pub fn min(self, signed: bool) -> i128 {
        if signed {
            -(1i128 << (self.bits() - 1))
        } else {
            0
        }
    }

    /// Largest value representable at this width
    pub fn max(self, signed: bool) -> i128 {
        if signed {
            (1i128 << (self.bits() - 1)) - 1
        } else {
            (1i128 << self.bits()) - 1
        }
    }

    /// Check that `value` fits this width and signedness
    pub fn check_range(self, value: i128, signed: bool) -> Result<(), BufferError> {
        if value < self.min(signed) || value > self.max(signed) {
            return Err(BufferError::range(value, self.bits(), signed));
        }
        Ok(())
    }
}

impl TryFrom<u32> for IntWidth {
    type Error = BufferError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        IntWidth::ALL
            .into_iter()
            .find(|width| width.bits() == bits)
            .ok_or(BufferError::Width(bits))
    }
}
