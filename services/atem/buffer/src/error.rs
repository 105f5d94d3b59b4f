//! Buffer codec error types.

use thiserror::Error;

/// Buffer codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Access would extend past the end of the buffer
    #[error("not enough room in buffer: {width} bytes at offset {offset} exceeds length {len}")]
    Bounds {
        /// Requested byte offset
        offset: usize,
        /// Requested width in bytes
        width: usize,
        /// Declared buffer length
        len: usize,
    },

    /// Integer width is not one of the supported widths
    #[error("invalid number of bits ({0}) requested")]
    Width(u32),

    /// Value does not fit the requested width and signedness
    #[error("value {value} out of range for {bits}bit {} integer", signedness(.signed))]
    Range {
        /// Rejected value, rendered for display
        value: String,
        /// Target width in bits
        bits: u32,
        /// Whether the target is signed
        signed: bool,
    },

    /// Decimal scale factor is too large to represent
    #[error("scale factor {0} exceeds the supported maximum")]
    Factor(u32),

    /// Bit position lies outside the bitfield
    #[error("bit position {bit} outside {bits}bit bitfield")]
    BitPosition {
        /// Requested bit
        bit: u32,
        /// Bitfield width in bits
        bits: u32,
    },

    /// String field does not hold valid UTF-8
    #[error("string field at offset {offset} is not valid utf-8")]
    StringDecode {
        /// Byte offset of the field
        offset: usize,
    },
}

impl BufferError {
    /// Create a range error for a rejected value
    pub fn range(value: impl ToString, bits: u32, signed: bool) -> Self {
        BufferError::Range {
            value: value.to_string(),
            bits,
            signed,
        }
    }
}

fn signedness(signed: &bool) -> &'static str {
    if *signed {
        "signed"
    } else {
        "unsigned"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BufferError::Bounds {
            offset: 100,
            width: 1,
            len: 8,
        };
        assert!(err.to_string().contains("offset 100"));

        let err = BufferError::range(300, 8, false);
        assert_eq!(
            err.to_string(),
            "value 300 out of range for 8bit unsigned integer"
        );

        let err = BufferError::Width(23);
        assert!(err.to_string().contains("23"));
    }
}
