//! Fixed-width, NUL-padded UTF-8 text fields.

use crate::{BufferError, PacketBuffer};
use tracing::trace;

/// Longest prefix of `text` that fits in `len` bytes without splitting a
/// UTF-8 sequence
fn truncate_utf8(text: &str, len: usize) -> &str {
    if text.len() <= len {
        return text;
    }
    let mut end = len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

impl PacketBuffer {
    /// Read the `len`-byte text field at `offset`, dropping trailing NULs
    pub fn read_string(&self, offset: usize, len: usize) -> Result<String, BufferError> {
        let raw = self.slice(offset, len)?;
        let end = raw.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);

        std::str::from_utf8(&raw[..end])
            .map(str::to_owned)
            .map_err(|_| BufferError::StringDecode { offset })
    }

    /// Write `text` into the `len`-byte field at `offset`
    ///
    /// Shorter text is padded with NULs. Longer text is cut at the last whole
    /// character that fits.
    pub fn write_string(
        &mut self,
        offset: usize,
        len: usize,
        text: &str,
    ) -> Result<(), BufferError> {
        let encoded = truncate_utf8(text, len).as_bytes();
        let dst = self.slice_mut(offset, len)?;

        dst[..encoded.len()].copy_from_slice(encoded);
        dst[encoded.len()..].fill(0);

        trace!("write_string offset={} len={} text={:?}", offset, len, text);
        Ok(())
    }
}
