//! Hand-written command packets.
//!
//! ## Layouts
//!
//! | Command | Size | Fields                                                                 |
//! |---------|------|------------------------------------------------------------------------|
//! | `PrgI`  | 4    | mix_effect u8 @0, source u16 @2                                        |
//! | `AuxS`  | 4    | aux u8 @0, source u16 @2                                               |
//! | `TrPs`  | 8    | mix_effect u8 @0, in_transition bit0 @1, frames u8 @2, position u16/4 @4 |
//! | `_pin`  | 44   | name string(44) @0                                                     |

use crate::{Packet, PacketError};
use bytes::Bytes;

/// Program input selection for a mix effect bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramInput {
    /// Mix effect bus index
    pub mix_effect: u8,
    /// Selected video source
    pub source: u16,
}

impl Packet for ProgramInput {
    const NAME: &'static str = "PrgI";
    const SIZE: usize = 4;

    fn from_bytes(raw: &[u8]) -> Result<Self, PacketError> {
        let buf = Self::wrap(raw)?;
        Ok(Self {
            mix_effect: buf.read_int(0, 8, false)? as u8,
            source: buf.read_int(2, 16, false)? as u16,
        })
    }

    fn to_bytes(&self) -> Result<Bytes, PacketError> {
        let mut buf = Self::buffer();
        buf.write_int(0, self.mix_effect, 8, false)?;
        buf.write_int(2, self.source, 16, false)?;
        Ok(buf.into_bytes())
    }
}

/// Source routed to an auxiliary output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxSource {
    /// Aux output index
    pub aux: u8,
    /// Selected video source
    pub source: u16,
}

impl Packet for AuxSource {
    const NAME: &'static str = "AuxS";
    const SIZE: usize = 4;

    fn from_bytes(raw: &[u8]) -> Result<Self, PacketError> {
        let buf = Self::wrap(raw)?;
        Ok(Self {
            aux: buf.read_int(0, 8, false)? as u8,
            source: buf.read_int(2, 16, false)? as u16,
        })
    }

    fn to_bytes(&self) -> Result<Bytes, PacketError> {
        let mut buf = Self::buffer();
        buf.write_int(0, self.aux, 8, false)?;
        buf.write_int(2, self.source, 16, false)?;
        Ok(buf.into_bytes())
    }
}

/// Transition progress on a mix effect bus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPosition {
    /// Mix effect bus index
    pub mix_effect: u8,
    /// Whether a transition is running
    pub in_transition: bool,
    /// Frames left in the running transition
    pub frames_remaining: u8,
    /// Progress from 0.0 to 1.0
    pub position: f64,
}

impl Packet for TransitionPosition {
    const NAME: &'static str = "TrPs";
    const SIZE: usize = 8;

    fn from_bytes(raw: &[u8]) -> Result<Self, PacketError> {
        let buf = Self::wrap(raw)?;
        Ok(Self {
            mix_effect: buf.read_int(0, 8, false)? as u8,
            in_transition: buf.read_flag(1, 8, 0)?,
            frames_remaining: buf.read_int(2, 8, false)? as u8,
            position: buf.read_float(4, 16, 4, false)?,
        })
    }

    fn to_bytes(&self) -> Result<Bytes, PacketError> {
        let mut buf = Self::buffer();
        buf.write_int(0, self.mix_effect, 8, false)?;
        buf.write_flag(1, 8, 0, self.in_transition)?;
        buf.write_int(2, self.frames_remaining, 8, false)?;
        buf.write_float(4, 16, 4, self.position, false)?;
        Ok(buf.into_bytes())
    }
}

/// Product name reported by the switcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductId {
    /// Product name, at most 44 bytes of UTF-8
    pub name: String,
}

impl Packet for ProductId {
    const NAME: &'static str = "_pin";
    const SIZE: usize = 44;

    fn from_bytes(raw: &[u8]) -> Result<Self, PacketError> {
        let buf = Self::wrap(raw)?;
        Ok(Self {
            name: buf.read_string(0, Self::SIZE)?,
        })
    }

    fn to_bytes(&self) -> Result<Bytes, PacketError> {
        let mut buf = Self::buffer();
        buf.write_string(0, Self::SIZE, &self.name)?;
        Ok(buf.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_input() {
        let cmd = ProgramInput {
            mix_effect: 1,
            source: 1000,
        };
        let raw = cmd.to_bytes().unwrap();

        assert_eq!(&raw[..], &[0x01, 0x00, 0x03, 0xE8]);
        assert_eq!(ProgramInput::from_bytes(&raw).unwrap(), cmd);
    }

    #[test]
    fn test_aux_source() {
        let cmd = AuxSource::from_bytes(&[0x02, 0xFF, 0x27, 0x1A]).unwrap();
        assert_eq!(cmd, AuxSource { aux: 2, source: 10010 });

        // Padding is not carried over on encode
        assert_eq!(&cmd.to_bytes().unwrap()[..], &[0x02, 0x00, 0x27, 0x1A]);
    }

    #[test]
    fn test_transition_position() {
        let cmd = TransitionPosition {
            mix_effect: 0,
            in_transition: true,
            frames_remaining: 12,
            position: 0.52,
        };
        let raw = cmd.to_bytes().unwrap();

        assert_eq!(&raw[..], &[0x00, 0x01, 0x0C, 0x00, 0x14, 0x50, 0x00, 0x00]);

        let decoded = TransitionPosition::from_bytes(&raw).unwrap();
        assert!(decoded.in_transition);
        assert_eq!(decoded.frames_remaining, 12);
        assert!((decoded.position - 0.52).abs() < 1e-4);
    }

    #[test]
    fn test_transition_position_out_of_range() {
        let cmd = TransitionPosition {
            mix_effect: 0,
            in_transition: false,
            frames_remaining: 0,
            position: 7.0,
        };
        assert!(matches!(cmd.to_bytes(), Err(PacketError::Buffer(_))));
    }

    #[test]
    fn test_product_id() {
        let cmd = ProductId {
            name: "ATEM Television Studio HD".to_string(),
        };
        let raw = cmd.to_bytes().unwrap();

        assert_eq!(raw.len(), 44);
        assert_eq!(&raw[..4], b"ATEM");
        assert!(raw[25..].iter().all(|b| *b == 0));
        assert_eq!(ProductId::from_bytes(&raw).unwrap(), cmd);
    }

    #[test]
    fn test_wrong_size() {
        let err = ProgramInput::from_bytes(&[0x01, 0x00, 0x03]).unwrap_err();
        assert!(matches!(
            err,
            PacketError::Size {
                expected: 4,
                actual: 3,
                ..
            }
        ));
        assert!(ProductId::from_bytes(&[0; 45]).is_err());
    }
}
