//! Declarative command layouts.
//!
//! A [`CommandLayout`] describes where each named field of a command lives
//! and how it is encoded, so packets can be decoded and encoded from protocol
//! definitions loaded at runtime instead of hand-written types.

use crate::PacketError;
use atem_buffer::{BufferError, IntWidth, PacketBuffer, MAX_FACTOR};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::debug;

/// Decoded field values keyed by field name
pub type Fields = BTreeMap<String, FieldValue>;

/// How a field is stored on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Big-endian integer
    Int {
        /// Width in bits
        bits: u32,
        /// Two's complement when set
        #[serde(default)]
        signed: bool,
    },
    /// Single bit inside an unsigned bitfield
    Flag {
        /// Bitfield width in bits
        bits: u32,
        /// Bit position, 0 = least significant
        bit: u32,
    },
    /// Decimal stored as an integer scaled by `10^factor`
    Float {
        /// Width in bits
        bits: u32,
        /// Decimal scaling exponent
        factor: u32,
        /// Two's complement when set
        #[serde(default)]
        signed: bool,
    },
    /// NUL-padded UTF-8 text
    String {
        /// Width in bytes
        len: usize,
    },
}

impl FieldKind {
    /// Number of bytes the field occupies
    pub fn width_bytes(&self) -> Result<usize, BufferError> {
        match *self {
            FieldKind::Int { bits, .. }
            | FieldKind::Flag { bits, .. }
            | FieldKind::Float { bits, .. } => Ok(IntWidth::try_from(bits)?.bytes()),
            FieldKind::String { len } => Ok(len),
        }
    }

    fn read(&self, buf: &PacketBuffer, offset: usize) -> Result<FieldValue, BufferError> {
        let value = match *self {
            FieldKind::Int { bits, signed } => FieldValue::Int(buf.read_int(offset, bits, signed)?),
            FieldKind::Flag { bits, bit } => FieldValue::Flag(buf.read_flag(offset, bits, bit)?),
            FieldKind::Float {
                bits,
                factor,
                signed,
            } => FieldValue::Float(buf.read_float(offset, bits, factor, signed)?),
            FieldKind::String { len } => FieldValue::Text(buf.read_string(offset, len)?),
        };
        Ok(value)
    }

    fn write(
        &self,
        buf: &mut PacketBuffer,
        field: &FieldDef,
        value: &FieldValue,
    ) -> Result<(), PacketError> {
        let offset = field.offset;
        match (*self, value) {
            (FieldKind::Int { bits, signed }, FieldValue::Int(v)) => {
                buf.write_int(offset, *v, bits, signed)?
            }
            (FieldKind::Flag { bits, bit }, FieldValue::Flag(v)) => {
                buf.write_flag(offset, bits, bit, *v)?
            }
            (
                FieldKind::Float {
                    bits,
                    factor,
                    signed,
                },
                FieldValue::Float(v),
            ) => buf.write_float(offset, bits, factor, *v, signed)?,
            (
                FieldKind::Float {
                    bits,
                    factor,
                    signed,
                },
                FieldValue::Int(v),
            ) => buf.write_float(offset, bits, factor, *v as f64, signed)?,
            (FieldKind::String { len }, FieldValue::Text(v)) => buf.write_string(offset, len, v)?,
            (kind, _) => {
                return Err(PacketError::FieldType {
                    field: field.name.clone(),
                    expected: kind.value_name(),
                })
            }
        }
        Ok(())
    }

    fn value_name(&self) -> &'static str {
        match self {
            FieldKind::Int { .. } => "integer",
            FieldKind::Flag { .. } => "flag",
            FieldKind::Float { .. } => "float",
            FieldKind::String { .. } => "text",
        }
    }
}

/// A named field at a fixed offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, unique within its command
    pub name: String,
    /// Byte offset from the start of the command body
    pub offset: usize,
    /// Encoding
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDef {
    /// Create a field definition
    pub fn new(name: impl Into<String>, offset: usize, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            offset,
            kind,
        }
    }
}

/// Decoded value of a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Integer field
    Int(i128),
    /// Flag field
    Flag(bool),
    /// Fixed-point field
    Float(f64),
    /// Text field
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Flag(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i128> for FieldValue {
    fn from(value: i128) -> Self {
        FieldValue::Int(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Fixed-size command described field by field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLayout {
    /// Four-character command identifier
    pub name: String,
    /// Command body size in bytes
    pub size: usize,
    /// Field definitions
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl CommandLayout {
    /// Create an empty layout
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
            fields: Vec::new(),
        }
    }

    /// Add a field
    pub fn with_field(mut self, name: impl Into<String>, offset: usize, kind: FieldKind) -> Self {
        self.fields.push(FieldDef::new(name, offset, kind));
        self
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check that every field is well formed and fits inside the command
    pub fn validate(&self) -> Result<(), PacketError> {
        let mut seen = HashSet::new();

        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(PacketError::layout(format!(
                    "{}: duplicate field {}",
                    self.name, field.name
                )));
            }

            let width = field.kind.width_bytes().map_err(|e| {
                PacketError::layout(format!("{}.{}: {}", self.name, field.name, e))
            })?;

            if let FieldKind::Flag { bits, bit } = field.kind {
                if bit >= bits {
                    return Err(PacketError::layout(format!(
                        "{}.{}: bit {} outside {}bit bitfield",
                        self.name, field.name, bit, bits
                    )));
                }
            }

            if let FieldKind::Float { factor, .. } = field.kind {
                if factor > MAX_FACTOR {
                    return Err(PacketError::layout(format!(
                        "{}.{}: scale factor {} exceeds {}",
                        self.name, field.name, factor, MAX_FACTOR
                    )));
                }
            }

            let fits = field
                .offset
                .checked_add(width)
                .is_some_and(|end| end <= self.size);
            if !fits {
                return Err(PacketError::layout(format!(
                    "{}.{}: {} bytes at offset {} exceed command size {}",
                    self.name, field.name, width, field.offset, self.size
                )));
            }
        }

        Ok(())
    }

    /// Decode every field from `raw`
    pub fn decode(&self, raw: &[u8]) -> Result<Fields, PacketError> {
        if raw.len() != self.size {
            return Err(PacketError::Size {
                command: self.name.clone(),
                expected: self.size,
                actual: raw.len(),
            });
        }

        let buf = PacketBuffer::from_bytes(raw);
        let mut fields = Fields::new();
        for field in &self.fields {
            fields.insert(field.name.clone(), field.kind.read(&buf, field.offset)?);
        }

        debug!("Decoded {} with {} fields", self.name, fields.len());
        Ok(fields)
    }

    /// Encode `values` into a zero-filled command body
    ///
    /// Fields are written in declaration order, so overlapping fields
    /// resolve the same way regardless of their names. Fields missing from
    /// `values` stay zero.
    pub fn encode(&self, values: &Fields) -> Result<Bytes, PacketError> {
        if let Some(name) = values.keys().find(|name| self.field(name).is_none()) {
            return Err(PacketError::UnknownField {
                command: self.name.clone(),
                field: name.clone(),
            });
        }

        let mut buf = PacketBuffer::new(self.size);
        for field in &self.fields {
            if let Some(value) = values.get(&field.name) {
                field.kind.write(&mut buf, field, value)?;
            }
        }

        debug!("Encoded {} with {} fields", self.name, values.len());
        Ok(buf.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition_layout() -> CommandLayout {
        CommandLayout::new("TrPs", 8)
            .with_field("mix_effect", 0, FieldKind::Int { bits: 8, signed: false })
            .with_field("in_transition", 1, FieldKind::Flag { bits: 8, bit: 0 })
            .with_field("preview", 1, FieldKind::Flag { bits: 8, bit: 1 })
            .with_field("frames_remaining", 2, FieldKind::Int { bits: 8, signed: false })
            .with_field(
                "position",
                4,
                FieldKind::Float {
                    bits: 16,
                    factor: 4,
                    signed: false,
                },
            )
    }

    #[test]
    fn test_decode() {
        let layout = transition_layout();
        let fields = layout
            .decode(&[0x01, 0x01, 0x19, 0x00, 0x13, 0x88, 0x00, 0x00])
            .unwrap();

        assert_eq!(fields["mix_effect"], FieldValue::Int(1));
        assert_eq!(fields["in_transition"], FieldValue::Flag(true));
        assert_eq!(fields["preview"], FieldValue::Flag(false));
        assert_eq!(fields["frames_remaining"], FieldValue::Int(25));
        assert_eq!(fields["position"], FieldValue::Float(0.5));
    }

    #[test]
    fn test_encode() {
        let layout = transition_layout();
        let mut values = Fields::new();
        values.insert("mix_effect".into(), 1i128.into());
        values.insert("in_transition".into(), true.into());
        values.insert("preview".into(), true.into());
        values.insert("position".into(), 0.25f64.into());

        let raw = layout.encode(&values).unwrap();
        assert_eq!(&raw[..], &[0x01, 0x03, 0x00, 0x00, 0x09, 0xC4, 0x00, 0x00]);
        assert_eq!(layout.decode(&raw).unwrap()["frames_remaining"], FieldValue::Int(0));
    }

    #[test]
    fn test_encode_follows_declaration_order() {
        let overlapping = |flag: &str, int: &str| {
            CommandLayout::new("Ovlp", 1)
                .with_field(flag, 0, FieldKind::Flag { bits: 8, bit: 7 })
                .with_field(int, 0, FieldKind::Int { bits: 8, signed: false })
        };

        for (flag, int) in [("a", "z"), ("z", "a")] {
            let layout = overlapping(flag, int);
            let mut values = Fields::new();
            values.insert(flag.into(), true.into());
            values.insert(int.into(), 1i128.into());

            // The later-declared int overwrites the flag byte
            assert_eq!(&layout.encode(&values).unwrap()[..], &[0x01]);
        }
    }

    #[test]
    fn test_encode_float_accepts_integer() {
        let layout = CommandLayout::new("Gain", 2).with_field(
            "gain",
            0,
            FieldKind::Float {
                bits: 16,
                factor: 2,
                signed: true,
            },
        );
        let mut values = Fields::new();
        values.insert("gain".into(), FieldValue::Int(-3));

        let raw = layout.encode(&values).unwrap();
        assert_eq!(&raw[..], &(-300i16).to_be_bytes());
    }

    #[test]
    fn test_encode_errors() {
        let layout = transition_layout();

        let mut values = Fields::new();
        values.insert("bogus".into(), true.into());
        assert!(matches!(
            layout.encode(&values),
            Err(PacketError::UnknownField { .. })
        ));

        let mut values = Fields::new();
        values.insert("mix_effect".into(), "ME1".into());
        assert!(matches!(
            layout.encode(&values),
            Err(PacketError::FieldType { expected: "integer", .. })
        ));

        let mut values = Fields::new();
        values.insert("mix_effect".into(), FieldValue::Int(256));
        assert!(matches!(
            layout.encode(&values),
            Err(PacketError::Buffer(BufferError::Range { .. }))
        ));
    }

    #[test]
    fn test_decode_wrong_size() {
        let layout = transition_layout();
        assert!(matches!(
            layout.decode(&[0; 7]),
            Err(PacketError::Size { expected: 8, actual: 7, .. })
        ));
    }

    #[test]
    fn test_validate() {
        assert!(transition_layout().validate().is_ok());

        let too_long =
            CommandLayout::new("_pin", 4).with_field("name", 0, FieldKind::String { len: 8 });
        assert!(matches!(too_long.validate(), Err(PacketError::Layout(_))));

        let bad_width = CommandLayout::new("Bad", 4).with_field(
            "x",
            0,
            FieldKind::Int {
                bits: 24,
                signed: false,
            },
        );
        assert!(bad_width.validate().is_err());

        let bad_bit =
            CommandLayout::new("Bad", 4).with_field("x", 0, FieldKind::Flag { bits: 8, bit: 8 });
        assert!(bad_bit.validate().is_err());

        let bad_factor = CommandLayout::new("Bad", 2).with_field(
            "x",
            0,
            FieldKind::Float {
                bits: 16,
                factor: u32::MAX,
                signed: false,
            },
        );
        assert!(matches!(bad_factor.validate(), Err(PacketError::Layout(_))));

        let duplicate = CommandLayout::new("Bad", 4)
            .with_field("x", 0, FieldKind::Int { bits: 8, signed: false })
            .with_field("x", 1, FieldKind::Int { bits: 8, signed: false });
        assert!(duplicate.validate().is_err());
    }

    #[test]
    fn test_field_kind_serde() {
        let json = r#"{"name":"gain","offset":2,"type":"float","bits":16,"factor":2,"signed":true}"#;
        let field: FieldDef = serde_json::from_str(json).unwrap();
        assert_eq!(
            field.kind,
            FieldKind::Float {
                bits: 16,
                factor: 2,
                signed: true
            }
        );

        let field: FieldDef =
            serde_json::from_str(r#"{"name":"source","offset":2,"type":"int","bits":16}"#).unwrap();
        assert_eq!(field.kind, FieldKind::Int { bits: 16, signed: false });
    }
}
