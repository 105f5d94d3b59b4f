//! Command packet error types.

use atem_buffer::BufferError;
use thiserror::Error;

/// Errors raised while building, parsing or describing command packets
#[derive(Error, Debug)]
pub enum PacketError {
    /// Field-level codec failure
    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// Raw packet length does not match the command size
    #[error("{command}: expected {expected} bytes, got {actual}")]
    Size {
        /// Command identifier
        command: String,
        /// Fixed command size
        expected: usize,
        /// Length of the supplied bytes
        actual: usize,
    },

    /// Field name is not part of the layout
    #[error("{command}: unknown field {field}")]
    UnknownField {
        /// Command identifier
        command: String,
        /// Offending field name
        field: String,
    },

    /// Value variant does not match the field kind
    #[error("field {field}: expected {expected} value")]
    FieldType {
        /// Field name
        field: String,
        /// Kind of value the field stores
        expected: &'static str,
    },

    /// Layout definition is inconsistent
    #[error("invalid layout: {0}")]
    Layout(String),

    /// I/O error while reading protocol definitions
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML protocol definition error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON protocol definition error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PacketError {
    /// Create a layout error
    pub fn layout(message: impl Into<String>) -> Self {
        PacketError::Layout(message.into())
    }
}
