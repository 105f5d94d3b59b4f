//! Protocol definition loading.
//!
//! Command layouts are read from a YAML or JSON file. The file used by
//! [`ProtocolConfig::load_default`] can be overridden with the
//! `ATEM_PROTOCOL_FILE` environment variable.

use crate::{CommandLayout, PacketError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Environment variable overriding the protocol definition path
pub const PROTOCOL_FILE_ENV: &str = "ATEM_PROTOCOL_FILE";

/// Protocol definition path used when no override is set
pub const DEFAULT_PROTOCOL_FILE: &str = "protocol/commands.yaml";

/// Set of command layouts making up a protocol
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Command layouts
    #[serde(default)]
    pub commands: Vec<CommandLayout>,
}

impl ProtocolConfig {
    /// Parse and validate a YAML protocol definition
    pub fn from_yaml_str(content: &str) -> Result<Self, PacketError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON protocol definition
    pub fn from_json_str(content: &str) -> Result<Self, PacketError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a protocol definition, picking the format from the extension
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PacketError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        info!(
            "Loaded {} command layouts from {:?}",
            config.commands.len(),
            path
        );
        Ok(config)
    }

    /// Load from `ATEM_PROTOCOL_FILE`, falling back to the default path
    pub fn load_default() -> Result<Self, PacketError> {
        let path = std::env::var(PROTOCOL_FILE_ENV).unwrap_or_else(|_| {
            warn!(
                "{} not set, using {}",
                PROTOCOL_FILE_ENV, DEFAULT_PROTOCOL_FILE
            );
            DEFAULT_PROTOCOL_FILE.to_string()
        });
        Self::load_from_file(path)
    }

    /// Validate every layout and reject duplicate command names
    pub fn validate(&self) -> Result<(), PacketError> {
        let mut seen = HashSet::new();
        for layout in &self.commands {
            if !seen.insert(layout.name.as_str()) {
                warn!("Duplicate command layout {}", layout.name);
                return Err(PacketError::layout(format!(
                    "duplicate command {}",
                    layout.name
                )));
            }
            layout.validate()?;
        }
        Ok(())
    }

    /// Look up a command layout by name
    pub fn command(&self, name: &str) -> Option<&CommandLayout> {
        self.commands.iter().find(|c| c.name == name)
    }
}
