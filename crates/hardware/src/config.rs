//! Configuration system for the extension interpreter.
//!
//! This module defines the configuration structures used to parameterize a
//! session. It provides:
//! 1. **General settings:** Tracing, strict opcode placement, built-in preload.
//! 2. **Extension table:** Extra instructions bound to catalogue semantics.
//!
//! Configuration is supplied as JSON, or use `Config::default()` for the
//! built-in extensions alone.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::{Error, Result};
use crate::isa::encoding::EncodingKey;
use crate::isa::format::InstructionFormat;

/// Default configuration values.
mod defaults {
    /// Cycle count charged when an extension entry omits `cycles`.
    pub const CYCLES: u32 = 1;

    /// The built-in extensions are preloaded unless disabled.
    pub const BUILTIN_EXTENSIONS: bool = true;
}

/// Root configuration structure.
///
/// Aggregates the general settings and the list of configured extensions.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General session settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Extensions registered on top of (or instead of) the built-in set.
    #[serde(default)]
    pub extensions: Vec<ExtensionConfig>,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] if the document is malformed or has unknown fields.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, [`Error::Json`] if it does
    /// not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General session settings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Log every retired instruction at info level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Only accept descriptors placed in the custom-0..3 opcode slots.
    #[serde(default)]
    pub strict_custom_opcodes: bool,

    /// Preload `mac`, `mod` and `binom`.
    #[serde(default = "GeneralConfig::default_builtin_extensions")]
    pub builtin_extensions: bool,
}

impl GeneralConfig {
    const fn default_builtin_extensions() -> bool {
        defaults::BUILTIN_EXTENSIONS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            strict_custom_opcodes: false,
            builtin_extensions: defaults::BUILTIN_EXTENSIONS,
        }
    }
}

/// One configured extension instruction.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExtensionConfig {
    /// Mnemonic.
    pub name: String,
    /// Base format.
    pub format: InstructionFormat,
    /// Major opcode (bits 6:2).
    pub opcode: u8,
    /// Minor opcode; omitted for U-type.
    #[serde(default)]
    pub funct3: u8,
    /// R-type function code.
    #[serde(default)]
    pub funct7: Option<u8>,
    /// Declared latency.
    #[serde(default = "ExtensionConfig::default_cycles")]
    pub cycles: u32,
    /// Name of a semantics catalogue entry.
    pub semantics: String,
}

impl ExtensionConfig {
    const fn default_cycles() -> u32 {
        defaults::CYCLES
    }

    /// Encoding key described by this entry.
    pub const fn encoding(&self) -> EncodingKey {
        EncodingKey {
            opcode: self.opcode,
            funct3: self.funct3,
            funct7: self.funct7,
        }
    }
}
