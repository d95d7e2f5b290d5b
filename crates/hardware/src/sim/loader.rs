//! Registry and program loading.
//!
//! This module turns configuration and text inputs into interpreter inputs. It performs:
//! 1. **Registry building:** Preloads the built-in extensions and binds every
//!    configured extension to its catalogue semantics.
//! 2. **Program loading:** Reads instruction words, one per line, in hex or decimal.
//! 3. **Register setup:** Parses `reg=value` assignments for the initial register file.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::common::constants::{RegIdx, Word};
use crate::common::error::{DescriptorFault, Error, Result};
use crate::config::{Config, ExtensionConfig};
use crate::ext::builtin;
use crate::ext::descriptor::InstructionDescriptor;
use crate::ext::registry::ExtensionRegistry;
use crate::isa::abi::parse_register;

/// Builds the registry described by `config`.
///
/// # Errors
///
/// * [`Error::InvalidDescriptor`] for an invalid entry, or one naming a
///   semantics function the catalogue does not have.
/// * [`Error::Config`] if the named semantics expect a different format.
/// * [`Error::DuplicateEncoding`] if two entries (or an entry and a built-in)
///   collide.
pub fn build_registry(config: &Config) -> Result<ExtensionRegistry> {
    let mut registry = if config.general.strict_custom_opcodes {
        ExtensionRegistry::strict()
    } else {
        ExtensionRegistry::new()
    };

    if config.general.builtin_extensions {
        for descriptor in builtin::reference_extensions()? {
            registry.register(descriptor)?;
        }
    }
    for entry in &config.extensions {
        registry.register(descriptor_from_config(entry)?)?;
    }

    info!(
        instructions = registry.len(),
        strict = registry.is_strict(),
        "registry ready"
    );
    Ok(registry)
}

/// Builds the descriptor for one configured extension.
///
/// # Errors
///
/// See [`build_registry`].
pub fn descriptor_from_config(entry: &ExtensionConfig) -> Result<InstructionDescriptor> {
    let Some(semantics) = builtin::semantics(&entry.semantics) else {
        return Err(Error::InvalidDescriptor {
            name: entry.name.clone(),
            fault: DescriptorFault::MissingOperation,
        });
    };
    if semantics.format != entry.format {
        return Err(Error::Config(format!(
            "`{}` is {}-type but semantics `{}` expect {}-type operands",
            entry.name, entry.format, semantics.name, semantics.format
        )));
    }
    debug!(name = %entry.name, semantics = semantics.name, "binding configured extension");
    InstructionDescriptor::builder(entry.name.clone(), entry.format, entry.encoding())
        .cycles(entry.cycles)
        .shared_operation(semantics.operation())
        .build()
}

/// Parses a program listing into instruction words.
///
/// One word per line, as `0x`-prefixed hex or decimal. `#` starts a comment;
/// blank lines are skipped. Underscores may separate digits.
///
/// # Errors
///
/// [`Error::Parse`] with the one-based line number of the first bad line.
pub fn parse_program(text: &str) -> Result<Vec<u32>> {
    let mut words = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let word = parse_word(content).ok_or_else(|| Error::Parse {
            line: index + 1,
            message: format!("`{content}` is not a 32-bit instruction word"),
        })?;
        words.push(word);
    }
    Ok(words)
}

/// Reads and parses a program listing from disk.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be read, or a [`parse_program`] error.
pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<u32>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let words = parse_program(&text)?;
    debug!(path = %path.display(), words = words.len(), "program loaded");
    Ok(words)
}

/// Parses an initial register assignment such as `a1=7` or `x10=0xff`.
///
/// Negative decimal values are stored in two's complement.
///
/// # Errors
///
/// [`Error::Parse`] (line 0) if the register name or value is invalid.
pub fn parse_register_assignment(text: &str) -> Result<(RegIdx, Word)> {
    let bad = |message: String| Error::Parse { line: 0, message };
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| bad(format!("`{text}` is not of the form reg=value")))?;
    let idx = parse_register(name.trim())
        .ok_or_else(|| bad(format!("unknown register `{}`", name.trim())))?;
    let value = value.trim();
    let parsed =
        parse_value(value).ok_or_else(|| bad(format!("`{value}` is not a 32-bit value")))?;
    Ok((idx, parsed))
}

/// Parses a hex or decimal value; a leading `-` yields the two's complement.
pub fn parse_value(text: &str) -> Option<Word> {
    let text = text.trim();
    match text.strip_prefix('-') {
        Some(magnitude) => parse_word(magnitude)
            .filter(|&m| m <= 1 << 31)
            .map(u32::wrapping_neg),
        None => parse_word(text),
    }
}

fn parse_word(text: &str) -> Option<u32> {
    let cleaned = text.replace('_', "");
    let lower = cleaned.to_ascii_lowercase();
    lower.strip_prefix("0x").map_or_else(
        || lower.parse().ok(),
        |hex| u32::from_str_radix(hex, 16).ok(),
    )
}
