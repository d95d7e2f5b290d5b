//! Extension registry.
//!
//! Maps encoding keys to instruction descriptors. The registry enforces that
//! every key, and every instruction word, resolves to at most one descriptor:
//! a registration whose encoding collides with, or is shadowed by, an existing
//! entry is refused and the existing entry is left untouched.
//!
//! [`SharedRegistry`] wraps a registry in a reader-writer lock for callers on
//! several threads (many concurrent lookups, exclusive registration).

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use tracing::debug;

use crate::common::error::{DescriptorFault, Error, Result};
use crate::ext::builtin;
use crate::ext::descriptor::InstructionDescriptor;
use crate::isa::decode::decode;
use crate::isa::encoding::EncodingKey;

/// Associative store of custom instruction descriptors.
#[derive(Clone, Debug, Default)]
pub struct ExtensionRegistry {
    entries: HashMap<EncodingKey, Arc<InstructionDescriptor>>,
    strict_custom_opcodes: bool,
}

impl ExtensionRegistry {
    /// Creates an empty registry accepting any in-range opcode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry that only accepts the custom-0..3 opcode slots.
    pub fn strict() -> Self {
        Self {
            entries: HashMap::new(),
            strict_custom_opcodes: true,
        }
    }

    /// Creates a registry preloaded with the built-in extensions (`mac`, `mod`, `binom`).
    ///
    /// # Errors
    ///
    /// Propagates registration failures; the built-in set is conflict-free.
    pub fn with_builtin_extensions() -> Result<Self> {
        let mut registry = Self::new();
        for descriptor in builtin::reference_extensions()? {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Whether registration is restricted to the custom opcode slots.
    pub const fn is_strict(&self) -> bool {
        self.strict_custom_opcodes
    }

    /// Registers a descriptor.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidDescriptor`] if the descriptor fails validation, or
    ///   strict mode is on and the opcode is not a custom slot.
    /// * [`Error::DuplicateEncoding`] if an existing descriptor owns the same
    ///   key or any instruction word the new encoding would match.
    pub fn register(&mut self, descriptor: InstructionDescriptor) -> Result<()> {
        self.register_shared(Arc::new(descriptor))
    }

    /// Registers a descriptor that is already shared.
    ///
    /// # Errors
    ///
    /// Same as [`ExtensionRegistry::register`].
    pub fn register_shared(&mut self, descriptor: Arc<InstructionDescriptor>) -> Result<()> {
        descriptor.validate()?;
        let key = descriptor.encoding();
        if self.strict_custom_opcodes && !key.is_custom_slot() {
            return Err(Error::InvalidDescriptor {
                name: descriptor.name().to_owned(),
                fault: DescriptorFault::NonCustomOpcode(key.opcode),
            });
        }

        if let Some(existing) = self.conflict_with(&descriptor) {
            return Err(Error::DuplicateEncoding {
                key,
                existing: existing.name().to_owned(),
                rejected: descriptor.name().to_owned(),
            });
        }

        debug!(
            name = descriptor.name(),
            format = %descriptor.format(),
            %key,
            cycles = descriptor.cycles(),
            "registered custom instruction"
        );
        let _ = self.entries.insert(key, descriptor);
        Ok(())
    }

    fn conflict_with(&self, candidate: &InstructionDescriptor) -> Option<&Arc<InstructionDescriptor>> {
        if let Some(existing) = self.entries.get(&candidate.encoding()) {
            return Some(existing);
        }
        self.entries.values().find(|existing| {
            existing.encoding().overlaps(
                existing.format(),
                &candidate.encoding(),
                candidate.format(),
            )
        })
    }

    /// Looks up the descriptor registered for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownInstruction`] if no descriptor owns the key.
    pub fn lookup(&self, key: &EncodingKey) -> Result<Arc<InstructionDescriptor>> {
        self.entries
            .get(key)
            .cloned()
            .ok_or(Error::UnknownInstruction(*key))
    }

    /// Finds the descriptor that encodes the raw instruction `word`.
    ///
    /// # Errors
    ///
    /// * [`Error::IllegalInstruction`] if the word is not a 32-bit encoding.
    /// * [`Error::UnknownInstruction`] if no registered encoding matches it.
    pub fn resolve(&self, word: u32) -> Result<Arc<InstructionDescriptor>> {
        let decoded = decode(word).ok_or(Error::IllegalInstruction(word))?;
        let candidates = decoded.candidate_keys();
        candidates
            .iter()
            .filter_map(|key| self.entries.get(key))
            .find(|descriptor| descriptor.matches(word))
            .cloned()
            .ok_or(Error::UnknownInstruction(candidates[0]))
    }

    /// Finds a descriptor by mnemonic.
    ///
    /// Names are not unique; the first match in encoding order is returned.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<InstructionDescriptor>> {
        self.sorted()
            .into_iter()
            .find(|descriptor| descriptor.name() == name)
    }

    /// Removes the descriptor registered for `key`.
    ///
    /// Removing an absent key is not an error.
    pub fn unregister(&mut self, key: &EncodingKey) -> Option<Arc<InstructionDescriptor>> {
        let removed = self.entries.remove(key);
        if let Some(descriptor) = &removed {
            debug!(name = descriptor.name(), %key, "unregistered custom instruction");
        }
        removed
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the descriptors in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<InstructionDescriptor>> {
        self.entries.values()
    }

    /// Returns the descriptors ordered by `(opcode, funct3, funct7)`.
    pub fn sorted(&self) -> Vec<Arc<InstructionDescriptor>> {
        let mut all: Vec<_> = self.entries.values().cloned().collect();
        all.sort_by_key(|d| {
            let key = d.encoding();
            (key.opcode, key.funct3, key.funct7)
        });
        all
    }

    /// Renders the `MATCH_*` / `MASK_*` header consumed by assembler toolchains.
    ///
    /// Names are turned into C identifiers. When two descriptors map to the same
    /// macro name, each of them gets its encoding appended
    /// (`MATCH_MAC_0A_0_01`), so every macro is defined once.
    pub fn encoding_header(&self) -> String {
        let mut out = String::from(
            "/* Automatically generated. */\n#ifndef RISCV_CUSTOM_ENCODING_H\n#define RISCV_CUSTOM_ENCODING_H\n",
        );
        let sorted = self.sorted();
        let symbols = header_symbols(&sorted);
        for (descriptor, symbol) in sorted.iter().zip(&symbols) {
            let macro_name = symbol.to_ascii_uppercase();
            let _ = writeln!(out, "#define MATCH_{macro_name} {:#x}", descriptor.match_bits());
            let _ = writeln!(out, "#define MASK_{macro_name} {:#x}", descriptor.mask());
        }
        out.push_str("#endif\n#ifdef DECLARE_INSN\n");
        for symbol in &symbols {
            let macro_name = symbol.to_ascii_uppercase();
            let _ = writeln!(
                out,
                "DECLARE_INSN({symbol}, MATCH_{macro_name}, MASK_{macro_name})"
            );
        }
        out.push_str("#endif\n");
        out
    }
}

/// Maps a mnemonic onto `[A-Za-z_][A-Za-z0-9_]*`.
fn c_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// One header symbol per descriptor, unique after upper-casing.
fn header_symbols(descriptors: &[Arc<InstructionDescriptor>]) -> Vec<String> {
    let bases: Vec<String> = descriptors.iter().map(|d| c_identifier(d.name())).collect();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for base in &bases {
        *counts.entry(base.to_ascii_uppercase()).or_default() += 1;
    }
    let mut symbols: Vec<String> = descriptors
        .iter()
        .zip(bases)
        .map(|(descriptor, base)| {
            if counts.get(&base.to_ascii_uppercase()).copied().unwrap_or(0) < 2 {
                return base;
            }
            let key = descriptor.encoding();
            let mut symbol = format!("{base}_{:02x}_{:x}", key.opcode, key.funct3);
            if let Some(funct7) = key.funct7 {
                let _ = write!(symbol, "_{funct7:02x}");
            }
            symbol
        })
        .collect();

    // A suffixed symbol can still meet a user name spelled the same way.
    let mut seen = HashSet::new();
    for symbol in &mut symbols {
        let mut candidate = symbol.clone();
        let mut n = 1;
        while !seen.insert(candidate.to_ascii_uppercase()) {
            n += 1;
            candidate = format!("{symbol}_{n}");
        }
        *symbol = candidate;
    }
    symbols
}

/// Registry shared between threads behind a reader-writer lock.
#[derive(Clone, Debug, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<ExtensionRegistry>>,
}

impl SharedRegistry {
    /// Wraps an existing registry.
    pub fn new(registry: ExtensionRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Registers a descriptor under the write lock.
    ///
    /// # Errors
    ///
    /// Same as [`ExtensionRegistry::register`].
    pub fn register(&self, descriptor: InstructionDescriptor) -> Result<()> {
        self.inner.write().register(descriptor)
    }

    /// Removes a descriptor under the write lock.
    pub fn unregister(&self, key: &EncodingKey) -> Option<Arc<InstructionDescriptor>> {
        self.inner.write().unregister(key)
    }

    /// Looks up a descriptor under the read lock.
    ///
    /// # Errors
    ///
    /// Same as [`ExtensionRegistry::lookup`].
    pub fn lookup(&self, key: &EncodingKey) -> Result<Arc<InstructionDescriptor>> {
        self.inner.read().lookup(key)
    }

    /// Holds the read lock for a sequence of operations, such as an interpreter run.
    pub fn read(&self) -> RwLockReadGuard<'_, ExtensionRegistry> {
        self.inner.read()
    }
}

impl From<ExtensionRegistry> for SharedRegistry {
    fn from(registry: ExtensionRegistry) -> Self {
        Self::new(registry)
    }
}
