//! General-Purpose Register File.
//!
//! This module provides the `RegisterFile` struct and the capabilities through
//! which instruction semantics and the interpreter reach it. It provides:
//! 1. **Storage:** 32 integer registers (`x0`-`x31`) of 32 bits each.
//! 2. **Invariant Enforcement:** Register `x0` reads as zero and discards writes.
//! 3. **Capabilities:** `RegisterRead` for pure semantics, `RegisterAccess` for commit.
//! 4. **Observability:** Formatting and dumping of the complete register state.

use std::fmt;

use tracing::debug;

use super::constants::{NUM_REGS, RegIdx, Word};

/// Read-only view of a register file.
///
/// This is the only capability an instruction's operation receives, so the
/// semantics cannot write architectural state.
pub trait RegisterRead {
    /// Reads register `idx`. Register `x0` always returns 0.
    fn read(&self, idx: RegIdx) -> Word;
}

/// Read-write view of a register file, used by the interpreter to commit results.
pub trait RegisterAccess: RegisterRead {
    /// Writes `val` to register `idx`. Writes to `x0` are discarded.
    fn write(&mut self, idx: RegIdx, val: Word);
}

/// General-purpose register file.
///
/// Contains 32 registers. Register `x0` is hardwired to zero and cannot be modified.
/// Indices are expected in `0..32`; callers bind operands before touching the file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [Word; NUM_REGS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a register file from `(index, value)` pairs.
    ///
    /// Pairs naming `x0` or an index outside the file are ignored, matching
    /// the write semantics of the hardware. Callers that need to reject bad
    /// indices validate them first; dropped pairs are logged at debug level.
    pub fn with_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (RegIdx, Word)>,
    {
        let mut file = Self::new();
        for (idx, val) in values {
            if idx >= NUM_REGS {
                debug!(idx, val, "ignoring preset for out-of-range register");
                continue;
            }
            file.write(idx, val);
        }
        file
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the register. Register `x0` and indices
    /// outside the file return 0.
    pub fn read(&self, idx: RegIdx) -> Word {
        if idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: RegIdx, val: Word) {
        if idx == 0 {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Returns a copy of all 32 register values, `x0` included.
    pub const fn snapshot(&self) -> [Word; NUM_REGS] {
        self.regs
    }

    /// Dumps the contents of all general-purpose registers to stdout.
    ///
    /// Displays registers in pairs with hexadecimal formatting for debugging purposes.
    pub fn dump(&self) {
        print!("{self}");
    }
}

impl RegisterRead for RegisterFile {
    #[inline]
    fn read(&self, idx: RegIdx) -> Word {
        Self::read(self, idx)
    }
}

impl RegisterAccess for RegisterFile {
    #[inline]
    fn write(&mut self, idx: RegIdx, val: Word) {
        Self::write(self, idx, val);
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..NUM_REGS).step_by(2) {
            writeln!(
                f,
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            )?;
        }
        Ok(())
    }
}
