//! Encoding keys and their instruction-word footprint.
//!
//! An `EncodingKey` is the `(opcode, funct3, funct7)` triple that identifies a
//! custom instruction. Inside a 32-bit word the fields sit at the standard
//! positions:
//!
//! ```text
//!  31      25 24  20 19  15 14  12 11   7 6      2 1  0
//! | funct7   | rs2  | rs1  |funct3|  rd  | opcode | 11 |
//! ```
//!
//! The key also yields the `mask`/`match` pair used by assemblers and decoders:
//! a word belongs to the key when `word & mask == match`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::constants::{
    CUSTOM_OPCODES, FUNCT3_MASK, FUNCT3_MAX, FUNCT3_SHIFT, FUNCT7_MASK, FUNCT7_MAX, FUNCT7_SHIFT,
    OPCODE_MASK, OPCODE_MAX, OPCODE_SHIFT, QUADRANT_32, QUADRANT_MASK,
};
use crate::common::error::DescriptorFault;
use crate::isa::format::InstructionFormat;

/// Mask covering the quadrant and opcode bits `inst[6:0]`.
const OPCODE_FIELD_MASK: u32 = (OPCODE_MASK << OPCODE_SHIFT) | QUADRANT_MASK;

/// Mask covering the funct3 bits `inst[14:12]`.
const FUNCT3_FIELD_MASK: u32 = FUNCT3_MASK << FUNCT3_SHIFT;

/// Mask covering the funct7 bits `inst[31:25]`.
const FUNCT7_FIELD_MASK: u32 = FUNCT7_MASK << FUNCT7_SHIFT;

/// Lookup key of a custom instruction.
///
/// `funct7` is `None` for formats whose word layout has no funct7 field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodingKey {
    /// Major opcode, `inst[6:2]` (5 bits).
    pub opcode: u8,
    /// Minor opcode, `inst[14:12]` (3 bits).
    pub funct3: u8,
    /// Function selector, `inst[31:25]` (7 bits), R-type only.
    #[serde(default)]
    pub funct7: Option<u8>,
}

impl EncodingKey {
    /// Creates a key for an R-type instruction.
    pub const fn reg(opcode: u8, funct3: u8, funct7: u8) -> Self {
        Self {
            opcode,
            funct3,
            funct7: Some(funct7),
        }
    }

    /// Creates a key for a format without a funct7 field (I, S).
    pub const fn imm(opcode: u8, funct3: u8) -> Self {
        Self {
            opcode,
            funct3,
            funct7: None,
        }
    }

    /// Creates a key for a U-type instruction, which is selected by opcode alone.
    pub const fn upper(opcode: u8) -> Self {
        Self::imm(opcode, 0)
    }

    /// Checks the field widths against their bit budgets.
    ///
    /// # Errors
    ///
    /// Returns the first field that does not fit.
    pub const fn check_widths(&self) -> Result<(), DescriptorFault> {
        if self.opcode > OPCODE_MAX {
            return Err(DescriptorFault::OpcodeOutOfRange(self.opcode));
        }
        if self.funct3 > FUNCT3_MAX {
            return Err(DescriptorFault::Funct3OutOfRange(self.funct3));
        }
        match self.funct7 {
            Some(f7) if f7 > FUNCT7_MAX => Err(DescriptorFault::Funct7OutOfRange(f7)),
            _ => Ok(()),
        }
    }

    /// Checks that the key only uses fields the format's word layout carries.
    ///
    /// # Errors
    ///
    /// Returns `Funct7Mismatch` or `UnexpectedFunct3` on a layout violation.
    pub const fn check_layout(&self, format: InstructionFormat) -> Result<(), DescriptorFault> {
        if format.has_funct7() != self.funct7.is_some() {
            return Err(DescriptorFault::Funct7Mismatch { format });
        }
        if !format.has_funct3() && self.funct3 != 0 {
            return Err(DescriptorFault::UnexpectedFunct3(self.funct3));
        }
        Ok(())
    }

    /// Whether the opcode is one of the four custom-extension slots.
    pub fn is_custom_slot(&self) -> bool {
        CUSTOM_OPCODES.contains(&self.opcode)
    }

    /// Bits of a word that are fixed by an instruction of `format` with this key.
    pub const fn mask(&self, format: InstructionFormat) -> u32 {
        let mut mask = OPCODE_FIELD_MASK;
        if format.has_funct3() {
            mask |= FUNCT3_FIELD_MASK;
        }
        if format.has_funct7() {
            mask |= FUNCT7_FIELD_MASK;
        }
        mask
    }

    /// Value of the fixed bits, so that `word & mask == match_bits`.
    pub const fn match_bits(&self, format: InstructionFormat) -> u32 {
        let mut bits = ((self.opcode as u32) << OPCODE_SHIFT) | QUADRANT_32;
        if format.has_funct3() {
            bits |= (self.funct3 as u32) << FUNCT3_SHIFT;
        }
        if let (true, Some(f7)) = (format.has_funct7(), self.funct7) {
            bits |= (f7 as u32) << FUNCT7_SHIFT;
        }
        bits
    }

    /// Whether some instruction word matches both encodings.
    pub const fn overlaps(
        &self,
        format: InstructionFormat,
        other: &Self,
        other_format: InstructionFormat,
    ) -> bool {
        let common = self.mask(format) & other.mask(other_format);
        (self.match_bits(format) ^ other.match_bits(other_format)) & common == 0
    }
}

impl fmt::Display for EncodingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "opc={:#04x} f3={:#x}", self.opcode, self.funct3)?;
        if let Some(f7) = self.funct7 {
            write!(f, " f7={f7:#04x}")?;
        }
        Ok(())
    }
}
