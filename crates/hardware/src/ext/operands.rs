//! Operand binding.
//!
//! Translates a raw operand tuple, as it arrives from a decoded instruction
//! word or from a caller, into an [`OperandRecord`] shaped by the target
//! format. Binding is pure: it validates and extends values but never touches
//! a register file.
//!
//! # Immediate policy
//!
//! * **I / S:** the immediate is a 12-bit field sign-extended to 32 bits
//!   (`0xFFF` binds to `0xFFFF_FFFF`). A value that already is the 32-bit sign
//!   extension of a 12-bit field is accepted unchanged.
//! * **U:** the immediate is already positioned in bits `[31:12]` and is used
//!   as-is; set bits in `[11:0]` are rejected.

use crate::common::constants::{IMM12_BITS, IMM12_MASK, NUM_REGS, RegIdx, U_IMM_MASK, Word};
use crate::common::error::{OperandFault, Result};
use crate::isa::format::{InstructionFormat, OperandSlot};

/// Smallest 32-bit value that is a sign-extended negative 12-bit immediate.
const IMM12_NEG_MIN: u32 = 0xFFFF_F800;

/// Operands of one instruction, shaped by its format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandRecord {
    /// Register-register operands.
    R {
        /// Destination register.
        rd: RegIdx,
        /// First source register.
        rs1: RegIdx,
        /// Second source register.
        rs2: RegIdx,
    },
    /// Register-immediate operands.
    I {
        /// Destination register.
        rd: RegIdx,
        /// Source register.
        rs1: RegIdx,
        /// Sign-extended immediate.
        imm: Word,
    },
    /// Store-shaped operands.
    S {
        /// Base register.
        rs1: RegIdx,
        /// Source register.
        rs2: RegIdx,
        /// Sign-extended offset.
        imm: Word,
    },
    /// Upper-immediate operands.
    U {
        /// Destination register.
        rd: RegIdx,
        /// Immediate occupying bits `[31:12]`.
        imm: Word,
    },
}

impl OperandRecord {
    /// Format these operands were bound for.
    pub const fn format(&self) -> InstructionFormat {
        match self {
            Self::R { .. } => InstructionFormat::R,
            Self::I { .. } => InstructionFormat::I,
            Self::S { .. } => InstructionFormat::S,
            Self::U { .. } => InstructionFormat::U,
        }
    }

    /// Destination register, if the format writes one.
    pub const fn rd(&self) -> Option<RegIdx> {
        match *self {
            Self::R { rd, .. } | Self::I { rd, .. } | Self::U { rd, .. } => Some(rd),
            Self::S { .. } => None,
        }
    }

    /// First source register, if the format reads one.
    pub const fn rs1(&self) -> Option<RegIdx> {
        match *self {
            Self::R { rs1, .. } | Self::I { rs1, .. } | Self::S { rs1, .. } => Some(rs1),
            Self::U { .. } => None,
        }
    }

    /// Second source register, if the format reads one.
    pub const fn rs2(&self) -> Option<RegIdx> {
        match *self {
            Self::R { rs2, .. } | Self::S { rs2, .. } => Some(rs2),
            Self::I { .. } | Self::U { .. } => None,
        }
    }

    /// Immediate as a 32-bit pattern, if the format carries one.
    pub const fn imm(&self) -> Option<Word> {
        match *self {
            Self::I { imm, .. } | Self::S { imm, .. } | Self::U { imm, .. } => Some(imm),
            Self::R { .. } => None,
        }
    }

    /// Immediate reinterpreted as a signed value.
    pub const fn imm_signed(&self) -> Option<i32> {
        match self.imm() {
            Some(imm) => Some(imm as i32),
            None => None,
        }
    }
}

/// Binds a raw operand tuple to `format`.
///
/// # Arguments
///
/// * `format` - Target instruction format.
/// * `raw` - Operand fields in the format's slot order (see [`InstructionFormat::slots`]).
///
/// # Errors
///
/// Returns [`Error::BadOperand`](crate::common::Error::BadOperand) when the
/// tuple has the wrong length, names a register outside `0..=31`, or carries an
/// immediate that does not fit the format.
pub fn bind(format: InstructionFormat, raw: &[u32]) -> Result<OperandRecord> {
    Ok(bind_fields(format, raw)?)
}

fn bind_fields(
    format: InstructionFormat,
    raw: &[u32],
) -> std::result::Result<OperandRecord, OperandFault> {
    let slots = format.slots();
    if raw.len() != slots.len() {
        return Err(OperandFault::Arity {
            format,
            expected: slots.len(),
            found: raw.len(),
        });
    }

    let mut rd = 0;
    let mut rs1 = 0;
    let mut rs2 = 0;
    let mut imm = 0;
    for (position, (&slot, &value)) in slots.iter().zip(raw).enumerate() {
        match slot {
            OperandSlot::Rd => rd = register(position, value)?,
            OperandSlot::Rs1 => rs1 = register(position, value)?,
            OperandSlot::Rs2 => rs2 = register(position, value)?,
            OperandSlot::Imm => imm = immediate(format, value)?,
        }
    }

    Ok(match format {
        InstructionFormat::R => OperandRecord::R { rd, rs1, rs2 },
        InstructionFormat::I => OperandRecord::I { rd, rs1, imm },
        InstructionFormat::S => OperandRecord::S { rs1, rs2, imm },
        InstructionFormat::U => OperandRecord::U { rd, imm },
    })
}

fn register(position: usize, value: u32) -> std::result::Result<RegIdx, OperandFault> {
    let idx = value as RegIdx;
    if idx < NUM_REGS {
        Ok(idx)
    } else {
        Err(OperandFault::RegisterOutOfRange {
            position,
            index: value,
        })
    }
}

fn immediate(format: InstructionFormat, value: u32) -> std::result::Result<Word, OperandFault> {
    let bound = match format {
        InstructionFormat::U => (value & !U_IMM_MASK == 0).then_some(value),
        _ => sign_extend_imm12(value),
    };
    bound.ok_or(OperandFault::ImmediateOutOfRange { format, value })
}

/// Sign-extends a 12-bit immediate field to 32 bits.
///
/// Values that are already sign-extended pass through; anything wider than
/// 12 bits that is not a sign extension yields `None`.
pub const fn sign_extend_imm12(value: u32) -> Option<Word> {
    if value <= IMM12_MASK {
        let shift = Word::BITS - IMM12_BITS;
        Some((((value << shift) as i32) >> shift) as Word)
    } else if value >= IMM12_NEG_MIN {
        Some(value)
    } else {
        None
    }
}
