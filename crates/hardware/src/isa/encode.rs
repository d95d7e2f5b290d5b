//! Custom Instruction Encoder.
//!
//! Packs an encoding key and bound operands into a 32-bit instruction word,
//! the inverse of [`decode::operand_fields`](crate::isa::decode::operand_fields).

use crate::common::constants::{IMM12_MASK, RD_SHIFT, RS1_SHIFT, RS2_SHIFT, U_IMM_MASK};
use crate::common::error::Result;
use crate::ext::descriptor::InstructionDescriptor;
use crate::ext::operands::{OperandRecord, bind};
use crate::isa::encoding::EncodingKey;

/// Bit shift of the S-type immediate high field (`imm[11:5]`).
const S_IMM_HIGH_SHIFT: u32 = 25;
/// Bit shift of the S-type immediate low field (`imm[4:0]`).
const S_IMM_LOW_SHIFT: u32 = 7;
/// Bit mask of `imm[4:0]`.
const S_IMM_LOW_MASK: u32 = 0x1F;

/// Binds `raw` to the descriptor's format and encodes the instruction word.
///
/// # Errors
///
/// Returns [`Error::BadOperand`](crate::common::Error::BadOperand) if the operands
/// do not bind.
pub fn encode(descriptor: &InstructionDescriptor, raw: &[u32]) -> Result<u32> {
    let record = bind(descriptor.format(), raw)?;
    Ok(pack(&descriptor.encoding(), &record))
}

/// Packs a key and an already bound operand record.
pub const fn pack(key: &EncodingKey, record: &OperandRecord) -> u32 {
    let base = key.match_bits(record.format());
    let fields = match *record {
        OperandRecord::R { rd, rs1, rs2 } => {
            reg(rd, RD_SHIFT) | reg(rs1, RS1_SHIFT) | reg(rs2, RS2_SHIFT)
        }
        OperandRecord::I { rd, rs1, imm } => {
            reg(rd, RD_SHIFT) | reg(rs1, RS1_SHIFT) | ((imm & IMM12_MASK) << RS2_SHIFT)
        }
        OperandRecord::S { rs1, rs2, imm } => {
            let imm = imm & IMM12_MASK;
            reg(rs1, RS1_SHIFT)
                | reg(rs2, RS2_SHIFT)
                | ((imm >> 5) << S_IMM_HIGH_SHIFT)
                | ((imm & S_IMM_LOW_MASK) << S_IMM_LOW_SHIFT)
        }
        OperandRecord::U { rd, imm } => reg(rd, RD_SHIFT) | (imm & U_IMM_MASK),
    };
    base | fields
}

const fn reg(idx: usize, shift: u32) -> u32 {
    (idx as u32) << shift
}
