//! Instruction field extraction.
//!
//! Provides bit extraction functions for the fields of a 32-bit custom
//! instruction word. Immediates are returned as raw field values; extension
//! to 32 bits is the operand binder's job.

use crate::common::constants::{
    FUNCT3_MASK, FUNCT3_SHIFT, FUNCT7_MASK, FUNCT7_SHIFT, IMM12_MASK, OPCODE_MASK, OPCODE_SHIFT,
    QUADRANT_MASK, RD_SHIFT, REG_FIELD_MASK, RS1_SHIFT, RS2_SHIFT, U_IMM_MASK,
};

/// Bit shift of the S-type immediate high field (`imm[11:5]`, bits 25-31).
const S_IMM_HIGH_SHIFT: u32 = 25;
/// Bit mask of the S-type immediate high field (7 bits).
const S_IMM_HIGH_MASK: u32 = 0x7F;
/// Bit shift of the S-type immediate low field (`imm[4:0]`, bits 7-11).
const S_IMM_LOW_SHIFT: u32 = 7;
/// Bit mask of the S-type immediate low field (5 bits).
const S_IMM_LOW_MASK: u32 = 0x1F;
/// Position of `imm[11:5]` inside the reassembled S-type immediate.
const S_IMM_COMBINED_SHIFT: u32 = 5;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the quadrant bits (bits 0-1); `0b11` for every 32-bit encoding.
    fn quadrant(&self) -> u32;

    /// Extracts the 5-bit major opcode (bits 2-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> u32;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> u32;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> u32;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;

    /// Extracts the raw 12-bit I-type immediate (bits 20-31), not sign-extended.
    fn imm_i(&self) -> u32;

    /// Reassembles the raw 12-bit S-type immediate from bits 25-31 and 7-11.
    fn imm_s(&self) -> u32;

    /// Extracts the U-type immediate in place (bits 12-31, low bits cleared).
    fn imm_u(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn quadrant(&self) -> u32 {
        self & QUADRANT_MASK
    }

    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> u32 {
        (self >> RD_SHIFT) & REG_FIELD_MASK
    }

    #[inline(always)]
    fn rs1(&self) -> u32 {
        (self >> RS1_SHIFT) & REG_FIELD_MASK
    }

    #[inline(always)]
    fn rs2(&self) -> u32 {
        (self >> RS2_SHIFT) & REG_FIELD_MASK
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> FUNCT3_SHIFT) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> FUNCT7_SHIFT) & FUNCT7_MASK
    }

    #[inline(always)]
    fn imm_i(&self) -> u32 {
        (self >> RS2_SHIFT) & IMM12_MASK
    }

    #[inline(always)]
    fn imm_s(&self) -> u32 {
        let high = (self >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
        let low = (self >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
        (high << S_IMM_COMBINED_SHIFT) | low
    }

    #[inline(always)]
    fn imm_u(&self) -> u32 {
        self & U_IMM_MASK
    }
}
