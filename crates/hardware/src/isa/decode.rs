//! Custom Instruction Decoder.
//!
//! This module splits a 32-bit instruction word into its fields and extracts
//! the raw operand tuple a given format expects. Immediates are returned as
//! raw field values (12-bit I/S fields, in-place U field) so that the operand
//! binder applies the same extension policy to decoded words and to operand
//! tuples supplied by callers.

use crate::common::constants::QUADRANT_32;
use crate::isa::encoding::EncodingKey;
use crate::isa::format::{InstructionFormat, OperandSlot};
use crate::isa::instruction::InstructionBits;

/// Fields of a 32-bit instruction word, regardless of its format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// The raw word.
    pub raw: u32,
    /// Major opcode, `inst[6:2]`.
    pub opcode: u32,
    /// Destination register field.
    pub rd: u32,
    /// First source register field.
    pub rs1: u32,
    /// Second source register field.
    pub rs2: u32,
    /// funct3 field.
    pub funct3: u32,
    /// funct7 field.
    pub funct7: u32,
}

impl Decoded {
    /// Keys the word could be registered under, as `[R, I/S, U]`.
    ///
    /// Fields a format does not carry are dropped from its key, so a word with
    /// any funct7 still finds an I-type entry.
    pub const fn candidate_keys(&self) -> [EncodingKey; 3] {
        let opcode = self.opcode as u8;
        let funct3 = self.funct3 as u8;
        [
            EncodingKey::reg(opcode, funct3, self.funct7 as u8),
            EncodingKey::imm(opcode, funct3),
            EncodingKey::upper(opcode),
        ]
    }
}

/// Decodes a RISC-V instruction into its component fields.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding to decode.
///
/// # Returns
///
/// `None` if the word is a compressed (16-bit) encoding, i.e. `inst[1:0] != 0b11`.
pub fn decode(inst: u32) -> Option<Decoded> {
    if inst.quadrant() != QUADRANT_32 {
        return None;
    }
    Some(Decoded {
        raw: inst,
        opcode: inst.opcode(),
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
    })
}

/// Extracts the raw operand tuple of `inst` for `format`, in slot order.
///
/// I-type and S-type immediates are the 12-bit source fields; the U-type
/// immediate keeps its position in bits `[31:12]`.
pub fn operand_fields(inst: u32, format: InstructionFormat) -> Vec<u32> {
    format
        .slots()
        .iter()
        .map(|slot| match slot {
            OperandSlot::Rd => inst.rd(),
            OperandSlot::Rs1 => inst.rs1(),
            OperandSlot::Rs2 => inst.rs2(),
            OperandSlot::Imm => match format {
                InstructionFormat::S => inst.imm_s(),
                InstructionFormat::U => inst.imm_u(),
                InstructionFormat::R | InstructionFormat::I => inst.imm_i(),
            },
        })
        .collect()
}
