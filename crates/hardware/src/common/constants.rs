//! Global Encoding Constants.
//!
//! This module defines the constants shared by the descriptor validator, the
//! word codec and the interpreter. It includes:
//! 1. **Register Constants:** Register count and index width.
//! 2. **Field Limits:** Masks and largest legal values for the opcode, funct3 and funct7 fields.
//! 3. **Word Layout:** Bit positions of every field inside a 32-bit instruction word.
//! 4. **Immediate Constants:** Widths and masks for I/S and U immediates.

/// Machine word stored in a general-purpose register (RV32).
pub type Word = u32;

/// Index of a general-purpose register.
pub type RegIdx = usize;

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// Mask for the 5-bit major opcode field (`inst[6:2]`) after shifting.
pub const OPCODE_MASK: u32 = 0x1F;

/// Mask for the 3-bit funct3 field after shifting.
pub const FUNCT3_MASK: u32 = 0x7;

/// Mask for the 7-bit funct7 field after shifting.
pub const FUNCT7_MASK: u32 = 0x7F;

/// Largest value of the major opcode field.
pub const OPCODE_MAX: u8 = OPCODE_MASK as u8;

/// Largest value of the funct3 field.
pub const FUNCT3_MAX: u8 = FUNCT3_MASK as u8;

/// Largest value of the funct7 field.
pub const FUNCT7_MAX: u8 = FUNCT7_MASK as u8;

/// The four major opcodes reserved for custom extensions (custom-0 .. custom-3).
pub const CUSTOM_OPCODES: [u8; 4] = [0x02, 0x0A, 0x16, 0x1E];

/// Value of `inst[1:0]` for every 32-bit (non-compressed) instruction.
pub const QUADRANT_32: u32 = 0b11;

/// Mask for the quadrant bits `inst[1:0]`.
pub const QUADRANT_MASK: u32 = 0b11;

/// Bit position of the major opcode field.
pub const OPCODE_SHIFT: u32 = 2;

/// Bit position of the destination register (rd) field.
pub const RD_SHIFT: u32 = 7;

/// Bit position of the funct3 field.
pub const FUNCT3_SHIFT: u32 = 12;

/// Bit position of the first source register (rs1) field.
pub const RS1_SHIFT: u32 = 15;

/// Bit position of the second source register (rs2) field.
pub const RS2_SHIFT: u32 = 20;

/// Bit position of the funct7 field.
pub const FUNCT7_SHIFT: u32 = 25;

/// Mask for a 5-bit register index field.
pub const REG_FIELD_MASK: u32 = 0x1F;

/// Width in bits of the I-type and S-type immediates.
pub const IMM12_BITS: u32 = 12;

/// Mask for a 12-bit immediate field.
pub const IMM12_MASK: u32 = 0xFFF;

/// Mask selecting the upper-immediate bits `[31:12]` of a U-type word.
pub const U_IMM_MASK: u32 = 0xFFFF_F000;
