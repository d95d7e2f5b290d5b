//! Raw instruction word builders.
//!
//! Assemble words independently of the library encoder so codec tests do not
//! check the encoder against itself.

/// Encode an R-type word in a custom opcode slot.
pub fn r_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, rs2: u32, funct7: u32) -> u32 {
    (funct7 & 0x7F) << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | (rd & 0x1F) << 7
        | (opcode & 0x1F) << 2
        | 0b11
}

/// Encode an I-type word.
pub fn i_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, imm: i32) -> u32 {
    let imm_bits = (imm as u32) & 0xFFF;
    imm_bits << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | (rd & 0x1F) << 7
        | (opcode & 0x1F) << 2
        | 0b11
}

/// Encode an S-type word.
pub fn s_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let v = imm as u32;
    let hi = (v >> 5) & 0x7F;
    let lo = v & 0x1F;
    hi << 25
        | (rs2 & 0x1F) << 20
        | (rs1 & 0x1F) << 15
        | (funct3 & 0x7) << 12
        | lo << 7
        | (opcode & 0x1F) << 2
        | 0b11
}

/// Encode a U-type word; `imm` is the 20-bit upper field.
pub fn u_type(opcode: u32, rd: u32, imm: u32) -> u32 {
    (imm & 0xF_FFFF) << 12 | (rd & 0x1F) << 7 | (opcode & 0x1F) << 2 | 0b11
}
