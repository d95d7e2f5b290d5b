//! Base instruction formats.
//!
//! Custom instructions reuse the base formats of the RISC-V user-level ISA
//! (§2.2 Base Instruction Formats). The format fixes the operand shape:
//!
//! | format | operands            | word fields used                  |
//! |--------|---------------------|-----------------------------------|
//! | R      | `rd, rs1, rs2`      | funct7, rs2, rs1, funct3, rd      |
//! | I      | `rd, rs1, imm`      | imm[11:0], rs1, funct3, rd        |
//! | S      | `rs1, rs2, imm`     | imm[11:5], rs2, rs1, funct3, imm[4:0] |
//! | U      | `rd, imm`           | imm[31:12], rd                    |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operand position inside a format's operand tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandSlot {
    /// Destination register.
    Rd,
    /// First source register.
    Rs1,
    /// Second source register.
    Rs2,
    /// Immediate value.
    Imm,
}

/// RISC-V base instruction format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructionFormat {
    /// Register-register: `rd, rs1, rs2`.
    #[serde(alias = "RType", alias = "r")]
    R,
    /// Register-immediate: `rd, rs1, imm`.
    #[serde(alias = "IType", alias = "i")]
    I,
    /// Store: `rs1, rs2, imm`.
    #[serde(alias = "SType", alias = "s")]
    S,
    /// Upper immediate: `rd, imm`.
    #[serde(alias = "UType", alias = "u")]
    U,
}

impl InstructionFormat {
    /// Operand slots in the order the raw operand tuple supplies them.
    pub const fn slots(self) -> &'static [OperandSlot] {
        use OperandSlot::{Imm, Rd, Rs1, Rs2};
        match self {
            Self::R => &[Rd, Rs1, Rs2],
            Self::I => &[Rd, Rs1, Imm],
            Self::S => &[Rs1, Rs2, Imm],
            Self::U => &[Rd, Imm],
        }
    }

    /// Number of operand fields the format takes.
    pub const fn arity(self) -> usize {
        self.slots().len()
    }

    /// Whether the format writes a destination register.
    pub const fn has_rd(self) -> bool {
        !matches!(self, Self::S)
    }

    /// Whether the word layout includes a funct3 field.
    pub const fn has_funct3(self) -> bool {
        !matches!(self, Self::U)
    }

    /// Whether the word layout includes a funct7 field.
    pub const fn has_funct7(self) -> bool {
        matches!(self, Self::R)
    }
}

impl fmt::Display for InstructionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::R => "R",
            Self::I => "I",
            Self::S => "S",
            Self::U => "U",
        };
        f.write_str(s)
    }
}
