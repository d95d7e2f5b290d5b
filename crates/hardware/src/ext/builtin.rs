//! Built-in instruction semantics.
//!
//! The catalogue below is what configuration files refer to by name. The
//! three reference extensions are:
//!
//! | name    | format | opcode | funct3 | funct7 | cycles | result                |
//! |---------|--------|--------|--------|--------|--------|-----------------------|
//! | `mac`   | R      | 0x02   | 0x0    | 0x00   | 1      | `rd + rs1 * rs2`      |
//! | `mod`   | R      | 0x02   | 0x0    | 0x01   | 1      | `rs1 % rs2`           |
//! | `binom` | I      | 0x02   | 0x1    | -      | 4      | `(rs1 + imm)^2`       |
//!
//! All arithmetic wraps at 32 bits.

use std::sync::Arc;

use crate::common::constants::Word;
use crate::common::error::Result;
use crate::common::reg::RegisterRead;
use crate::ext::descriptor::{InstructionDescriptor, Operation};
use crate::ext::operands::OperandRecord;
use crate::isa::encoding::EncodingKey;
use crate::isa::format::InstructionFormat;

/// Plain function form of an [`Operation`].
pub type SemanticFn = fn(&OperandRecord, &dyn RegisterRead) -> Word;

/// A named entry of the semantics catalogue.
#[derive(Clone, Copy, Debug)]
pub struct Semantics {
    /// Name used by configuration files.
    pub name: &'static str,
    /// Format whose operands the function expects.
    pub format: InstructionFormat,
    /// One-line description of the result.
    pub summary: &'static str,
    /// The function itself.
    pub function: SemanticFn,
}

impl Semantics {
    /// Wraps the function as a shareable [`Operation`].
    pub fn operation(&self) -> Operation {
        Arc::new(self.function)
    }
}

/// Every semantic function a configuration file can name.
pub const CATALOGUE: &[Semantics] = &[
    Semantics {
        name: "mac",
        format: InstructionFormat::R,
        summary: "rd + rs1 * rs2",
        function: mac,
    },
    Semantics {
        name: "mod",
        format: InstructionFormat::R,
        summary: "rs1 % rs2 (rs1 when rs2 is 0)",
        function: modulo,
    },
    Semantics {
        name: "binom",
        format: InstructionFormat::I,
        summary: "(rs1 + imm)^2",
        function: binom,
    },
    Semantics {
        name: "add",
        format: InstructionFormat::R,
        summary: "rs1 + rs2",
        function: add,
    },
    Semantics {
        name: "sub",
        format: InstructionFormat::R,
        summary: "rs1 - rs2",
        function: sub,
    },
    Semantics {
        name: "mul",
        format: InstructionFormat::R,
        summary: "rs1 * rs2",
        function: mul,
    },
    Semantics {
        name: "xor",
        format: InstructionFormat::R,
        summary: "rs1 ^ rs2",
        function: xor,
    },
    Semantics {
        name: "add_imm",
        format: InstructionFormat::I,
        summary: "rs1 + imm",
        function: add_imm,
    },
    Semantics {
        name: "lui",
        format: InstructionFormat::U,
        summary: "imm",
        function: lui,
    },
];

/// Looks up a catalogue entry by name.
pub fn semantics(name: &str) -> Option<&'static Semantics> {
    CATALOGUE.iter().find(|s| s.name == name)
}

/// Builds the three reference extensions.
///
/// # Errors
///
/// Propagates descriptor validation failures.
pub fn reference_extensions() -> Result<Vec<InstructionDescriptor>> {
    Ok(vec![
        InstructionDescriptor::new(
            "mac",
            InstructionFormat::R,
            EncodingKey::reg(0x02, 0x0, 0x00),
            1,
            mac,
        )?,
        InstructionDescriptor::new(
            "mod",
            InstructionFormat::R,
            EncodingKey::reg(0x02, 0x0, 0x01),
            1,
            modulo,
        )?,
        InstructionDescriptor::new(
            "binom",
            InstructionFormat::I,
            EncodingKey::imm(0x02, 0x1),
            4,
            binom,
        )?,
    ])
}

/// Source values named by an operand record; absent operands read as 0.
struct Sources {
    rd: Word,
    rs1: Word,
    rs2: Word,
    imm: Word,
}

impl Sources {
    fn read(ops: &OperandRecord, regs: &dyn RegisterRead) -> Self {
        let reg = |idx: Option<usize>| idx.map_or(0, |i| regs.read(i));
        Self {
            rd: reg(ops.rd()),
            rs1: reg(ops.rs1()),
            rs2: reg(ops.rs2()),
            imm: ops.imm().unwrap_or(0),
        }
    }
}

/// `rd + rs1 * rs2`
pub fn mac(ops: &OperandRecord, regs: &dyn RegisterRead) -> Word {
    let s = Sources::read(ops, regs);
    s.rd.wrapping_add(s.rs1.wrapping_mul(s.rs2))
}

/// `rs1 % rs2`, unsigned. A zero divisor returns the dividend, as `remu` does.
pub fn modulo(ops: &OperandRecord, regs: &dyn RegisterRead) -> Word {
    let s = Sources::read(ops, regs);
    s.rs1.checked_rem(s.rs2).unwrap_or(s.rs1)
}

/// `(rs1 + imm)^2`
pub fn binom(ops: &OperandRecord, regs: &dyn RegisterRead) -> Word {
    let s = Sources::read(ops, regs);
    let sum = s.rs1.wrapping_add(s.imm);
    sum.wrapping_mul(sum)
}

fn add(ops: &OperandRecord, regs: &dyn RegisterRead) -> Word {
    let s = Sources::read(ops, regs);
    s.rs1.wrapping_add(s.rs2)
}

fn sub(ops: &OperandRecord, regs: &dyn RegisterRead) -> Word {
    let s = Sources::read(ops, regs);
    s.rs1.wrapping_sub(s.rs2)
}

fn mul(ops: &OperandRecord, regs: &dyn RegisterRead) -> Word {
    let s = Sources::read(ops, regs);
    s.rs1.wrapping_mul(s.rs2)
}

fn xor(ops: &OperandRecord, regs: &dyn RegisterRead) -> Word {
    let s = Sources::read(ops, regs);
    s.rs1 ^ s.rs2
}

fn add_imm(ops: &OperandRecord, regs: &dyn RegisterRead) -> Word {
    let s = Sources::read(ops, regs);
    s.rs1.wrapping_add(s.imm)
}

fn lui(ops: &OperandRecord, _regs: &dyn RegisterRead) -> Word {
    ops.imm().unwrap_or(0)
}
