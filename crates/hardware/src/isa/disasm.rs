//! Instruction Disassembler for custom extensions.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for tracing, logging, and test diagnostics. Mnemonics come from the
//! registry, so only registered instructions are recognised.
//!
//! # Usage
//!
//! ```
//! use rvext_core::ext::ExtensionRegistry;
//! use rvext_core::isa::disasm::disassemble;
//!
//! let registry = ExtensionRegistry::with_builtin_extensions().unwrap();
//! // mac a0, a1, a2
//! let text = disassemble(0x00C5_850B, &registry);
//! assert_eq!(text, "mac a0, a1, a2");
//! ```

use crate::ext::descriptor::InstructionDescriptor;
use crate::ext::operands::{OperandRecord, bind};
use crate::ext::registry::ExtensionRegistry;
use crate::isa::abi::xreg;
use crate::isa::decode::operand_fields;

/// Disassembles a 32-bit instruction word.
///
/// Returns a mnemonic like `"mac a0, a1, a2"` or `"unknown"` for
/// encodings no registered instruction matches.
pub fn disassemble(inst: u32, registry: &ExtensionRegistry) -> String {
    registry
        .resolve(inst)
        .ok()
        .and_then(|descriptor| disassemble_with(inst, &descriptor))
        .unwrap_or_else(|| "unknown".to_owned())
}

/// Disassembles `inst` as an instance of `descriptor`.
///
/// Returns `None` if the operand fields do not bind to the descriptor's format.
pub fn disassemble_with(inst: u32, descriptor: &InstructionDescriptor) -> Option<String> {
    let record = bind(descriptor.format(), &operand_fields(inst, descriptor.format())).ok()?;
    Some(format_operands(descriptor.name(), &record))
}

/// Formats a mnemonic and its bound operands in assembler syntax.
pub fn format_operands(mnemonic: &str, record: &OperandRecord) -> String {
    match *record {
        OperandRecord::R { rd, rs1, rs2 } => {
            format!("{mnemonic} {}, {}, {}", xreg(rd), xreg(rs1), xreg(rs2))
        }
        OperandRecord::I { rd, rs1, imm } => {
            format!("{mnemonic} {}, {}, {}", xreg(rd), xreg(rs1), imm as i32)
        }
        OperandRecord::S { rs1, rs2, imm } => {
            format!("{mnemonic} {}, {}({})", xreg(rs2), imm as i32, xreg(rs1))
        }
        OperandRecord::U { rd, imm } => format!("{mnemonic} {}, {:#x}", xreg(rd), imm >> 12),
    }
}
