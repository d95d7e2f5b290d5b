
/// Disassembly of registered instructions.
pub mod disasm;

/// Word encoding from operands.
pub mod encode;
