//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the base instruction formats, encoding keys, and the word-level
//! codec for custom instructions placed in the RISC-V custom opcode space.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction word decoding and operand field extraction.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction word encoding from bound operands.
pub mod encode;

/// Encoding keys and mask/match computation.
pub mod encoding;

/// Base instruction formats (R, I, S, U).
pub mod format;

/// Instruction bit extraction utilities.
pub mod instruction;

pub use encoding::EncodingKey;
pub use format::InstructionFormat;
