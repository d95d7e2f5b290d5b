//! Custom RISC-V instruction extension library.
//!
//! This crate registers and interprets custom instructions placed in the RISC-V
//! opcode space with the following:
//! 1. **ISA:** R/I/S/U formats, encoding keys, mask/match computation, and a word codec.
//! 2. **Extensions:** Instruction descriptors, the operand binder, and the registry.
//! 3. **Core:** The interpreter state machine with compute-then-commit execution.
//! 4. **Session:** Configuration, registry building, program loading, and statistics.
//!
//! # Example
//!
//! ```
//! use rvext_core::{ExtensionRegistry, Interpreter, RegisterFile};
//! use rvext_core::isa::EncodingKey;
//!
//! let registry = ExtensionRegistry::with_builtin_extensions().unwrap();
//! let mut regs = RegisterFile::with_values([(5, 1), (6, 2), (7, 3)]);
//! let mut interp = Interpreter::new(&registry);
//!
//! // mac x5, x6, x7
//! let cycles = interp.execute(&EncodingKey::reg(0x02, 0x0, 0x00), &[5, 6, 7], &mut regs).unwrap();
//! assert_eq!(cycles, 1);
//! assert_eq!(regs.read(5), 7);
//! ```

/// Common types and constants (word width, register file, errors).
pub mod common;
/// Session configuration (general settings, configured extensions).
pub mod config;
/// Interpreter state machine.
pub mod core;
/// Extension descriptors, operand binding, registry, and built-in semantics.
pub mod ext;
/// Instruction set (formats, encoding keys, decode, encode, ABI, disassembly).
pub mod isa;
/// Registry building, program loading, and sessions.
pub mod sim;
/// Execution statistics collection and reporting.
pub mod stats;

/// Error and result types shared by every module.
pub use crate::common::{Error, RegisterFile, Result};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Interpreter and its state.
pub use crate::core::{ExecState, Interpreter};
/// Registry of custom instructions.
pub use crate::ext::{ExtensionRegistry, InstructionDescriptor, SharedRegistry};
/// Registry and register file owned together.
pub use crate::sim::Session;
