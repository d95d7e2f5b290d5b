//! Custom instruction extensions.
//!
//! This module holds everything that describes and stores custom instructions:
//! 1. **Descriptors:** Name, format, encoding, cycle cost and semantic operation.
//! 2. **Operands:** Binding raw operand tuples to format-shaped records.
//! 3. **Registry:** Encoding-keyed storage with conflict detection.
//! 4. **Built-ins:** The reference extensions and the named semantics catalogue.

/// Built-in semantics and reference extensions.
pub mod builtin;

/// Instruction descriptors and their builder.
pub mod descriptor;

/// Operand records and the operand binder.
pub mod operands;

/// Encoding-keyed registry of descriptors.
pub mod registry;

pub use descriptor::{DescriptorBuilder, InstructionDescriptor, Operation};
pub use operands::{OperandRecord, bind};
pub use registry::{ExtensionRegistry, SharedRegistry};
