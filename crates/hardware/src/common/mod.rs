//! Common utilities and types used throughout the extension interpreter.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the crate. It includes:
//! 1. **Constants:** Field widths, word layout and register counts.
//! 2. **Error Handling:** Registration errors, execution faults and loader errors.
//! 3. **Register Management:** The register file and its read/write capabilities.

/// Encoding constants and register types.
pub mod constants;

/// Error types and fault reasons.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{RegIdx, Word};
pub use error::{DescriptorFault, Error, OperandFault, Result};
pub use reg::{RegisterAccess, RegisterFile, RegisterRead};
