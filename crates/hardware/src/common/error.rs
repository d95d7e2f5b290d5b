//! Error definitions.
//!
//! This module defines every failure the registry, the binder and the
//! interpreter can report. It provides:
//! 1. **Registration Errors:** Malformed descriptors and encoding conflicts.
//! 2. **Execution Faults:** Unknown encodings, illegal words and bad operands.
//! 3. **Loader Errors:** Configuration, I/O and program parse failures.
//!
//! All errors are returned as values; none abort the host process.

use std::path::PathBuf;

use thiserror::Error;

use crate::isa::encoding::EncodingKey;
use crate::isa::format::InstructionFormat;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Reason a descriptor was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DescriptorFault {
    /// The declared cycle count is zero.
    #[error("cycle count must be at least 1")]
    ZeroCycles,

    /// The opcode does not fit in 5 bits.
    #[error("opcode {0:#x} exceeds 5 bits")]
    OpcodeOutOfRange(u8),

    /// The opcode is valid but outside the custom-0..3 slots (strict mode only).
    #[error("opcode {0:#x} is not a custom opcode slot")]
    NonCustomOpcode(u8),

    /// The funct3 field does not fit in 3 bits.
    #[error("funct3 {0:#x} exceeds 3 bits")]
    Funct3OutOfRange(u8),

    /// The funct7 field does not fit in 7 bits.
    #[error("funct7 {0:#x} exceeds 7 bits")]
    Funct7OutOfRange(u8),

    /// An R-type descriptor has no funct7, or a non R-type descriptor has one.
    #[error("{format} format {} funct7 field", funct7_rule(.format))]
    Funct7Mismatch {
        /// Format of the rejected descriptor.
        format: InstructionFormat,
    },

    /// A U-type descriptor declares a funct3 the word layout cannot carry.
    #[error("U format has no funct3 field (got {0:#x})")]
    UnexpectedFunct3(u8),

    /// No semantic operation was supplied.
    #[error("missing operation")]
    MissingOperation,

    /// The mnemonic is empty.
    #[error("empty mnemonic")]
    EmptyName,
}

fn funct7_rule(format: &InstructionFormat) -> &'static str {
    if format.has_funct7() {
        "requires a"
    } else {
        "has no"
    }
}

/// Reason an operand tuple could not be bound to a format.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OperandFault {
    /// Wrong number of operand fields.
    #[error("{format} format takes {expected} operands, got {found}")]
    Arity {
        /// Target format.
        format: InstructionFormat,
        /// Number of fields the format requires.
        expected: usize,
        /// Number of fields supplied.
        found: usize,
    },

    /// A register operand is outside `0..=31`.
    #[error("operand {position} names register {index}, expected 0..=31")]
    RegisterOutOfRange {
        /// Zero-based position of the offending field.
        position: usize,
        /// The out-of-range value.
        index: u32,
    },

    /// The immediate does not fit the format's immediate field.
    #[error("immediate {value:#x} does not fit the {format} immediate field")]
    ImmediateOutOfRange {
        /// Target format.
        format: InstructionFormat,
        /// The offending raw value.
        value: u32,
    },
}

/// Errors reported by the registry, the interpreter and the loader.
#[derive(Debug, Error)]
pub enum Error {
    /// A descriptor failed validation and was not registered.
    #[error("invalid descriptor `{name}`: {fault}")]
    InvalidDescriptor {
        /// Mnemonic of the rejected descriptor.
        name: String,
        /// Validation failure.
        fault: DescriptorFault,
    },

    /// The encoding is already claimed by another descriptor.
    #[error("encoding {key} of `{rejected}` conflicts with `{existing}`")]
    DuplicateEncoding {
        /// Key of the rejected descriptor.
        key: EncodingKey,
        /// Name of the descriptor already registered.
        existing: String,
        /// Name of the rejected descriptor.
        rejected: String,
    },

    /// No descriptor is registered for the encoding.
    #[error("unknown instruction {0}")]
    UnknownInstruction(EncodingKey),

    /// The instruction word is not a 32-bit encoding or matches no descriptor.
    #[error("illegal instruction {0:#010x}")]
    IllegalInstruction(u32),

    /// The operand tuple does not match the instruction format.
    #[error("bad operand: {0}")]
    BadOperand(#[from] OperandFault),

    /// The configuration is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// A file could not be read.
    #[error("could not read `{}`: {source}", .path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A JSON document could not be deserialized.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A program or register assignment could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// One-based line number (0 for command-line input).
        line: usize,
        /// Description of the problem.
        message: String,
    },
}

impl Error {
    /// Returns `true` for faults raised while executing an instruction, as
    /// opposed to registration or loader errors.
    pub const fn is_execution_fault(&self) -> bool {
        matches!(
            self,
            Self::UnknownInstruction(_) | Self::IllegalInstruction(_) | Self::BadOperand(_)
        )
    }
}
