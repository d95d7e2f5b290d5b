//! # Error Tests
//!
//! Checks the rendered messages and the execution-fault classification.

use std::path::PathBuf;

use rvext_core::common::error::{DescriptorFault, Error, OperandFault};
use rvext_core::isa::encoding::EncodingKey;
use rvext_core::isa::format::InstructionFormat;

#[test]
fn test_execution_faults() {
    assert!(Error::UnknownInstruction(EncodingKey::imm(0x02, 7)).is_execution_fault());
    assert!(Error::IllegalInstruction(0x13).is_execution_fault());
    assert!(
        Error::BadOperand(OperandFault::Arity {
            format: InstructionFormat::R,
            expected: 3,
            found: 2,
        })
        .is_execution_fault()
    );
}

#[test]
fn test_registration_errors_are_not_execution_faults() {
    let dup = Error::DuplicateEncoding {
        key: EncodingKey::reg(0x02, 0, 0),
        existing: "mac".into(),
        rejected: "foo".into(),
    };
    assert!(!dup.is_execution_fault());
    assert_eq!(
        dup.to_string(),
        "encoding opc=0x02 f3=0x0 f7=0x00 of `foo` conflicts with `mac`"
    );
}

#[test]
fn test_operand_fault_converts_into_bad_operand() {
    let err: Error = OperandFault::RegisterOutOfRange {
        position: 1,
        index: 40,
    }
    .into();
    assert_eq!(
        err.to_string(),
        "bad operand: operand 1 names register 40, expected 0..=31"
    );
}

#[test]
fn test_invalid_descriptor_message() {
    let err = Error::InvalidDescriptor {
        name: "slow".into(),
        fault: DescriptorFault::ZeroCycles,
    };
    assert_eq!(
        err.to_string(),
        "invalid descriptor `slow`: cycle count must be at least 1"
    );
}

#[test]
fn test_funct7_mismatch_message() {
    let required = DescriptorFault::Funct7Mismatch {
        format: InstructionFormat::R,
    };
    let forbidden = DescriptorFault::Funct7Mismatch {
        format: InstructionFormat::S,
    };
    assert_eq!(required.to_string(), "R format requires a funct7 field");
    assert_eq!(forbidden.to_string(), "S format has no funct7 field");
}

#[test]
fn test_io_error_names_the_path() {
    let err = Error::Io {
        path: PathBuf::from("missing.txt"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert_eq!(err.to_string(), "could not read `missing.txt`: gone");
}
