//! # Descriptor Tests
//!
//! Construction-time validation and the encoding-based identity.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvext_core::Error;
use rvext_core::common::error::DescriptorFault;
use rvext_core::common::reg::RegisterFile;
use rvext_core::ext::{ExtensionRegistry, InstructionDescriptor};
use rvext_core::ext::operands::OperandRecord;
use rvext_core::isa::encoding::EncodingKey;
use rvext_core::isa::format::InstructionFormat;

fn fault_of(result: rvext_core::Result<InstructionDescriptor>) -> DescriptorFault {
    match result {
        Err(Error::InvalidDescriptor { fault, .. }) => fault,
        other => panic!("expected InvalidDescriptor, got {other:?}"),
    }
}

#[test]
fn test_zero_cycles_rejected() {
    let result = InstructionDescriptor::new(
        "slow",
        InstructionFormat::R,
        EncodingKey::reg(0x02, 0, 0),
        0,
        |_, _| 0,
    );
    assert_eq!(fault_of(result), DescriptorFault::ZeroCycles);
}

#[rstest]
#[case::funct7_too_wide(
    InstructionFormat::R,
    EncodingKey::reg(0x02, 0, 0x80),
    DescriptorFault::Funct7OutOfRange(0x80)
)]
#[case::opcode_too_wide(
    InstructionFormat::I,
    EncodingKey::imm(0x40, 0),
    DescriptorFault::OpcodeOutOfRange(0x40)
)]
#[case::rtype_without_funct7(
    InstructionFormat::R,
    EncodingKey::imm(0x02, 0),
    DescriptorFault::Funct7Mismatch { format: InstructionFormat::R }
)]
#[case::itype_with_funct7(
    InstructionFormat::I,
    EncodingKey::reg(0x02, 0, 0),
    DescriptorFault::Funct7Mismatch { format: InstructionFormat::I }
)]
#[case::utype_with_funct3(
    InstructionFormat::U,
    EncodingKey::imm(0x02, 1),
    DescriptorFault::UnexpectedFunct3(1)
)]
fn test_invalid_encodings(
    #[case] format: InstructionFormat,
    #[case] key: EncodingKey,
    #[case] expected: DescriptorFault,
) {
    let result = InstructionDescriptor::new("bad", format, key, 1, |_, _| 0);
    assert_eq!(fault_of(result), expected);
}

#[test]
fn test_empty_name_rejected() {
    let result = InstructionDescriptor::new(
        "",
        InstructionFormat::R,
        EncodingKey::reg(0x02, 0, 0),
        1,
        |_, _| 0,
    );
    assert_eq!(fault_of(result), DescriptorFault::EmptyName);
}

#[rstest]
#[case("MAC")]
#[case("my-op")]
#[case("1st")]
#[case("fmadd.s")]
fn test_any_non_empty_name_registers(#[case] name: &str) {
    let key = EncodingKey::reg(0x0A, 0, 0);
    let descriptor =
        InstructionDescriptor::new(name, InstructionFormat::R, key, 1, |_, _| 0).unwrap();
    let mut registry = ExtensionRegistry::new();
    registry.register(descriptor).unwrap();
    assert_eq!(registry.lookup(&key).unwrap().name(), name);
}

#[test]
fn test_builder_requires_operation() {
    let result = InstructionDescriptor::builder(
        "noop",
        InstructionFormat::I,
        EncodingKey::imm(0x0A, 0),
    )
    .build();
    assert_eq!(fault_of(result), DescriptorFault::MissingOperation);
}

#[test]
fn test_builder_defaults_to_one_cycle() {
    let descriptor = InstructionDescriptor::builder(
        "inc",
        InstructionFormat::I,
        EncodingKey::imm(0x0A, 0),
    )
    .operation(|ops, regs| regs.read(ops.rs1().unwrap_or(0)).wrapping_add(1))
    .build()
    .unwrap();
    assert_eq!(descriptor.cycles(), 1);
    assert_eq!(descriptor.name(), "inc");
}

#[test]
fn test_equality_is_by_encoding() {
    let a = InstructionDescriptor::new(
        "a",
        InstructionFormat::R,
        EncodingKey::reg(0x02, 3, 9),
        1,
        |_, _| 1,
    )
    .unwrap();
    let b = InstructionDescriptor::new(
        "b",
        InstructionFormat::R,
        EncodingKey::reg(0x02, 3, 9),
        5,
        |_, _| 2,
    )
    .unwrap();
    let c = InstructionDescriptor::new(
        "a",
        InstructionFormat::R,
        EncodingKey::reg(0x02, 3, 10),
        1,
        |_, _| 1,
    )
    .unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_evaluate_reads_without_writing() {
    let descriptor = InstructionDescriptor::new(
        "sum",
        InstructionFormat::R,
        EncodingKey::reg(0x0A, 0, 0),
        1,
        |ops, regs| {
            regs.read(ops.rs1().unwrap_or(0))
                .wrapping_add(regs.read(ops.rs2().unwrap_or(0)))
        },
    )
    .unwrap();
    let regs = RegisterFile::with_values([(1, 40), (2, 2)]);
    let before = regs.clone();
    let ops = OperandRecord::R {
        rd: 3,
        rs1: 1,
        rs2: 2,
    };
    assert_eq!(descriptor.evaluate(&ops, &regs), 42);
    assert_eq!(regs, before);
}

#[test]
fn test_matches_word() {
    let descriptor = InstructionDescriptor::new(
        "mac",
        InstructionFormat::R,
        EncodingKey::reg(0x02, 0, 0),
        1,
        |_, _| 0,
    )
    .unwrap();
    assert!(descriptor.matches(0x00C5_850B));
    assert!(!descriptor.matches(0x02C5_850B));
    assert_eq!(descriptor.mask(), 0xfe00_707f);
    assert_eq!(descriptor.match_bits(), 0x0000_000b);
}
