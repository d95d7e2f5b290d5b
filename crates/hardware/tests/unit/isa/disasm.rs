//! # Disassembler Tests
//!
//! Mnemonics come from the registry; unregistered words print as `unknown`.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvext_core::ext::{ExtensionRegistry, InstructionDescriptor};
use rvext_core::isa::disasm::{disassemble, disassemble_with};
use rvext_core::isa::encoding::EncodingKey;
use rvext_core::isa::format::InstructionFormat;

use crate::common::builder::{i_type, r_type, s_type, u_type};

fn registry() -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::with_builtin_extensions().unwrap();
    registry
        .register(
            InstructionDescriptor::new(
                "st.sum",
                InstructionFormat::S,
                EncodingKey::imm(0x0A, 2),
                2,
                |_, _| 0,
            )
            .unwrap(),
        )
        .unwrap();
    registry
        .register(
            InstructionDescriptor::new(
                "ldhi",
                InstructionFormat::U,
                EncodingKey::upper(0x16),
                1,
                |_, _| 0,
            )
            .unwrap(),
        )
        .unwrap();
    registry
}

#[rstest]
#[case(r_type(0x02, 10, 0, 11, 12, 0), "mac a0, a1, a2")]
#[case(r_type(0x02, 5, 0, 6, 7, 1), "mod t0, t1, t2")]
#[case(i_type(0x02, 10, 1, 11, -3), "binom a0, a1, -3")]
#[case(s_type(0x0A, 2, 2, 8, 16), "st.sum s0, 16(sp)")]
#[case(u_type(0x16, 1, 0x12345), "ldhi ra, 0x12345")]
fn test_disassemble(#[case] word: u32, #[case] expected: &str) {
    assert_eq!(disassemble(word, &registry()), expected);
}

#[rstest]
#[case::unregistered(r_type(0x02, 1, 0, 2, 3, 0x40))]
#[case::compressed(0x0000_4501)]
#[case::other_slot(r_type(0x1E, 1, 0, 2, 3, 0))]
fn test_unknown_words(#[case] word: u32) {
    assert_eq!(disassemble(word, &registry()), "unknown");
}

#[test]
fn test_disassemble_with_explicit_descriptor() {
    let registry = registry();
    let mac = registry.find_by_name("mac").unwrap();
    assert_eq!(
        disassemble_with(0x00C5_850B, &mac).as_deref(),
        Some("mac a0, a1, a2")
    );
}
