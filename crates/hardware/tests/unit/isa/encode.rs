//! # Encoder Tests
//!
//! The encoder must agree with independently assembled words and refuse
//! operands the binder refuses.

use pretty_assertions::assert_eq;
use rvext_core::Error;
use rvext_core::ext::{ExtensionRegistry, InstructionDescriptor};
use rvext_core::isa::encode::encode;
use rvext_core::isa::encoding::EncodingKey;
use rvext_core::isa::format::InstructionFormat;

use crate::common::builder::{i_type, r_type, s_type, u_type};

fn builtin(name: &str) -> std::sync::Arc<InstructionDescriptor> {
    ExtensionRegistry::with_builtin_extensions()
        .unwrap()
        .find_by_name(name)
        .unwrap()
}

#[test]
fn test_encode_mac() {
    assert_eq!(encode(&builtin("mac"), &[10, 11, 12]).unwrap(), 0x00C5_850B);
}

#[test]
fn test_encode_mod_sets_funct7() {
    assert_eq!(
        encode(&builtin("mod"), &[5, 6, 7]).unwrap(),
        r_type(0x02, 5, 0, 6, 7, 0x01)
    );
}

#[test]
fn test_encode_negative_immediate() {
    assert_eq!(
        encode(&builtin("binom"), &[10, 11, (-3_i32) as u32]).unwrap(),
        i_type(0x02, 10, 1, 11, -3)
    );
    assert_eq!(
        encode(&builtin("binom"), &[10, 11, 0xFFD]).unwrap(),
        i_type(0x02, 10, 1, 11, -3)
    );
}

#[test]
fn test_encode_store_and_upper() {
    let store = InstructionDescriptor::new(
        "st",
        InstructionFormat::S,
        EncodingKey::imm(0x0A, 2),
        1,
        |_, _| 0,
    )
    .unwrap();
    assert_eq!(
        encode(&store, &[2, 8, (-20_i32) as u32]).unwrap(),
        s_type(0x0A, 2, 2, 8, -20)
    );

    let upper = InstructionDescriptor::new(
        "hi",
        InstructionFormat::U,
        EncodingKey::upper(0x16),
        1,
        |_, _| 0,
    )
    .unwrap();
    assert_eq!(
        encode(&upper, &[3, 0xABCD_E000]).unwrap(),
        u_type(0x16, 3, 0xABCDE)
    );
}

#[test]
fn test_encode_rejects_bad_operands() {
    assert!(matches!(
        encode(&builtin("mac"), &[10, 11]),
        Err(Error::BadOperand(_))
    ));
    assert!(matches!(
        encode(&builtin("binom"), &[10, 11, 0x1000]),
        Err(Error::BadOperand(_))
    ));
}
