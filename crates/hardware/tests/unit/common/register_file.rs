//! # Register File Tests
//!
//! Verifies x0 hardwiring, out-of-range handling and the trait views the
//! interpreter uses.

use rstest::rstest;
use rvext_core::common::reg::{RegisterAccess, RegisterFile, RegisterRead};

#[test]
fn test_new_file_is_zeroed() {
    let regs = RegisterFile::new();
    assert_eq!(regs.snapshot(), [0; 32]);
}

#[rstest]
#[case(1, 0xDEAD_BEEF)]
#[case(10, 7)]
#[case(31, u32::MAX)]
fn test_write_then_read(#[case] idx: usize, #[case] value: u32) {
    let mut regs = RegisterFile::new();
    regs.write(idx, value);
    assert_eq!(regs.read(idx), value);
}

#[test]
fn test_x0_is_hardwired_to_zero() {
    let mut regs = RegisterFile::new();
    regs.write(0, 0x1234);
    assert_eq!(regs.read(0), 0);
}

#[test]
fn test_out_of_range_index_is_ignored() {
    let mut regs = RegisterFile::new();
    regs.write(32, 5);
    assert_eq!(regs.read(32), 0);
    assert_eq!(regs.snapshot(), [0; 32]);
}

#[test]
fn test_with_values_skips_x0() {
    let regs = RegisterFile::with_values([(0, 9), (5, 1), (6, 2)]);
    assert_eq!(regs.read(0), 0);
    assert_eq!(regs.read(5), 1);
    assert_eq!(regs.read(6), 2);
}

#[test]
fn test_with_values_drops_out_of_range_presets() {
    let regs = RegisterFile::with_values([(32, 7), (usize::MAX, 9), (4, 3)]);
    let mut expected = [0; 32];
    expected[4] = 3;
    assert_eq!(regs.snapshot(), expected);
}

#[test]
fn test_trait_views_share_state() {
    fn bump(regs: &mut impl RegisterAccess) {
        let v = regs.read(3);
        regs.write(3, v + 1);
    }
    let mut regs = RegisterFile::with_values([(3, 41)]);
    bump(&mut regs);
    let view: &dyn RegisterRead = &regs;
    assert_eq!(view.read(3), 42);
}

#[test]
fn test_display_lists_every_register() {
    let text = RegisterFile::with_values([(10, 0xAB)]).to_string();
    assert_eq!(text.lines().count(), 16);
    assert!(text.contains("x10=0x000000ab"));
}
