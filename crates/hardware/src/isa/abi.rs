//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Maps register indices to their ABI names for disassembly and parses both
//! ABI names (`a0`, `fp`) and architectural names (`x10`) back to indices.

use crate::common::constants::{NUM_REGS, RegIdx};

/// Register x0 (zero register, always zero).
pub const REG_ZERO: RegIdx = 0;

/// ABI register names for x0–x31.
pub const REG_NAMES: [&str; NUM_REGS] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn xreg(idx: RegIdx) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("x??")
}

/// Parses `x0`..`x31`, an ABI name, or `fp` (alias of `s0`).
pub fn parse_register(name: &str) -> Option<RegIdx> {
    let name = name.trim();
    if let Some(num) = name.strip_prefix('x') {
        return num.parse::<RegIdx>().ok().filter(|&idx| idx < NUM_REGS);
    }
    if name == "fp" {
        return Some(8);
    }
    REG_NAMES.iter().position(|&abi| abi == name)
}
