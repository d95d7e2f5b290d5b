//! Execution statistics collection and reporting.
//!
//! This module tracks what the interpreter has done. It provides:
//! 1. **Totals:** Retired instructions, declared cycles, and faults.
//! 2. **Instruction mix:** Retire and cycle counts per mnemonic.
//! 3. **Derived metrics:** CPI and host-side throughput.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

/// Per-mnemonic counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstructionCounters {
    /// Number of times the instruction committed.
    pub retired: u64,
    /// Cycles charged for those commits.
    pub cycles: u64,
}

/// Execution statistics for one interpreter.
#[derive(Clone, Debug)]
pub struct ExecStats {
    start_time: Instant,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,
    /// Sum of the declared cycle counts of retired instructions.
    pub cycles: u64,
    /// Number of executions that faulted.
    pub faults: u64,
    mix: BTreeMap<String, InstructionCounters>,
}

impl Default for ExecStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions_retired: 0,
            cycles: 0,
            faults: 0,
            mix: BTreeMap::new(),
        }
    }
}

impl ExecStats {
    /// Records a committed instruction.
    pub fn record_retire(&mut self, name: &str, cycles: u32) {
        self.instructions_retired += 1;
        self.cycles += u64::from(cycles);
        let entry = self.mix.entry(name.to_owned()).or_default();
        entry.retired += 1;
        entry.cycles += u64::from(cycles);
    }

    /// Records a faulted execution.
    pub const fn record_fault(&mut self) {
        self.faults += 1;
    }

    /// Counters for one mnemonic, if it ever retired.
    pub fn instruction(&self, name: &str) -> Option<InstructionCounters> {
        self.mix.get(name).copied()
    }

    /// Average declared cycles per retired instruction (0 when nothing retired).
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Clears all counters and restarts the host clock.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for ExecStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let mips = if seconds > 0.0 {
            (self.instructions_retired as f64 / seconds) / 1_000_000.0
        } else {
            0.0
        };
        let total = self.instructions_retired.max(1) as f64;

        writeln!(f, "==========================================================")?;
        writeln!(f, "CUSTOM EXTENSION EXECUTION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {seconds:.4} s")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_faults               {}", self.faults)?;
        writeln!(f, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "sim_mips                 {mips:.2}")?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INSTRUCTION MIX")?;
        for (name, counters) in &self.mix {
            writeln!(
                f,
                "  op.{:<19} {} ({:.2}%), {} cycles",
                name,
                counters.retired,
                (counters.retired as f64 / total) * 100.0,
                counters.cycles
            )?;
        }
        writeln!(f, "----------------------------------------------------------")
    }
}
