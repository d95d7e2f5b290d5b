//! Session: owns the registry and the register file side-by-side.
//!
//! The interpreter only borrows both, so a session hands out a fresh
//! interpreter per run while keeping architectural state between runs.

use crate::common::constants::{RegIdx, Word};
use crate::common::error::{Error, Result};
use crate::common::reg::RegisterFile;
use crate::config::Config;
use crate::core::interpreter::{ExecState, Interpreter};
use crate::ext::registry::ExtensionRegistry;
use crate::isa::encoding::EncodingKey;
use crate::sim::loader::build_registry;
use crate::stats::ExecStats;

/// Result of running a program in a [`Session`].
#[derive(Debug)]
pub struct RunReport {
    /// Cycles charged by committed instructions.
    pub cycles: u64,
    /// Terminal state of the last instruction.
    pub state: ExecState,
    /// Fault that stopped the run, if any.
    pub fault: Option<Error>,
    /// Statistics of this run.
    pub stats: ExecStats,
}

impl RunReport {
    /// Whether every instruction committed.
    pub const fn succeeded(&self) -> bool {
        self.fault.is_none()
    }
}

/// Top-level session: configuration, registry and register file.
#[derive(Debug)]
pub struct Session {
    config: Config,
    registry: ExtensionRegistry,
    /// Architectural register file, kept across runs.
    pub regs: RegisterFile,
}

impl Session {
    /// Creates a session with the registry described by `config`.
    ///
    /// # Errors
    ///
    /// Propagates [`build_registry`] failures.
    pub fn new(config: Config) -> Result<Self> {
        let registry = build_registry(&config)?;
        Ok(Self {
            config,
            registry,
            regs: RegisterFile::new(),
        })
    }

    /// Configuration the session was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Registry of the session.
    pub const fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Sets initial register values.
    pub fn preset<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (RegIdx, Word)>,
    {
        for (idx, val) in values {
            self.regs.write(idx, val);
        }
    }

    /// Runs `program` to completion or to its first fault.
    pub fn run(&mut self, program: &[u32]) -> RunReport {
        let mut interp = Interpreter::with_config(&self.registry, &self.config.general);
        let outcome = interp.run(program, &mut self.regs);
        let state = interp.state();
        let stats = interp.into_stats();
        match outcome {
            Ok(cycles) => RunReport {
                cycles,
                state,
                fault: None,
                stats,
            },
            Err(err) => RunReport {
                cycles: stats.cycles,
                state,
                fault: Some(err),
                stats,
            },
        }
    }

    /// Executes one instruction by encoding key.
    ///
    /// # Errors
    ///
    /// See [`Interpreter::execute`].
    pub fn execute(&mut self, key: &EncodingKey, raw: &[u32]) -> Result<u32> {
        Interpreter::with_config(&self.registry, &self.config.general).execute(
            key,
            raw,
            &mut self.regs,
        )
    }
}
