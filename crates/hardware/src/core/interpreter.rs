//! Custom instruction interpreter.
//!
//! Executes registered instructions against a register file. Every call walks
//! the same state machine:
//!
//! ```text
//! Idle -> Decoding -> Binding -> Executing -> Committed
//!            |           |          |
//!            +-----------+----------+------> Faulted
//! ```
//!
//! 1. **Decoding:** Resolve the encoding key (or raw word) in the registry.
//! 2. **Binding:** Shape the raw operands for the descriptor's format.
//! 3. **Executing:** Evaluate the operation against a read-only register view.
//! 4. **Committed:** Write `rd` (never `x0`) and charge the declared cycles.
//!
//! Nothing is written before the commit step, so a faulted call leaves the
//! register file exactly as it was.

use tracing::{debug, info, trace, warn};

use crate::common::constants::Word;
use crate::common::error::{Error, Result};
use crate::common::reg::{RegisterAccess, RegisterRead};
use crate::config::GeneralConfig;
use crate::ext::descriptor::InstructionDescriptor;
use crate::ext::operands::bind;
use crate::ext::registry::ExtensionRegistry;
use crate::isa::abi::REG_ZERO;
use crate::isa::decode::operand_fields;
use crate::isa::disasm::format_operands;
use crate::isa::encoding::EncodingKey;
use crate::stats::ExecStats;

/// Interpreter state for the current (or most recent) call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExecState {
    /// No instruction in flight.
    #[default]
    Idle,
    /// Resolving the instruction in the registry.
    Decoding,
    /// Binding operands to the instruction format.
    Binding,
    /// Computing the destination value.
    Executing,
    /// The result was committed (terminal).
    Committed,
    /// The instruction faulted without side effects (terminal).
    Faulted,
}

impl ExecState {
    /// Whether the state ends a call.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Faulted)
    }
}

/// Executes custom instructions from a registry.
#[derive(Debug)]
pub struct Interpreter<'r> {
    registry: &'r ExtensionRegistry,
    state: ExecState,
    stats: ExecStats,
    trace_instructions: bool,
}

impl<'r> Interpreter<'r> {
    /// Creates an interpreter over `registry`.
    pub fn new(registry: &'r ExtensionRegistry) -> Self {
        Self {
            registry,
            state: ExecState::Idle,
            stats: ExecStats::default(),
            trace_instructions: false,
        }
    }

    /// Creates an interpreter using the general configuration section.
    pub fn with_config(registry: &'r ExtensionRegistry, config: &GeneralConfig) -> Self {
        let mut interp = Self::new(registry);
        interp.trace_instructions = config.trace_instructions;
        interp
    }

    /// Terminal state of the last call, or `Idle` before the first one.
    pub const fn state(&self) -> ExecState {
        self.state
    }

    /// Statistics accumulated since creation.
    pub const fn stats(&self) -> &ExecStats {
        &self.stats
    }

    /// Consumes the interpreter, returning its statistics.
    pub fn into_stats(self) -> ExecStats {
        self.stats
    }

    /// Registry the interpreter executes from.
    pub const fn registry(&self) -> &'r ExtensionRegistry {
        self.registry
    }

    /// Executes the instruction registered under `key` with `raw` operands.
    ///
    /// # Arguments
    ///
    /// * `key` - Encoding of the instruction to execute.
    /// * `raw` - Operand tuple in the format's slot order.
    /// * `regs` - Register file, borrowed for this call only.
    ///
    /// # Returns
    ///
    /// The declared cycle count of the instruction.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownInstruction`] or [`Error::BadOperand`]; the register file
    /// is untouched in both cases.
    pub fn execute<R: RegisterAccess>(
        &mut self,
        key: &EncodingKey,
        raw: &[u32],
        regs: &mut R,
    ) -> Result<u32> {
        self.transition(ExecState::Decoding);
        let descriptor = match self.registry.lookup(key) {
            Ok(descriptor) => descriptor,
            Err(err) => return Err(self.fault(err)),
        };
        self.complete(&descriptor, raw, regs)
    }

    /// Decodes and executes one raw instruction word.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalInstruction`] for non 32-bit words,
    /// [`Error::UnknownInstruction`] when no registered encoding matches, or
    /// [`Error::BadOperand`]. The register file is untouched on error.
    pub fn step<R: RegisterAccess>(&mut self, word: u32, regs: &mut R) -> Result<u32> {
        self.transition(ExecState::Decoding);
        let descriptor = match self.registry.resolve(word) {
            Ok(descriptor) => descriptor,
            Err(err) => return Err(self.fault(err)),
        };
        let raw = operand_fields(word, descriptor.format());
        self.complete(&descriptor, &raw, regs)
    }

    /// Steps through `program`, stopping at the first fault.
    ///
    /// # Returns
    ///
    /// Total cycles charged for the program.
    ///
    /// # Errors
    ///
    /// The first fault; instructions before it stay committed.
    pub fn run<R: RegisterAccess>(&mut self, program: &[u32], regs: &mut R) -> Result<u64> {
        let mut total = 0;
        for (index, &word) in program.iter().enumerate() {
            match self.step(word, regs) {
                Ok(cycles) => total += u64::from(cycles),
                Err(err) => {
                    warn!(index, word = format_args!("{word:#010x}"), %err, "program stopped");
                    return Err(err);
                }
            }
        }
        Ok(total)
    }

    fn complete<R: RegisterAccess>(
        &mut self,
        descriptor: &InstructionDescriptor,
        raw: &[u32],
        regs: &mut R,
    ) -> Result<u32> {
        self.transition(ExecState::Binding);
        let operands = match bind(descriptor.format(), raw) {
            Ok(operands) => operands,
            Err(err) => return Err(self.fault(err)),
        };

        self.transition(ExecState::Executing);
        let value: Word = {
            let view: &dyn RegisterRead = &*regs;
            descriptor.evaluate(&operands, view)
        };

        if let Some(rd) = operands.rd().filter(|&rd| rd != REG_ZERO) {
            regs.write(rd, value);
        }
        self.transition(ExecState::Committed);

        let cycles = descriptor.cycles();
        self.stats.record_retire(descriptor.name(), cycles);
        if self.trace_instructions {
            info!(
                insn = %format_operands(descriptor.name(), &operands),
                value = format_args!("{value:#010x}"),
                cycles,
                "retired"
            );
        }
        Ok(cycles)
    }

    fn transition(&mut self, next: ExecState) {
        trace!(from = ?self.state, to = ?next, "interpreter state");
        self.state = next;
    }

    fn fault(&mut self, err: Error) -> Error {
        self.transition(ExecState::Faulted);
        self.stats.record_fault();
        if self.trace_instructions {
            info!(%err, "faulted");
        } else {
            debug!(%err, "instruction faulted");
        }
        err
    }
}
