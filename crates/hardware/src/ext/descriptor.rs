//! Instruction descriptors.
//!
//! An [`InstructionDescriptor`] holds everything the interpreter needs to know
//! about one custom instruction: its mnemonic, format, encoding, static cycle
//! cost and semantic operation. Descriptors are validated on construction and
//! immutable afterwards; the registry shares them as `Arc`s.

use std::fmt;
use std::sync::Arc;

use crate::common::constants::Word;
use crate::common::error::{DescriptorFault, Error, Result};
use crate::common::reg::RegisterRead;
use crate::ext::operands::OperandRecord;
use crate::isa::encoding::EncodingKey;
use crate::isa::format::InstructionFormat;

/// Semantic operation of a custom instruction.
///
/// Receives the bound operands and a read-only view of the register file and
/// returns the value to commit to `rd`. Formats without `rd` discard the value.
pub type Operation = Arc<dyn Fn(&OperandRecord, &dyn RegisterRead) -> Word + Send + Sync>;

/// Static description of one custom instruction.
///
/// Two descriptors compare equal when their encodings are equal; names may
/// collide harmlessly.
#[derive(Clone)]
pub struct InstructionDescriptor {
    name: String,
    format: InstructionFormat,
    encoding: EncodingKey,
    cycles: u32,
    operation: Operation,
}

impl InstructionDescriptor {
    /// Creates and validates a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] if `cycles` is zero, an encoding field
    /// exceeds its bit budget, the funct7 presence does not match `format`, or
    /// the name is empty.
    pub fn new<F>(
        name: impl Into<String>,
        format: InstructionFormat,
        encoding: EncodingKey,
        cycles: u32,
        operation: F,
    ) -> Result<Self>
    where
        F: Fn(&OperandRecord, &dyn RegisterRead) -> Word + Send + Sync + 'static,
    {
        Self::builder(name, format, encoding)
            .cycles(cycles)
            .operation(operation)
            .build()
    }

    /// Starts a builder whose operation may be supplied later.
    pub fn builder(
        name: impl Into<String>,
        format: InstructionFormat,
        encoding: EncodingKey,
    ) -> DescriptorBuilder {
        DescriptorBuilder {
            name: name.into(),
            format,
            encoding,
            cycles: 1,
            operation: None,
        }
    }

    /// Re-checks every construction invariant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        check(&self.name, self.format, &self.encoding, self.cycles).map_err(|fault| {
            Error::InvalidDescriptor {
                name: self.name.clone(),
                fault,
            }
        })
    }

    /// Assembler mnemonic.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base instruction format.
    pub const fn format(&self) -> InstructionFormat {
        self.format
    }

    /// Encoding key.
    pub const fn encoding(&self) -> EncodingKey {
        self.encoding
    }

    /// Declared cycle cost.
    pub const fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Word bits fixed by this instruction.
    pub const fn mask(&self) -> u32 {
        self.encoding.mask(self.format)
    }

    /// Value of the fixed bits.
    pub const fn match_bits(&self) -> u32 {
        self.encoding.match_bits(self.format)
    }

    /// Whether `word` encodes this instruction.
    pub const fn matches(&self, word: u32) -> bool {
        word & self.mask() == self.match_bits()
    }

    /// Computes the destination value without side effects.
    pub fn evaluate(&self, operands: &OperandRecord, regs: &dyn RegisterRead) -> Word {
        (self.operation)(operands, regs)
    }
}

impl PartialEq for InstructionDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.encoding == other.encoding
    }
}

impl Eq for InstructionDescriptor {}

impl fmt::Debug for InstructionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstructionDescriptor")
            .field("name", &self.name)
            .field("format", &self.format)
            .field("encoding", &self.encoding)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}

/// Incremental constructor for [`InstructionDescriptor`].
pub struct DescriptorBuilder {
    name: String,
    format: InstructionFormat,
    encoding: EncodingKey,
    cycles: u32,
    operation: Option<Operation>,
}

impl DescriptorBuilder {
    /// Sets the cycle cost (default 1).
    #[must_use]
    pub const fn cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles;
        self
    }

    /// Sets the semantic operation.
    #[must_use]
    pub fn operation<F>(self, operation: F) -> Self
    where
        F: Fn(&OperandRecord, &dyn RegisterRead) -> Word + Send + Sync + 'static,
    {
        self.shared_operation(Arc::new(operation))
    }

    /// Sets an operation that is already shared with other descriptors.
    #[must_use]
    pub fn shared_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Validates the collected fields and produces the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] when a field is invalid or no
    /// operation was supplied.
    pub fn build(self) -> Result<InstructionDescriptor> {
        let invalid = |name: &str, fault| Error::InvalidDescriptor {
            name: name.to_owned(),
            fault,
        };
        check(&self.name, self.format, &self.encoding, self.cycles)
            .map_err(|fault| invalid(&self.name, fault))?;
        let Some(operation) = self.operation else {
            return Err(invalid(&self.name, DescriptorFault::MissingOperation));
        };
        Ok(InstructionDescriptor {
            name: self.name,
            format: self.format,
            encoding: self.encoding,
            cycles: self.cycles,
            operation,
        })
    }
}

impl fmt::Debug for DescriptorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorBuilder")
            .field("name", &self.name)
            .field("format", &self.format)
            .field("encoding", &self.encoding)
            .field("cycles", &self.cycles)
            .field("operation", &self.operation.is_some())
            .finish()
    }
}

fn check(
    name: &str,
    format: InstructionFormat,
    encoding: &EncodingKey,
    cycles: u32,
) -> std::result::Result<(), DescriptorFault> {
    if name.is_empty() {
        return Err(DescriptorFault::EmptyName);
    }
    if cycles == 0 {
        return Err(DescriptorFault::ZeroCycles);
    }
    encoding.check_widths()?;
    encoding.check_layout(format)
}
