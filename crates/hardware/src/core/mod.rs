//! Execution core.
//!
//! This module contains the interpreter that drives a registered instruction
//! from encoding lookup through operand binding to register commit.

/// Interpreter state machine and execution entry points.
pub mod interpreter;

pub use self::interpreter::{ExecState, Interpreter};
