//! Shared test infrastructure.

/// Raw instruction word builders.
pub mod builder;
