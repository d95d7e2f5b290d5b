//! Session utilities and program loading.
//!
//! Provides utilities for building a registry from configuration, loading
//! instruction listings, and running them against a register file.

pub mod loader;

/// Registry and register file owned together.
pub mod session;

pub use self::session::{RunReport, Session};
