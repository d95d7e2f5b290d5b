

/// Descriptor construction and validation.
pub mod descriptor;
