//! Unified error types for Longan.
//!
//! Every fallible operation in the crate reports through a single error enum,
//! so callers selecting between readers see one consistent error surface.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
