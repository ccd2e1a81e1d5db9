//! Common types and utilities shared by the readers.
//!
//! Errors, byte-order-mark probing, encoding normalization and format
//! detection live here so every reader reports and decodes the same way.

// Submodule declarations
pub mod bom;
pub mod detection;
pub mod encoding;
pub mod error;

// Re-exports for convenience
pub use bom::{BomKind, EncodingProbe};
pub use detection::{FileFormat, is_text_file};
pub use encoding::{CodecBackend, EncodingCapabilities, EncodingNormalizer};
pub use error::{Error, Result};
