//! File format detection utilities.
//!
//! Detection reads only a bounded prefix of a file and never fails: an input
//! that cannot be opened is reported as "not this format".

// Submodule declarations
pub mod text;
pub mod types;

// Re-exports
pub use text::{is_text_file, looks_like_text, printable_ratio};
pub use types::FileFormat;
