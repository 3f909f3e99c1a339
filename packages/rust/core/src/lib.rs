//! Core parsing, validation, and orchestration for agentsmd.
//!
//! This crate ties the locator, the section splitter, and the advisory
//! validator into the workflows the CLI exposes (e.g., `inspect`).

pub mod document;
pub mod pipeline;
pub mod validate;

pub use document::{parse, parse_str, parse_with};
pub use pipeline::{Inspection, inspect};
pub use validate::{validate, validate_with};
