//! Relief - The sculptured tree surface for Etch.
//!
//! Defines the parsed markup tree consumed by the code generator, the source
//! positions attached to it, the diagnostics the parser reports and the parser
//! options.
//!
//! ## Name Origin
//!
//! A **relief** is a sculpture raised from a flat surface. The tree defined here
//! is what is raised from flat markup text before it is etched into statements.

pub mod ast;
pub mod errors;
pub mod options;

pub use ast::*;
pub use errors::{CompilerError, ErrorCode};
pub use options::{ParserOptions, DEFAULT_MAX_DEPTH};
