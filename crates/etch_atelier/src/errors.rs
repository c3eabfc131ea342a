//! Conversion errors.

use etch_relief::CompilerError;
use thiserror::Error;

/// Errors that can occur during conversion.
///
/// A conversion either produces all of its statements or fails with one of
/// these before any statement is written.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input cannot be treated as markup text
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The markup has parse errors and strict mode is on
    #[error("Failed to parse markup: {}", join_errors(.0))]
    Parse(Vec<CompilerError>),
}

impl ConvertError {
    /// Parser diagnostics carried by the error, if any
    pub fn diagnostics(&self) -> &[CompilerError] {
        match self {
            Self::Parse(errors) => errors,
            Self::InvalidArgument(_) => &[],
        }
    }
}

fn join_errors(errors: &[CompilerError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
