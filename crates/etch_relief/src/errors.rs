//! Parser diagnostics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::SourceLocation;

/// Parser error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ErrorCode {
    /// Input ended inside a tag
    EofInTag = 0,
    /// Input ended inside a comment
    EofInComment = 1,
    /// `</>` with no tag name
    MissingEndTagName = 2,
    /// An element was never closed
    MissingEndTag = 3,
    /// An end tag with no matching open element
    InvalidEndTag = 4,
    /// The same attribute appears twice on one element
    DuplicateAttribute = 5,
    /// A NUL character in the input
    UnexpectedNullCharacter = 6,
    /// Elements nested deeper than the parser allows
    NestingTooDeep = 7,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EofInTag => "Unexpected end of input inside a tag.",
            Self::EofInComment => "Unexpected end of input inside a comment.",
            Self::MissingEndTagName => "End tag name was expected.",
            Self::MissingEndTag => "Element is missing end tag.",
            Self::InvalidEndTag => "Invalid end tag.",
            Self::DuplicateAttribute => "Duplicate attribute.",
            Self::UnexpectedNullCharacter => "Unexpected null character.",
            Self::NestingTooDeep => "Elements are nested too deeply; deeper content was flattened.",
        }
    }
}

/// A diagnostic produced while parsing markup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", location_suffix(.loc))]
pub struct CompilerError {
    pub code: ErrorCode,
    pub loc: Option<SourceLocation>,
    pub message: std::string::String,
}

impl CompilerError {
    pub fn new(code: ErrorCode, loc: Option<SourceLocation>) -> Self {
        Self {
            code,
            loc,
            message: code.message().to_string(),
        }
    }
}

fn location_suffix(loc: &Option<SourceLocation>) -> std::string::String {
    match loc {
        Some(loc) => format!(" ({}:{})", loc.start.line, loc.start.column),
        None => std::string::String::new(),
    }
}
