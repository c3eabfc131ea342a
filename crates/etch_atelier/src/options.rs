//! Conversion options.

use etch_carton::{is_js_identifier, String};
use serde::{Deserialize, Serialize};

use crate::naming::{NamingStrategy, StructureNamer, WordPoolNamer};

/// Parent variable name used when none (or an unusable one) is given
pub const DEFAULT_ROOT_NAME: &str = "fragment";

/// Delimiter used for string literals in the generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// `'text'`
    #[default]
    Single,
    /// `"text"`
    Double,
}

impl QuoteStyle {
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

/// Which naming strategy hands out variable names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingStrategyKind {
    /// Names derived from the element's id, name or tag (`p1`, `mainNav1`)
    #[default]
    StructureDerived,
    /// Names drawn from a fixed adjective/noun pool (`amberRiver`)
    WordPool,
}

impl NamingStrategyKind {
    /// Create a fresh strategy of this kind
    pub fn into_strategy(self) -> std::boxed::Box<dyn NamingStrategy> {
        match self {
            Self::StructureDerived => std::boxed::Box::new(StructureNamer::new()),
            Self::WordPool => std::boxed::Box::new(WordPoolNamer::new()),
        }
    }
}

/// Options for a single conversion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Variable the top-level nodes are appended to
    #[serde(default)]
    pub root_name: Option<String>,

    /// Naming strategy for element variables
    #[serde(default)]
    pub naming: NamingStrategyKind,

    /// String literal delimiter
    #[serde(default)]
    pub quote: QuoteStyle,

    /// Whether to emit `createComment` statements for markup comments
    #[serde(default)]
    pub comments: bool,

    /// Whether parser diagnostics fail the conversion
    #[serde(default)]
    pub strict: bool,
}

impl ConvertOptions {
    /// The root parent name, falling back to [`DEFAULT_ROOT_NAME`] when it is
    /// missing, empty or not a usable identifier
    pub fn resolved_root_name(&self) -> &str {
        match self.root_name.as_deref() {
            Some(name) if is_js_identifier(name) => name,
            _ => DEFAULT_ROOT_NAME,
        }
    }
}
