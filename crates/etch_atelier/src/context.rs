//! Emission buffer and declaration table.

use etch_carton::{FxHashSet, String};

use crate::options::{ConvertOptions, QuoteStyle};

/// Code generation context using byte buffer for performance
pub struct CodegenContext {
    /// Generated code buffer (bytes)
    code: Vec<u8>,
    /// Names that already have a `var` statement in the output
    declared: FxHashSet<String>,
    /// Number of statements written
    statements: usize,
    /// String literal delimiter
    pub(crate) quote: QuoteStyle,
    /// Whether comment nodes are emitted
    pub(crate) comments: bool,
}

impl CodegenContext {
    /// Create a new codegen context
    pub fn new(options: &ConvertOptions) -> Self {
        Self {
            code: Vec::with_capacity(4096),
            declared: FxHashSet::default(),
            statements: 0,
            quote: options.quote,
            comments: options.comments,
        }
    }

    /// Push string to buffer
    #[inline]
    pub fn push(&mut self, code: &str) {
        self.code.extend_from_slice(code.as_bytes());
    }

    /// Push a complete statement: the code, `;` and a newline
    #[inline]
    pub fn push_statement(&mut self, code: &str) {
        self.push(code);
        self.code.extend_from_slice(b";\n");
        self.statements += 1;
    }

    /// Record that `name` is being bound.
    ///
    /// Returns `true` the first time a name is seen, in which case the caller
    /// must emit a declaring statement. Entries are never removed, so a name
    /// that is released and handed out again is only declared once.
    pub fn declare(&mut self, name: &str) -> bool {
        if self.declared.contains(name) {
            false
        } else {
            self.declared.insert(name.into());
            true
        }
    }

    /// Whether `name` has been declared
    #[inline]
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Number of statements written so far
    #[inline]
    pub fn statement_count(&self) -> usize {
        self.statements
    }

    /// Get the generated code as a String
    pub fn into_code(self) -> std::string::String {
        // SAFETY: We only push valid UTF-8 strings
        unsafe { std::string::String::from_utf8_unchecked(self.code) }
    }

    /// Get the generated code as a reference (for temporary use)
    pub fn code_as_str(&self) -> &str {
        // SAFETY: We only push valid UTF-8 strings
        unsafe { std::str::from_utf8_unchecked(&self.code) }
    }
}
