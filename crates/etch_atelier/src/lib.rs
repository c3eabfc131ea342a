//! Atelier - The workshop where markup is etched into DOM statements.
//!
//! Converts a markup fragment into JavaScript statements that rebuild the same
//! element tree with `document.createElement`, `appendChild` and property
//! assignments.
//!
//! The generated code assumes an object model exposing `document.createElement`,
//! `document.createElementNS`, `document.createTextNode`,
//! `document.createComment`, `appendChild`, `setAttribute`, `dataset`,
//! `classList.add`, `style` (including `style.setProperty`) and `textContent`.
//! The variable named by [`ConvertOptions::root_name`] must hold the parent
//! node the fragment is appended to.
//!
//! ## Name Origin
//!
//! An **atelier** is an artist's workshop. This is where the plate is actually
//! etched.
//!
//! # Example
//!
//! ```
//! use etch_atelier::{convert_with_options, ConvertOptions};
//!
//! let options = ConvertOptions {
//!     root_name: Some("root".into()),
//!     ..Default::default()
//! };
//! let output = convert_with_options(r#"<p class="a">Hi</p>"#, &options).unwrap();
//! assert_eq!(
//!     output.code,
//!     "var p1 = root.appendChild(document.createElement('p'));\n\
//!      p1.classList.add('a');\n\
//!      p1.textContent = 'Hi';\n"
//! );
//! ```

pub mod attributes;
pub mod context;
pub mod errors;
pub mod naming;
pub mod options;
pub mod quote;
pub mod walker;

pub use attributes::{emit_attributes, AttributeRule};
pub use context::CodegenContext;
pub use errors::ConvertError;
pub use naming::{NamingStrategy, StructureNamer, WordPoolNamer};
pub use options::{ConvertOptions, NamingStrategyKind, QuoteStyle, DEFAULT_ROOT_NAME};
pub use quote::{quote_literal, quote_text};
pub use walker::Walker;

// Re-export the types callers need to inspect diagnostics
pub use etch_relief::{CompilerError, ErrorCode};

use etch_armature::parse_with_options;
use etch_carton::Bump;
use etch_relief::ParserOptions;

/// Result of a conversion
#[derive(Debug, Clone)]
pub struct ConvertOutput {
    /// Generated statements, one per line
    pub code: String,
    /// Parser diagnostics for input that was converted anyway
    pub warnings: Vec<CompilerError>,
}

/// Convert markup with default options
pub fn convert(markup: &str) -> Result<String, ConvertError> {
    convert_with_options(markup, &ConvertOptions::default()).map(|output| output.code)
}

/// Convert raw input bytes, which must be UTF-8 markup text
pub fn convert_bytes(
    markup: &[u8],
    options: &ConvertOptions,
) -> Result<ConvertOutput, ConvertError> {
    let markup = std::str::from_utf8(markup).map_err(|err| {
        ConvertError::InvalidArgument(format!("input is not valid UTF-8 text: {err}"))
    })?;
    convert_with_options(markup, options)
}

/// Convert markup with custom options
pub fn convert_with_options(
    markup: &str,
    options: &ConvertOptions,
) -> Result<ConvertOutput, ConvertError> {
    let allocator = Bump::new();
    let parser_opts = ParserOptions {
        comments: options.comments,
        ..ParserOptions::default()
    };

    // Parse (and normalize) before anything is emitted
    let (root, errors) = parse_with_options(&allocator, markup, parser_opts);

    if options.strict && !errors.is_empty() {
        return Err(ConvertError::Parse(errors));
    }
    for error in &errors {
        tracing::warn!(code = ?error.code, "{error}");
    }

    let root_name = options.resolved_root_name();
    let mut walker = Walker::new(options);
    walker.walk_root(&root, root_name);

    tracing::debug!(
        root = root_name,
        naming = ?options.naming,
        elements = walker.element_count(),
        statements = walker.statement_count(),
        "converted markup fragment"
    );

    Ok(ConvertOutput {
        code: walker.into_code(),
        warnings: errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_empty() {
        assert_eq!(convert("").unwrap(), "");
        assert_eq!(convert("  \n\t ").unwrap(), "");
    }

    #[test]
    fn test_convert_default_root() {
        assert_eq!(
            convert("<br>").unwrap(),
            "var br1 = fragment.appendChild(document.createElement('br'));\n"
        );
    }

    #[test]
    fn test_convert_top_level_text() {
        assert_eq!(
            convert("Hello <b>you</b>").unwrap(),
            "fragment.appendChild(document.createTextNode('Hello'));\n\
             var b1 = fragment.appendChild(document.createElement('b'));\n\
             b1.textContent = 'you';\n"
        );
    }

    #[test]
    fn test_convert_bytes_rejects_invalid_utf8() {
        let err = convert_bytes(&[b'<', b'p', b'>', 0xff, 0xfe], &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidArgument(_)));
    }

    #[test]
    fn test_convert_bytes_accepts_utf8() {
        let output = convert_bytes("<p>é</p>".as_bytes(), &ConvertOptions::default()).unwrap();
        assert!(output.code.ends_with("p1.textContent = 'é';\n"));
    }

    #[test]
    fn test_lenient_mode_returns_warnings() {
        let output = convert_with_options("<div><p>x</div>", &ConvertOptions::default()).unwrap();
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].code, ErrorCode::MissingEndTag);
        assert!(output.code.contains("p1.textContent = 'x';"));
    }

    #[test]
    fn test_strict_mode_fails_without_output() {
        let options = ConvertOptions {
            strict: true,
            ..Default::default()
        };
        let err = convert_with_options("<div></span>", &options).unwrap_err();
        match err {
            ConvertError::Parse(errors) => {
                assert!(errors.iter().any(|e| e.code == ErrorCode::InvalidEndTag));
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
        assert!(convert_with_options("<div></div>", &options).is_ok());
    }

    #[test]
    fn test_deep_nesting_converts() {
        let depth = 20_000;
        let markup = format!("{}{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let output = convert_with_options(&markup, &ConvertOptions::default()).unwrap();

        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].code, ErrorCode::NestingTooDeep);
        assert_eq!(output.code.lines().count(), depth);
    }
}
