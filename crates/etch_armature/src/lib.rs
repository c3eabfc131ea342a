//! Armature - The structural parser for Etch.
//!
//! Turns markup text into the normalized [`etch_relief`] tree the code
//! generator walks: a byte-level tokenizer feeds a tree builder, and the
//! finished tree has comments dropped (unless requested), adjacent text units
//! merged and empty text units removed.
//!
//! ## Name Origin
//!
//! An **armature** is the framework a sculptor builds a figure around. The
//! parser builds the frame every later stage hangs its output on.
//!
//! # Example
//!
//! ```
//! use etch_armature::parse;
//! use etch_carton::Bump;
//! use etch_relief::ChildNode;
//!
//! let allocator = Bump::new();
//! let (root, errors) = parse(&allocator, "<p class=\"a\">Hi</p>");
//! assert!(errors.is_empty());
//! assert!(matches!(&root.children[0], ChildNode::Element(el) if el.tag == "p"));
//! ```

pub mod parser;
pub mod tokenizer;

pub use parser::{parse, parse_with_options, Parser};
pub use tokenizer::{Callbacks, QuoteType, Tokenizer};
