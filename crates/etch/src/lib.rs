//! # etch
//!
//! Etch - Turn markup fragments into DOM-building JavaScript.
//!
//! ## Name Origin
//!
//! **Etching** transfers a drawing onto a plate line by line. Etch transfers a
//! markup fragment into the statements that draw it again in a live document.
//!
//! ## Crates
//!
//! | Crate | Role |
//! |-------|------|
//! | [`carton`] | Shared toolbox: arena, collections, tag tables, identifier helpers |
//! | [`relief`] | Parsed tree, source positions, parser diagnostics |
//! | [`armature`] | Markup tokenizer and tree builder |
//! | [`atelier`] | Statement generator: naming, quoting, attributes, tree walk |
//!
//! # Example
//!
//! ```
//! let code = etch::convert("<b>bold</b>").unwrap();
//! assert_eq!(
//!     code,
//!     "var b1 = fragment.appendChild(document.createElement('b'));\nb1.textContent = 'bold';\n"
//! );
//! ```

/// Shared toolbox
pub use etch_carton as carton;

/// Parsed tree model
pub use etch_relief as relief;

/// Markup parser
pub use etch_armature as armature;

/// Statement generator
pub use etch_atelier as atelier;

pub use etch_atelier::{
    convert, convert_bytes, convert_with_options, ConvertError, ConvertOptions, ConvertOutput,
};
