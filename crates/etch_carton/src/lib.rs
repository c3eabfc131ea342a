//! Carton - The artist's toolbox for Etch.
//!
//! This crate provides the foundational utilities shared by every Etch crate:
//! the arena used for parsed trees, compact strings, fast hash collections,
//! compile-time DOM tag tables and the identifier helpers used by code generation.
//!
//! # Example
//!
//! ```
//! use etch_carton::{camelize, is_void_tag, Box, Bump, Vec};
//!
//! let bump = Bump::new();
//! let boxed = Box::new_in(42, &bump);
//! assert_eq!(*boxed, 42);
//!
//! let mut vec = Vec::new_in(&bump);
//! vec.push(1);
//! assert_eq!(vec.len(), 1);
//!
//! assert!(is_void_tag("br"));
//! assert_eq!(camelize("background-color"), "backgroundColor");
//! ```

pub mod dom_tag_config;
pub mod general;

// Re-export arena types
pub use bumpalo::boxed::Box;
pub use bumpalo::collections::String as BumpString;
pub use bumpalo::collections::Vec;
pub use bumpalo::Bump;

// Re-export compact_str::CompactString for convenience
pub use compact_str::format_compact;
pub use compact_str::CompactString;
pub use compact_str::CompactString as String;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export phf for compile-time perfect hash functions
pub use phf::{phf_map, phf_set, Map as PhfMap, Set as PhfSet};

// Re-export shared utilities
pub use dom_tag_config::*;
pub use general::*;
