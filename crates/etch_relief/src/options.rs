//! Parser options.

use crate::ast::Namespace;

/// Deepest element nesting the parser builds before flattening
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser options
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Keep comment nodes in the tree
    pub comments: bool,
    /// Trim the input before parsing
    pub trim: bool,
    /// Whether a tag is a void element
    pub is_void_tag: fn(&str) -> bool,
    /// Get the namespace for a tag given its parent's tag
    pub get_namespace: fn(&str, Option<(&str, Namespace)>) -> Namespace,
    /// Elements opened deeper than this are hoisted next to their parent
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            comments: false,
            trim: true,
            is_void_tag: etch_carton::is_void_tag,
            get_namespace: html_namespace,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Namespace of an element based on its own tag and its parent
pub fn html_namespace(tag: &str, parent: Option<(&str, Namespace)>) -> Namespace {
    if tag.eq_ignore_ascii_case("svg") {
        return Namespace::Svg;
    }
    if tag.eq_ignore_ascii_case("math") {
        return Namespace::MathMl;
    }

    // Inherit namespace from parent
    match parent {
        Some((parent_tag, Namespace::Svg)) if parent_tag != "foreignObject" => Namespace::Svg,
        Some((parent_tag, Namespace::MathMl))
            if parent_tag != "annotation-xml" && parent_tag != "foreignObject" =>
        {
            Namespace::MathMl
        }
        _ => Namespace::Html,
    }
}
