//! Markup tree node types.
//!
//! All nodes are allocated in a bumpalo arena by the parser and are read-only
//! once parsing (including normalization) is complete.

use etch_carton::{Box, Bump, FxHashSet, String, Vec};
use serde::{Deserialize, Serialize};

/// Node type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Root = 0,
    Element = 1,
    Text = 2,
    Comment = 3,
    Attribute = 6,
}

/// Namespace for elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum Namespace {
    #[default]
    Html = 0,
    Svg = 1,
    MathMl = 2,
}

/// Source position in the markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    /// Byte offset from start of input
    pub offset: u32,
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column number
    pub column: u32,
}

impl Position {
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Source location span [start, end)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
    pub source: String,
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::STUB
    }
}

impl SourceLocation {
    /// Stub location for nodes that do not come from the input
    pub const STUB: Self = Self {
        start: Position::new(0, 1, 1),
        end: Position::new(0, 1, 1),
        source: String::const_new(""),
    };

    pub fn new(start: Position, end: Position, source: impl Into<String>) -> Self {
        Self {
            start,
            end,
            source: source.into(),
        }
    }
}

/// Root of a parsed fragment
#[derive(Debug)]
pub struct RootNode<'a> {
    pub children: Vec<'a, ChildNode<'a>>,
    pub source: String,
    pub loc: SourceLocation,
}

impl<'a> RootNode<'a> {
    pub fn new(allocator: &'a Bump, source: impl Into<String>) -> Self {
        Self {
            children: Vec::new_in(allocator),
            source: source.into(),
            loc: SourceLocation::STUB,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Root
    }
}

// ============================================================================
// Tree Nodes
// ============================================================================

/// All child node types
#[derive(Debug)]
pub enum ChildNode<'a> {
    Element(Box<'a, ElementNode<'a>>),
    Text(Box<'a, TextNode>),
    Comment(Box<'a, CommentNode>),
}

impl<'a> ChildNode<'a> {
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Element(_) => NodeType::Element,
            Self::Text(_) => NodeType::Text,
            Self::Comment(_) => NodeType::Comment,
        }
    }

    pub fn loc(&self) -> &SourceLocation {
        match self {
            Self::Element(n) => &n.loc,
            Self::Text(n) => &n.loc,
            Self::Comment(n) => &n.loc,
        }
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

/// Element node
#[derive(Debug)]
pub struct ElementNode<'a> {
    pub ns: Namespace,
    pub tag: String,
    /// Attributes in source order
    pub attrs: Vec<'a, AttributeNode>,
    pub children: Vec<'a, ChildNode<'a>>,
    pub is_self_closing: bool,
    pub loc: SourceLocation,
}

impl<'a> ElementNode<'a> {
    pub fn new(allocator: &'a Bump, tag: impl Into<String>, loc: SourceLocation) -> Self {
        Self {
            ns: Namespace::Html,
            tag: tag.into(),
            attrs: Vec::new_in(allocator),
            children: Vec::new_in(allocator),
            is_self_closing: false,
            loc,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Element
    }

    /// Find an attribute by its (already normalized) name
    pub fn attr(&self, name: &str) -> Option<&AttributeNode> {
        self.attrs.iter().find(|a| a.name == name)
    }

    /// Value of an attribute; valueless attributes read as the empty string
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attr(name).map(AttributeNode::value_str)
    }

    /// Class tokens as the DOM `classList` exposes them.
    ///
    /// Split on ASCII whitespace; a repeated token keeps its first position.
    pub fn class_list(&self) -> std::vec::Vec<&str> {
        let mut seen = FxHashSet::default();
        self.attr_value("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
            .filter(|token| seen.insert(*token))
            .collect()
    }

    /// Inline style declarations text, empty when there is no `style` attribute
    pub fn style_text(&self) -> &str {
        self.attr_value("style").unwrap_or_default()
    }

    /// The text child if it is the only child of this element
    pub fn sole_text_child(&self) -> Option<&TextNode> {
        match &self.children[..] {
            [ChildNode::Text(text)] => Some(&**text),
            _ => None,
        }
    }
}

/// Attribute node
#[derive(Debug)]
pub struct AttributeNode {
    pub name: String,
    pub name_loc: SourceLocation,
    /// `None` for a valueless attribute such as `disabled`
    pub value: Option<TextNode>,
    pub loc: SourceLocation,
}

impl AttributeNode {
    pub fn new(name: impl Into<String>, loc: SourceLocation) -> Self {
        Self {
            name: name.into(),
            name_loc: loc.clone(),
            value: None,
            loc,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Attribute
    }

    #[inline]
    pub fn value_str(&self) -> &str {
        self.value.as_ref().map_or("", |v| v.content.as_str())
    }
}

/// Text node
#[derive(Debug)]
pub struct TextNode {
    pub content: String,
    pub loc: SourceLocation,
}

impl TextNode {
    pub fn new(content: impl Into<String>, loc: SourceLocation) -> Self {
        Self {
            content: content.into(),
            loc,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Text
    }

    /// Whether the text is empty after trimming
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Comment node
#[derive(Debug)]
pub struct CommentNode {
    pub content: String,
    pub loc: SourceLocation,
}

impl CommentNode {
    pub fn new(content: impl Into<String>, loc: SourceLocation) -> Self {
        Self {
            content: content.into(),
            loc,
        }
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Comment
    }
}
