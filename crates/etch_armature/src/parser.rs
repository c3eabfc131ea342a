//! Markup fragment parser.
//!
//! Drives the tokenizer and builds the arena tree, then normalizes it so that
//! every element's children contain no empty or adjacent text units.

use std::borrow::Cow;

use etch_carton::{Box, Bump, String, Vec};
use etch_relief::ast::*;
use etch_relief::errors::{CompilerError, ErrorCode};
use etch_relief::options::ParserOptions;

use crate::tokenizer::{Callbacks, QuoteType, Tokenizer};

/// Parser context for building the tree
pub struct Parser<'a> {
    /// Arena allocator
    allocator: &'a Bump,
    /// Part of the source handed to the tokenizer
    input: &'a str,
    /// Offset of `input` within the full source
    base: usize,
    /// Parser options
    options: ParserOptions,
    /// Open elements
    stack: Vec<'a, ElementNode<'a>>,
    /// Root node
    root: RootNode<'a>,
    /// Current element being parsed
    current_element: Option<CurrentElement<'a>>,
    /// Current attribute being parsed
    current_attr: Option<CurrentAttribute>,
    /// Errors collected during parsing
    errors: std::vec::Vec<CompilerError>,
    /// Newline positions for calculating line/column
    newlines: Vec<'a, usize>,
    /// Positions in `input` coordinates where a `\r` of a `\r\n` pair was dropped
    folded_crs: Vec<'a, usize>,
    /// Whether the nesting limit was already reported
    depth_exceeded: bool,
}

/// Current element being parsed
struct CurrentElement<'a> {
    tag: String,
    tag_start: usize,
    ns: Namespace,
    is_self_closing: bool,
    attrs: Vec<'a, AttributeNode>,
}

/// Current attribute being parsed
struct CurrentAttribute {
    name: String,
    name_start: usize,
    name_end: usize,
    value_start: Option<usize>,
    value_end: Option<usize>,
}

impl<'a> Parser<'a> {
    /// Create a new parser
    pub fn new(allocator: &'a Bump, source: &'a str) -> Self {
        Self::with_options(allocator, source, ParserOptions::default())
    }

    /// Create a new parser with options
    pub fn with_options(allocator: &'a Bump, source: &'a str, options: ParserOptions) -> Self {
        let (text, folded_crs) = normalize_newlines(allocator, source);
        let input = if options.trim { text.trim() } else { text };
        let base = if options.trim {
            text.len() - text.trim_start().len()
        } else {
            0
        };
        let newlines = Vec::from_iter_in(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i),
            allocator,
        );

        Self {
            allocator,
            input,
            base,
            options,
            stack: Vec::new_in(allocator),
            root: RootNode::new(allocator, source),
            current_element: None,
            current_attr: None,
            errors: std::vec::Vec::new(),
            newlines,
            folded_crs,
            depth_exceeded: false,
        }
    }

    /// Parse the source and return the tree along with any diagnostics
    pub fn parse(mut self) -> (RootNode<'a>, std::vec::Vec<CompilerError>) {
        let input = self.input;
        Tokenizer::new(input, ParserCallbacks { parser: &mut self }).tokenize();

        // Handle any unclosed elements
        self.handle_unclosed_elements();

        normalize_children(self.allocator, &mut self.root.children);
        self.root.loc = self.create_loc(0, self.input.len());

        tracing::debug!(
            children = self.root.children.len(),
            errors = self.errors.len(),
            "parsed markup fragment"
        );

        (self.root, self.errors)
    }

    /// Get source slice
    fn get_source(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Calculate position from a byte offset into the tokenized input.
    ///
    /// Line and column count every line break once; the offset points into the
    /// original source.
    fn get_pos(&self, offset: usize) -> Position {
        let offset = self.base + offset;
        let line = match self.newlines.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i + 1,
        };

        let column = if line == 1 {
            offset + 1
        } else {
            offset - self.newlines[line - 2]
        };

        let source_offset = offset + self.folded_crs.partition_point(|&pos| pos <= offset);
        Position::new(source_offset as u32, line as u32, column as u32)
    }

    /// Create a source location
    fn create_loc(&self, start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(
            self.get_pos(start),
            self.get_pos(end),
            self.get_source(start, end),
        )
    }

    /// Add child to current context (stack top or root)
    fn add_child(&mut self, child: ChildNode<'a>) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(child),
            None => self.root.children.push(child),
        }
    }

    /// Namespace and parent tag of the innermost open element
    fn parent(&self) -> Option<(&str, Namespace)> {
        self.stack.last().map(|el| (el.tag.as_str(), el.ns))
    }

    /// Attach an element just popped off the stack to its parent.
    ///
    /// Past `max_depth` the element is attached empty and its children follow
    /// it as siblings, so the tree never gets deeper than the limit.
    fn close_element(&mut self, mut element: ElementNode<'a>) {
        if self.stack.len() < self.options.max_depth {
            let boxed = Box::new_in(element, self.allocator);
            self.add_child(ChildNode::Element(boxed));
            return;
        }
        let children = std::mem::replace(&mut element.children, Vec::new_in(self.allocator));
        let boxed = Box::new_in(element, self.allocator);
        self.add_child(ChildNode::Element(boxed));
        for child in children {
            self.add_child(child);
        }
    }

    /// Handle unclosed elements at end of parsing
    fn handle_unclosed_elements(&mut self) {
        while let Some(element) = self.stack.pop() {
            self.errors.push(CompilerError::new(
                ErrorCode::MissingEndTag,
                Some(element.loc.clone()),
            ));
            self.close_element(element);
        }
    }

    fn push_text(&mut self, content: Cow<'_, str>, start: usize, end: usize) {
        if content.is_empty() {
            return;
        }
        let loc = self.create_loc(start, end);
        let text = TextNode::new(content.as_ref(), loc);
        let boxed = Box::new_in(text, self.allocator);
        self.add_child(ChildNode::Text(boxed));
    }

    /// Process text content
    fn on_text_impl(&mut self, start: usize, end: usize) {
        let raw = self.get_source(start, end);
        self.push_text(htmlize::unescape(raw), start, end);
    }

    /// Process the content of a raw text element
    fn on_raw_text_impl(&mut self, start: usize, end: usize, decode: bool) {
        let raw = self.get_source(start, end);
        let content = if decode {
            htmlize::unescape(raw)
        } else {
            Cow::Borrowed(raw)
        };
        self.push_text(content, start, end);
    }

    /// Process open tag name
    fn on_open_tag_name_impl(&mut self, start: usize, end: usize) {
        let raw = self.get_source(start, end);
        let ns = (self.options.get_namespace)(raw, self.parent());
        let tag: String = if ns == Namespace::Html {
            raw.to_ascii_lowercase().into()
        } else {
            raw.into()
        };

        self.current_element = Some(CurrentElement {
            tag,
            tag_start: start,
            ns,
            is_self_closing: false,
            attrs: Vec::new_in(self.allocator),
        });
    }

    /// Process open tag end
    fn on_open_tag_end_impl(&mut self, end: usize) {
        let Some(current) = self.current_element.take() else {
            return;
        };
        // Include < and >
        let loc = self.create_loc(current.tag_start - 1, end + 1);

        let mut element = ElementNode::new(self.allocator, current.tag, loc);
        element.ns = current.ns;
        element.is_self_closing = current.is_self_closing;
        element.attrs = current.attrs;

        // `/>` only closes void and foreign elements; `<div/>` opens a div
        let is_void = element.ns == Namespace::Html && (self.options.is_void_tag)(&element.tag);
        let closes = is_void || (current.is_self_closing && element.ns != Namespace::Html);

        if closes {
            let boxed = Box::new_in(element, self.allocator);
            self.add_child(ChildNode::Element(boxed));
            return;
        }

        if self.stack.len() >= self.options.max_depth && !self.depth_exceeded {
            self.depth_exceeded = true;
            tracing::debug!(max_depth = self.options.max_depth, "flattening deep nesting");
            self.errors.push(CompilerError::new(
                ErrorCode::NestingTooDeep,
                Some(element.loc.clone()),
            ));
        }
        self.stack.push(element);
    }

    /// Process self-closing tag
    fn on_self_closing_tag_impl(&mut self, _end: usize) {
        if let Some(ref mut current) = self.current_element {
            current.is_self_closing = true;
        }
    }

    /// Process close tag
    fn on_close_tag_impl(&mut self, start: usize, end: usize) {
        let tag = self.get_source(start, end);

        // Find matching open tag
        let Some(index) = self
            .stack
            .iter()
            .rposition(|el| el.tag.eq_ignore_ascii_case(tag))
        else {
            // Include </ and >
            let loc = self.create_loc(start - 2, (end + 1).min(self.input.len()));
            self.errors
                .push(CompilerError::new(ErrorCode::InvalidEndTag, Some(loc)));
            return;
        };

        // Close everything above the match, innermost first
        while self.stack.len() > index {
            let Some(element) = self.stack.pop() else {
                break;
            };
            if self.stack.len() > index {
                self.errors.push(CompilerError::new(
                    ErrorCode::MissingEndTag,
                    Some(element.loc.clone()),
                ));
            }
            self.close_element(element);
        }
    }

    /// Process attribute name
    fn on_attrib_name_impl(&mut self, start: usize, end: usize) {
        let raw = self.get_source(start, end);
        let in_html = self
            .current_element
            .as_ref()
            .map_or(true, |el| el.ns == Namespace::Html);
        let name: String = if in_html {
            raw.to_ascii_lowercase().into()
        } else {
            raw.into()
        };

        self.current_attr = Some(CurrentAttribute {
            name,
            name_start: start,
            name_end: end,
            value_start: None,
            value_end: None,
        });
    }

    /// Process attribute data (value content)
    fn on_attrib_data_impl(&mut self, start: usize, end: usize) {
        if let Some(ref mut attr) = self.current_attr {
            if attr.value_start.is_none() {
                attr.value_start = Some(start);
            }
            attr.value_end = Some(end);
        }
    }

    /// Process attribute end
    fn on_attrib_end_impl(&mut self, quote: QuoteType, end: usize) {
        if let Some(attr) = self.current_attr.take() {
            self.finish_attribute(attr, quote, end);
        }
    }

    /// Finish building an attribute node
    fn finish_attribute(&mut self, attr: CurrentAttribute, quote: QuoteType, end: usize) {
        let loc = self.create_loc(attr.name_start, end);
        let name_loc = self.create_loc(attr.name_start, attr.name_end);

        let duplicate = self
            .current_element
            .as_ref()
            .is_some_and(|el| el.attrs.iter().any(|a| a.name == attr.name));
        if duplicate {
            self.errors
                .push(CompilerError::new(ErrorCode::DuplicateAttribute, Some(loc)));
            return;
        }

        let mut attr_node = AttributeNode::new(attr.name, loc);
        attr_node.name_loc = name_loc;

        if let (Some(v_start), Some(v_end)) = (attr.value_start, attr.value_end) {
            let raw = self.get_source(v_start, v_end);
            let value_loc = self.create_loc(v_start, v_end);
            attr_node.value = Some(TextNode::new(
                htmlize::unescape_attribute(raw).as_ref(),
                value_loc,
            ));
        } else if matches!(quote, QuoteType::Double | QuoteType::Single) {
            // alt="" is an empty value, not a valueless attribute
            let empty_loc = self.create_loc(end, end);
            attr_node.value = Some(TextNode::new("", empty_loc));
        }

        if let Some(ref mut current) = self.current_element {
            current.attrs.push(attr_node);
        }
    }

    /// Process comment
    fn on_comment_impl(&mut self, start: usize, end: usize) {
        if !self.options.comments {
            return;
        }
        let content = self.get_source(start, end);
        let loc = self.create_loc(start, end);

        let comment = CommentNode::new(content, loc);
        let boxed = Box::new_in(comment, self.allocator);
        self.add_child(ChildNode::Comment(boxed));
    }

    /// Handle error
    fn on_error_impl(&mut self, code: ErrorCode, index: usize) {
        let end = (index + 1).min(self.input.len());
        let loc = self.create_loc(index.min(end), end);
        self.errors.push(CompilerError::new(code, Some(loc)));
    }
}

/// Wrapper struct for implementing Callbacks
struct ParserCallbacks<'a, 'p> {
    parser: &'p mut Parser<'a>,
}

impl<'a, 'p> Callbacks for ParserCallbacks<'a, 'p> {
    fn on_text(&mut self, start: usize, end: usize) {
        self.parser.on_text_impl(start, end);
    }

    fn on_raw_text(&mut self, start: usize, end: usize, decode: bool) {
        self.parser.on_raw_text_impl(start, end, decode);
    }

    fn on_open_tag_name(&mut self, start: usize, end: usize) {
        self.parser.on_open_tag_name_impl(start, end);
    }

    fn on_open_tag_end(&mut self, end: usize) {
        self.parser.on_open_tag_end_impl(end);
    }

    fn on_self_closing_tag(&mut self, end: usize) {
        self.parser.on_self_closing_tag_impl(end);
        self.parser.on_open_tag_end_impl(end);
    }

    fn on_close_tag(&mut self, start: usize, end: usize) {
        self.parser.on_close_tag_impl(start, end);
    }

    fn on_attrib_name(&mut self, start: usize, end: usize) {
        self.parser.on_attrib_name_impl(start, end);
    }

    fn on_attrib_data(&mut self, start: usize, end: usize) {
        self.parser.on_attrib_data_impl(start, end);
    }

    fn on_attrib_end(&mut self, quote: QuoteType, end: usize) {
        self.parser.on_attrib_end_impl(quote, end);
    }

    fn on_comment(&mut self, start: usize, end: usize) {
        self.parser.on_comment_impl(start, end);
    }

    fn on_end(&mut self) {
        // End of input
    }

    fn on_error(&mut self, code: ErrorCode, index: usize) {
        self.parser.on_error_impl(code, index);
    }
}

/// Fold `\r\n` and lone `\r` into `\n`.
///
/// Also returns where each dropped `\r` sat, as an offset into the folded
/// text, so positions can be mapped back to the source.
fn normalize_newlines<'a>(allocator: &'a Bump, source: &'a str) -> (&'a str, Vec<'a, usize>) {
    let mut folded = Vec::new_in(allocator);
    if !source.contains('\r') {
        return (source, folded);
    }

    let bytes = source.as_bytes();
    let mut text = std::string::String::with_capacity(source.len());
    let mut last = 0;
    for (i, _) in source.match_indices('\r') {
        text.push_str(&source[last..i]);
        if bytes.get(i + 1) == Some(&b'\n') {
            // The `\n` that follows lands at this offset
            folded.push(text.len());
        } else {
            text.push('\n');
        }
        last = i + 1;
    }
    text.push_str(&source[last..]);

    let text: &'a str = allocator.alloc_str(&text);
    (text, folded)
}

/// Merge adjacent text units and drop empty ones, at every level
fn normalize_children<'a>(allocator: &'a Bump, children: &mut Vec<'a, ChildNode<'a>>) {
    let nodes = std::mem::replace(children, Vec::new_in(allocator));
    for mut child in nodes {
        match &mut child {
            ChildNode::Text(text) => {
                if text.content.is_empty() {
                    continue;
                }
                if let Some(ChildNode::Text(prev)) = children.last_mut() {
                    prev.content.push_str(&text.content);
                    prev.loc.end = text.loc.end;
                    prev.loc.source.push_str(&text.loc.source);
                    continue;
                }
            }
            ChildNode::Element(el) => normalize_children(allocator, &mut el.children),
            ChildNode::Comment(_) => {}
        }
        children.push(child);
    }
}

/// Parse a markup fragment
pub fn parse<'a>(
    allocator: &'a Bump,
    source: &'a str,
) -> (RootNode<'a>, std::vec::Vec<CompilerError>) {
    Parser::new(allocator, source).parse()
}

/// Parse a markup fragment with options
pub fn parse_with_options<'a>(
    allocator: &'a Bump,
    source: &'a str,
    options: ParserOptions,
) -> (RootNode<'a>, std::vec::Vec<CompilerError>) {
    Parser::with_options(allocator, source, options).parse()
}
