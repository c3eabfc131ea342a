//! Tree walker.
//!
//! Depth-first traversal over the parsed fragment. Each element gets a name for
//! the duration of its subtree, a creation statement, its attribute statements
//! and then either a single `textContent` assignment or the statements of its
//! children.

use etch_relief::{ChildNode, CommentNode, ElementNode, Namespace, RootNode, TextNode};

use crate::attributes::emit_attributes;
use crate::context::CodegenContext;
use crate::naming::NamingStrategy;
use crate::options::ConvertOptions;
use crate::quote::{quote_literal, quote_text};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const MATH_ML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";

/// Walks a fragment and writes the statements that rebuild it
pub struct Walker {
    ctx: CodegenContext,
    namer: Box<dyn NamingStrategy>,
    elements: usize,
}

impl Walker {
    /// Create a walker using the naming strategy selected in `options`
    pub fn new(options: &ConvertOptions) -> Self {
        Self::with_strategy(options, options.naming.into_strategy())
    }

    /// Create a walker with a custom naming strategy
    pub fn with_strategy(options: &ConvertOptions, namer: Box<dyn NamingStrategy>) -> Self {
        Self {
            ctx: CodegenContext::new(options),
            namer,
            elements: 0,
        }
    }

    /// Emit every top-level node, appending to `root_name`
    pub fn walk_root(&mut self, root: &RootNode<'_>, root_name: &str) {
        self.namer.reserve(root_name);
        for child in root.children.iter() {
            self.walk(child, root_name);
        }
    }

    /// Run `f` with a name assigned to `element`, releasing it afterwards
    pub fn with_name<R>(
        &mut self,
        element: &ElementNode<'_>,
        f: impl FnOnce(&mut Self, &str) -> R,
    ) -> R {
        let name = self.namer.assign(element);
        let result = f(self, &name);
        self.namer.release(&name);
        result
    }

    fn walk(&mut self, node: &ChildNode<'_>, parent: &str) {
        match node {
            ChildNode::Element(element) => self.walk_element(element, parent),
            ChildNode::Text(text) => self.emit_text(text, parent),
            ChildNode::Comment(comment) => self.emit_comment(comment, parent),
        }
    }

    fn walk_element(&mut self, element: &ElementNode<'_>, parent: &str) {
        self.elements += 1;
        self.with_name(element, |walker, name| {
            walker.emit_create(element, name, parent);
            if !element.attrs.is_empty() {
                emit_attributes(&mut walker.ctx, element, name);
            }

            if let Some(text) = element.sole_text_child() {
                // The raw text is used even when it is blank
                let statement = format!(
                    "{name}.textContent = {}",
                    quote_text(&text.content, walker.ctx.quote)
                );
                walker.ctx.push_statement(&statement);
            } else {
                for child in element.children.iter() {
                    walker.walk(child, name);
                }
            }
        });
    }

    fn emit_create(&mut self, element: &ElementNode<'_>, name: &str, parent: &str) {
        let quote = self.ctx.quote;
        let tag = quote_literal(&element.tag, quote);
        let create = match element.ns {
            Namespace::Html => format!("document.createElement({tag})"),
            Namespace::Svg => format!(
                "document.createElementNS({}, {tag})",
                quote_literal(SVG_NAMESPACE, quote)
            ),
            Namespace::MathMl => format!(
                "document.createElementNS({}, {tag})",
                quote_literal(MATH_ML_NAMESPACE, quote)
            ),
        };
        let keyword = if self.ctx.declare(name) { "var " } else { "" };
        let statement = format!("{keyword}{name} = {parent}.appendChild({create})");
        self.ctx.push_statement(&statement);
    }

    fn emit_text(&mut self, text: &TextNode, parent: &str) {
        if text.is_blank() {
            return;
        }
        let statement = format!(
            "{parent}.appendChild(document.createTextNode({}))",
            quote_text(&text.content, self.ctx.quote)
        );
        self.ctx.push_statement(&statement);
    }

    fn emit_comment(&mut self, comment: &CommentNode, parent: &str) {
        if !self.ctx.comments {
            return;
        }
        let statement = format!(
            "{parent}.appendChild(document.createComment({}))",
            quote_literal(&comment.content, self.ctx.quote)
        );
        self.ctx.push_statement(&statement);
    }

    /// Number of elements walked so far
    pub fn element_count(&self) -> usize {
        self.elements
    }

    /// Number of statements written so far
    pub fn statement_count(&self) -> usize {
        self.ctx.statement_count()
    }

    /// Finish and return the generated code
    pub fn into_code(self) -> String {
        self.ctx.into_code()
    }
}
