//! Attribute emission.
//!
//! Every attribute is matched against an ordered list of rules; the first rule
//! that matches decides which statements the attribute turns into.

use etch_carton::{camelize, phf_map, PhfMap};
use etch_relief::{AttributeNode, ElementNode, Namespace};

use crate::context::CodegenContext;
use crate::quote::quote_literal;

/// Content attributes whose DOM property is not the camel-cased attribute name.
///
/// Assigning `el.for` or `el.readonly` would only add an expando, so every
/// reflected attribute with a differently spelled property is listed.
static DOM_PROPERTY_NAMES: PhfMap<&'static str, &'static str> = phf_map! {
    "tabindex" => "tabIndex",
    "offsetwidth" => "offsetWidth",
    "offsetheight" => "offsetHeight",
    "offsetleft" => "offsetLeft",
    "offsetparent" => "offsetParent",
    "offsettop" => "offsetTop",
    "iscontenteditable" => "isContentEditable",
    "contenteditable" => "contentEditable",
    "accesskey" => "accessKey",
    "for" => "htmlFor",
    "readonly" => "readOnly",
    "maxlength" => "maxLength",
    "minlength" => "minLength",
    "colspan" => "colSpan",
    "rowspan" => "rowSpan",
    "crossorigin" => "crossOrigin",
    "usemap" => "useMap",
    "ismap" => "isMap",
    "novalidate" => "noValidate",
    "datetime" => "dateTime",
    "formaction" => "formAction",
    "formenctype" => "formEnctype",
    "formmethod" => "formMethod",
    "formnovalidate" => "formNoValidate",
    "formtarget" => "formTarget",
    "referrerpolicy" => "referrerPolicy",
    "inputmode" => "inputMode",
    "enterkeyhint" => "enterKeyHint",
    "nomodule" => "noModule",
    "allowfullscreen" => "allowFullscreen",
    "playsinline" => "playsInline",
};

/// How an attribute is turned into statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeRule {
    /// `data-*`: `el.dataset.key = value`
    Data,
    /// `on*`: `el.onclick = function(evt) { ... }`
    Event,
    /// `class`: one `el.classList.add(...)` per token
    Class,
    /// `style`: one `el.style.prop = ...` per declaration
    Style,
    /// Anything else: `el.prop = 'value'`
    Generic,
}

impl AttributeRule {
    /// Rules in the order they are tried
    pub const PRIORITY: [Self; 5] = [
        Self::Data,
        Self::Event,
        Self::Class,
        Self::Style,
        Self::Generic,
    ];

    /// Whether this rule handles an attribute called `name`
    pub fn matches(self, name: &str) -> bool {
        match self {
            Self::Data => name.starts_with("data-"),
            Self::Event => name.starts_with("on"),
            Self::Class => name == "class",
            Self::Style => name == "style",
            Self::Generic => true,
        }
    }

    /// First rule in [`AttributeRule::PRIORITY`] matching `name`
    pub fn classify(name: &str) -> Self {
        Self::PRIORITY
            .into_iter()
            .find(|rule| rule.matches(name))
            .unwrap_or(Self::Generic)
    }

    /// Emit the statements for one attribute of `element`, bound to `target`
    pub fn emit(
        self,
        ctx: &mut CodegenContext,
        element: &ElementNode<'_>,
        attr: &AttributeNode,
        target: &str,
    ) {
        match self {
            Self::Data => emit_data(ctx, attr, target),
            Self::Event => emit_event(ctx, attr, target),
            Self::Class => emit_class(ctx, element, target),
            Self::Style => emit_style(ctx, element, target),
            Self::Generic => emit_generic(ctx, element, attr, target),
        }
    }
}

/// Emit every attribute of `element` in source order
pub fn emit_attributes(ctx: &mut CodegenContext, element: &ElementNode<'_>, target: &str) {
    for attr in element.attrs.iter() {
        AttributeRule::classify(&attr.name).emit(ctx, element, attr, target);
    }
}

/// Whether `s` can follow a `.` in a member expression
fn is_property_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// `object.key`, or `object['key']` when `key` is not an identifier
fn member(ctx: &CodegenContext, object: &str, key: &str) -> String {
    if is_property_name(key) {
        format!("{object}.{key}")
    } else {
        format!("{object}[{}]", quote_literal(key, ctx.quote))
    }
}

/// Whether a `data-*` value is written as a bare number.
///
/// Only canonical decimals qualify, so that the number converts back to
/// exactly the same attribute text.
fn is_canonical_number(value: &str) -> bool {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int) || (int.len() > 1 && int.starts_with('0')) {
        return false;
    }
    if let Some(frac) = frac {
        if !all_digits(frac) || frac.ends_with('0') {
            return false;
        }
    } else if negative && int == "0" {
        // -0 stringifies as "0"
        return false;
    }

    // Beyond this, doubles stop round-tripping through their decimal form
    let significant = int.trim_start_matches('0').len() + frac.map_or(0, str::len);
    significant <= 15
}

fn emit_data(ctx: &mut CodegenContext, attr: &AttributeNode, target: &str) {
    let key = camelize(&attr.name["data-".len()..]);
    let value = attr.value_str();
    let literal = if value == "true" || value == "false" || is_canonical_number(value) {
        value.to_string()
    } else {
        quote_literal(value, ctx.quote)
    };
    let dataset = format!("{target}.dataset");
    let statement = format!("{} = {literal}", member(ctx, &dataset, &key));
    ctx.push_statement(&statement);
}

fn emit_event(ctx: &mut CodegenContext, attr: &AttributeNode, target: &str) {
    let statement = format!(
        "{} = function(evt) {{\n\t{};\n}}",
        member(ctx, target, &attr.name),
        attr.value_str()
    );
    ctx.push_statement(&statement);
}

fn emit_class(ctx: &mut CodegenContext, element: &ElementNode<'_>, target: &str) {
    for token in element.class_list() {
        let statement = format!(
            "{target}.classList.add({})",
            quote_literal(token, ctx.quote)
        );
        ctx.push_statement(&statement);
    }
}

fn emit_style(ctx: &mut CodegenContext, element: &ElementNode<'_>, target: &str) {
    for declaration in element.style_text().split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim();
        if property.is_empty() {
            continue;
        }
        // Values go through the same camel-casing as property names
        let value = quote_literal(&camelize(value.trim()), ctx.quote);

        let statement = if property.starts_with("--") {
            format!(
                "{target}.style.setProperty({}, {value})",
                quote_literal(property, ctx.quote)
            )
        } else {
            let property = property.to_ascii_lowercase();
            let camel = camelize(&property);
            if is_property_name(&camel) {
                format!("{target}.style.{camel} = {value}")
            } else {
                format!(
                    "{target}.style.setProperty({}, {value})",
                    quote_literal(&property, ctx.quote)
                )
            }
        };
        ctx.push_statement(&statement);
    }
}

/// DOM property an HTML content attribute is reflected by
fn dom_property_name(name: &str) -> std::string::String {
    let lower = name.to_ascii_lowercase();
    match DOM_PROPERTY_NAMES.get(lower.as_str()) {
        Some(property) => property.to_string(),
        None => camelize(&lower),
    }
}

fn emit_generic(
    ctx: &mut CodegenContext,
    element: &ElementNode<'_>,
    attr: &AttributeNode,
    target: &str,
) {
    let value = quote_literal(attr.value_str(), ctx.quote);
    let property = dom_property_name(&attr.name);

    let statement = if element.ns == Namespace::Html && is_property_name(&property) {
        format!("{target}.{property} = {value}")
    } else {
        // Foreign elements and names with no property form keep the attribute as is
        format!(
            "{target}.setAttribute({}, {value})",
            quote_literal(&attr.name, ctx.quote)
        )
    };
    ctx.push_statement(&statement);
}
