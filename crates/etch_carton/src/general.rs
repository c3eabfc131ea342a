//! General purpose string helpers for code generation.

use phf::phf_set;

/// Words that cannot be used as a JavaScript binding name
static RESERVED_WORDS: phf::Set<&'static str> = phf_set! {
    "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false",
    "finally", "for", "function", "if", "implements", "import", "in", "instanceof",
    "interface", "let", "new", "null", "package", "private", "protected", "public",
    "return", "static", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield", "arguments", "eval",
    "undefined", "NaN", "Infinity", "document", "window"
};

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convert a hyphenated name to camel case.
///
/// Every `-` followed by a word character is dropped and the character is
/// upper-cased, so `background-color` becomes `backgroundColor` and a leading
/// vendor prefix such as `-webkit-box` becomes `WebkitBox`.
pub fn camelize(s: &str) -> std::string::String {
    let mut out = std::string::String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(&next) = chars.peek() {
                if is_word_char(next) {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Check if a word is reserved in JavaScript (or names a global the generated code relies on)
#[inline]
pub fn is_reserved_word(s: &str) -> bool {
    RESERVED_WORDS.contains(s)
}

/// Check if `s` can be used verbatim as a binding name in generated code
pub fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') && !is_reserved_word(s)
}

/// Turn arbitrary text into an identifier fragment.
///
/// The text is camel-cased, everything outside `[A-Za-z0-9_$]` is dropped and a
/// leading digit is prefixed with `_`. The result may be empty.
pub fn to_identifier(text: &str) -> std::string::String {
    let camel = camelize(text);
    let mut out: std::string::String = camel
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
