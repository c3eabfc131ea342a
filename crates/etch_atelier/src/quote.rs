//! String literal quoting.

use crate::options::QuoteStyle;

/// Escape `\`, the delimiter and the Unicode line separators in one line of text
fn escape_into(out: &mut String, line: &str, quote: char) {
    for c in line.chars() {
        match c {
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == '\\' || c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
}

/// Lines of `text`, breaking at `\n`, `\r\n` and a lone `\r`
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Quote text content as one or more concatenated string literals.
///
/// The text is trimmed and split into lines; every line is escaped, trimmed
/// and wrapped in the delimiter. Lines are joined with a newline followed by
/// `+ `, so a single line produces a single literal.
///
/// ```
/// use etch_atelier::{quote_text, QuoteStyle};
///
/// assert_eq!(
///     quote_text("He said 'hi'\nBye", QuoteStyle::Single),
///     "'He said \\'hi\\''\n+ 'Bye'"
/// );
/// ```
pub fn quote_text(text: &str, style: QuoteStyle) -> String {
    let quote = style.as_char();
    let mut out = String::with_capacity(text.len() + 2);
    let mut escaped = String::new();

    for (i, line) in split_lines(text.trim()).enumerate() {
        if i > 0 {
            out.push_str("\n+ ");
        }
        escaped.clear();
        escape_into(&mut escaped, line, quote);
        out.push(quote);
        out.push_str(escaped.trim());
        out.push(quote);
    }
    out
}

/// Quote a value as a single string literal, keeping it verbatim.
///
/// Line terminators are written as escape sequences so the literal always
/// stays on one line.
pub fn quote_literal(value: &str, style: QuoteStyle) -> String {
    let quote = style.as_char();
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == '\\' || c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        assert_eq!(quote_text("  Hi  ", QuoteStyle::Single), "'Hi'");
        assert_eq!(quote_text("Hi", QuoteStyle::Double), "\"Hi\"");
    }

    #[test]
    fn test_multi_line_lines_are_trimmed() {
        assert_eq!(
            quote_text("\n  first\n    second  \n", QuoteStyle::Single),
            "'first'\n+ 'second'"
        );
    }

    #[test]
    fn test_escapes_only_the_active_delimiter() {
        assert_eq!(
            quote_text(r#"He said "hi""#, QuoteStyle::Double),
            r#""He said \"hi\"""#
        );
        assert_eq!(
            quote_text(r#"He said "hi""#, QuoteStyle::Single),
            r#"'He said "hi"'"#
        );
        assert_eq!(quote_text("it's", QuoteStyle::Single), r"'it\'s'");
    }

    #[test]
    fn test_backslash_is_escaped() {
        assert_eq!(quote_text(r"C:\temp", QuoteStyle::Single), r"'C:\\temp'");
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(quote_text("a\r\nb", QuoteStyle::Single), "'a'\n+ 'b'");
    }

    #[test]
    fn test_lone_carriage_return_breaks_the_line() {
        assert_eq!(quote_text("a\rb", QuoteStyle::Single), "'a'\n+ 'b'");
        assert_eq!(quote_text("a\r\rb", QuoteStyle::Single), "'a'\n+ ''\n+ 'b'");
    }

    #[test]
    fn test_line_separators_are_escaped() {
        assert_eq!(
            quote_text("a\u{2028}b\u{2029}c", QuoteStyle::Single),
            r"'a\u2028b\u2029c'"
        );
    }

    #[test]
    fn test_blank_text() {
        assert_eq!(quote_text("   ", QuoteStyle::Single), "''");
    }

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal(" a b ", QuoteStyle::Single), "' a b '");
        assert_eq!(quote_literal("x'y", QuoteStyle::Single), r"'x\'y'");
        assert_eq!(quote_literal("a\nb", QuoteStyle::Double), r#""a\nb""#);
        assert_eq!(quote_literal(r"\d+", QuoteStyle::Double), r#""\\d+""#);
    }
}
