//! Markup tokenizer.
//!
//! A byte-level state machine in the style of htmlparser2. It reports byte
//! ranges through [`Callbacks`] and never allocates for the content it scans;
//! the tree builder decides what to keep.

use etch_relief::ErrorCode;

/// Character codes for fast comparison
pub mod char_codes {
    pub const NUL: u8 = 0x00;
    pub const TAB: u8 = 0x09;
    pub const NEWLINE: u8 = 0x0A;
    pub const FORM_FEED: u8 = 0x0C;
    pub const CARRIAGE_RETURN: u8 = 0x0D;
    pub const SPACE: u8 = 0x20;
    pub const EXCLAMATION_MARK: u8 = 0x21;
    pub const DOUBLE_QUOTE: u8 = 0x22;
    pub const SINGLE_QUOTE: u8 = 0x27;
    pub const DASH: u8 = 0x2D;
    pub const SLASH: u8 = 0x2F;
    pub const LT: u8 = 0x3C;
    pub const EQ: u8 = 0x3D;
    pub const GT: u8 = 0x3E;
    pub const QUESTION_MARK: u8 = 0x3F;
    pub const UPPER_A: u8 = 0x41;
    pub const UPPER_Z: u8 = 0x5A;
    pub const LEFT_SQUARE: u8 = 0x5B;
    pub const LOWER_A: u8 = 0x61;
    pub const LOWER_Z: u8 = 0x7A;
}

use char_codes::*;

/// All the states the tokenizer can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    Text = 1,

    // Tags
    BeforeTagName,
    InTagName,
    InSelfClosingTag,
    BeforeClosingTagName,
    InClosingTagName,
    AfterClosingTagName,

    // Attributes
    BeforeAttrName,
    InAttrName,
    AfterAttrName,
    BeforeAttrValue,
    InAttrValueDq,
    InAttrValueSq,
    InAttrValueNq,

    // Declarations (doctype)
    BeforeDeclaration,
    InDeclaration,

    // Comments, including bogus ones
    BeforeComment,
    InSpecialComment,
    InCommentLike,

    // Content of script/style/textarea/title
    InRawText,
}

/// Quote type for attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum QuoteType {
    NoValue = 0,
    Unquoted = 1,
    Single = 2,
    Double = 3,
}

/// Tokenizer callbacks
pub trait Callbacks {
    fn on_text(&mut self, start: usize, end: usize);
    /// Content of a raw text element; `decode` is set for RCDATA (`textarea`, `title`)
    fn on_raw_text(&mut self, start: usize, end: usize, decode: bool);

    fn on_open_tag_name(&mut self, start: usize, end: usize);
    fn on_open_tag_end(&mut self, end: usize);
    fn on_self_closing_tag(&mut self, end: usize);
    fn on_close_tag(&mut self, start: usize, end: usize);

    fn on_attrib_name(&mut self, start: usize, end: usize);
    fn on_attrib_data(&mut self, start: usize, end: usize);
    fn on_attrib_end(&mut self, quote: QuoteType, end: usize);

    fn on_comment(&mut self, start: usize, end: usize);

    fn on_end(&mut self);
    fn on_error(&mut self, code: ErrorCode, index: usize);
}

/// Check if character is a tag start character (a-z, A-Z)
#[inline]
pub fn is_tag_start_char(c: u8) -> bool {
    (LOWER_A..=LOWER_Z).contains(&c) || (UPPER_A..=UPPER_Z).contains(&c)
}

/// Check if character is whitespace
#[inline]
pub fn is_whitespace(c: u8) -> bool {
    c == SPACE || c == NEWLINE || c == TAB || c == FORM_FEED || c == CARRIAGE_RETURN
}

/// Check if character ends a tag section
#[inline]
pub fn is_end_of_tag_section(c: u8) -> bool {
    c == SLASH || c == GT || is_whitespace(c)
}

/// Markup tokenizer
pub struct Tokenizer<'a, C: Callbacks> {
    /// Input source
    input: &'a [u8],
    /// Current state
    state: State,
    /// Buffer start position
    section_start: usize,
    /// Current index
    index: usize,
    /// Callbacks
    callbacks: C,
    /// Last open tag name range
    tag_name: (usize, usize),
    /// Lower-cased name of the raw text element being scanned
    raw_tag: Vec<u8>,
    /// Whether the raw text content is entity-decoded
    raw_decode: bool,
}

impl<'a, C: Callbacks> Tokenizer<'a, C> {
    /// Create a new tokenizer
    pub fn new(input: &'a str, callbacks: C) -> Self {
        Self {
            input: input.as_bytes(),
            state: State::Text,
            section_start: 0,
            index: 0,
            callbacks,
            tag_name: (0, 0),
            raw_tag: Vec::new(),
            raw_decode: false,
        }
    }

    /// Tokenize the input
    pub fn tokenize(&mut self) {
        while self.index < self.input.len() {
            let c = self.input[self.index];

            if c == NUL {
                self.callbacks
                    .on_error(ErrorCode::UnexpectedNullCharacter, self.index);
            }

            match self.state {
                State::Text => self.state_text(c),
                State::BeforeTagName => self.state_before_tag_name(c),
                State::InTagName => self.state_in_tag_name(c),
                State::InSelfClosingTag => self.state_in_self_closing_tag(c),
                State::BeforeClosingTagName => self.state_before_closing_tag_name(c),
                State::InClosingTagName => self.state_in_closing_tag_name(c),
                State::AfterClosingTagName => self.state_after_closing_tag_name(c),
                State::BeforeAttrName => self.state_before_attr_name(c),
                State::InAttrName => self.state_in_attr_name(c),
                State::AfterAttrName => self.state_after_attr_name(c),
                State::BeforeAttrValue => self.state_before_attr_value(c),
                State::InAttrValueDq => self.state_in_attr_value_dq(c),
                State::InAttrValueSq => self.state_in_attr_value_sq(c),
                State::InAttrValueNq => self.state_in_attr_value_nq(c),
                State::BeforeDeclaration => self.state_before_declaration(c),
                State::InDeclaration => self.state_in_declaration(c),
                State::BeforeComment => self.state_before_comment(c),
                State::InSpecialComment => self.state_in_special_comment(c),
                State::InCommentLike => self.state_in_comment_like(c),
                State::InRawText => self.state_in_raw_text(c),
            }

            self.index += 1;
        }

        // Handle remaining content
        self.cleanup();
        self.callbacks.on_end();
    }

    fn cleanup(&mut self) {
        if self.section_start < self.index {
            match self.state {
                State::Text => {
                    self.callbacks.on_text(self.section_start, self.index);
                }
                State::BeforeTagName => {
                    // A lone `<` at the end of input is text
                    self.callbacks.on_text(self.section_start, self.index);
                }
                State::InRawText => {
                    self.callbacks
                        .on_raw_text(self.section_start, self.index, self.raw_decode);
                }
                State::InTagName
                | State::BeforeClosingTagName
                | State::InClosingTagName
                | State::BeforeAttrName
                | State::InAttrName
                | State::AfterAttrName
                | State::BeforeAttrValue
                | State::InAttrValueDq
                | State::InAttrValueSq
                | State::InAttrValueNq
                | State::InSelfClosingTag => {
                    self.callbacks.on_error(ErrorCode::EofInTag, self.index);
                }
                State::InCommentLike => {
                    self.callbacks.on_error(ErrorCode::EofInComment, self.index);
                    self.callbacks.on_comment(self.section_start, self.index);
                }
                State::InSpecialComment => {
                    self.callbacks.on_comment(self.section_start, self.index);
                }
                _ => {}
            }
        }
    }

    // ========== State handlers ==========

    fn state_text(&mut self, c: u8) {
        if c == LT {
            if self.index > self.section_start {
                self.callbacks.on_text(self.section_start, self.index);
            }
            self.state = State::BeforeTagName;
            self.section_start = self.index;
        }
    }

    fn state_before_tag_name(&mut self, c: u8) {
        if c == EXCLAMATION_MARK {
            self.state = State::BeforeDeclaration;
            self.section_start = self.index + 1;
        } else if c == QUESTION_MARK {
            // `<?...>` is a bogus comment whose data keeps the `?`
            self.state = State::InSpecialComment;
            self.section_start = self.index;
        } else if is_tag_start_char(c) {
            self.section_start = self.index;
            self.state = State::InTagName;
        } else if c == SLASH {
            self.state = State::BeforeClosingTagName;
        } else {
            self.state = State::Text;
            self.state_text(c);
        }
    }

    fn state_in_tag_name(&mut self, c: u8) {
        if is_end_of_tag_section(c) {
            self.tag_name = (self.section_start, self.index);
            self.callbacks
                .on_open_tag_name(self.section_start, self.index);
            self.section_start = self.index;
            self.state = State::BeforeAttrName;
            self.state_before_attr_name(c);
        }
    }

    fn state_in_self_closing_tag(&mut self, c: u8) {
        if c == GT {
            self.callbacks.on_self_closing_tag(self.index);
            self.state = State::Text;
            self.section_start = self.index + 1;
        } else if !is_whitespace(c) {
            self.state = State::BeforeAttrName;
            self.state_before_attr_name(c);
        }
    }

    fn state_before_closing_tag_name(&mut self, c: u8) {
        if is_whitespace(c) {
            // Skip
        } else if c == GT {
            self.callbacks
                .on_error(ErrorCode::MissingEndTagName, self.index);
            self.state = State::Text;
            self.section_start = self.index + 1;
        } else {
            self.state = State::InClosingTagName;
            self.section_start = self.index;
        }
    }

    fn state_in_closing_tag_name(&mut self, c: u8) {
        if c == GT || is_whitespace(c) {
            self.callbacks.on_close_tag(self.section_start, self.index);
            self.section_start = self.index + 1;
            self.state = if c == GT {
                State::Text
            } else {
                State::AfterClosingTagName
            };
        }
    }

    fn state_after_closing_tag_name(&mut self, c: u8) {
        if c == GT {
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_before_attr_name(&mut self, c: u8) {
        if c == GT {
            self.callbacks.on_open_tag_end(self.index);
            self.section_start = self.index + 1;
            self.state = if self.enter_raw_text() {
                State::InRawText
            } else {
                State::Text
            };
        } else if c == SLASH {
            self.state = State::InSelfClosingTag;
        } else if !is_whitespace(c) {
            self.state = State::InAttrName;
            self.section_start = self.index;
        }
    }

    /// Decide whether the element just opened switches to raw text scanning
    fn enter_raw_text(&mut self) -> bool {
        let (start, end) = self.tag_name;
        let name = self.input[start..end].to_ascii_lowercase();
        let Ok(tag) = std::str::from_utf8(&name) else {
            return false;
        };
        let raw = etch_carton::is_raw_text_tag(tag);
        let rcdata = etch_carton::is_rcdata_tag(tag);
        if raw || rcdata {
            self.raw_decode = rcdata;
            self.raw_tag = name;
            true
        } else {
            false
        }
    }

    fn state_in_attr_name(&mut self, c: u8) {
        if c == EQ || is_end_of_tag_section(c) {
            self.callbacks
                .on_attrib_name(self.section_start, self.index);
            self.section_start = self.index;
            self.state = State::AfterAttrName;
            self.state_after_attr_name(c);
        }
    }

    fn state_after_attr_name(&mut self, c: u8) {
        if c == EQ {
            self.state = State::BeforeAttrValue;
        } else if c == SLASH || c == GT {
            self.callbacks.on_attrib_end(QuoteType::NoValue, self.index);
            self.state = State::BeforeAttrName;
            self.state_before_attr_name(c);
        } else if !is_whitespace(c) {
            self.callbacks.on_attrib_end(QuoteType::NoValue, self.index);
            self.state = State::InAttrName;
            self.section_start = self.index;
        }
    }

    fn state_before_attr_value(&mut self, c: u8) {
        if c == DOUBLE_QUOTE {
            self.state = State::InAttrValueDq;
            self.section_start = self.index + 1;
        } else if c == SINGLE_QUOTE {
            self.state = State::InAttrValueSq;
            self.section_start = self.index + 1;
        } else if !is_whitespace(c) {
            self.section_start = self.index;
            self.state = State::InAttrValueNq;
            self.state_in_attr_value_nq(c);
        }
    }

    fn state_in_attr_value_dq(&mut self, c: u8) {
        if c == DOUBLE_QUOTE {
            self.emit_attr_value(QuoteType::Double);
        }
    }

    fn state_in_attr_value_sq(&mut self, c: u8) {
        if c == SINGLE_QUOTE {
            self.emit_attr_value(QuoteType::Single);
        }
    }

    fn state_in_attr_value_nq(&mut self, c: u8) {
        if is_whitespace(c) || c == GT {
            self.emit_attr_value(QuoteType::Unquoted);
            self.state_before_attr_name(c);
        }
    }

    fn emit_attr_value(&mut self, quote: QuoteType) {
        if self.section_start < self.index {
            self.callbacks
                .on_attrib_data(self.section_start, self.index);
        }
        self.callbacks.on_attrib_end(quote, self.index);
        self.section_start = self.index + 1;
        self.state = State::BeforeAttrName;
    }

    fn state_before_declaration(&mut self, c: u8) {
        if c == DASH {
            self.state = State::BeforeComment;
            self.section_start = self.index + 1;
        } else if c == LEFT_SQUARE {
            // `<![CDATA[...]]>` outside foreign content is a bogus comment
            self.state = State::InSpecialComment;
            self.section_start = self.index;
        } else {
            self.state = State::InDeclaration;
        }
    }

    fn state_in_declaration(&mut self, c: u8) {
        if c == GT {
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_before_comment(&mut self, c: u8) {
        if c == DASH {
            self.state = State::InCommentLike;
            self.section_start = self.index + 1;
        } else {
            self.state = State::InDeclaration;
        }
    }

    fn state_in_special_comment(&mut self, c: u8) {
        if c == GT {
            self.callbacks.on_comment(self.section_start, self.index);
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_in_comment_like(&mut self, c: u8) {
        if c == DASH
            && self.index + 2 < self.input.len()
            && self.input[self.index + 1] == DASH
            && self.input[self.index + 2] == GT
        {
            self.callbacks.on_comment(self.section_start, self.index);
            self.index += 2;
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }

    fn state_in_raw_text(&mut self, c: u8) {
        if c != LT || !self.at_raw_end_tag() {
            return;
        }
        if self.index > self.section_start {
            self.callbacks
                .on_raw_text(self.section_start, self.index, self.raw_decode);
        }
        self.raw_tag.clear();
        self.state = State::BeforeTagName;
        self.section_start = self.index;
    }

    /// Whether `</name` of the current raw text element starts at the current index
    fn at_raw_end_tag(&self) -> bool {
        let name_start = self.index + 2;
        let name_end = name_start + self.raw_tag.len();
        if name_end > self.input.len() || self.input[self.index + 1] != SLASH {
            return false;
        }
        if !self.input[name_start..name_end].eq_ignore_ascii_case(&self.raw_tag) {
            return false;
        }
        self.input
            .get(name_end)
            .map_or(true, |&next| is_end_of_tag_section(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every callback as a readable event
    #[derive(Default)]
    struct Recorder<'s> {
        source: &'s str,
        events: Vec<String>,
    }

    impl<'s> Callbacks for &mut Recorder<'s> {
        fn on_text(&mut self, start: usize, end: usize) {
            self.events.push(format!("text:{}", &self.source[start..end]));
        }
        fn on_raw_text(&mut self, start: usize, end: usize, decode: bool) {
            self.events
                .push(format!("raw({decode}):{}", &self.source[start..end]));
        }
        fn on_open_tag_name(&mut self, start: usize, end: usize) {
            self.events.push(format!("open:{}", &self.source[start..end]));
        }
        fn on_open_tag_end(&mut self, _end: usize) {
            self.events.push("open-end".to_string());
        }
        fn on_self_closing_tag(&mut self, _end: usize) {
            self.events.push("self-closing".to_string());
        }
        fn on_close_tag(&mut self, start: usize, end: usize) {
            self.events.push(format!("close:{}", &self.source[start..end]));
        }
        fn on_attrib_name(&mut self, start: usize, end: usize) {
            self.events.push(format!("attr:{}", &self.source[start..end]));
        }
        fn on_attrib_data(&mut self, start: usize, end: usize) {
            self.events.push(format!("value:{}", &self.source[start..end]));
        }
        fn on_attrib_end(&mut self, quote: QuoteType, _end: usize) {
            self.events.push(format!("attr-end:{quote:?}"));
        }
        fn on_comment(&mut self, start: usize, end: usize) {
            self.events
                .push(format!("comment:{}", &self.source[start..end]));
        }
        fn on_end(&mut self) {
            self.events.push("end".to_string());
        }
        fn on_error(&mut self, code: ErrorCode, _index: usize) {
            self.events.push(format!("error:{code:?}"));
        }
    }

    fn tokenize(source: &str) -> Vec<String> {
        let mut recorder = Recorder {
            source,
            ..Default::default()
        };
        Tokenizer::new(source, &mut recorder).tokenize();
        recorder.events
    }

    #[test]
    fn test_element_with_text() {
        assert_eq!(
            tokenize("<p>Hi</p>"),
            vec!["open:p", "open-end", "text:Hi", "close:p", "end"]
        );
    }

    #[test]
    fn test_attribute_forms() {
        assert_eq!(
            tokenize(r#"<input a="1" b='2' c=3 d>"#),
            vec![
                "open:input",
                "attr:a",
                "value:1",
                "attr-end:Double",
                "attr:b",
                "value:2",
                "attr-end:Single",
                "attr:c",
                "value:3",
                "attr-end:Unquoted",
                "attr:d",
                "attr-end:NoValue",
                "open-end",
                "end",
            ]
        );
    }

    #[test]
    fn test_unquoted_value_keeps_slash() {
        let events = tokenize("<a href=foo/>");
        assert!(events.contains(&"value:foo/".to_string()));
        assert!(!events.contains(&"self-closing".to_string()));
    }

    #[test]
    fn test_self_closing() {
        assert_eq!(
            tokenize("<br/>"),
            vec!["open:br", "self-closing", "end"]
        );
    }

    #[test]
    fn test_comment_and_doctype() {
        assert_eq!(
            tokenize("<!DOCTYPE html><!-- note -->x"),
            vec!["comment: note ", "text:x", "end"]
        );
    }

    #[test]
    fn test_bogus_comments() {
        assert_eq!(
            tokenize("<?xml version=\"1.0\"?><![CDATA[x]]>"),
            vec!["comment:?xml version=\"1.0\"?", "comment:[CDATA[x]]", "end"]
        );
    }

    #[test]
    fn test_raw_text_element() {
        assert_eq!(
            tokenize("<script>if (a < b) { x = '</div>'; }</script>"),
            vec![
                "open:script",
                "open-end",
                "raw(false):if (a < b) { x = '</div>'; }",
                "close:script",
                "end",
            ]
        );
    }

    #[test]
    fn test_rcdata_element_is_decoded() {
        assert_eq!(
            tokenize("<TEXTAREA><b>&amp;</TextArea>"),
            vec![
                "open:TEXTAREA",
                "open-end",
                "raw(true):<b>&amp;",
                "close:TextArea",
                "end",
            ]
        );
    }

    #[test]
    fn test_stray_less_than_is_text() {
        assert_eq!(
            tokenize("a < b"),
            vec!["text:a ", "text:< b", "end"]
        );
    }

    #[test]
    fn test_eof_in_tag() {
        let events = tokenize("<div class=\"a");
        assert!(events.contains(&"error:EofInTag".to_string()));
    }

    #[test]
    fn test_missing_end_tag_name() {
        let events = tokenize("a</>b");
        assert!(events.contains(&"error:MissingEndTagName".to_string()));
    }
}
