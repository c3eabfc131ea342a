//! DOM tag configuration tables.
//!
//! Compile-time lookup tables used by the parser to decide how an element's
//! content is tokenized.

use phf::phf_set;

/// Elements that never have children or an end tag
static VOID_TAGS: phf::Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr"
};

/// Elements whose content is raw text and is not entity-decoded
static RAW_TEXT_TAGS: phf::Set<&'static str> = phf_set! {
    "script", "style", "xmp", "iframe", "noembed", "noframes"
};

/// Elements whose content is raw text but character references are decoded
static RCDATA_TAGS: phf::Set<&'static str> = phf_set! {
    "textarea", "title"
};

/// Check if a tag is a void element (`<br>`, `<img>`, ...)
#[inline]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(tag)
}

/// Check if a tag's content is tokenized as raw text
#[inline]
pub fn is_raw_text_tag(tag: &str) -> bool {
    RAW_TEXT_TAGS.contains(tag)
}

/// Check if a tag's content is tokenized as escapable raw text
#[inline]
pub fn is_rcdata_tag(tag: &str) -> bool {
    RCDATA_TAGS.contains(tag)
}
