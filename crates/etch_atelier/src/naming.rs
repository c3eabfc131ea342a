//! Variable naming strategies.
//!
//! A strategy hands out a variable name per element and takes it back once the
//! element's subtree has been emitted. A name is *live* between the two calls;
//! no two live elements ever share a name, but a released name may be handed
//! out again to a later sibling or cousin.

use etch_carton::{format_compact, to_identifier, FxHashSet, String};
use etch_relief::ElementNode;

/// Hands out variable names for elements
pub trait NamingStrategy {
    /// Get a name for `element` that is not currently live
    fn assign(&mut self, element: &ElementNode<'_>) -> String;

    /// Give back a name returned by [`NamingStrategy::assign`].
    ///
    /// Releasing a name that is not live is a no-op.
    fn release(&mut self, name: &str);

    /// Keep `name` live for the rest of the conversion
    fn reserve(&mut self, name: &str);
}

/// Set of live names shared by the strategies
#[derive(Debug, Default)]
struct LiveNames {
    live: FxHashSet<String>,
    reserved: FxHashSet<String>,
}

impl LiveNames {
    #[inline]
    fn is_live(&self, name: &str) -> bool {
        self.live.contains(name)
    }

    fn take(&mut self, name: String) -> String {
        tracing::trace!(name = %name, "assign name");
        self.live.insert(name.clone());
        name
    }

    fn release(&mut self, name: &str) {
        if !self.reserved.contains(name) && self.live.remove(name) {
            tracing::trace!(name, "release name");
        }
    }

    fn reserve(&mut self, name: &str) {
        self.reserved.insert(name.into());
        self.live.insert(name.into());
    }
}

// ============================================================================
// Structure-derived names
// ============================================================================

/// Names built from what the element says about itself.
///
/// The clue is the `id` attribute, else the `name` attribute, else the tag,
/// turned into a camel-cased identifier fragment. The name is the clue followed
/// by the smallest positive number that is not live, so the first `<p>` is
/// `p1`, a `<p>` nested inside it is `p2`, and a later sibling `<p>` gets `p1`
/// back.
#[derive(Debug, Default)]
pub struct StructureNamer {
    names: LiveNames,
}

impl StructureNamer {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Identifier fragment describing an element
fn element_clue(element: &ElementNode<'_>) -> std::string::String {
    ["id", "name"]
        .into_iter()
        .filter_map(|attr| element.attr_value(attr))
        .map(to_identifier)
        .find(|clue| !clue.is_empty())
        .unwrap_or_else(|| match to_identifier(&element.tag) {
            tag if tag.is_empty() => "node".to_string(),
            tag => tag,
        })
}

impl NamingStrategy for StructureNamer {
    fn assign(&mut self, element: &ElementNode<'_>) -> String {
        let clue = element_clue(element);
        let mut n = 1u32;
        let name = loop {
            let candidate = format_compact!("{clue}{n}");
            if !self.names.is_live(&candidate) {
                break candidate;
            }
            n += 1;
        };
        self.names.take(name)
    }

    fn release(&mut self, name: &str) {
        self.names.release(name);
    }

    fn reserve(&mut self, name: &str) {
        self.names.reserve(name);
    }
}

// ============================================================================
// Word pool names
// ============================================================================

static ADJECTIVES: &[&str] = &[
    "amber", "bold", "calm", "crisp", "dusky", "eager", "frosty", "gentle", "hidden", "icy",
    "jolly", "lively", "misty", "noble", "olive", "proud", "quiet", "rapid", "silent", "tiny",
    "vivid", "wandering", "young", "zesty",
];

static NOUNS: &[&str] = &[
    "Brook", "Cloud", "Dawn", "Dew", "Field", "Fire", "Flower", "Forest", "Frog", "Glade",
    "Hill", "Lake", "Leaf", "Meadow", "Moon", "Pine", "Pond", "Rain", "River", "Sea",
    "Shadow", "Snow", "Star", "Wind",
];

/// Names drawn from a fixed adjective/noun pool (`amberBrook`, `amberCloud`, ...).
///
/// The first combination that is not live is handed out. Once every
/// combination is live, a generation number is appended (`amberBrook1`).
#[derive(Debug, Default)]
pub struct WordPoolNamer {
    names: LiveNames,
}

impl WordPoolNamer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NamingStrategy for WordPoolNamer {
    fn assign(&mut self, _element: &ElementNode<'_>) -> String {
        let mut generation = 0u32;
        loop {
            for adjective in ADJECTIVES {
                for noun in NOUNS {
                    let candidate = if generation == 0 {
                        format_compact!("{adjective}{noun}")
                    } else {
                        format_compact!("{adjective}{noun}{generation}")
                    };
                    if !self.names.is_live(&candidate) {
                        return self.names.take(candidate);
                    }
                }
            }
            generation += 1;
        }
    }

    fn release(&mut self, name: &str) {
        self.names.release(name);
    }

    fn reserve(&mut self, name: &str) {
        self.names.reserve(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etch_carton::Bump;
    use etch_relief::{AttributeNode, SourceLocation, TextNode};

    fn element<'a>(bump: &'a Bump, tag: &str, attrs: &[(&str, &str)]) -> ElementNode<'a> {
        let mut el = ElementNode::new(bump, tag, SourceLocation::STUB);
        for (name, value) in attrs {
            let mut attr = AttributeNode::new(*name, SourceLocation::STUB);
            attr.value = Some(TextNode::new(*value, SourceLocation::STUB));
            el.attrs.push(attr);
        }
        el
    }

    #[test]
    fn test_structure_names_from_tag() {
        let bump = Bump::new();
        let p = element(&bump, "p", &[]);
        let mut namer = StructureNamer::new();

        let outer = namer.assign(&p);
        assert_eq!(outer, "p1");
        // nested while p1 is live
        assert_eq!(namer.assign(&p), "p2");
        namer.release("p2");
        namer.release("p1");
        // sibling after release
        assert_eq!(namer.assign(&p), "p1");
    }

    #[test]
    fn test_structure_clue_priority() {
        let bump = Bump::new();
        let mut namer = StructureNamer::new();

        let by_id = element(&bump, "nav", &[("name", "menu"), ("id", "main-nav")]);
        assert_eq!(namer.assign(&by_id), "mainNav1");

        let by_name = element(&bump, "input", &[("name", "email")]);
        assert_eq!(namer.assign(&by_name), "email1");

        let blank_id = element(&bump, "section", &[("id", "!!")]);
        assert_eq!(namer.assign(&blank_id), "section1");

        let digit_id = element(&bump, "div", &[("id", "2col")]);
        assert_eq!(namer.assign(&digit_id), "_2col1");
    }

    #[test]
    fn test_reserved_name_is_never_assigned() {
        let bump = Bump::new();
        let mut namer = StructureNamer::new();
        namer.reserve("div1");

        assert_eq!(namer.assign(&element(&bump, "div", &[])), "div2");
        namer.release("div1");
        assert_eq!(namer.assign(&element(&bump, "div", &[])), "div3");
    }

    #[test]
    fn test_release_unknown_name_is_noop() {
        let bump = Bump::new();
        let mut namer = StructureNamer::new();
        namer.release("span1");
        assert_eq!(namer.assign(&element(&bump, "span", &[])), "span1");
    }

    #[test]
    fn test_word_pool_order_and_reuse() {
        let bump = Bump::new();
        let el = element(&bump, "div", &[]);
        let mut namer = WordPoolNamer::new();

        assert_eq!(namer.assign(&el), "amberBrook");
        assert_eq!(namer.assign(&el), "amberCloud");
        namer.release("amberBrook");
        assert_eq!(namer.assign(&el), "amberBrook");
    }

    #[test]
    fn test_word_pool_exhaustion_appends_generation() {
        let bump = Bump::new();
        let el = element(&bump, "div", &[]);
        let mut namer = WordPoolNamer::new();

        let pool = ADJECTIVES.len() * NOUNS.len();
        let names: FxHashSet<String> = (0..pool + 2).map(|_| namer.assign(&el)).collect();
        assert_eq!(names.len(), pool + 2);
        assert!(names.contains("amberBrook1"));
        assert!(names.contains("amberCloud1"));
    }

    #[test]
    fn test_word_pool_is_deterministic() {
        let bump = Bump::new();
        let el = element(&bump, "div", &[]);
        let run = || {
            let mut namer = WordPoolNamer::new();
            (0..5).map(|_| namer.assign(&el)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
