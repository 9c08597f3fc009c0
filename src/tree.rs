//! Internal markup tree.
//!
//! Extraction produces a small, closed tag vocabulary loosely based on TEI.
//! The tree uses the text/tail model: `text` is the content before the first
//! child element, `tail` the content after the element's closing tag.
//!
//! ```text
//! <p>
//!   TEXT HERE          <- p.text
//!   <hi>inner</hi>
//!   TAIL HERE          <- hi.tail
//! </p>
//! ```
//!
//! Only the vocabulary tags may appear after conversion; serializers unwrap
//! anything else.

/// Tags allowed in the internal markup tree.
pub const VOCABULARY: &[&str] = &[
    "body", "p", "head", "hi", "list", "item", "quote", "code", "del", "table", "row", "cell",
    "graphic", "ref", "lb", "div",
];

/// Attributes allowed on internal markup elements.
pub const ALLOWED_ATTRIBUTES: &[&str] = &[
    "rend", "rendition", "role", "target", "type", "src", "alt", "title", "lang",
];

/// One element of the internal markup tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Element tag, one of [`VOCABULARY`].
    pub tag: String,
    /// Attribute pairs, restricted to [`ALLOWED_ATTRIBUTES`].
    pub attrs: Vec<(String, String)>,
    /// Text before the first child element.
    pub text: String,
    /// Text after this element's closing tag, owned here rather than by the parent.
    pub tail: String,
    /// Child elements in document order.
    pub children: Vec<Node>,
}

impl Node {
    /// Create an empty element.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// Create an element holding only text.
    #[must_use]
    pub fn with_text(tag: &str, text: &str) -> Self {
        Self {
            tag: tag.to_string(),
            text: text.to_string(),
            ..Self::default()
        }
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(pair) = self.attrs.iter_mut().find(|(k, _)| k == name) {
            pair.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }

    /// Append a child and return a mutable reference to it.
    pub fn push(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let index = self.children.len() - 1;
        &mut self.children[index]
    }

    /// Full text content: own text, children (with tails), in document order.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
            out.push_str(&child.tail);
        }
    }

    /// Character count of the trimmed text content.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text_content().trim().chars().count()
    }

    /// True when the element carries neither text nor children.
    ///
    /// Tail text does not count: it belongs to the surrounding flow, not to
    /// the element itself.
    #[must_use]
    pub fn is_hollow(&self) -> bool {
        self.text.trim().is_empty() && self.children.iter().all(Node::is_hollow)
    }

    /// Count descendant elements (including self) with the given tag.
    #[must_use]
    pub fn count_tag(&self, tag: &str) -> usize {
        let own = usize::from(self.tag == tag);
        own + self.children.iter().map(|c| c.count_tag(tag)).sum::<usize>()
    }

    /// True when any descendant (including self) has the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag == tag || self.children.iter().any(|c| c.has_tag(tag))
    }

    /// True when every tag in the tree belongs to the closed vocabulary and
    /// every attribute to the allowed set.
    #[must_use]
    pub fn obeys_vocabulary(&self) -> bool {
        VOCABULARY.contains(&self.tag.as_str())
            && self.attrs.iter().all(|(k, _)| ALLOWED_ATTRIBUTES.contains(&k.as_str()))
            && self.children.iter().all(Node::obeys_vocabulary)
    }

    /// Visit every element depth-first, parents before children.
    pub fn walk(&self, visit: &mut impl FnMut(&Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_follows_text_tail_model() {
        let mut p = Node::with_text("p", "before ");
        let mut hi = Node::with_text("hi", "inner");
        hi.tail = " after".to_string();
        p.push(hi);
        assert_eq!(p.text_content(), "before inner after");
    }

    #[test]
    fn hollow_detection_ignores_tail() {
        let mut p = Node::new("p");
        let mut lb = Node::new("lb");
        lb.tail = "trailing".to_string();
        p.push(lb);
        assert!(p.is_hollow());

        let p2 = Node::with_text("p", "text");
        assert!(!p2.is_hollow());
    }

    #[test]
    fn vocabulary_check_rejects_foreign_tags() {
        let mut body = Node::new("body");
        body.push(Node::with_text("p", "fine"));
        assert!(body.obeys_vocabulary());

        body.push(Node::with_text("marquee", "nope"));
        assert!(!body.obeys_vocabulary());
    }

    #[test]
    fn tag_counting_is_recursive() {
        let mut body = Node::new("body");
        let list = body.push(Node::new("list"));
        list.push(Node::with_text("item", "a"));
        list.push(Node::with_text("item", "b"));
        assert_eq!(body.count_tag("item"), 2);
        assert!(body.has_tag("list"));
        assert!(!body.has_tag("table"));
    }
}
