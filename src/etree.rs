//! Element tree utilities.
//!
//! Text readers built on the text/tail model: `own_text` is the content of
//! an element's direct text nodes, `tail_text` the text between the element
//! and its next element sibling. `iter_text` flattens a whole subtree.
//! All getters normalize whitespace unless noted.

use crate::dom::{self, Selection};

/// Collapse runs of whitespace into single spaces and trim the ends.
#[must_use]
pub fn trim(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_space = true;
    for c in text.chars() {
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(c);
            last_space = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// True when the string contains at least one non-whitespace character.
#[must_use]
pub fn text_chars_test(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Text of the element's direct text-node children, before normalization.
#[must_use]
pub fn own_text_raw(sel: &Selection) -> String {
    let mut out = String::new();
    if let Some(node) = sel.nodes().first() {
        for child in node.children() {
            if child.is_text() {
                out.push_str(&child.text());
            }
        }
    }
    out
}

/// Whitespace-normalized text of the element's direct text-node children.
#[must_use]
pub fn own_text(sel: &Selection) -> String {
    trim(&own_text_raw(sel))
}

/// Text between this element and its next element sibling.
#[must_use]
pub fn tail_text(sel: &Selection) -> String {
    let mut out = String::new();
    if let Some(node) = sel.nodes().first() {
        let mut sibling = node.next_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                break;
            }
            if s.is_text() {
                out.push_str(&s.text());
            }
            sibling = s.next_sibling();
        }
    }
    trim(&out)
}

/// All descendant text in document order, each text node normalized and
/// joined with `sep`.
#[must_use]
pub fn iter_text(sel: &Selection, sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    for node in sel.nodes() {
        if node.is_text() {
            let piece = trim(&node.text());
            if !piece.is_empty() {
                parts.push(piece);
            }
            continue;
        }
        for descendant in node.descendants() {
            if descendant.is_text() {
                let piece = trim(&descendant.text());
                if !piece.is_empty() {
                    parts.push(piece);
                }
            }
        }
    }
    parts.join(sep)
}

/// Normalized text of the whole subtree, space-joined.
#[must_use]
pub fn text_of(sel: &Selection) -> String {
    trim(&dom::text_content(sel))
}

/// Unwrap an element: replace it with its inner HTML, keeping children and
/// interior text in place.
pub fn unwrap(sel: &Selection) {
    let inner = dom::inner_html(sel);
    dom::replace_with_html(sel, &inner);
}
