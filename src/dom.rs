//! DOM operations adapter.
//!
//! Thin wrappers over the `dom_query` crate giving the rest of the pipeline
//! a small, consistent surface for attribute access, navigation, and tree
//! manipulation. Everything operates on `Selection` values; text getters
//! return `StrTendril` so callers can defer allocation.

// Re-export core types for the rest of the crate
pub use dom_query::{Document, NodeId, NodeRef, Selection};

pub use tendril::StrTendril;

// === Attribute operations ===

/// Get element ID attribute.
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute.
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Set an attribute value.
#[inline]
pub fn set_attribute(sel: &Selection, name: &str, value: &str) {
    sel.set_attr(name, value);
}

/// Remove an attribute.
#[inline]
pub fn remove_attribute(sel: &Selection, name: &str) {
    sel.remove_attr(name);
}

/// Get all attributes as key-value pairs.
#[must_use]
pub fn get_all_attributes(sel: &Selection) -> Vec<(String, String)> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Clear all attributes from a selection.
pub fn clear_all_attributes(sel: &Selection) {
    for (key, _) in get_all_attributes(sel) {
        remove_attribute(sel, &key);
    }
}

// === Tag / node information ===

/// Get tag name (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_lowercase())
}

// === Text content ===

/// Get all text content of node and descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get inner HTML content.
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

/// Get outer HTML content.
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Tree navigation ===

/// Get parent element.
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}

/// Get direct element children.
#[inline]
#[must_use]
pub fn children<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.children()
}

/// Get next element sibling (skipping text nodes).
#[must_use]
pub fn next_element_sibling<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes().first().and_then(|node| {
        let mut sibling = node.next_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                return Some(Selection::from(s));
            }
            sibling = s.next_sibling();
        }
        None
    })
}

// === Tree manipulation ===

/// Remove elements from the tree.
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Remove elements within `sel` but keep their children (unwrap).
#[inline]
pub fn strip_tags(sel: &Selection, tags: &[&str]) {
    sel.strip_elements(tags);
}

/// Rename element tag.
#[inline]
pub fn rename(sel: &Selection, new_tag: &str) {
    sel.rename(new_tag);
}

/// Replace an element with raw HTML.
#[inline]
pub fn replace_with_html(sel: &Selection, html: &str) {
    sel.replace_with_html(html);
}

/// Deep-clone a whole document.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

// === Parsing ===

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_attribute_access() {
        let doc = parse(r#"<div id="main" class="container">content</div>"#);
        let div = doc.select("div");

        assert_eq!(id(&div), Some("main".to_string()));
        assert_eq!(class_name(&div), Some("container".to_string()));
        assert_eq!(get_attribute(&div, "data-x"), None);
    }

    #[test]
    fn strip_tags_keeps_content() {
        let doc = parse(r#"<div>before <b>bold</b> after</div>"#);
        let div = doc.select("div");

        strip_tags(&div, &["b"]);

        assert_eq!(text_content(&div), "before bold after".into());
        assert!(doc.select("b").is_empty());
    }

    #[test]
    fn rename_changes_tag() {
        let doc = parse(r#"<div id="test">content</div>"#);
        rename(&doc.select("#test"), "section");

        assert!(doc.select("section#test").exists());
        assert!(doc.select("div#test").is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let doc = parse(r#"<div id="original">content</div>"#);
        let cloned = clone_document(&doc);

        cloned.select("#original").set_attr("id", "cloned");
        assert_eq!(doc.select("#original").attr("id"), Some("original".into()));
        assert!(cloned.select("#cloned").exists());
    }

    #[test]
    fn next_element_sibling_skips_text() {
        let doc = parse(r#"<div><p id="first">First</p>  <span id="second">Second</span></div>"#);
        let next = next_element_sibling(&doc.select("#first"));
        assert_eq!(tag_name(&next.unwrap_or_else(|| doc.select("missing"))), Some("span".to_string()));
    }

    #[test]
    fn operations_on_empty_selection_are_noops() {
        let doc = parse(r#"<div>content</div>"#);
        let empty = doc.select("span");

        remove(&empty);
        set_attribute(&empty, "class", "test");
        remove_attribute(&empty, "id");

        assert_eq!(text_content(&empty), "".into());
    }
}
