//! Markup conversion and serialization.
//!
//! Consumes the internal markup tree: shared pre-passes first (nested-tag
//! collapse, empty-element drop, attribute cleanup), then one writer per
//! output format.

pub mod csv;
pub mod html;
pub mod json;
pub mod text;
pub mod xml;

use crate::document::Document;
use crate::options::{Options, OutputFormat};
use crate::tree::Node;

pub use text::{to_markdown, to_text};

/// Tags merged into their parent when directly nested in a same-tag parent.
const COLLAPSIBLE: &[&str] = &["head", "code", "p"];

/// Parents whose children are never collapsed.
const COLLAPSE_EXEMPT_PARENTS: &[&str] = &["cell", "figure", "item", "note", "quote"];

/// Tags kept even when hollow.
const KEEP_EMPTY: &[&str] = &["graphic", "lb"];

/// Attributes surviving cleanup.
const KEPT_ATTRIBUTES: &[&str] = &["rend", "rendition", "role", "target", "type"];

/// Tags allowed to carry the kept attributes.
const ATTRIBUTE_BEARERS: &[&str] = &[
    "cell", "row", "del", "graphic", "head", "hi", "item", "list", "ref",
];

/// Serialize a document in the requested output format.
#[must_use]
pub fn serialize(doc: &Document, options: &Options) -> String {
    match options.output_format {
        OutputFormat::Txt | OutputFormat::Structured => {
            let mut out = doc.text.clone();
            if !doc.comments.is_empty() {
                out.push_str("\n\n");
                out.push_str(&doc.comments);
            }
            out
        }
        OutputFormat::Markdown => {
            let mut out = to_markdown(&doc.body);
            if !doc.comments.is_empty() {
                out.push_str("\n\n");
                out.push_str(&doc.comments);
            }
            out
        }
        OutputFormat::Json => json::to_json(doc),
        OutputFormat::Xml => xml::to_xml(doc),
        OutputFormat::XmlTei => xml::to_tei(doc),
        OutputFormat::Csv => csv::to_csv(doc),
        OutputFormat::Html => html::to_html(&doc.body),
    }
}

/// Shared pre-passes applied before any serialization.
pub fn prepare(body: &mut Node) {
    collapse_nested(body, "");
    drop_empties(body, false);
    clean_attributes(body);
}

/// Merge doubly-nested `head`/`code`/`p` elements into their parent.
fn collapse_nested(node: &mut Node, parent_tag: &str) {
    let exempt = COLLAPSE_EXEMPT_PARENTS.contains(&parent_tag);
    if COLLAPSIBLE.contains(&node.tag.as_str()) && !exempt {
        let mut merged: Vec<Node> = Vec::new();
        for child in node.children.drain(..) {
            if child.tag == node.tag {
                // Splice the inner element's content into the flow
                if !child.text.is_empty() {
                    if node.text.is_empty() && merged.is_empty() {
                        node.text = child.text;
                    } else {
                        let mut carrier = Node::new("lb");
                        carrier.tail = child.text;
                        merged.push(carrier);
                    }
                }
                merged.extend(child.children);
            } else {
                merged.push(child);
            }
        }
        node.children = merged;
    }
    let tag = node.tag.clone();
    for child in &mut node.children {
        collapse_nested(child, &tag);
    }
}

/// Remove hollow elements, except graphics, line breaks, and anything
/// inside a code block.
fn drop_empties(node: &mut Node, inside_code: bool) {
    let inside_code = inside_code || node.tag == "code";
    for child in &mut node.children {
        drop_empties(child, inside_code);
    }
    if inside_code {
        return;
    }
    node.children.retain(|child| {
        !child.is_hollow()
            || KEEP_EMPTY.contains(&child.tag.as_str())
            || !child.tail.trim().is_empty()
            || child.tag == "code"
    });
}

/// Restrict attributes to the closed set on the tags allowed to carry
/// them. Graphics keep their source triple, code its language.
fn clean_attributes(node: &mut Node) {
    if node.tag == "graphic" {
        node.attrs.retain(|(k, _)| matches!(k.as_str(), "src" | "alt" | "title"));
    } else if node.tag == "code" {
        node.attrs.retain(|(k, _)| k == "lang");
    } else if ATTRIBUTE_BEARERS.contains(&node.tag.as_str()) {
        node.attrs.retain(|(k, _)| KEPT_ATTRIBUTES.contains(&k.as_str()));
    } else {
        node.attrs.clear();
    }
    for child in &mut node.children {
        clean_attributes(child);
    }
}
