//! Primary extractor.
//!
//! Selects a body subtree via the selector catalog, prunes unwanted
//! sections, then walks the converted DOM in document order and emits
//! internal markup nodes. Containers that consume their subtree (lists,
//! tables, quotes) mark descendants as done so they are not visited twice.

pub mod cascade;
pub mod comments;
pub mod prune;

use std::collections::HashSet;

use crate::dedup;
use crate::dom::{self, Document, NodeId, NodeRef, Selection};
use crate::etree;
use crate::link_density::link_density_test;
use crate::options::{Focus, Options};
use crate::selectors::{self, content};
use crate::tree::{Node, ALLOWED_ATTRIBUTES};

/// Inline tags preserved inside block elements.
const INLINE_TAGS: &[&str] = &["hi", "ref", "del", "lb", "graphic"];

/// Extract the main content body from a cleaned, converted document.
#[must_use]
pub fn extract_body(doc: &Document, options: &Options) -> Node {
    let body = doc.select("body");

    // First selector family with a match wins; structural fallbacks after
    let mut candidates: Vec<Selection> = Vec::new();
    for rule in content::BODY_RULES {
        let found = selectors::query_all(&body, *rule);
        if !found.is_empty() {
            candidates = found;
            break;
        }
    }
    if candidates.is_empty() {
        for selector in ["article", "[role=\"main\"]", "main"] {
            let found = doc.select(selector);
            if found.exists() {
                candidates = found
                    .nodes()
                    .iter()
                    .map(|n| Selection::from(*n))
                    .collect();
                break;
            }
        }
    }
    if candidates.is_empty() {
        // Whole-page walk as the last candidate
        candidates = vec![body];
    }

    let mut best = Node::new("body");
    let mut best_len = 0;
    for candidate in candidates {
        prune::prune_unwanted_sections(&candidate, options);
        let potential = potential_tags(&candidate, options);
        let result = walk_subtree(&candidate, options, &potential);
        if result.children.len() > 1 {
            return result;
        }
        let len = result.text_len();
        if len > best_len {
            best_len = len;
            best = result;
        }
    }
    best
}

/// Walk an arbitrary subtree with a permissive tag set. Used to render the
/// output of the fallback extractors into internal markup.
#[must_use]
pub fn render_subtree(subtree: &Selection, options: &Options) -> Node {
    let mut potential = potential_tags(subtree, options);
    potential.insert("div".to_string());
    walk_subtree(subtree, options, &potential)
}

/// The tag set the walk is allowed to emit for the current options.
fn potential_tags(subtree: &Selection, options: &Options) -> HashSet<String> {
    let mut tags: HashSet<String> = [
        "p", "head", "list", "item", "quote", "code", "lb", "del", "article", "main", "section",
        "figure", "figcaption",
    ]
    .into_iter()
    .map(ToString::to_string)
    .collect();

    if options.formatting {
        tags.insert("hi".to_string());
    }
    if options.tables {
        for t in ["table", "tr", "td", "th", "row", "cell"] {
            tags.insert(t.to_string());
        }
    }
    if options.images {
        tags.insert("graphic".to_string());
    }
    if options.links {
        tags.insert("ref".to_string());
    }

    // Pages that put prose straight into divs need the wider net
    let paragraphs = subtree.select("p");
    let p_len: usize = paragraphs
        .nodes()
        .iter()
        .map(|n| etree::text_of(&Selection::from(*n)).chars().count())
        .sum();
    let factor = if options.focus == Focus::Precision { 1 } else { 3 };
    if paragraphs.is_empty() || p_len < options.min_extracted_size * factor {
        tags.insert("div".to_string());
    }

    tags
}

fn walk_subtree(subtree: &Selection, options: &Options, potential: &HashSet<String>) -> Node {
    let mut body = Node::new("body");
    let mut done: HashSet<NodeId> = HashSet::new();

    for node in subtree.select("*").nodes() {
        if done.contains(&node.id) {
            continue;
        }
        let sel = Selection::from(*node);
        let Some(tag) = dom::tag_name(&sel) else {
            continue;
        };
        if !potential.contains(&tag) {
            continue;
        }

        let emitted = match tag.as_str() {
            "head" => {
                consume(node, &mut done);
                handle_heading(&sel)
            }
            "p" => {
                consume(node, &mut done);
                handle_paragraph(&sel, options)
            }
            "list" => {
                consume(node, &mut done);
                handle_list(&sel, options)
            }
            "quote" | "code" => {
                consume(node, &mut done);
                handle_quote(&sel, &tag, options)
            }
            "table" => {
                consume(node, &mut done);
                handle_table(&sel)
            }
            "graphic" => {
                consume(node, &mut done);
                handle_image(&sel)
            }
            "hi" | "del" | "ref" => {
                consume(node, &mut done);
                handle_standalone_inline(&sel, &tag)
            }
            "div" | "section" | "article" | "main" | "figure" | "figcaption" => {
                handle_container(&sel, options)
            }
            _ => None,
        };

        if let Some(element) = emitted {
            body.children.push(element);
        }
    }

    // Headings with nothing after them are section stubs
    while body
        .children
        .last()
        .is_some_and(|c| matches!(c.tag.as_str(), "head" | "fw"))
    {
        body.children.pop();
    }

    body
}

fn consume(node: &NodeRef, done: &mut HashSet<NodeId>) {
    for descendant in node.descendants() {
        done.insert(descendant.id);
    }
}

fn copy_allowed_attrs(sel: &Selection, out: &mut Node) {
    for (key, value) in dom::get_all_attributes(sel) {
        if ALLOWED_ATTRIBUTES.contains(&key.as_str()) {
            out.set_attr(&key, &value);
        }
    }
}

/// Fill a block node from a DOM element, keeping inline markup as children
/// and flattening anything unexpected into the text flow.
fn fill_inline(root: &NodeRef, out: &mut Node) {
    for child in root.children() {
        if child.is_text() {
            append_text(out, &child.text());
        } else if child.is_element() {
            let name = child
                .node_name()
                .map(|t| t.to_lowercase())
                .unwrap_or_default();
            if INLINE_TAGS.contains(&name.as_str()) {
                let sel = Selection::from(child);
                let mut inline = Node::new(&name);
                copy_allowed_attrs(&sel, &mut inline);
                fill_inline(&child, &mut inline);
                out.children.push(inline);
            } else {
                fill_inline(&child, out);
            }
        }
    }
}

/// Append normalized text into the flow: either the node's text or the tail
/// of its last child.
fn append_text(out: &mut Node, text: &str) {
    let piece = etree::trim(text);
    if piece.is_empty() {
        return;
    }
    match out.children.last_mut() {
        Some(last) => {
            if !last.tail.is_empty() {
                last.tail.push(' ');
            }
            last.tail.push_str(&piece);
        }
        None => {
            if !out.text.is_empty() {
                out.text.push(' ');
            }
            out.text.push_str(&piece);
        }
    }
}

fn build_block(tag: &str, sel: &Selection) -> Node {
    let mut node = Node::new(tag);
    if let Some(root) = sel.nodes().first() {
        fill_inline(root, &mut node);
    }
    node
}

fn handle_heading(sel: &Selection) -> Option<Node> {
    let mut head = build_block("head", sel);
    if let Some(rend) = dom::get_attribute(sel, "rend") {
        head.set_attr("rend", &rend);
    }
    if head.is_hollow() {
        return None;
    }
    Some(head)
}

fn handle_paragraph(sel: &Selection, options: &Options) -> Option<Node> {
    if link_density_test(sel, options) {
        return None;
    }
    let paragraph = build_block("p", sel);
    if paragraph.is_hollow() && !paragraph.has_tag("graphic") {
        return None;
    }
    if options.dedup && dedup::seen_too_often(&paragraph.text_content(), options) {
        tracing::debug!("dropping repeated paragraph");
        return None;
    }
    Some(paragraph)
}

fn handle_list(sel: &Selection, options: &Options) -> Option<Node> {
    let mut list = Node::new("list");
    if let Some(rend) = dom::get_attribute(sel, "rend") {
        list.set_attr("rend", &rend);
    }
    if let Some(root) = sel.nodes().first() {
        for child in root.children() {
            if !child.is_element() {
                continue;
            }
            if child
                .node_name()
                .is_some_and(|t| t.eq_ignore_ascii_case("item"))
            {
                let item = build_block("item", &Selection::from(child));
                if !item.is_hollow() {
                    list.children.push(item);
                }
            }
        }
    }
    if list.children.is_empty() {
        return None;
    }
    if options.dedup && dedup::seen_too_often(&list.text_content(), options) {
        return None;
    }
    Some(list)
}

fn handle_quote(sel: &Selection, tag: &str, options: &Options) -> Option<Node> {
    // Code keeps its raw shape; quotes are normalized prose
    let text = if tag == "code" {
        dom::text_content(sel).to_string()
    } else {
        etree::text_of(sel)
    };
    if text.trim().is_empty() {
        return None;
    }
    let mut node = Node::with_text(tag, &text);
    if tag == "code" {
        if let Some(lang) = dom::get_attribute(sel, "lang") {
            node.set_attr("lang", &lang);
        }
    }
    if options.dedup && dedup::seen_too_often(&text, options) {
        return None;
    }
    Some(node)
}

fn handle_table(sel: &Selection) -> Option<Node> {
    let mut table = Node::new("table");
    for tr in sel.select("tr").nodes() {
        let mut row = Node::new("row");
        for cell_node in tr.children() {
            if !cell_node.is_element() {
                continue;
            }
            let name = cell_node
                .node_name()
                .map(|t| t.to_lowercase())
                .unwrap_or_default();
            if name != "td" && name != "th" {
                continue;
            }
            let mut cell = build_block("cell", &Selection::from(cell_node));
            if name == "th" {
                cell.set_attr("role", "head");
            }
            row.children.push(cell);
        }
        if !row.children.is_empty() {
            table.children.push(row);
        }
    }
    if table.children.is_empty() {
        None
    } else {
        Some(table)
    }
}

fn handle_image(sel: &Selection) -> Option<Node> {
    let src = dom::get_attribute(sel, "src")
        .or_else(|| dom::get_attribute(sel, "data-src"))?;
    let mut graphic = Node::new("graphic");
    graphic.set_attr("src", &src);
    if let Some(alt) = dom::get_attribute(sel, "alt") {
        graphic.set_attr("alt", &alt);
    }
    if let Some(title) = dom::get_attribute(sel, "title") {
        graphic.set_attr("title", &title);
    }
    Some(graphic)
}

/// Inline element found outside a paragraph: wrap it.
fn handle_standalone_inline(sel: &Selection, tag: &str) -> Option<Node> {
    let text = etree::text_of(sel);
    if text.is_empty() {
        return None;
    }
    let mut wrapper = Node::new("p");
    let mut inline = Node::with_text(tag, &text);
    copy_allowed_attrs(sel, &mut inline);
    wrapper.children.push(inline);
    Some(wrapper)
}

/// Containers contribute only their own direct text; nested blocks are
/// visited on their own.
fn handle_container(sel: &Selection, options: &Options) -> Option<Node> {
    let own = etree::own_text(sel);
    if own.is_empty() {
        return None;
    }
    if options.dedup && dedup::seen_too_often(&own, options) {
        return None;
    }
    Some(Node::with_text("p", &own))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner;
    use crate::convert;

    fn pipeline(html: &str, options: &Options) -> Node {
        let doc = cleaner::clean_document(Document::from(html), options);
        convert::convert_tags(&doc, options, None);
        extract_body(&doc, options)
    }

    #[test]
    fn article_paragraphs_are_extracted() {
        let body = pipeline(
            r#"<html><body><nav>Menu</nav><article>
            <h1>Breaking News</h1>
            <p>This is the main content of the article. It contains important information that readers want to see.</p>
            <p>Boilerplate such as navigation, footers, and ads is removed automatically.</p>
            </article><footer>Copyright 2026</footer></body></html>"#,
            &Options::default(),
        );
        let text = body.text_content();
        assert!(text.contains("Breaking News"));
        assert!(text.contains("main content"));
        assert!(!text.contains("Menu"));
        assert!(!text.contains("Copyright 2026"));
        assert!(body.children.len() > 1);
    }

    #[test]
    fn headings_become_head_nodes() {
        let body = pipeline(
            r#"<html><body><article>
            <h2>Section Title</h2>
            <p>Paragraph text that follows the heading with enough words to stay.</p>
            </article></body></html>"#,
            &Options::default(),
        );
        assert!(body.children.iter().any(|c| c.tag == "head"));
        let head = body
            .children
            .iter()
            .find(|c| c.tag == "head")
            .map(|c| c.attr("rend").unwrap_or_default().to_string());
        assert_eq!(head.as_deref(), Some("h2"));
    }

    #[test]
    fn trailing_heading_is_dropped() {
        let body = pipeline(
            r#"<html><body><article>
            <p>Actual paragraph content that carries the article body text here.</p>
            <h3>Related articles</h3>
            </article></body></html>"#,
            &Options::default(),
        );
        assert!(!body
            .children
            .last()
            .is_some_and(|c| c.tag == "head"));
    }

    #[test]
    fn lists_keep_their_items() {
        let body = pipeline(
            r#"<html><body><article>
            <p>Introductory sentence long enough to be kept around for the list below.</p>
            <ul><li>first entry</li><li>second entry</li></ul>
            </article></body></html>"#,
            &Options::default(),
        );
        let list = body.children.iter().find(|c| c.tag == "list");
        assert!(list.is_some_and(|l| l.children.len() == 2));
    }

    #[test]
    fn tables_are_rows_and_cells() {
        let body = pipeline(
            r#"<html><body><article>
            <p>Some context for the data table shown below in this short article.</p>
            <table><tr><th>Name</th><th>Score</th></tr><tr><td>Ada</td><td>10</td></tr></table>
            </article></body></html>"#,
            &Options::default(),
        );
        let table = body.children.iter().find(|c| c.tag == "table");
        assert!(table.is_some());
        #[allow(clippy::unwrap_used)]
        let table = table.unwrap();
        assert_eq!(table.children.len(), 2);
        assert_eq!(table.children[0].children[0].attr("role"), Some("head"));
    }

    #[test]
    fn formatting_preserved_when_requested() {
        let options = Options {
            formatting: true,
            ..Options::default()
        };
        let body = pipeline(
            r#"<html><body><article>
            <p>Text with <b>bold emphasis</b> inside a sentence that keeps going for a while.</p>
            <p>A second paragraph so the walk accepts this candidate subtree as content.</p>
            </article></body></html>"#,
            &options,
        );
        let p = &body.children[0];
        assert!(p.children.iter().any(|c| c.tag == "hi" && c.attr("rend") == Some("#b")));
    }

    #[test]
    fn images_emitted_only_when_requested() {
        let html = r#"<html><body><article>
            <p>Paragraph providing context for the image below, long enough to keep.</p>
            <img src="https://example.org/pic.jpg" alt="a picture">
            <p>Closing paragraph with more than a few words in it for good measure.</p>
            </article></body></html>"#;

        let body = pipeline(html, &Options::default());
        assert!(!body.has_tag("graphic"));

        let options = Options {
            images: true,
            ..Options::default()
        };
        let body = pipeline(html, &options);
        assert!(body.has_tag("graphic"));
    }

    #[test]
    fn closed_vocabulary_always_holds() {
        let body = pipeline(
            r#"<html><body><article>
            <h1>Title</h1>
            <p>One paragraph with enough text to be retained by the extractor.</p>
            <ul><li>item one</li><li>item two</li></ul>
            <blockquote>A quoted passage of reasonable length for the test.</blockquote>
            <table><tr><td>cell</td></tr></table>
            </article></body></html>"#,
            &Options::default(),
        );
        assert!(body.obeys_vocabulary());
    }
}
