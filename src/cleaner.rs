//! Document cleaner.
//!
//! Removes and unwraps whole categories of tags before extraction. The
//! cleaner is the only component that mutates the parsed DOM in place;
//! everything downstream reads it. Cleaning twice is a no-op.

use crate::dom::{self, Document, Selection};
use crate::etree;
use crate::options::{Focus, Options};

/// Tags unwrapped (children and interior text preserved).
///
/// `img` is kept when images are requested.
pub const MANUALLY_STRIPPED: &[&str] = &[
    "abbr", "acronym", "address", "bdi", "bdo", "big", "cite", "data", "dfn", "font", "hgroup",
    "img", "ins", "mark", "meta", "ruby", "small", "tbody", "template", "tfoot", "thead",
];

/// Tags deleted with their subtrees.
///
/// `figure`, `picture` and `source` are kept when images are requested;
/// table structure tags are appended when tables are excluded.
pub const MANUALLY_CLEANED: &[&str] = &[
    "aside", "embed", "footer", "form", "head", "iframe", "menu", "object", "script", "applet",
    "audio", "canvas", "figure", "map", "picture", "svg", "video", "area", "blink", "button",
    "datalist", "dialog", "frame", "frameset", "fieldset", "link", "input", "ins", "label",
    "legend", "marquee", "math", "menuitem", "nav", "noindex", "noscript", "optgroup", "option",
    "output", "param", "progress", "rp", "rt", "rtc", "select", "source", "style", "track",
    "textarea", "time", "use",
];

/// Tags dropped when they end up with no children and no text.
pub const EMPTY_PRUNE_TAGS: &[&str] = &[
    "article", "b", "blockquote", "dd", "div", "dt", "em", "h1", "h2", "h3", "h4", "h5", "h6",
    "i", "li", "main", "p", "pre", "q", "section", "span", "strong",
];

/// Clean the document: unwrap noise wrappers, delete noise subtrees, prune
/// empties. Returns the document (possibly restored from a snapshot when a
/// recall-mode clean would have removed every paragraph).
#[must_use]
pub fn clean_document(doc: Document, options: &Options) -> Document {
    // Tables inside figure wrappers survive table-aware cleaning
    if options.tables {
        for figure_node in doc.select("figure").nodes().to_vec() {
            let figure = Selection::from(figure_node);
            if figure.select("table").exists() {
                dom::rename(&figure, "div");
            }
        }
    }

    strip_wrappers(&doc, options);

    // Recall mode keeps a snapshot: when deleting noise subtrees takes every
    // paragraph with it, the page structure was non-standard and the
    // pre-deletion tree is the better starting point
    let snapshot = if options.focus == Focus::Recall && doc.select("p").exists() {
        Some(doc.html().to_string())
    } else {
        None
    };

    delete_unwanted(&doc, options);

    let doc = match snapshot {
        Some(saved) if !doc.select("p").exists() => {
            tracing::debug!("cleaning removed all paragraphs, restoring pre-clean tree");
            Document::from(saved)
        }
        _ => doc,
    };

    prune_empty_elements(&doc);
    doc
}

fn strip_wrappers(doc: &Document, options: &Options) {
    let mut tags: Vec<&str> = MANUALLY_STRIPPED.to_vec();
    if options.images {
        tags.retain(|t| *t != "img");
    }
    dom::strip_tags(&doc.select("body"), &tags);
}

fn delete_unwanted(doc: &Document, options: &Options) {
    let mut tags: Vec<&str> = MANUALLY_CLEANED.to_vec();
    if options.images {
        tags.retain(|t| !matches!(*t, "figure" | "picture" | "source"));
    }
    if !options.tables {
        tags.extend(["table", "td", "th", "tr"]);
    }
    let combined = tags.join(", ");
    doc.select(&combined).remove();
}

/// Drop empty elements (no element children, no non-whitespace text) from
/// the prunable tag set, children before parents.
pub fn prune_empty_elements(doc: &Document) {
    let all_elements = doc.select("*").nodes().to_vec();
    for node in all_elements.into_iter().rev() {
        let sel = Selection::from(node);
        let tag = dom::tag_name(&sel).unwrap_or_default();
        if !EMPTY_PRUNE_TAGS.contains(&tag.as_str()) {
            continue;
        }
        if sel.children().is_empty() && !etree::text_chars_test(&dom::text_content(&sel)) {
            sel.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(html: &str, options: &Options) -> Document {
        clean_document(Document::from(html), options)
    }

    #[test]
    fn scripts_and_nav_are_deleted() {
        let doc = clean(
            r#"<html><body><nav>Menu</nav><script>var x;</script><p>kept</p></body></html>"#,
            &Options::default(),
        );
        assert!(doc.select("nav").is_empty());
        assert!(doc.select("script").is_empty());
        assert!(doc.select("p").exists());
    }

    #[test]
    fn small_is_unwrapped_not_deleted() {
        let doc = clean(
            r#"<html><body><p>before <small>fine print</small> after</p></body></html>"#,
            &Options::default(),
        );
        assert!(doc.select("small").is_empty());
        assert!(doc.select("p").text().contains("fine print"));
    }

    #[test]
    fn images_survive_when_requested() {
        let options = Options {
            images: true,
            ..Options::default()
        };
        let doc = clean(
            r#"<html><body><figure><img src="a.jpg" alt="x"></figure><p>text</p></body></html>"#,
            &options,
        );
        assert!(doc.select("img").exists());
        assert!(doc.select("figure").exists());

        let doc = clean(
            r#"<html><body><figure><img src="a.jpg"></figure><p>text</p></body></html>"#,
            &Options::default(),
        );
        assert!(doc.select("img").is_empty());
        assert!(doc.select("figure").is_empty());
    }

    #[test]
    fn tables_removed_when_excluded() {
        let options = Options {
            tables: false,
            ..Options::default()
        };
        let doc = clean(
            r#"<html><body><table><tr><td>cell</td></tr></table><p>text</p></body></html>"#,
            &options,
        );
        assert!(doc.select("table").is_empty());
        assert!(doc.select("p").exists());
    }

    #[test]
    fn figure_with_table_becomes_div() {
        let doc = clean(
            r#"<html><body><figure><table><tr><td>data</td></tr></table></figure></body></html>"#,
            &Options::default(),
        );
        assert!(doc.select("figure").is_empty());
        assert!(doc.select("table").exists());
    }

    #[test]
    fn empty_elements_are_pruned() {
        let doc = clean(
            r#"<html><body><div></div><p>  </p><p>real</p><span></span></body></html>"#,
            &Options::default(),
        );
        assert_eq!(doc.select("p").length(), 1);
        assert!(doc.select("div").is_empty());
        assert!(doc.select("span").is_empty());
    }

    #[test]
    fn cleaning_is_idempotent() {
        let html = r#"<html><body><nav>Menu</nav><article><p>content here</p><aside>related</aside></article></body></html>"#;
        let once = clean(html, &Options::default());
        let first = once.html().to_string();
        let twice = clean_document(once, &Options::default());
        assert_eq!(first, twice.html().to_string());
    }

    #[test]
    fn recall_restores_tree_when_paragraphs_vanish() {
        // All paragraphs live inside a <form>, which cleaning deletes
        let html = r#"<html><body><form><p>only content lives here</p></form></body></html>"#;
        let options = Options {
            focus: Focus::Recall,
            ..Options::default()
        };
        let doc = clean(html, &options);
        assert!(doc.select("p").exists());

        let doc = clean(html, &Options::default());
        assert!(doc.select("p").is_empty());
    }
}
