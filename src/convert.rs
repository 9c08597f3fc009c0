//! Tag conversion into internal markup.
//!
//! Rewrites the cleaned DOM in place so that downstream passes only deal
//! with the closed internal vocabulary: `list`/`item`, `head`, `lb`,
//! `quote`/`code`, `del`, `graphic`, `ref`, `hi`. Links and formatting are
//! unwrapped instead when the options do not ask for them.

use url::Url;

use crate::dom::{self, Document, Selection};
use crate::options::Options;

/// Substrings of `pre` content that indicate source code rather than a
/// block quote. The last entry is newline-then-four-spaces, the shape of
/// indented code lines.
const CODE_MARKERS: &[&str] = &["{", "(\"", "('", "\n    "];

/// Inline formatting tags mapped to `hi` rend values.
const HI_REND_MAP: &[(&str, &str)] = &[
    ("em", "#i"),
    ("i", "#i"),
    ("b", "#b"),
    ("strong", "#b"),
    ("u", "#u"),
    ("kbd", "#t"),
    ("samp", "#t"),
    ("tt", "#t"),
    ("var", "#t"),
    ("sub", "#sub"),
    ("sup", "#sup"),
];

/// Rewrite HTML tags into the internal vocabulary, in place.
pub fn convert_tags(doc: &Document, options: &Options, base_url: Option<&str>) {
    convert_lists(doc);
    convert_headings(doc);
    convert_line_breaks(doc);
    convert_quotes(doc);
    convert_deletions(doc);
    convert_details(doc);
    convert_images(doc, options);
    convert_links(doc, options, base_url);
    convert_formatting(doc, options);
}

fn convert_lists(doc: &Document) {
    for node in doc.select("ol, ul, dl").nodes().to_vec() {
        let list = Selection::from(node);
        let rend = dom::tag_name(&list).unwrap_or_default();
        for item_node in list.select("li, dd, dt").nodes().to_vec() {
            dom::rename(&Selection::from(item_node), "item");
        }
        dom::rename(&list, "list");
        dom::set_attribute(&list, "rend", &rend);
    }
}

fn convert_headings(doc: &Document) {
    for level in 1..=6u8 {
        let selector = format!("h{level}");
        for node in doc.select(&selector).nodes().to_vec() {
            let heading = Selection::from(node);
            dom::clear_all_attributes(&heading);
            dom::rename(&heading, "head");
            dom::set_attribute(&heading, "rend", &format!("h{level}"));
        }
    }
}

fn convert_line_breaks(doc: &Document) {
    for node in doc.select("br, hr").nodes().to_vec() {
        dom::rename(&Selection::from(node), "lb");
    }
}

/// `pre` with code markers becomes `code`; other `pre`, `blockquote` and
/// `q` become `quote`.
fn convert_quotes(doc: &Document) {
    for node in doc.select("pre").nodes().to_vec() {
        let pre = Selection::from(node);
        if is_code_block(&pre) {
            dom::rename(&pre, "code");
        } else {
            dom::rename(&pre, "quote");
        }
    }
    for node in doc.select("blockquote, q").nodes().to_vec() {
        dom::rename(&Selection::from(node), "quote");
    }
}

fn is_code_block(pre: &Selection) -> bool {
    // A lone <span> child is the shape emitted by highlighters
    let children = pre.children();
    if children.length() == 1 {
        if let Some(child) = children.nodes().first() {
            if child
                .node_name()
                .is_some_and(|t| t.eq_ignore_ascii_case("span"))
            {
                return true;
            }
        }
    }
    if pre.select(r#"span[class^="hljs"]"#).exists() {
        return true;
    }
    let text = pre.text();
    CODE_MARKERS.iter().any(|marker| text.contains(marker))
}

fn convert_deletions(doc: &Document) {
    for node in doc.select("del, s, strike").nodes().to_vec() {
        let del = Selection::from(node);
        dom::rename(&del, "del");
        dom::set_attribute(&del, "rend", "overstrike");
    }
}

fn convert_details(doc: &Document) {
    for node in doc.select("details").nodes().to_vec() {
        let details = Selection::from(node);
        for summary_node in details.select("summary").nodes().to_vec() {
            let summary = Selection::from(summary_node);
            dom::rename(&summary, "head");
        }
        dom::rename(&details, "div");
    }
}

fn convert_images(doc: &Document, options: &Options) {
    if !options.images {
        return;
    }
    for node in doc.select("img").nodes().to_vec() {
        let img = Selection::from(node);
        // Lazy-loading pages park the real source in data-src
        if dom::get_attribute(&img, "src").is_none() {
            if let Some(data_src) = dom::get_attribute(&img, "data-src") {
                dom::set_attribute(&img, "src", &data_src);
            }
        }
        dom::rename(&img, "graphic");
    }
}

fn convert_links(doc: &Document, options: &Options, base_url: Option<&str>) {
    if !options.links {
        dom::strip_tags(&doc.select("body"), &["a"]);
        return;
    }
    for node in doc.select("a").nodes().to_vec() {
        let anchor = Selection::from(node);
        let target = dom::get_attribute(&anchor, "href")
            .and_then(|href| resolve_target(&href, base_url));
        dom::clear_all_attributes(&anchor);
        dom::rename(&anchor, "ref");
        if let Some(target) = target {
            dom::set_attribute(&anchor, "target", &target);
        }
    }
}

/// Keep absolute http(s) targets; resolve relative ones against the base.
fn resolve_target(href: &str, base_url: Option<&str>) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let base = Url::parse(base_url?).ok()?;
    let resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

fn convert_formatting(doc: &Document, options: &Options) {
    let tags: Vec<&str> = HI_REND_MAP.iter().map(|(tag, _)| *tag).collect();
    if !options.formatting {
        dom::strip_tags(&doc.select("body"), &tags);
        return;
    }
    for (tag, rend) in HI_REND_MAP {
        for node in doc.select(tag).nodes().to_vec() {
            let el = Selection::from(node);
            dom::rename(&el, "hi");
            dom::set_attribute(&el, "rend", rend);
        }
    }
}
