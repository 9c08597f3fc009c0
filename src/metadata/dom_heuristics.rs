//! DOM-based metadata heuristics.
//!
//! The fallback tier: what the page shows readers when it declares nothing
//! machine-readable. Title from headings or the `<title>` element, author
//! from bylines, categories and tags from taxonomy links, license from
//! footer anchors.

use crate::dom::{self, Document, Selection};
use crate::etree;
use crate::metadata::Metadata;
use crate::patterns::{CC_LICENSE_PATH, CC_LICENSE_TEXT, TITLE_SEPARATORS};
use crate::selectors::{self, meta as meta_rules};

/// Fill missing fields from DOM heuristics.
pub fn examine_dom(doc: &Document, metadata: &mut Metadata) {
    if metadata.title.is_none() {
        metadata.title = extract_title(doc);
    }
    if metadata.author.is_none() {
        metadata.author = extract_author(doc);
    }
    if metadata.sitename.is_none() {
        metadata.sitename = sitename_from_title_tag(doc);
    }
    if metadata.categories.is_empty() {
        metadata.categories = collect_taxonomy(doc, meta_rules::category_rule);
    }
    if metadata.tags.is_empty() {
        metadata.tags = collect_taxonomy(doc, meta_rules::tag_rule);
    }
}

/// Title: a single `<h1>`, else the `<title>` tag with the site suffix
/// stripped, else title-marked elements, else the first `<h2>`.
#[must_use]
pub fn extract_title(doc: &Document) -> Option<String> {
    let h1 = doc.select("h1");
    if h1.length() == 1 {
        let text = etree::text_of(&h1);
        if !text.is_empty() {
            return Some(text);
        }
    }

    if let Some(title) = title_tag_main_part(doc) {
        return Some(title);
    }

    let body = doc.select("body");
    if let Some(candidate) = selectors::query(&body, meta_rules::title_rule) {
        let text = etree::text_of(&candidate);
        if !text.is_empty() {
            return Some(text);
        }
    }

    let h2 = doc.select("h2");
    if h2.exists() {
        if let Some(node) = h2.nodes().first() {
            let text = etree::text_of(&Selection::from(*node));
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// The article part of the `<title>` element: the longest segment when the
/// title carries a separator-delimited site suffix.
fn title_tag_main_part(doc: &Document) -> Option<String> {
    let raw = etree::text_of(&doc.select("head > title"));
    if raw.is_empty() {
        return None;
    }
    let parts: Vec<&str> = raw
        .split(|c| TITLE_SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    match parts.len() {
        0 => None,
        1 => Some(parts[0].to_string()),
        _ => parts
            .iter()
            .max_by_key(|p| p.chars().count())
            .map(|p| (*p).to_string()),
    }
}

/// Site name guessed from the shortest `<title>` segment.
fn sitename_from_title_tag(doc: &Document) -> Option<String> {
    let raw = etree::text_of(&doc.select("head > title"));
    let parts: Vec<&str> = raw
        .split(|c| TITLE_SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() < 2 {
        return None;
    }
    parts
        .iter()
        .min_by_key(|p| p.chars().count())
        .map(|p| (*p).to_string())
}

/// Author from byline elements.
#[must_use]
pub fn extract_author(doc: &Document) -> Option<String> {
    let body = doc.select("body");
    let candidate = selectors::query(&body, meta_rules::author_rule)?;
    let text = etree::text_of(&candidate);
    if text.is_empty() || text.chars().count() > 120 {
        None
    } else {
        Some(text)
    }
}

/// Collect link texts from taxonomy containers.
fn collect_taxonomy(doc: &Document, rule: selectors::Rule) -> Vec<String> {
    let body = doc.select("body");
    let mut values: Vec<String> = Vec::new();
    for container in selectors::query_all(&body, rule) {
        for link in container.select("a").nodes() {
            let text = etree::text_of(&Selection::from(*link));
            if !text.is_empty() && text.chars().count() < 50 && !values.contains(&text) {
                values.push(text);
            }
        }
    }
    values
}

/// License from `rel="license"` anchors, else strict CC phrases in footer
/// anchor text.
#[must_use]
pub fn extract_license(doc: &Document) -> Option<String> {
    for node in doc.select(r#"a[rel="license"]"#).nodes() {
        let anchor = Selection::from(*node);
        if let Some(href) = dom::get_attribute(&anchor, "href") {
            if let Some(license) = parse_cc_path(&href) {
                return Some(license);
            }
        }
        let text = etree::text_of(&anchor);
        if !text.is_empty() {
            return Some(text);
        }
    }

    for node in doc.select("footer a, div[class*=\"footer\"] a, div[id*=\"footer\"] a").nodes() {
        let text = etree::text_of(&Selection::from(*node));
        if let Some(caps) = CC_LICENSE_TEXT.captures(&text) {
            let variant = caps[2].to_uppercase();
            return Some(match caps.get(3) {
                Some(version) => format!("CC {variant} {}", version.as_str()),
                None => format!("CC {variant}"),
            });
        }
    }
    None
}

fn parse_cc_path(href: &str) -> Option<String> {
    let caps = CC_LICENSE_PATH.captures(href)?;
    Some(format!("CC {} {}", caps[1].to_uppercase(), &caps[2]))
}
