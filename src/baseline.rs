//! Baseline extractor.
//!
//! The extractor of last resort: no scoring, no selectors, just the most
//! obvious places article text can live. Four stages, first one yielding
//! more than 100 characters wins.

use std::collections::HashSet;

use serde_json::Value;

use crate::dom::{self, Document, Selection};
use crate::etree;
use crate::tree::Node;

/// Minimum character count for a stage to win.
const MIN_BASELINE_SIZE: usize = 100;

/// Paragraph-like tags harvested in stage three.
const PARAGRAPH_LIKE: &[&str] = &["blockquote", "code", "p", "pre", "q", "quote"];

/// Run the baseline cascade. Returns the body tree, the joined text, and
/// its character count.
#[must_use]
pub fn baseline(doc: &Document) -> (Node, String, usize) {
    if let Some(text) = json_ld_article_body(doc) {
        if text.chars().count() > MIN_BASELINE_SIZE {
            return wrap(&[text]);
        }
    }

    let article_texts: Vec<String> = doc
        .select("article")
        .nodes()
        .iter()
        .map(|node| etree::text_of(&Selection::from(*node)))
        .filter(|t| t.chars().count() > MIN_BASELINE_SIZE)
        .collect();
    if !article_texts.is_empty() {
        return wrap(&article_texts);
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut paragraphs: Vec<String> = Vec::new();
    for node in doc.select(&PARAGRAPH_LIKE.join(", ")).nodes() {
        let text = etree::text_of(&Selection::from(*node));
        if !text.is_empty() && seen.insert(text.clone()) {
            paragraphs.push(text);
        }
    }
    let total: usize = paragraphs.iter().map(|p| p.chars().count()).sum();
    if total > MIN_BASELINE_SIZE {
        return wrap(&paragraphs);
    }

    // Whole-body text, line by line
    let body = doc.select("body");
    let raw = dom::text_content(&body);
    let lines: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
        .collect();
    if !lines.is_empty() {
        return wrap(&lines);
    }

    let fallback = etree::trim(&raw);
    if fallback.is_empty() {
        (Node::new("body"), String::new(), 0)
    } else {
        wrap(&[fallback])
    }
}

fn wrap(paragraphs: &[impl AsRef<str>]) -> (Node, String, usize) {
    let mut body = Node::new("body");
    for p in paragraphs {
        body.push(Node::with_text("p", p.as_ref()));
    }
    let text = paragraphs
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    let len = text.chars().count();
    (body, text, len)
}

/// Concatenate `articleBody` values from every JSON-LD script that decodes.
#[must_use]
pub fn json_ld_article_body(doc: &Document) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for node in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let script = Selection::from(*node);
        let raw = dom::text_content(&script);
        if raw.trim().is_empty() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(&raw) else {
            continue;
        };
        collect_article_bodies(&value, &mut parts);
    }
    if parts.is_empty() {
        return None;
    }
    let combined = parts.join("\n");
    // Some sites embed markup inside articleBody
    if combined.contains("<p>") {
        let inner = Document::from(format!("<html><body>{combined}</body></html>"));
        return Some(etree::text_of(&inner.select("body")));
    }
    Some(etree::trim(&combined))
}

fn collect_article_bodies(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                if key.eq_ignore_ascii_case("articlebody") {
                    if let Value::String(s) = val {
                        if !s.trim().is_empty() {
                            out.push(s.clone());
                        }
                    }
                } else {
                    collect_article_bodies(val, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_article_bodies(item, out);
            }
        }
        _ => {}
    }
}
