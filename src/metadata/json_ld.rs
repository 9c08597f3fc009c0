//! JSON-LD metadata parsing.
//!
//! Extracts Schema.org structured data from `application/ld+json` scripts.
//! Scripts that fail to decode (truncated, trailing commas, embedded HTML)
//! go through a regex fallback that still recovers the common fields.

use serde_json::Value;

use crate::dom::{self, Document, Selection};
use crate::metadata::Metadata;
use crate::patterns::{
    JSONLD_AUTHOR_OBJECT, JSONLD_AUTHOR_STRING, JSONLD_CATEGORY, JSONLD_HEADLINE,
    JSONLD_PUBLISHER, JSONLD_TYPE, SCHEMA_ORG_CONTEXT,
};

/// Schema types treated as articles.
const ARTICLE_TYPES: &[&str] = &[
    "Article",
    "NewsArticle",
    "BlogPosting",
    "ScholarlyArticle",
    "SocialMediaPosting",
    "LiveBlogPosting",
    "Report",
    "TechArticle",
];

/// Schema types treated as page descriptors.
const PAGE_TYPES: &[&str] = &["WebPage", "WebSite", "ItemPage", "AboutPage", "FAQPage"];

/// Fill missing metadata fields from JSON-LD scripts.
pub fn examine_json_ld(doc: &Document, metadata: &mut Metadata) {
    for node in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let script = Selection::from(*node);
        let raw = dom::text_content(&script).to_string();
        if raw.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => examine_value(&value, metadata),
            Err(_) => {
                tracing::debug!("malformed JSON-LD, applying regex fallback");
                regex_fallback(&raw, metadata);
            }
        }
    }
}

fn context_is_schema_org(value: &Value) -> bool {
    match value.get("@context") {
        Some(Value::String(s)) => SCHEMA_ORG_CONTEXT.is_match(s),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .any(|s| SCHEMA_ORG_CONTEXT.is_match(s)),
        // Nested nodes inherit the top-level context
        _ => true,
    }
}

fn examine_value(value: &Value, metadata: &mut Metadata) {
    match value {
        Value::Array(items) => {
            for item in items {
                examine_value(item, metadata);
            }
        }
        Value::Object(map) => {
            if !context_is_schema_org(value) {
                return;
            }
            // Graph containers wrap the actual nodes
            for key in ["@graph", "liveBlogUpdate"] {
                if let Some(Value::Array(items)) = map.get(key) {
                    for item in items {
                        examine_value(item, metadata);
                    }
                }
            }
            examine_node(map, metadata);
        }
        _ => {}
    }
}

fn type_names(map: &serde_json::Map<String, Value>) -> Vec<String> {
    match map.get("@type") {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(ToString::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn examine_node(map: &serde_json::Map<String, Value>, metadata: &mut Metadata) {
    let types = type_names(map);
    let is_article = types.iter().any(|t| ARTICLE_TYPES.contains(&t.as_str()));
    let is_page = types.iter().any(|t| PAGE_TYPES.contains(&t.as_str()));

    if metadata.author.is_none() {
        if let Some(author) = map.get("author").and_then(author_names) {
            metadata.author = Some(author);
        }
    }

    if is_article || is_page || types.is_empty() {
        if metadata.title.is_none() {
            if let Some(title) = string_field(map, "headline").or_else(|| string_field(map, "name"))
            {
                metadata.title = Some(title);
            }
        }
        if metadata.description.is_none() {
            if let Some(description) = string_field(map, "description") {
                metadata.description = Some(description);
            }
        }
        if metadata.date.is_none() {
            if let Some(raw) = string_field(map, "datePublished") {
                metadata.date = crate::metadata::meta_tags::normalize_date(&raw);
            }
        }
        if metadata.categories.is_empty() {
            metadata.categories = list_field(map, "articleSection");
        }
        if metadata.sitename.is_none() {
            if let Some(Value::Object(publisher)) = map.get("publisher") {
                if let Some(name) = string_field(publisher, "name") {
                    metadata.sitename = Some(name);
                }
            }
        }
    }

    // Standalone Person / Organization nodes
    if types.iter().any(|t| t == "Person") && metadata.author.is_none() {
        if let Some(name) = person_name(map) {
            metadata.author = Some(name);
        }
    }
    if types.iter().any(|t| t == "Organization") && metadata.sitename.is_none() {
        if let Some(name) = string_field(map, "name") {
            metadata.sitename = Some(name);
        }
    }
}

fn string_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn list_field(map: &serde_json::Map<String, Value>, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Author field shapes: a plain string, a Person object, or an array of
/// either. Person names may be split across given/additional/family parts.
fn author_names(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => person_name(map),
        Value::Array(items) => {
            let names: Vec<String> = items.iter().filter_map(author_names).collect();
            if names.is_empty() {
                None
            } else {
                Some(names.join("; "))
            }
        }
        _ => None,
    }
}

fn person_name(map: &serde_json::Map<String, Value>) -> Option<String> {
    if let Some(name) = string_field(map, "name") {
        return Some(name);
    }
    let parts: Vec<String> = ["givenName", "additionalName", "familyName"]
        .iter()
        .filter_map(|key| string_field(map, key))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Recover fields from JSON-LD that does not decode.
fn regex_fallback(raw: &str, metadata: &mut Metadata) {
    if metadata.author.is_none() {
        metadata.author = JSONLD_AUTHOR_OBJECT
            .captures(raw)
            .or_else(|| JSONLD_AUTHOR_STRING.captures(raw))
            .map(|caps| caps[1].to_string());
    }
    if metadata.sitename.is_none() {
        metadata.sitename = JSONLD_PUBLISHER.captures(raw).map(|caps| caps[1].to_string());
    }
    if metadata.categories.is_empty() {
        if let Some(caps) = JSONLD_CATEGORY.captures(raw) {
            metadata.categories = vec![caps[1].to_string()];
        }
    }
    if metadata.title.is_none() {
        metadata.title = JSONLD_HEADLINE.captures(raw).map(|caps| caps[1].to_string());
    }
    if metadata.pagetype.is_none() {
        metadata.pagetype = JSONLD_TYPE.captures(raw).map(|caps| caps[1].to_string());
    }
}
