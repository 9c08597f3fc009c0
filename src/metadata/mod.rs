//! Metadata extraction.
//!
//! Fields are filled by a fixed priority cascade, each step touching only
//! what is still missing: OpenGraph, standard meta tags, JSON-LD, DOM
//! heuristics, then URL/license/date post-processing and author cleanup.

pub mod dom_heuristics;
pub mod json_ld;
pub mod meta_tags;

use crate::dom::Document;
use crate::options::Options;
use crate::patterns::{
    AUTHOR_DIGITS, AUTHOR_HANDLE, AUTHOR_PREFIX, AUTHOR_PREPOSITION_TAIL, AUTHOR_TRAILING_JUNK,
    EMAIL_ADDRESS,
};
use crate::url_utils;

/// Metadata extracted from an HTML document.
///
/// All fields are optional: most documents declare only a subset.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Page title.
    pub title: Option<String>,
    /// Author name(s), normalized and `;`-joined.
    pub author: Option<String>,
    /// Canonical URL.
    pub url: Option<String>,
    /// Hostname derived from the URL.
    pub hostname: Option<String>,
    /// Page description.
    pub description: Option<String>,
    /// Site name.
    pub sitename: Option<String>,
    /// Publication date, normalized to `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Content categories.
    pub categories: Vec<String>,
    /// Content tags.
    pub tags: Vec<String>,
    /// License string (e.g. "CC BY-SA 4.0").
    pub license: Option<String>,
    /// Main image URL.
    pub image: Option<String>,
    /// Page type (og:type).
    pub pagetype: Option<String>,
    /// Declared document language.
    pub language: Option<String>,
}

/// Extract all metadata from a document.
#[must_use]
pub fn extract_metadata(doc: &Document, options: &Options) -> Metadata {
    let mut metadata = Metadata::default();

    // 1. OpenGraph
    meta_tags::examine_open_graph(doc, &mut metadata);
    // 2. Standard meta tags
    meta_tags::examine_meta_tags(doc, &mut metadata);
    // 3. JSON-LD structured data
    json_ld::examine_json_ld(doc, &mut metadata);
    // 4. DOM heuristics
    dom_heuristics::examine_dom(doc, &mut metadata);

    // 5./6. Canonical URL and hostname
    let default_url = options.url.as_deref().or(metadata.url.as_deref());
    if let Some(url) = url_utils::canonical_url(doc, default_url) {
        metadata.hostname = url_utils::extract_hostname(&url);
        metadata.url = Some(url);
    }

    // 7. License
    if metadata.license.is_none() {
        metadata.license = dom_heuristics::extract_license(doc);
    }

    // 8. Date
    if metadata.date.is_none() {
        metadata.date = meta_tags::extract_date(doc);
    }

    // Declared language
    if metadata.language.is_none() {
        metadata.language = declared_language(doc);
    }

    // 9. Author normalization and blacklist
    if let Some(raw) = metadata.author.take() {
        metadata.author = normalize_authors(&raw, options);
    }

    metadata
}

/// Language declared by the document, if any: content-language meta,
/// og:locale, then `<html lang>`.
#[must_use]
pub fn declared_language(doc: &Document) -> Option<String> {
    let candidates = [
        doc.select(r#"meta[http-equiv="content-language"]"#).attr("content"),
        doc.select(r#"meta[property="og:locale"]"#).attr("content"),
        doc.select("html").attr("lang"),
    ];
    for candidate in candidates.into_iter().flatten() {
        let code: String = candidate
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_lowercase();
        if !code.is_empty() {
            return Some(code);
        }
    }
    None
}

/// Check the declared language against the target. Absence passes; a
/// disagreeing declaration rejects.
#[must_use]
pub fn language_gate(doc: &Document, options: &Options) -> bool {
    let Some(target) = options.target_language.as_deref() else {
        return true;
    };
    match declared_language(doc) {
        Some(declared) => declared.eq_ignore_ascii_case(target),
        None => true,
    }
}

/// Clean up a raw author string: split multi-author lists, strip credit
/// prefixes, handles, trailing junk, then filter against the blacklist.
#[must_use]
pub fn normalize_authors(raw: &str, options: &Options) -> Option<String> {
    let mut cleaned: Vec<String> = Vec::new();

    let split = raw
        .replace(" and ", "/")
        .replace(" und ", "/");
    for part in split.split(['/', ';', ',', '|', '&']) {
        let Some(author) = normalize_single_author(part) else {
            continue;
        };
        let lowered = author.to_lowercase();
        if options
            .author_blacklist
            .iter()
            .any(|b| b.to_lowercase() == lowered)
        {
            continue;
        }
        if !cleaned.contains(&author) {
            cleaned.push(author);
        }
    }

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join("; "))
    }
}

fn normalize_single_author(part: &str) -> Option<String> {
    let mut author = part.trim().to_string();
    if author.is_empty() || author.to_lowercase().starts_with("http") {
        return None;
    }
    if EMAIL_ADDRESS.is_match(&author) {
        return None;
    }

    author = AUTHOR_HANDLE.replace_all(&author, "").into_owned();
    author = author.chars().filter(|c| !is_emoji(*c)).collect();
    author = AUTHOR_PREFIX.replace(&author, "").into_owned();
    author = AUTHOR_PREPOSITION_TAIL.replace(&author, "").into_owned();
    author = AUTHOR_DIGITS.replace(&author, "").into_owned();
    author = AUTHOR_TRAILING_JUNK.replace(&author, "").into_owned();
    let author = author.trim();

    if author.is_empty() {
        return None;
    }
    // Single tokens are handles or site names, not people
    if !author.contains(' ') {
        return None;
    }
    // Runs this long are slogans, not names
    if author.chars().count() >= 50 {
        return None;
    }

    Some(title_case_if_flat(author))
}

fn is_emoji(c: char) -> bool {
    matches!(c,
        '\u{1F300}'..='\u{1FAFF}' | '\u{2600}'..='\u{27BF}' | '\u{FE0F}' | '\u{200D}'
    )
}

/// Title-case a name that has no internal capitals.
fn title_case_if_flat(name: &str) -> String {
    let has_internal_capital = name.chars().skip(1).any(char::is_uppercase);
    if has_internal_capital {
        return name.to_string();
    }
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
