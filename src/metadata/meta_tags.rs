//! Meta tag extraction: OpenGraph, named metas, date metas.

use crate::dom::{self, Document, Selection};
use crate::metadata::Metadata;
use crate::patterns::{DATE_MDY, DATE_TEXTUAL, DATE_YMD};
use crate::url_utils;

/// Meta names accepted as author sources.
const AUTHOR_METAS: &[&str] = &[
    "author",
    "article:author",
    "citation_author",
    "creator",
    "dc.creator",
    "dc:creator",
    "dcterms.creator",
    "dcsext.author",
    "parsely-author",
    "rbauthors",
    "sailthru.author",
    "byl",
    "atc-metaauthor",
];

/// Meta names accepted as description sources.
const DESCRIPTION_METAS: &[&str] = &[
    "description",
    "dc.description",
    "dcterms.description",
    "sailthru.description",
    "twitter:description",
];

/// Meta names accepted as sitename backups.
const SITENAME_METAS: &[&str] = &["twitter:site", "application-name"];

/// Meta names accepted as title sources.
const TITLE_METAS: &[&str] = &[
    "citation_title",
    "dc.title",
    "parsely-title",
    "sailthru.title",
    "headline",
    "twitter:title",
    "title",
];

/// Meta names accepted as tag sources.
const TAG_METAS: &[&str] = &[
    "article:tag",
    "keywords",
    "parsely-tags",
    "citation_keywords",
    "dcterms.subject",
    "shareaholic:keywords",
];

/// Meta names carrying a publication date.
const DATE_METAS: &[&str] = &["article:published_time", "dc.date", "og:updated_time"];

/// Value of a meta element regardless of whether it uses `name`,
/// `property`, or `itemprop`. Key comparison is case-insensitive since
/// Dublin Core names appear in the wild in both cases.
fn meta_value(doc: &Document, key: &str) -> Option<String> {
    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);
        let matched = ["name", "property", "itemprop"].iter().any(|attr| {
            dom::get_attribute(&meta, attr).is_some_and(|v| v.eq_ignore_ascii_case(key))
        });
        if !matched {
            continue;
        }
        if let Some(content) = dom::get_attribute(&meta, "content") {
            let content = content.trim().to_string();
            if !content.is_empty() {
                return Some(content);
            }
        }
    }
    None
}

/// Fill missing fields from OpenGraph properties.
pub fn examine_open_graph(doc: &Document, metadata: &mut Metadata) {
    for node in doc.select("meta[property^=\"og:\"]").nodes() {
        let meta = Selection::from(*node);
        let property = dom::get_attribute(&meta, "property").unwrap_or_default();
        let content = dom::get_attribute(&meta, "content").unwrap_or_default();
        let content = content.trim();
        if content.is_empty() {
            continue;
        }
        match property.as_str() {
            "og:title" if metadata.title.is_none() => {
                metadata.title = Some(content.to_string());
            }
            "og:description" if metadata.description.is_none() => {
                metadata.description = Some(content.to_string());
            }
            "og:site_name" if metadata.sitename.is_none() => {
                metadata.sitename = Some(content.to_string());
            }
            "og:image" | "og:image:url" | "og:image:secure_url" if metadata.image.is_none() => {
                metadata.image = Some(content.to_string());
            }
            "og:type" if metadata.pagetype.is_none() => {
                metadata.pagetype = Some(content.to_string());
            }
            "og:url" if metadata.url.is_none() && url_utils::is_valid_url(content) => {
                metadata.url = Some(content.to_string());
            }
            "og:author" | "og:article:author" if metadata.author.is_none() => {
                metadata.author = Some(content.to_string());
            }
            _ => {}
        }
    }
}

/// Fill missing fields from standard named meta tags.
pub fn examine_meta_tags(doc: &Document, metadata: &mut Metadata) {
    if metadata.author.is_none() {
        metadata.author = AUTHOR_METAS.iter().find_map(|key| meta_value(doc, key));
    }
    if metadata.description.is_none() {
        metadata.description = DESCRIPTION_METAS.iter().find_map(|key| meta_value(doc, key));
    }
    if metadata.sitename.is_none() {
        metadata.sitename = SITENAME_METAS
            .iter()
            .find_map(|key| meta_value(doc, key))
            .map(|name| name.trim_start_matches('@').to_string());
    }
    if metadata.title.is_none() {
        metadata.title = TITLE_METAS.iter().find_map(|key| meta_value(doc, key));
    }
    if metadata.tags.is_empty() {
        if let Some(raw) = TAG_METAS.iter().find_map(|key| meta_value(doc, key)) {
            metadata.tags = split_list(&raw);
        }
    }
    if metadata.image.is_none() {
        metadata.image = meta_value(doc, "twitter:image")
            .or_else(|| meta_value(doc, "twitter:image:src"));
    }
    if metadata.url.is_none() {
        if let Some(url) = meta_value(doc, "twitter:url") {
            if url_utils::is_valid_url(&url) {
                metadata.url = Some(url);
            }
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Publication date from well-known metas, `<time>` elements, or date-like
/// patterns in text, normalized to `YYYY-MM-DD`.
#[must_use]
pub fn extract_date(doc: &Document) -> Option<String> {
    for key in DATE_METAS {
        if let Some(value) = meta_value(doc, key) {
            if let Some(date) = normalize_date(&value) {
                return Some(date);
            }
        }
    }

    for node in doc.select("time").nodes() {
        let time = Selection::from(*node);
        let candidate = dom::get_attribute(&time, "datetime")
            .or_else(|| dom::get_attribute(&time, "pubdate"))
            .unwrap_or_else(|| dom::text_content(&time).to_string());
        if let Some(date) = normalize_date(&candidate) {
            return Some(date);
        }
    }

    // Last resort: a date-like pattern anywhere in the page text
    let text = dom::text_content(&doc.select("body"));
    normalize_date(&text)
}

/// Normalize the first recognizable date in a string to `YYYY-MM-DD`.
#[must_use]
pub fn normalize_date(raw: &str) -> Option<String> {
    if let Some(caps) = DATE_YMD.captures(raw) {
        return Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]));
    }
    if let Some(caps) = DATE_MDY.captures(raw) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            return Some(format!("{}-{month:02}-{day:02}", &caps[3]));
        }
    }
    if let Some(caps) = DATE_TEXTUAL.captures(raw) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        if (1..=31).contains(&day) {
            return Some(format!("{}-{month:02}-{day:02}", &caps[3]));
        }
    }
    None
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
