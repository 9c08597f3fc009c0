//! Compiled regex patterns used across the extraction pipeline.
//!
//! All patterns are compiled once at startup using `LazyLock`. The pattern
//! lists are data: they encode the scoring model and the metadata fallbacks
//! and are not meant to be tuned per call.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Scoring patterns (readability-style class weights)
// =============================================================================

/// class/id substrings that raise an element's score.
pub static POSITIVE_WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|body|content|entry|hentry|main|page|pagination|post|text|blog|story")
        .expect("POSITIVE_WEIGHT regex")
});

/// class/id substrings that lower an element's score.
pub static NEGATIVE_WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)button|combx|comment|com-|contact|figure|foot|footer|footnote|form|input|masthead|media|meta|outbrain|promo|related|scroll|shoutbox|sidebar|sponsor|shopping|tags|tool|widget")
        .expect("NEGATIVE_WEIGHT regex")
});

/// Elements removed wholesale in the pre-scoring pass.
pub static UNLIKELY_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)combx|comment|community|disqus|extra|foot|header|menu|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|tweet|twitter")
        .expect("UNLIKELY_CANDIDATES regex")
});

/// Exceptions that rescue an unlikely candidate.
pub static MAYBE_CANDIDATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|main|shadow").expect("MAYBE_CANDIDATES regex")
});

/// Block-level content inside a div; divs without any are misused as paragraphs.
pub static DIV_TO_P_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(a|blockquote|dl|div|img|ol|p|pre|table|ul)").expect("DIV_TO_P_ELEMENTS regex")
});

/// Video embeds kept as a "VIDEO" marker during sanitization.
pub static VIDEO_EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://(?:www\.)?(youtube|vimeo)\.com").expect("VIDEO_EMBED regex")
});

// =============================================================================
// Parser repair patterns
// =============================================================================

/// A malformed leading DOCTYPE that some generators emit.
pub static FAULTY_DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*!\s*DOCTYPE[^>]*/[^<]*>").expect("FAULTY_DOCTYPE regex"));

/// A self-closed `<html .../>` root tag.
pub static SELF_CLOSING_HTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<html([^>]*)/\s*>").expect("SELF_CLOSING_HTML regex"));

// =============================================================================
// Metadata patterns
// =============================================================================

/// Separators used between article title and site name in `<title>`.
pub const TITLE_SEPARATORS: &[char] = &[
    '–', '•', '·', '—', '|', '⁄', '*', '⋆', '~', '‹', '«', '<', '›', '»', '>', ':', '-',
];

/// ISO-style date: YYYY-MM-DD.
pub static DATE_YMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})").expect("DATE_YMD regex"));

/// US-style date: MM/DD/YYYY.
pub static DATE_MDY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("DATE_MDY regex"));

/// Textual date: D MMM YYYY.
pub static DATE_TEXTUAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\.?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{4})")
        .expect("DATE_TEXTUAL regex")
});

/// Creative Commons license path component.
pub static CC_LICENSE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(by-nc-nd|by-nc-sa|by-nc|by-nd|by-sa|by|zero)/([1-9]\.[0-9])")
        .expect("CC_LICENSE_PATH regex")
});

/// Strict CC phrases accepted from footer anchor text.
pub static CC_LICENSE_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(cc|creative commons)\s+(by(?:-nc)?(?:-nd|-sa)?|zero)\s*([1-9]\.[0-9])?\b")
        .expect("CC_LICENSE_TEXT regex")
});

// === Author normalization ===

/// Leading credit phrases stripped from author strings.
pub static AUTHOR_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(written by|words by|by|von)\s+").expect("AUTHOR_PREFIX regex")
});

/// Trailing digits stripped from author strings.
pub static AUTHOR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\d[\d\s./-]*$").expect("AUTHOR_DIGITS regex"));

/// Trailing prepositional phrases (publication, place, date) stripped from
/// author strings.
pub static AUTHOR_PREPOSITION_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(am|on|for|at|in|to|from|of|via|with|—|-|–)\s+.*$")
        .expect("AUTHOR_PREPOSITION_TAIL regex")
});

/// Social media handles and emoji noise inside author strings.
pub static AUTHOR_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[\w._-]+").expect("AUTHOR_HANDLE regex"));

/// E-mail addresses are not author names.
pub static EMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.+-]+@[\w-]+\.[\w.-]+$").expect("EMAIL_ADDRESS regex")
});

/// Non-word trailing characters on author names.
pub static AUTHOR_TRAILING_JUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w)\]]+$").expect("AUTHOR_TRAILING_JUNK regex"));

// === JSON-LD regex fallback (malformed JSON) ===

/// `"author": {"name": "..."}` shapes.
pub static JSONLD_AUTHOR_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""author"\s*:\s*\{[^}]*?"name"\s*:\s*"([^"]+)""#).expect("JSONLD_AUTHOR_OBJECT regex")
});

/// `"author": "..."` shapes.
pub static JSONLD_AUTHOR_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""author"\s*:\s*"([^"]+)""#).expect("JSONLD_AUTHOR_STRING regex")
});

/// `"publisher": {"name": "..."}` shapes.
pub static JSONLD_PUBLISHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""publisher"\s*:\s*\{[^}]*?"name"\s*:\s*"([^"]+)""#).expect("JSONLD_PUBLISHER regex")
});

/// `"articleSection": "..."` shapes.
pub static JSONLD_CATEGORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""articleSection"\s*:\s*"([^"]+)""#).expect("JSONLD_CATEGORY regex")
});

/// `"@type": "..."` shapes.
pub static JSONLD_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""@type"\s*:\s*"([^"]+)""#).expect("JSONLD_TYPE regex")
});

/// `"headline": "..."` shapes.
pub static JSONLD_HEADLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""headline"\s*:\s*"([^"]+)""#).expect("JSONLD_HEADLINE regex")
});

/// Schema.org context marker.
pub static SCHEMA_ORG_CONTEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://schema\.org").expect("SCHEMA_ORG_CONTEXT regex")
});

// =============================================================================
// Text cleanup
// =============================================================================

/// Paragraph ends with sentence punctuation.
pub static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.( |$)").expect("SENTENCE_END regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_weight_patterns() {
        assert!(POSITIVE_WEIGHT.is_match("article-body"));
        assert!(POSITIVE_WEIGHT.is_match("main-story"));
        assert!(NEGATIVE_WEIGHT.is_match("sidebar-widget"));
        assert!(NEGATIVE_WEIGHT.is_match("comment-form"));
        assert!(!NEGATIVE_WEIGHT.is_match("entry"));
    }

    #[test]
    fn unlikely_candidates_with_exceptions() {
        assert!(UNLIKELY_CANDIDATES.is_match("social-sidebar"));
        assert!(UNLIKELY_CANDIDATES.is_match("disqus_thread"));
        assert!(MAYBE_CANDIDATES.is_match("main-sidebar"));
        assert!(!MAYBE_CANDIDATES.is_match("footer-nav"));
    }

    #[test]
    fn doctype_repair_matches_malformed_only() {
        assert!(FAULTY_DOCTYPE.is_match("< !DOCTYPE html PUBLIC //W3C/ junk>"));
        assert!(!FAULTY_DOCTYPE.is_match("<!DOCTYPE html>"));
    }

    #[test]
    fn date_patterns() {
        assert!(DATE_YMD.is_match("published 2024-03-17 here"));
        assert!(DATE_MDY.is_match("on 3/17/2024"));
        assert!(DATE_TEXTUAL.is_match("17 March 2024"));
    }

    #[test]
    fn cc_license_path() {
        let caps = CC_LICENSE_PATH
            .captures("https://creativecommons.org/licenses/by-nc-sa/4.0/")
            .expect("should match");
        assert_eq!(&caps[1], "by-nc-sa");
        assert_eq!(&caps[2], "4.0");
    }

    #[test]
    fn author_cleanup_patterns() {
        assert!(AUTHOR_PREFIX.is_match("By Jane Doe"));
        assert!(AUTHOR_PREFIX.is_match("Written by Jane"));
        assert!(EMAIL_ADDRESS.is_match("jane@example.org"));
        assert!(AUTHOR_HANDLE.is_match("Jane @janedoe"));
    }
}
