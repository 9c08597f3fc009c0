//! Main body selector rules.
//!
//! Three tiers of class/id/role/itemprop substring patterns identifying the
//! article body container, ordered from most to least specific. The first
//! tier that yields a match wins; structural fallbacks (`<article>`,
//! `role="main"`, `<main>`) live in the extractor.

use crate::dom::{self, Selection};
use crate::selectors::{matches_any, Rule};

/// Container tags eligible as a body root.
const BODY_TAGS: &[&str] = &["article", "div", "main", "section", "td"];

/// Tier 1: explicit article body markers.
pub const BODY_PRIMARY: &[&str] = &[
    "post-text",
    "post-body",
    "post-entry",
    "postentry",
    "post-content",
    "post_content",
    "postcontent",
    "entry-content",
    "article-content",
    "articlecontent",
    "article-body",
    "articlebody",
    "article__content",
    "article__body",
    "article-text",
    "articletext",
    "page-content",
    "text-content",
    "body-text",
    "bodytext",
    "art-content",
    "snippet-body",
    "blog-content",
    "blogcontent",
    "blogpostbody",
    "blogpostcontent",
    "wysiwyg",
    "mw-parser-output",
    "mw-content-text",
];

/// Tier 2: story and legacy CMS markers.
pub const BODY_SECONDARY: &[&str] = &[
    "storycontent",
    "story-content",
    "story-body",
    "storybody",
    "postarea",
    "art-postcontent",
    "post-bodycopy",
    "theme-content",
    "section-content",
    "single-content",
    "single-post",
    "main-column",
    "wpb_text_column",
    "field-body",
    "fulltext",
];

/// Tier 3: generic content markers.
pub const BODY_TERTIARY: &[&str] = &["content-main", "content_main", "content-body", "main-content"];

fn has_body_tag(sel: &Selection) -> bool {
    dom::tag_name(sel).is_some_and(|t| BODY_TAGS.contains(&t.as_str()))
}

/// Tier 1 rule.
#[must_use]
pub fn body_rule_primary(sel: &Selection) -> bool {
    has_body_tag(sel) && matches_any(sel, BODY_PRIMARY)
}

/// Tier 2 rule.
#[must_use]
pub fn body_rule_secondary(sel: &Selection) -> bool {
    has_body_tag(sel) && matches_any(sel, BODY_SECONDARY)
}

/// Tier 3 rule.
#[must_use]
pub fn body_rule_tertiary(sel: &Selection) -> bool {
    has_body_tag(sel) && matches_any(sel, BODY_TERTIARY)
}

/// Body selector rules in priority order; first family to match wins.
pub static BODY_RULES: &[Rule] = &[body_rule_primary, body_rule_secondary, body_rule_tertiary];
