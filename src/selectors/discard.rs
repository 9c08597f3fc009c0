//! Discard selector rules.
//!
//! Families of class/id/role/itemprop substrings marking site chrome that
//! never belongs to the article: navigation, sharing widgets, consent
//! banners, recommendation modules. Discard operations remove the union of
//! the matching families.

use crate::dom::{self, Selection};
use crate::selectors::matches_any;

/// The overall discard family: boilerplate in any focus mode.
pub const OVERALL_DISCARD: &[&str] = &[
    "footer",
    "related",
    "shar",
    "share",
    "social",
    "syndication",
    "embed",
    "newsletter",
    "subnav",
    "cookie",
    "tags",
    "sidebar",
    "banner",
    "meta",
    "menu",
    "nav",
    "navbar",
    "breadcrumb",
    "author",
    "byline",
    "rating",
    "widget",
    "outbrain",
    "taboola",
    "criteo",
    "consent",
    "modal-content",
    "permission",
    "most-popular",
    "most-read",
    "top-stories",
    "premium",
    "paid-content",
    "blurred",
    "popup",
    "comment",
    "disclaimer",
    "advert",
    "sponsor",
    "print-only",
    "pagination",
    "pager",
    "login",
    "signin",
    "sign-in",
    "signup",
    "sign-up",
    "subscribe",
    "subscription",
    "timestamp",
    "toolbar",
    "topbar",
    "carousel",
    "jumbotron",
    "akismet",
    "sociable",
    "viral",
    "user-info",
    "user-profile",
    "slick-",
    "swiper",
    "jp-post-flair",
];

/// Teasers and promo blocks, removed outside recall mode.
pub const TEASER: &[&str] = &[
    "teaser",
    "teaser-box",
    "article-teaser",
    "news-teaser",
    "read-more",
    "readmore",
    "more-link",
    "promo",
    "recommend",
    "trending",
    "upsell",
    "excerpt",
];

/// Extra removals in precision mode.
pub const PRECISION_DISCARD: &[&str] = &[
    "sidebar",
    "widget",
    "caption",
    "caption-text",
    "image-caption",
    "photo-caption",
    "wp-caption-text",
    "credit",
    "infobox",
    "factbox",
    "related-links",
    "sidebar-links",
    "article-bottom",
    "page-bottom",
    "site-header",
    "secondary",
    "supplemental",
];

/// Author boxes and bios, stripped from body text.
pub const AUTHOR_DISCARD: &[&str] = &[
    "author-bio",
    "author-box",
    "author-info",
    "about-author",
    "bio-box",
    "contributor",
];

/// Tags that are never discarded by attribute matching.
const PROTECTED_TAGS: &[&str] = &["html", "body", "article"];

fn discardable(sel: &Selection) -> bool {
    !dom::tag_name(sel).is_some_and(|t| PROTECTED_TAGS.contains(&t.as_str()))
}

/// Rule for the overall discard family.
#[must_use]
pub fn overall_discard_rule(sel: &Selection) -> bool {
    discardable(sel) && matches_any(sel, OVERALL_DISCARD)
}

/// Rule for teasers and promos.
#[must_use]
pub fn teaser_rule(sel: &Selection) -> bool {
    discardable(sel) && matches_any(sel, TEASER)
}

/// Rule for precision-mode extras.
#[must_use]
pub fn precision_discard_rule(sel: &Selection) -> bool {
    discardable(sel) && matches_any(sel, PRECISION_DISCARD)
}

/// Rule for author boxes.
#[must_use]
pub fn author_discard_rule(sel: &Selection) -> bool {
    discardable(sel) && matches_any(sel, AUTHOR_DISCARD)
}

/// Hidden elements: utility classes, inline styles, ARIA.
#[must_use]
pub fn hidden_rule(sel: &Selection) -> bool {
    if matches_any(sel, &["hidden", "hide-", "noprint"]) {
        return true;
    }
    if let Some(style) = dom::get_attribute(sel, "style") {
        let style = style.to_lowercase();
        if style.contains("display:none") || style.contains("display: none") {
            return true;
        }
    }
    dom::get_attribute(sel, "aria-hidden").as_deref() == Some("true")
}
