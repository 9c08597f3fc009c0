//! Metadata selector rules: title, author, categories, tags.

use crate::dom::{self, Selection};
use crate::selectors::matches_any;

/// Substrings identifying a title element.
pub const TITLE: &[&str] = &[
    "post-title",
    "entry-title",
    "article-title",
    "articletitle",
    "headline",
    "page-title",
    "title",
];

/// Substrings identifying an author byline element.
pub const AUTHOR: &[&str] = &[
    "author-name",
    "authorname",
    "author",
    "byline",
    "writer",
    "submitted-by",
    "posted-by",
];

/// Substrings identifying category links.
pub const CATEGORY: &[&str] = &[
    "category",
    "categories",
    "post-category",
    "entry-category",
    "catlinks",
    "rubric",
    "section-name",
];

/// Substrings identifying tag links.
pub const TAG: &[&str] = &[
    "post-tag",
    "entry-tag",
    "tag-list",
    "taglist",
    "tagcloud",
    "tag-cloud",
    "tags",
    "keywords",
];

/// Rule matching candidate title elements.
#[must_use]
pub fn title_rule(sel: &Selection) -> bool {
    let tag = dom::tag_name(sel).unwrap_or_default();
    matches!(tag.as_str(), "h1" | "h2" | "div" | "span" | "p") && matches_any(sel, TITLE)
}

/// Rule matching author bylines.
#[must_use]
pub fn author_rule(sel: &Selection) -> bool {
    if dom::get_attribute(sel, "rel").as_deref() == Some("author") {
        return true;
    }
    if dom::get_attribute(sel, "itemprop").as_deref() == Some("author") {
        return true;
    }
    let tag = dom::tag_name(sel).unwrap_or_default();
    matches!(tag.as_str(), "a" | "address" | "div" | "p" | "span" | "strong")
        && matches_any(sel, AUTHOR)
}

/// Rule matching category links.
#[must_use]
pub fn category_rule(sel: &Selection) -> bool {
    matches_any(sel, CATEGORY)
}

/// Rule matching tag links.
#[must_use]
pub fn tag_rule(sel: &Selection) -> bool {
    matches_any(sel, TAG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn entry_title_matches() {
        let doc = parse(r#"<h1 class="entry-title">My Post</h1>"#);
        assert!(title_rule(&doc.select("h1")));
    }

    #[test]
    fn rel_author_matches() {
        let doc = parse(r#"<a rel="author" href="/about">Jane Doe</a>"#);
        assert!(author_rule(&doc.select("a")));
    }

    #[test]
    fn byline_span_matches() {
        let doc = parse(r#"<span class="byline">By Jane Doe</span>"#);
        assert!(author_rule(&doc.select("span")));
    }

    #[test]
    fn tag_cloud_matches() {
        let doc = parse(r#"<div class="tag-cloud"><a href="/t/rust">rust</a></div>"#);
        assert!(tag_rule(&doc.select("div")));
        assert!(!category_rule(&doc.select("div")));
    }
}
