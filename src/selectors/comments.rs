//! Comment section selector rules.

use crate::dom::{self, Selection};
use crate::selectors::matches_any;

/// Substrings identifying a comment section container.
pub const COMMENTS: &[&str] = &[
    "commentlist",
    "comment-list",
    "comments-content",
    "comment-content",
    "post-comments",
    "disqus_thread",
    "dsq-comments",
    "comol",
    "comment-",
];

/// Substrings discarded inside a comment section (reply forms, per-comment
/// chrome, pagination).
pub const COMMENTS_DISCARD: &[&str] = &[
    "comment-form",
    "comment-reply",
    "reply-form",
    "respond",
    "comment-meta",
    "comment-nav",
    "comments-pagination",
    "comment-subscription",
];

const COMMENT_TAGS: &[&str] = &["div", "section", "ol", "ul", "dl", "aside"];

/// Rule matching a comment section container.
#[must_use]
pub fn comments_rule(sel: &Selection) -> bool {
    dom::tag_name(sel).is_some_and(|t| COMMENT_TAGS.contains(&t.as_str()))
        && matches_any(sel, COMMENTS)
}

/// Rule matching chrome to discard inside a comment section.
#[must_use]
pub fn comments_discard_rule(sel: &Selection) -> bool {
    matches_any(sel, COMMENTS_DISCARD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn matches_disqus_thread() {
        let doc = parse(r#"<div id="disqus_thread"></div>"#);
        assert!(comments_rule(&doc.select("div")));
    }

    #[test]
    fn matches_wordpress_comment_list() {
        let doc = parse(r#"<ol class="commentlist"><li>hi</li></ol>"#);
        assert!(comments_rule(&doc.select("ol")));
    }

    #[test]
    fn ignores_plain_content() {
        let doc = parse(r#"<div class="article-body">x</div>"#);
        assert!(!comments_rule(&doc.select("div")));
    }

    #[test]
    fn reply_form_is_discarded() {
        let doc = parse(r#"<div class="comment-reply-form">x</div>"#);
        assert!(comments_discard_rule(&doc.select("div")));
    }
}
