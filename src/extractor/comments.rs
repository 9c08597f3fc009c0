//! Comment section extraction.
//!
//! Comments are extracted before the main body and their subtrees detached
//! from the DOM, so comment text can never leak into the article.

use crate::dedup;
use crate::dom::{self, Document, Selection};
use crate::etree;
use crate::link_density::link_density;
use crate::options::Options;
use crate::selectors::{self, comments as comment_rules};
use crate::tree::Node;

/// Maximum link density for a kept comment.
const MAX_COMMENT_LINK_DENSITY: f64 = 0.5;

/// Extract the comments body and detach comment sections from the tree.
///
/// Returns `None` when comments are disabled or nothing was found; the
/// detach still happens so the body walk cannot pick comment text up.
#[must_use]
pub fn extract_comments(doc: &Document, options: &Options) -> Option<Node> {
    let body = doc.select("body");
    let sections = selectors::query_all(&body, comment_rules::comments_rule);
    if sections.is_empty() {
        return None;
    }

    let mut comments = Node::new("body");
    for section in &sections {
        // Reply forms and per-comment chrome first
        for junk in selectors::query_all(section, comment_rules::comments_discard_rule) {
            junk.remove();
        }
        if options.comments {
            collect_comment_paragraphs(section, &mut comments, options);
        }
    }

    // Detach regardless of whether the text is kept
    for section in &sections {
        section.remove();
    }

    if !options.comments || comments.children.is_empty() {
        return None;
    }
    Some(comments)
}

fn collect_comment_paragraphs(section: &Selection, out: &mut Node, options: &Options) {
    for node in section.select("p, li, div").nodes() {
        let sel = Selection::from(*node);
        let tag = dom::tag_name(&sel).unwrap_or_default();
        let text = if tag == "div" {
            etree::own_text(&sel)
        } else {
            etree::text_of(&sel)
        };
        if text.is_empty() || text.chars().count() < 10 {
            continue;
        }
        if link_density(&sel) > MAX_COMMENT_LINK_DENSITY {
            continue;
        }
        if options.dedup && dedup::seen_too_often(&text, options) {
            continue;
        }
        out.push(Node::with_text("p", &text));
    }
}
