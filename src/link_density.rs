//! Link density probes.
//!
//! Elements whose text is mostly anchor text are usually navigation, tag
//! clouds, or related-article boxes. These probes feed both the section
//! pruning passes and the readability scorer.

use crate::dom::{self, Selection};
use crate::options::{Focus, Options};

/// Collect heuristics on link text: (total length, short links, non-empty links).
fn collect_link_info(links: &Selection) -> (usize, usize, usize) {
    let mut link_length = 0;
    let mut n_short_links = 0;
    let mut n_non_empty_links = 0;

    for link in links.iter() {
        let text = link.text().to_string();
        let text_length = text.trim().chars().count();
        if text_length == 0 {
            continue;
        }
        link_length += text_length;
        if text_length < 10 {
            n_short_links += 1;
        }
        n_non_empty_links += 1;
    }

    (link_length, n_short_links, n_non_empty_links)
}

/// Ratio of descendant anchor text length to the element's own text length.
///
/// Returns 0 for empty elements.
#[must_use]
pub fn link_density(element: &Selection) -> f64 {
    let text_tendril = dom::text_content(element);
    let text_length = text_tendril.trim().chars().count();
    if text_length == 0 {
        return 0.0;
    }
    let (link_length, _, _) = collect_link_info(&element.select("a"));
    link_length as f64 / text_length as f64
}

/// Check whether a section should be removed because it is rich in links.
#[must_use]
pub fn link_density_test(element: &Selection, options: &Options) -> bool {
    let links = element.select("a");
    let n_links = links.length();
    if n_links == 0 {
        return false;
    }

    let text_tendril = dom::text_content(element);
    let text = text_tendril.trim();
    let text_length = text.chars().count();

    // Shortcut for a single dominating link
    if n_links == 1 {
        let threshold: usize = if options.focus == Focus::Precision { 10 } else { 100 };
        if let Some(link_node) = links.nodes().first() {
            let link = Selection::from(*link_node);
            let link_tendril = dom::text_content(&link);
            let link_text_length = link_tendril.trim().chars().count();
            if link_text_length > threshold
                && (link_text_length as f64) > (text_length as f64) * 0.9
            {
                return true;
            }
        }
    }

    let tag_name = dom::tag_name(element).unwrap_or_default();
    let has_next_sibling = dom::next_element_sibling(element).is_some();

    // Short elements get a tighter budget; paragraphs tighter still
    let limit_length: usize = if tag_name == "p" {
        if has_next_sibling { 30 } else { 60 }
    } else if has_next_sibling {
        100
    } else {
        300
    };

    if text_length < limit_length {
        let (link_length, n_short_links, n_non_empty_links) = collect_link_info(&links);

        if n_non_empty_links == 0 {
            return true;
        }
        if (link_length as f64) > (text_length as f64) * 0.8 {
            return true;
        }
        // Nav menus: most links are short labels
        if n_non_empty_links > 1 && (n_short_links as f64) / (n_non_empty_links as f64) > 0.8 {
            return true;
        }
    }

    false
}

/// Check whether a table should be removed because it is rich in links.
#[must_use]
pub fn link_density_test_tables(table: &Selection) -> bool {
    let links = table.select("a");
    if links.length() == 0 {
        return false;
    }

    let text_tendril = dom::text_content(table);
    let text_length = text_tendril.trim().chars().count();
    if text_length < 200 {
        return false;
    }

    let (link_length, _, n_non_empty_links) = collect_link_info(&links);
    if n_non_empty_links == 0 {
        return true;
    }

    if text_length < 1000 {
        (link_length as f64) > (text_length as f64) * 0.8
    } else {
        (link_length as f64) > (text_length as f64) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn nav_menu_is_flagged() {
        let html = r#"
        <div>
            <a href="/home">Home</a>
            <a href="/about">About</a>
            <a href="/contact">Contact</a>
            <a href="/blog">Blog</a>
        </div>
        "#;
        let doc = Document::from(html);
        assert!(link_density_test(&doc.select("div"), &Options::default()));
    }

    #[test]
    fn article_paragraph_with_one_link_passes() {
        let html = r#"
        <p>
            This is a long paragraph with substantial text content that discusses
            various topics. It contains a <a href="/link">single link</a> but the
            majority of the content is regular text, not links.
        </p>
        "#;
        let doc = Document::from(html);
        assert!(!link_density_test(&doc.select("p"), &Options::default()));
    }

    #[test]
    fn density_ratio_is_zero_without_links() {
        let doc = Document::from("<p>This paragraph has no links at all.</p>");
        assert!(link_density(&doc.select("p")) < f64::EPSILON);
    }

    #[test]
    fn density_ratio_is_high_for_anchor_only() {
        let doc = Document::from(r#"<div><a href="/x">everything is a link here</a></div>"#);
        assert!(link_density(&doc.select("div")) > 0.9);
    }

    #[test]
    fn data_table_without_links_passes() {
        let html = r#"
        <table>
            <tr><th>Name</th><th>Score</th><th>Date</th></tr>
            <tr><td>John Smith</td><td>95</td><td>2024-01-15</td></tr>
            <tr><td>Jane Doe</td><td>87</td><td>2024-01-16</td></tr>
        </table>
        "#;
        let doc = Document::from(html);
        assert!(!link_density_test_tables(&doc.select("table")));
    }
}
