//! Unwanted-section pruning.
//!
//! Applied to a candidate body subtree before the extraction walk: discard
//! chrome by selector family, then delete link-dense containers that
//! survived the attribute-based passes.

use crate::dom::Selection;
use crate::link_density::{link_density, link_density_test_tables};
use crate::options::{Focus, Options};
use crate::selectors::{self, discard};

/// Link-density threshold for container deletion.
fn density_threshold(options: &Options) -> f64 {
    if options.focus == Focus::Precision {
        0.25
    } else {
        0.5
    }
}

/// Remove unwanted sections from a candidate subtree, in place.
pub fn prune_unwanted_sections(subtree: &Selection, options: &Options) {
    // Attribute-based families
    for sel in selectors::query_all(subtree, discard::overall_discard_rule) {
        sel.remove();
    }
    for sel in selectors::query_all(subtree, discard::hidden_rule) {
        sel.remove();
    }
    for sel in selectors::query_all(subtree, discard::author_discard_rule) {
        sel.remove();
    }
    if options.focus != Focus::Recall {
        for sel in selectors::query_all(subtree, discard::teaser_rule) {
            sel.remove();
        }
    }
    if options.focus == Focus::Precision {
        for sel in selectors::query_all(subtree, discard::precision_discard_rule) {
            sel.remove();
        }
    }

    // Caller-supplied prune selectors
    for css in &options.prune_selectors {
        subtree.select(css).remove();
    }

    // Link-density deletion; two passes since removals change the ratios
    let threshold = density_threshold(options);
    for _ in 0..2 {
        for node in subtree.select("div, list, ul, p").nodes().to_vec().into_iter().rev() {
            let sel = Selection::from(node);
            if sel.parent().is_empty() {
                continue;
            }
            let density = link_density(&sel);
            if density > threshold {
                sel.remove();
            }
        }
    }

    // Link-dense tables are navigation grids
    if options.focus == Focus::Precision || options.tables {
        for node in subtree.select("table").nodes().to_vec() {
            let sel = Selection::from(node);
            if link_density_test_tables(&sel) {
                sel.remove();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn discard_families_are_removed() {
        let doc = Document::from(
            r#"<html><body><div id="main">
            <div class="social-share">share me</div>
            <div class="related-posts">more</div>
            <p>Actual content stays in place.</p>
            </div></body></html>"#,
        );
        let subtree = doc.select("#main");
        prune_unwanted_sections(&subtree, &Options::default());
        assert!(doc.select(".social-share").is_empty());
        assert!(doc.select(".related-posts").is_empty());
        assert!(doc.select("p").exists());
    }

    #[test]
    fn hidden_elements_are_removed() {
        let doc = Document::from(
            r#"<html><body><div id="main">
            <div style="display:none">invisible</div>
            <p>Visible content.</p>
            </div></body></html>"#,
        );
        prune_unwanted_sections(&doc.select("#main"), &Options::default());
        assert_eq!(doc.select("div > div").length(), 0);
    }

    #[test]
    fn link_dense_divs_are_removed() {
        let doc = Document::from(
            r#"<html><body><div id="main">
            <div><a href="/a">one</a> <a href="/b">two</a> <a href="/c">three</a></div>
            <p>A paragraph with plenty of plain text and no links at all to dilute it.</p>
            </div></body></html>"#,
        );
        prune_unwanted_sections(&doc.select("#main"), &Options::default());
        assert!(doc.select("#main > div").is_empty());
        assert!(doc.select("p").exists());
    }

    #[test]
    fn teasers_survive_in_recall_mode() {
        let html = r#"<html><body><div id="main">
            <div class="teaser">read this next</div>
            <p>Body text.</p>
            </div></body></html>"#;

        let doc = Document::from(html);
        prune_unwanted_sections(&doc.select("#main"), &Options::default());
        assert!(doc.select(".teaser").is_empty());

        let doc = Document::from(html);
        let recall = Options {
            focus: Focus::Recall,
            ..Options::default()
        };
        prune_unwanted_sections(&doc.select("#main"), &recall);
        assert!(doc.select(".teaser").exists());
    }

    #[test]
    fn custom_prune_selectors_apply() {
        let doc = Document::from(
            r#"<html><body><div id="main"><div class="custom-junk">x</div><p>keep</p></div></body></html>"#,
        );
        let options = Options {
            prune_selectors: vec![".custom-junk".to_string()],
            ..Options::default()
        };
        prune_unwanted_sections(&doc.select("#main"), &options);
        assert!(doc.select(".custom-junk").is_empty());
    }
}
