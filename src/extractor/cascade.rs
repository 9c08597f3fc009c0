//! Cascade coordinator.
//!
//! Orders the extractors and arbitrates between their outputs: the primary
//! selector-based extraction first, the scoring fallback when the primary
//! looks thin or malformed, the paragraph classifier when both struggle,
//! and the baseline as the last rescue.

use crate::baseline;
use crate::cleaner;
use crate::convert;
use crate::dom::Document;
use crate::extractor::{extract_body, render_subtree};
use crate::options::{Focus, Options};
use crate::output::to_text;
use crate::paragraphs;
use crate::readability;
use crate::tree::Node;

/// Elements that should not survive sanitization; their presence in a
/// fallback result triggers the paragraph classifier.
const SANITIZED_ELEMENTS: &str = "aside, audio, button, fieldset, figure, footer, iframe, input, \
     label, link, nav, noindex, noscript, object, option, select, source, svg, time";

/// Run the extractor cascade and return the winning body with its text.
///
/// `doc` is the cleaned and converted tree the primary extractor runs on;
/// `backup` is a pristine clone of the parse for the fallbacks.
#[must_use]
pub fn determine_body(
    doc: &Document,
    backup: &Document,
    options: &Options,
    base_url: Option<&str>,
) -> (Node, String) {
    let body = extract_body(doc, options);
    let text = to_text(&body);
    let len = text.chars().count();

    // Comfortably above the threshold: recall mode trusts the primary
    if options.focus == Focus::Recall && len > 10 * options.min_extracted_size {
        return (body, text);
    }
    if options.fast {
        return rescue(body, text, backup, options);
    }

    let (mut chosen, mut chosen_text, mut needs_classifier) = (body, text, false);

    // Fallback renderings must not advance the repetition counters; only
    // the chosen output counts
    let fallback_options = Options {
        dedup: false,
        ..options.clone()
    };

    if let Some(scored_doc) = readability::extract(backup, options) {
        let residue = scored_doc.select(SANITIZED_ELEMENTS).exists();
        let scored_doc = cleaner::clean_document(scored_doc, options);
        convert::convert_tags(&scored_doc, options, base_url);
        let scored_body = render_subtree(&scored_doc.select("body"), &fallback_options);
        let scored_text = to_text(&scored_body);
        let scored_len = scored_text.chars().count();
        let primary_len = chosen_text.chars().count();

        if prefer_scored(&chosen, primary_len, &scored_body, scored_len, &scored_text, options) {
            tracing::debug!(primary_len, scored_len, "scoring fallback replaces primary output");
            chosen = scored_body;
            chosen_text = scored_text;
            needs_classifier = residue;
        }
    }

    let chosen_len = chosen_text.chars().count();
    if needs_classifier || chosen_len < options.min_extracted_size {
        let classified = paragraphs::classify(backup);
        let classified_text = to_text(&classified);
        let classified_len = classified_text.chars().count();
        // Substitute only on actual improvement, and never when the winner
        // dwarfs the classifier output
        if classified_len > chosen_len && chosen_len <= 4 * classified_len {
            tracing::debug!(chosen_len, classified_len, "paragraph classifier substitutes output");
            chosen = classified;
            chosen_text = classified_text;
        }
    }

    rescue(chosen, chosen_text, backup, options)
}

/// Decision ladder for replacing the primary output with the scored one.
fn prefer_scored(
    primary: &Node,
    primary_len: usize,
    scored: &Node,
    scored_len: usize,
    scored_text: &str,
    options: &Options,
) -> bool {
    // An output twice as long as the fallback is trusted outright
    if primary_len > 2 * scored_len {
        return false;
    }
    if primary_len == 0 && scored_len > 0 {
        return true;
    }
    if scored_len > 2 * primary_len && !looks_like_json(scored_text) {
        return true;
    }
    let floor = 2 * options.min_extracted_size;
    if primary.count_tag("p") == 0 && scored_len > floor {
        return true;
    }
    if primary.count_tag("table") > primary.count_tag("p") && scored_len > floor {
        return true;
    }
    if options.focus == Focus::Recall
        && !primary.has_tag("head")
        && has_subheading(scored)
        && scored_len > primary_len
    {
        return true;
    }
    false
}

fn has_subheading(body: &Node) -> bool {
    let mut found = false;
    body.walk(&mut |node| {
        if node.tag == "head"
            && matches!(node.attr("rend"), Some("h2" | "h3" | "h4"))
        {
            found = true;
        }
    });
    found
}

/// A page that serialized its app state into the DOM, not article text.
fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('{') || trimmed.contains("\"@context\"") || trimmed.contains("\"@type\"")
}

/// Baseline rescue for output still below the extraction threshold.
fn rescue(body: Node, text: String, backup: &Document, options: &Options) -> (Node, String) {
    if text.chars().count() >= options.min_extracted_size || options.focus == Focus::Precision {
        return (body, text);
    }
    let (baseline_body, baseline_text, baseline_len) = baseline::baseline(backup);
    if baseline_len > text.chars().count() {
        tracing::debug!(baseline_len, "baseline rescue replaces output");
        return (baseline_body, baseline_text);
    }
    (body, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn run(html: &str, options: &Options) -> (Node, String) {
        let backup = Document::from(html);
        let doc = cleaner::clean_document(dom::clone_document(&backup), options);
        convert::convert_tags(&doc, options, None);
        determine_body(&doc, &backup, options, None)
    }

    #[test]
    fn selector_marked_page_uses_primary() {
        let para = "Sentences of real article prose, with commas, going on long enough to count. ";
        let html = format!(
            r#"<html><body><div class="article-body">
            <p>{p}</p><p>{p}</p><p>{p}</p>
            </div></body></html>"#,
            p = para.repeat(3)
        );
        let (body, text) = run(&html, &Options::default());
        assert!(body.count_tag("p") >= 3);
        assert!(text.contains("real article prose"));
    }

    #[test]
    fn unmarked_page_is_still_extracted() {
        // No selector-family classes at all; prose lives in bare divs under
        // an unremarkable wrapper
        let para = "Plain prose paragraph with commas, conjunctions, and length to spare here. ";
        let html = format!(
            r#"<html><body><div id="wrapper"><div>
            <p>{p}</p><p>{p}</p><p>{p}</p><p>{p}</p>
            </div></div></body></html>"#,
            p = para.repeat(4)
        );
        let (_, text) = run(&html, &Options::default());
        assert!(text.contains("Plain prose paragraph"));
    }

    #[test]
    fn tiny_page_gets_baseline_rescue() {
        let html = r#"<html><body><article><p>Too short to pass the extraction floor but real.</p></article></body></html>"#;
        let (_, text) = run(html, &Options::default());
        assert!(text.contains("real"));
    }

    #[test]
    fn json_blob_detection() {
        assert!(looks_like_json(r#"{"@context":"https://schema.org"}"#));
        assert!(looks_like_json(r#"window state "@type" something"#));
        assert!(!looks_like_json("An ordinary paragraph of text."));
    }
}
