//! Scoring-based fallback extractor.
//!
//! A port of the arc90 readability algorithm: score candidate containers
//! from the paragraphs they hold, pick the best one, pull in qualifying
//! siblings, then sanitize the result. Used when the selector-based primary
//! extraction comes up thin.

use std::collections::HashMap;

use crate::dom::{self, Document, NodeId, Selection};
use crate::etree;
use crate::link_density::link_density;
use crate::options::Options;
use crate::patterns::{
    DIV_TO_P_ELEMENTS, MAYBE_CANDIDATES, NEGATIVE_WEIGHT, POSITIVE_WEIGHT, SENTENCE_END,
    UNLIKELY_CANDIDATES, VIDEO_EMBED,
};

/// Minimum paragraph text length to contribute to its ancestors.
const MIN_TEXT_LENGTH: usize = 25;

/// Minimum score a sibling needs, as a fraction of the best score.
const SIBLING_SCORE_FRACTION: f64 = 0.2;

/// Tags whose paragraph content drives candidate scoring.
const PARAGRAPH_TAGS: &[&str] = &["p", "pre", "td"];

/// Tags subject to conditional cleaning during sanitization.
const CONDITIONAL_TAGS: &[&str] = &["table", "ul", "div", "aside", "header", "footer", "section"];

/// Extract the main article with the scoring algorithm.
///
/// Returns a fresh document whose `<body>` holds a single `<div>` with the
/// collected article, or `None` when no candidate scored at all.
#[must_use]
pub fn extract(source: &Document, options: &Options) -> Option<Document> {
    let article = run(source, options, true);
    match article {
        Some(doc) if !etree::text_of(&doc.select("body")).is_empty() => Some(doc),
        // The unlikely-candidate pre-pass can hollow out non-standard pages;
        // retry once without it
        _ => run(source, options, false),
    }
}

fn run(source: &Document, options: &Options, ruthless: bool) -> Option<Document> {
    let doc = dom::clone_document(source);
    doc.select("script, style, noscript, template").remove();

    if ruthless {
        remove_unlikely_candidates(&doc);
    }
    transform_misused_divs(&doc);

    let scores = score_paragraphs(&doc);
    let (best_id, best_score) = scores
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(id, score)| (*id, *score))?;

    let article_html = collect_siblings(&doc, &scores, best_id, best_score)?;
    let article = Document::from(format!("<html><body><div>{article_html}</div></body></html>"));
    sanitize(&article, options);
    Some(article)
}

/// Remove elements whose combined class+id matches the unlikely pattern,
/// unless rescued by the inclusion pattern.
fn remove_unlikely_candidates(doc: &Document) {
    for node in doc.select("*").nodes().to_vec() {
        let sel = Selection::from(node);
        let tag = dom::tag_name(&sel).unwrap_or_default();
        if matches!(tag.as_str(), "html" | "body") {
            continue;
        }
        let id_class = crate::selectors::id_class(&sel);
        if id_class.trim().is_empty() {
            continue;
        }
        if UNLIKELY_CANDIDATES.is_match(&id_class) && !MAYBE_CANDIDATES.is_match(&id_class) {
            sel.remove();
        }
    }
}

/// Divs that contain no block-level markup are paragraphs wearing the
/// wrong tag.
fn transform_misused_divs(doc: &Document) {
    for node in doc.select("div").nodes().to_vec() {
        let sel = Selection::from(node);
        let inner = dom::inner_html(&sel);
        if !DIV_TO_P_ELEMENTS.is_match(&inner) {
            dom::rename(&sel, "p");
        }
    }
}

/// Class/id substring weight: ±25 per matching attribute.
#[must_use]
pub fn class_weight(sel: &Selection) -> f64 {
    let mut weight = 0.0;
    for value in [dom::class_name(sel), dom::id(sel)].into_iter().flatten() {
        if POSITIVE_WEIGHT.is_match(&value) {
            weight += 25.0;
        }
        if NEGATIVE_WEIGHT.is_match(&value) {
            weight -= 25.0;
        }
    }
    weight
}

/// Initial score for a freshly-seen candidate: class weight plus tag seed.
fn seed_score(sel: &Selection) -> f64 {
    let tag = dom::tag_name(sel).unwrap_or_default();
    let seed = match tag.as_str() {
        "div" | "article" => 5.0,
        "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" | "aside" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "header" | "footer" | "nav" => -5.0,
        _ => 0.0,
    };
    class_weight(sel) + seed
}

/// Propagate paragraph evidence to parents and grandparents, then scale by
/// link density.
fn score_paragraphs(doc: &Document) -> HashMap<NodeId, f64> {
    let mut scores: HashMap<NodeId, f64> = HashMap::new();
    let selector = PARAGRAPH_TAGS.join(", ");

    for node in doc.select(&selector).nodes().to_vec() {
        let paragraph = Selection::from(node);
        let text = etree::text_of(&paragraph);
        if text.chars().count() < MIN_TEXT_LENGTH {
            continue;
        }

        let parent = paragraph.parent();
        if parent.is_empty() {
            continue;
        }
        let grandparent = parent.parent();

        let content_score = 1.0
            + text.matches(',').count() as f64
            + (text.chars().count() as f64 / 100.0).floor().min(3.0);

        if let Some(parent_node) = parent.nodes().first() {
            let entry = scores
                .entry(parent_node.id)
                .or_insert_with(|| seed_score(&parent));
            *entry += content_score;
        }
        if !grandparent.is_empty() {
            if let Some(grandparent_node) = grandparent.nodes().first() {
                let entry = scores
                    .entry(grandparent_node.id)
                    .or_insert_with(|| seed_score(&grandparent));
                *entry += content_score / 2.0;
            }
        }
    }

    // High link density means the paragraphs were menu labels after all
    for node in doc.select("*").nodes().to_vec() {
        let sel = Selection::from(node);
        if let Some(score) = scores.get_mut(&node.id) {
            *score *= 1.0 - link_density(&sel);
        }
    }

    scores
}

/// Collect the best candidate and its qualifying siblings into one HTML
/// fragment.
fn collect_siblings(
    doc: &Document,
    scores: &HashMap<NodeId, f64>,
    best_id: NodeId,
    best_score: f64,
) -> Option<String> {
    let sibling_threshold = f64::max(10.0, best_score * SIBLING_SCORE_FRACTION);

    let mut best_sel = None;
    for node in doc.select("*").nodes().to_vec() {
        if node.id == best_id {
            best_sel = Some(Selection::from(node));
            break;
        }
    }
    let best = best_sel?;
    let parent = best.parent();
    if parent.is_empty() {
        return Some(dom::outer_html(&best).to_string());
    }

    let mut html = String::new();
    for node in parent.children().nodes().to_vec() {
        let sibling = Selection::from(node);
        let keep = if node.id == best_id {
            true
        } else if scores.get(&node.id).copied().unwrap_or(f64::MIN) >= sibling_threshold {
            true
        } else if dom::tag_name(&sibling).as_deref() == Some("p") {
            let text = etree::text_of(&sibling);
            let length = text.chars().count();
            let density = link_density(&sibling);
            (length > 80 && density < 0.25)
                || (length <= 80 && length > 0 && density == 0.0 && SENTENCE_END.is_match(&text))
        } else {
            false
        };
        if keep {
            html.push_str(&dom::outer_html(&sibling));
        }
    }
    Some(html)
}

/// Post-collection cleanup of the article fragment.
fn sanitize(article: &Document, options: &Options) {
    // Headings that carry negative chrome markers or are mostly links
    for node in article.select("h1, h2, h3, h4, h5, h6").nodes().to_vec() {
        let heading = Selection::from(node);
        if class_weight(&heading) < 0.0 || link_density(&heading) > 0.33 {
            heading.remove();
        }
    }

    article.select("form, textarea").remove();

    for node in article.select("iframe").nodes().to_vec() {
        let iframe = Selection::from(node);
        let src = dom::get_attribute(&iframe, "src").unwrap_or_default();
        if VIDEO_EMBED.is_match(&src) {
            dom::replace_with_html(&iframe, "VIDEO");
        } else {
            iframe.remove();
        }
    }

    // Re-derive candidate scores on the collected fragment so conditional
    // cleaning can weigh structural context
    let scores = score_paragraphs(article);

    let selector = CONDITIONAL_TAGS.join(", ");
    for node in article.select(&selector).nodes().to_vec().into_iter().rev() {
        let sel = Selection::from(node);
        if sel.parent().is_empty() {
            continue;
        }
        let weight = class_weight(&sel) + scores.get(&node.id).copied().unwrap_or(0.0);
        if weight < 0.0 {
            sel.remove();
            continue;
        }

        let text = etree::text_of(&sel);
        if text.matches(',').count() >= 10 {
            continue;
        }

        let p_count = sel.select("p").length();
        let img_count = sel.select("img, graphic").length();
        let li_count = sel.select("li").length() as i64 - 100;
        let input_count =
            sel.select("input").length() - sel.select(r#"input[type="hidden"]"#).length();
        let embed_count = sel.select("embed").length();
        let density = link_density(&sel);
        let content_length = text.chars().count();
        let tag = dom::tag_name(&sel).unwrap_or_default();

        let mut remove = false;
        if img_count > p_count && img_count > 1 {
            remove = true;
        } else if li_count > p_count as i64 && !matches!(tag.as_str(), "ul" | "ol") {
            remove = true;
        } else if input_count > p_count / 3 && input_count > 0 {
            remove = true;
        } else if content_length < MIN_TEXT_LENGTH && (img_count == 0 || img_count > 2) {
            remove = true;
        } else if weight < 25.0 && density > 0.2 {
            remove = true;
        } else if weight >= 25.0 && density > 0.5 {
            remove = true;
        } else if (embed_count == 1 && content_length < 75) || embed_count > 1 {
            remove = true;
        }

        // An empty wrapper inside rich surroundings is structure, not noise
        if remove && content_length == 0 && sel.children().length() > 0 {
            let parent_length = etree::text_of(&sel.parent()).chars().count();
            if parent_length > 3 * MIN_TEXT_LENGTH {
                remove = false;
            }
        }

        if remove {
            sel.remove();
        }
    }

    // Table content dropped wholesale when excluded by options
    if !options.tables {
        article.select("table").remove();
    }
}
