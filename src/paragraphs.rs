//! Paragraph-classifier fallback.
//!
//! A last-resort extractor that walks paragraph-like elements and keeps the
//! ones that read like prose: enough words, a plausible share of stop
//! words, not dominated by links. Used when both the primary extractor and
//! the scoring fallback produce thin output.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::dom::{self, Document, Selection};
use crate::etree;
use crate::link_density::link_density;
use crate::tree::Node;

/// Elements visited in document order.
const PARAGRAPH_TAGS: &[&str] = &["p", "div", "li", "td", "th"];

/// Maximum link density for a prose paragraph.
const MAX_LINK_DENSITY: f64 = 0.4;

/// Word-count gates.
const MIN_WORDS: usize = 3;
const SHORT_PARAGRAPH_WORDS: usize = 10;

/// Minimum stop-word fraction for short paragraphs.
const MIN_STOPWORD_FRACTION: f64 = 0.3;

/// Default English stop words.
///
/// Classification currently runs with this list regardless of document
/// language; [`LANGUAGE_NAMES`] reserves the codes for per-language lists.
pub static STOPWORDS_EN: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
        "itself", "just", "me", "more", "most", "my", "no", "nor", "not", "now", "of", "off",
        "on", "once", "only", "or", "other", "our", "out", "over", "own", "same", "she",
        "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
        "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
        "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while",
        "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    ]
    .into_iter()
    .collect()
});

/// ISO 639-1 codes with a language name, reserved for per-language
/// stop-word lists.
pub const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cz", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("en", "English"),
    ("el", "Greek"),
    ("es", "Spanish"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("ko", "Korean"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("no", "Norwegian"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
];

/// Fraction of words that are stop words.
fn stopword_fraction(words: &[&str]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let hits = words
        .iter()
        .filter(|w| STOPWORDS_EN.contains(w.to_lowercase().as_str()))
        .count();
    hits as f64 / words.len() as f64
}

/// True when the paragraph reads like boilerplate rather than prose.
#[must_use]
pub fn is_boilerplate(sel: &Selection) -> bool {
    is_boilerplate_text(sel, &etree::text_of(sel))
}

/// Classify paragraph-like elements and emit the good ones as `<p>`
/// children of a fresh body.
#[must_use]
pub fn classify(doc: &Document) -> Node {
    let mut body = Node::new("body");
    let mut seen: HashSet<String> = HashSet::new();
    let selector = PARAGRAPH_TAGS.join(", ");

    for node in doc.select(&selector).nodes() {
        let sel = Selection::from(*node);
        // For containers, judge only the element's own text so nested
        // paragraphs are not counted twice
        let tag = dom::tag_name(&sel).unwrap_or_default();
        let text = if tag == "p" || tag == "li" || tag == "td" || tag == "th" {
            etree::text_of(&sel)
        } else {
            etree::own_text(&sel)
        };
        if text.is_empty() || !seen.insert(text.clone()) {
            continue;
        }
        if is_boilerplate_text(&sel, &text) {
            continue;
        }
        body.push(Node::with_text("p", &text));
    }
    body
}

fn is_boilerplate_text(sel: &Selection, text: &str) -> bool {
    if link_density(sel) > MAX_LINK_DENSITY {
        return true;
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < MIN_WORDS {
        return true;
    }
    words.len() < SHORT_PARAGRAPH_WORDS && stopword_fraction(&words) < MIN_STOPWORD_FRACTION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prose_paragraph_is_kept() {
        let doc = Document::from(
            "<p>The committee said that it would review the findings before the end of the year.</p>",
        );
        assert!(!is_boilerplate(&doc.select("p")));
    }

    #[test]
    fn link_heavy_paragraph_is_dropped() {
        let doc = Document::from(
            r#"<p><a href="/a">Home</a> <a href="/b">About</a> <a href="/c">Contact pages</a></p>"#,
        );
        assert!(is_boilerplate(&doc.select("p")));
    }

    #[test]
    fn two_word_fragment_is_dropped() {
        let doc = Document::from("<p>Read more</p>");
        assert!(is_boilerplate(&doc.select("p")));
    }

    #[test]
    fn short_stopword_free_label_is_dropped() {
        let doc = Document::from("<p>Sports Business Tech Culture Video Photos</p>");
        assert!(is_boilerplate(&doc.select("p")));
    }

    #[test]
    fn short_sentence_with_stopwords_is_kept() {
        let doc = Document::from("<p>He said it was the best of all options.</p>");
        assert!(!is_boilerplate(&doc.select("p")));
    }

    #[test]
    fn classify_builds_paragraph_body() {
        let doc = Document::from(
            r#"<html><body>
            <p>The committee said that it would review the findings before the end of the year.</p>
            <p>Home About Contact</p>
            <p>Another sentence with enough words and the usual stop words in it as well.</p>
            </body></html>"#,
        );
        let body = classify(&doc);
        assert_eq!(body.children.len(), 2);
        assert!(body.children.iter().all(|c| c.tag == "p"));
    }

    #[test]
    fn language_map_covers_thirty_codes() {
        assert_eq!(LANGUAGE_NAMES.len(), 30);
        assert!(LANGUAGE_NAMES.iter().any(|(code, _)| *code == "de"));
    }
}
