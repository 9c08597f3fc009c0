//! # textdistill
//!
//! Web content extraction: distills HTML pages into clean article text and
//! metadata, discarding navigation, advertisements, and other boilerplate.
//!
//! The pipeline parses the input, extracts metadata, cleans the tree, runs
//! a cascade of extractors (selector-based primary, scoring fallback,
//! paragraph classifier, baseline), deduplicates repeated segments, and
//! serializes the result into one of several formats.
//!
//! ## Quick start
//!
//! ```rust
//! use textdistill::{extract, Options};
//!
//! let html = r#"<html><body><nav>Menu</nav><article>
//! <h1>Breaking News</h1>
//! <p>This is the main content of the article. It contains important
//! information that readers want to see, spelled out over enough sentences
//! to be worth extracting in the first place.</p>
//! <p>Boilerplate such as navigation menus, footers, advertisement blocks,
//! and sharing widgets is detected and removed automatically during the
//! cleaning passes.</p>
//! </article><footer>Copyright 2026</footer></body></html>"#;
//!
//! let text = extract(html, &Options::default());
//! assert!(text.is_some());
//! let text = text.unwrap_or_default();
//! assert!(text.contains("Breaking News"));
//! assert!(!text.contains("Menu"));
//! ```

mod error;
mod options;
mod patterns;

/// Parser adapter: bytes or string to DOM, with repair and size gates.
pub mod parser;

/// DOM operations adapter over dom_query.
pub mod dom;

/// Element tree utilities (text/tail readers, unwrap).
pub mod etree;

/// Internal markup tree.
pub mod tree;

/// Fixed-capacity LRU counter.
pub mod lru;

/// Simhash fingerprinting and duplicate suppression.
pub mod dedup;

/// Selector catalog: body, comments, discard, and metadata families.
pub mod selectors;

/// Document cleaner.
pub mod cleaner;

/// Tag conversion into internal markup.
pub mod convert;

/// Link density probes.
pub mod link_density;

/// Scoring-based fallback extractor.
pub mod readability;

/// Paragraph-classifier fallback.
pub mod paragraphs;

/// Baseline extractor.
pub mod baseline;

/// Primary extractor, pruning, comments, and the cascade coordinator.
pub mod extractor;

/// Metadata extraction.
pub mod metadata;

/// URL utilities.
pub mod url_utils;

/// Extraction result type.
pub mod document;

/// Serializers for every output format.
pub mod output;

pub use document::Document;
pub use error::{Error, Result};
pub use options::{Focus, Options, OutputFormat};
pub use tree::Node;

use metadata::Metadata;

/// Extract the main content and serialize it in the configured output
/// format. Returns `None` when the input is rejected or yields too little
/// text.
#[must_use]
pub fn extract(content: &str, options: &Options) -> Option<String> {
    let options = options.clone().normalized();
    let doc = run_pipeline(parser::parse_str(content, &options)?, &options)?;
    Some(output::serialize(&doc, &options))
}

/// Byte-input variant of [`extract`]: sniffs compression and encoding first.
#[must_use]
pub fn extract_bytes(content: &[u8], options: &Options) -> Option<String> {
    let options = options.clone().normalized();
    let doc = run_pipeline(parser::parse_bytes(content, &options)?, &options)?;
    Some(output::serialize(&doc, &options))
}

/// Extract content and metadata as a structured [`Document`].
#[must_use]
pub fn extract_with_metadata(content: &str, options: &Options) -> Option<Document> {
    let options = Options {
        with_metadata: true,
        ..options.clone()
    }
    .normalized();
    run_pipeline(parser::parse_str(content, &options)?, &options)
}

/// Byte-input variant of [`extract_with_metadata`].
#[must_use]
pub fn extract_with_metadata_bytes(content: &[u8], options: &Options) -> Option<Document> {
    let options = Options {
        with_metadata: true,
        ..options.clone()
    }
    .normalized();
    run_pipeline(parser::parse_bytes(content, &options)?, &options)
}

/// Like [`extract_with_metadata`], but the caller consumes the document
/// tree directly; the `Structured` output format is meant for this entry
/// point.
#[must_use]
pub fn bare_extraction(content: &str, options: &Options) -> Option<Document> {
    extract_with_metadata(content, options)
}

/// Extract metadata only. The body tree stays empty.
#[must_use]
pub fn extract_metadata(content: &str, default_url: Option<&str>) -> Option<Document> {
    let options = Options {
        with_metadata: true,
        url: default_url.map(ToString::to_string),
        ..Options::default()
    };
    let parsed = parser::parse_str(content, &options)?;
    let meta = metadata::extract_metadata(&parsed, &options);
    Some(Document::assemble(
        meta,
        Node::new("body"),
        String::new(),
        None,
        String::new(),
    ))
}

/// Run only the baseline extractor. Returns the body tree, its text, and
/// the character count.
#[must_use]
pub fn baseline(content: &str) -> Option<(Node, String, usize)> {
    let parsed = parser::parse_str(content, &Options::default())?;
    Some(baseline::baseline(&parsed))
}

/// Reset the process-wide deduplication caches. Callers must ensure no
/// extraction is in flight.
pub fn reset_caches() {
    dedup::reset_caches();
}

/// The full pipeline from parsed DOM to assembled document.
fn run_pipeline(parsed: dom::Document, options: &Options) -> Option<Document> {
    if !metadata::language_gate(&parsed, options) {
        tracing::debug!("document rejected by language gate");
        return None;
    }

    let meta = if options.with_metadata {
        metadata::extract_metadata(&parsed, options)
    } else {
        // Even without metadata the canonical URL matters: relative links
        // resolve against it
        let mut meta = Metadata {
            url: url_utils::canonical_url(&parsed, options.url.as_deref()),
            ..Metadata::default()
        };
        meta.hostname = meta.url.as_deref().and_then(url_utils::extract_hostname);
        meta.language = metadata::declared_language(&parsed);
        meta
    };

    if let Some(url) = &meta.url {
        if options.url_blacklist.contains(url) {
            tracing::debug!(%url, "document rejected by URL blacklist");
            return None;
        }
    }
    if options.only_with_metadata
        && (meta.date.is_none() || meta.title.is_none() || meta.url.is_none())
    {
        tracing::debug!("document rejected: required metadata missing");
        return None;
    }

    // Fallback extractors get a pristine clone of the parse
    let backup = dom::clone_document(&parsed);

    let cleaned = cleaner::clean_document(parsed, options);
    let commentsbody = extractor::comments::extract_comments(&cleaned, options);

    let base_url = meta.url.clone().or_else(|| options.url.clone());
    convert::convert_tags(&cleaned, options, base_url.as_deref());

    let (mut body, raw_text) =
        extractor::cascade::determine_body(&cleaned, &backup, options, base_url.as_deref());

    if options.dedup && dedup::seen_too_often(&raw_text, options) {
        tracing::debug!("document rejected as duplicate");
        return None;
    }

    // Comments must clear their own extraction floor
    let commentsbody = commentsbody.filter(|comments| {
        output::to_text(comments).chars().count() >= options.min_extracted_comm_size
    });
    let comments_text = commentsbody
        .as_ref()
        .map(|comments| {
            let mut prepared = comments.clone();
            output::prepare(&mut prepared);
            output::to_text(&prepared)
        })
        .unwrap_or_default();

    let body_len = raw_text.chars().count();
    if body_len < options.min_output_size && comments_text.chars().count() < options.min_output_comm_size
    {
        tracing::debug!(body_len, "document rejected: below output thresholds");
        return None;
    }

    output::prepare(&mut body);
    let text = output::to_text(&body);

    let mut doc = Document::assemble(meta, body, raw_text, commentsbody, comments_text);
    doc.text = text;
    Some(doc)
}
