//! Parser adapter.
//!
//! Turns raw bytes from the Web into a parsed DOM: sniffs and inflates
//! compressed payloads, walks a decode ladder down to lossy UTF-8, repairs
//! two well-known authoring mistakes, and rejects input that is not HTML
//! at all. Size limits are enforced before parsing.

use std::borrow::Cow;
use std::io::Read;

use encoding_rs::WINDOWS_1252;
use flate2::read::{GzDecoder, ZlibDecoder};

use crate::dom::{self, Document};
use crate::options::Options;
use crate::patterns::{FAULTY_DOCTYPE, SELF_CLOSING_HTML};

/// GZIP member header magic plus the deflate method byte.
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b, 0x08];

/// Parse HTML bytes into a DOM rooted at `<html>`.
///
/// Returns `None` when the input fails the size gates or does not look like
/// an HTML document after decoding.
#[must_use]
pub fn parse_bytes(raw: &[u8], options: &Options) -> Option<Document> {
    if raw.len() > options.max_file_size || raw.len() < options.min_file_size {
        tracing::debug!(len = raw.len(), "input rejected by size gate");
        return None;
    }
    let inflated = decompress(raw);
    let html = decode(&inflated);
    parse_str(&html, options)
}

/// Parse an HTML string into a DOM rooted at `<html>`.
#[must_use]
pub fn parse_str(html: &str, options: &Options) -> Option<Document> {
    if html.len() > options.max_file_size {
        return None;
    }
    let repaired = repair(html);
    let doc = dom::parse(&repaired);
    if sanity_check(&repaired, &doc) {
        Some(doc)
    } else {
        tracing::debug!("input rejected: does not look like an HTML document");
        None
    }
}

/// Inflate gzip or zlib payloads; anything else (including broken streams)
/// passes through untouched.
fn decompress(raw: &[u8]) -> Cow<'_, [u8]> {
    if raw.starts_with(GZIP_MAGIC) {
        let mut out = Vec::new();
        if GzDecoder::new(raw).read_to_end(&mut out).is_ok() {
            return Cow::Owned(out);
        }
        tracing::debug!("gzip magic found but decompression failed, treating as raw");
    } else if is_zlib(raw) {
        let mut out = Vec::new();
        if ZlibDecoder::new(raw).read_to_end(&mut out).is_ok() {
            return Cow::Owned(out);
        }
        tracing::debug!("zlib header found but decompression failed, treating as raw");
    }
    Cow::Borrowed(raw)
}

/// Zlib header: CMF 0x78 with a valid FCHECK (header divisible by 31).
fn is_zlib(raw: &[u8]) -> bool {
    raw.len() >= 2 && raw[0] == 0x78 && (u16::from(raw[0]) << 8 | u16::from(raw[1])) % 31 == 0
}

/// Decode ladder: strict UTF-8, then Latin-1, then UTF-8 with replacement.
fn decode(raw: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(raw) {
        return text.to_string();
    }
    // encoding_rs maps the latin-1 label to windows-1252, matching what
    // browsers do with mislabeled legacy pages
    let (text, _, had_errors) = WINDOWS_1252.decode(raw);
    if !had_errors {
        return text.into_owned();
    }
    String::from_utf8_lossy(raw).into_owned()
}

/// Repair pass: strip a malformed leading DOCTYPE and rewrite a
/// self-closing `<html .../>` occurring in the first three lines.
fn repair(html: &str) -> String {
    let repaired = FAULTY_DOCTYPE.replace(html, "").into_owned();

    let head_len: usize = repaired
        .split_inclusive('\n')
        .take(3)
        .map(str::len)
        .sum();
    let (head, rest) = repaired.split_at(head_len);
    if SELF_CLOSING_HTML.is_match(head) {
        return SELF_CLOSING_HTML.replace(head, "<html$1>").into_owned() + rest;
    }
    repaired
}

/// Accept the parse only when the input declares itself as HTML within the
/// first 50 characters, or the parsed body has at least two children.
fn sanity_check(html: &str, doc: &Document) -> bool {
    let prefix: String = html.chars().take(50).collect::<String>().to_lowercase();
    if prefix.contains("html") {
        return true;
    }
    doc.select("body").children().length() >= 2
}
