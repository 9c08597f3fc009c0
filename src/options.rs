//! Configuration options for content extraction.
//!
//! The `Options` struct controls extraction behavior: which page sections to
//! keep, how aggressive boilerplate removal should be, size thresholds, and
//! the output serialization format.

use std::collections::HashSet;
use std::str::FromStr;

use crate::error::Error;

/// Extraction aggressiveness.
///
/// `Precision` trades coverage for fewer false positives, `Recall` the
/// reverse. When both behaviors are requested at once, recall wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Standard trade-off.
    #[default]
    Balanced,
    /// Prefer dropping borderline content.
    Precision,
    /// Prefer keeping borderline content.
    Recall,
}

impl FromStr for Focus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "balanced" => Ok(Self::Balanced),
            "precision" => Ok(Self::Precision),
            "recall" => Ok(Self::Recall),
            other => Err(Error::InvalidOption(format!("unknown focus mode: {other}"))),
        }
    }
}

/// Output serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text.
    #[default]
    Txt,
    /// Markdown with inline formatting.
    Markdown,
    /// JSON object with metadata fields.
    Json,
    /// XML `<doc>` with metadata attributes.
    Xml,
    /// TEI-XML with a full teiHeader.
    XmlTei,
    /// Tab-separated values.
    Csv,
    /// Filtered HTML rendering.
    Html,
    /// No serialization - callers consume the document tree directly.
    Structured,
}

impl OutputFormat {
    /// File extension for CLI output naming.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt | Self::Markdown => "txt",
            Self::Json => "json",
            Self::Xml | Self::XmlTei => "xml",
            Self::Csv => "csv",
            Self::Html | Self::Structured => "html",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "txt" | "text" => Ok(Self::Txt),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            "xmltei" => Ok(Self::XmlTei),
            "csv" => Ok(Self::Csv),
            "html" => Ok(Self::Html),
            "structured" => Ok(Self::Structured),
            other => Err(Error::InvalidOption(format!("unknown output format: {other}"))),
        }
    }
}

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings, then call [`Options::normalized`] (entry points do
/// this themselves) to apply the cross-field implications.
///
/// # Example
///
/// ```rust
/// use textdistill::{Options, OutputFormat};
///
/// let options = Options {
///     links: true,
///     output_format: OutputFormat::Markdown,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Precision/recall trade-off knob.
    pub focus: Focus,

    /// Extract the comments section alongside the article.
    ///
    /// Default: `true`
    pub comments: bool,

    /// Preserve inline formatting (bold, italic, ...) in the output.
    ///
    /// Default: `false`
    pub formatting: bool,

    /// Preserve link targets as `ref` elements instead of unwrapping anchors.
    ///
    /// Default: `false`
    pub links: bool,

    /// Keep image references as `graphic` elements.
    ///
    /// Default: `false`
    pub images: bool,

    /// Keep table content.
    ///
    /// Default: `true`
    pub tables: bool,

    /// Skip the slower fallback extractors.
    ///
    /// Default: `false`
    pub fast: bool,

    /// Drop text segments already seen too often (process-wide LRU counter).
    ///
    /// Default: `false`
    pub dedup: bool,

    /// Run metadata extraction and attach its fields to the result.
    ///
    /// Default: `false`
    pub with_metadata: bool,

    /// Reject documents missing any of date, title, or URL.
    ///
    /// Implies `with_metadata`. Default: `false`
    pub only_with_metadata: bool,

    /// Expected document language (ISO 639-1). Documents declaring a
    /// different language are rejected.
    ///
    /// Default: `None`
    pub target_language: Option<String>,

    /// Source URL of the document, used for hostname extraction and
    /// relative link resolution when the page declares no canonical URL.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Minimum character count for the extracted body before fallbacks kick in.
    ///
    /// Default: `250`
    pub min_extracted_size: usize,

    /// Minimum character count for serialized output.
    ///
    /// Default: `200`
    pub min_output_size: usize,

    /// Minimum character count for an extracted comments section.
    ///
    /// Default: `100`
    pub min_extracted_comm_size: usize,

    /// Minimum character count for serialized comments output.
    ///
    /// Default: `100`
    pub min_output_comm_size: usize,

    /// Minimum segment length considered by the deduplicator.
    ///
    /// Default: `100`
    pub min_duplcheck_size: usize,

    /// Number of times a segment may repeat before being dropped.
    ///
    /// Default: `2`
    pub max_repetitions: usize,

    /// Maximum accepted input size in bytes.
    ///
    /// Default: `20_000_000`
    pub max_file_size: usize,

    /// Minimum accepted input size in bytes.
    ///
    /// Default: `200`
    pub min_file_size: usize,

    /// Author names to discard (case-insensitive match).
    pub author_blacklist: HashSet<String>,

    /// Canonical URLs whose documents are rejected outright.
    ///
    /// A non-empty blacklist implies `with_metadata`.
    pub url_blacklist: HashSet<String>,

    /// Additional CSS selectors pruned from the tree before extraction.
    pub prune_selectors: Vec<String>,

    /// Output serialization format.
    ///
    /// `Markdown` implies `formatting`; `XmlTei` implies `with_metadata`.
    pub output_format: OutputFormat,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            focus: Focus::Balanced,
            comments: true,
            formatting: false,
            links: false,
            images: false,
            tables: true,
            fast: false,
            dedup: false,
            with_metadata: false,
            only_with_metadata: false,
            target_language: None,
            url: None,
            min_extracted_size: 250,
            min_output_size: 200,
            min_extracted_comm_size: 100,
            min_output_comm_size: 100,
            min_duplcheck_size: 100,
            max_repetitions: 2,
            max_file_size: 20_000_000,
            min_file_size: 200,
            author_blacklist: HashSet::new(),
            url_blacklist: HashSet::new(),
            prune_selectors: Vec::new(),
            output_format: OutputFormat::Txt,
        }
    }
}

impl Options {
    /// Apply cross-field implications and return the effective options.
    ///
    /// Markdown output needs formatting elements; metadata-bearing output
    /// formats, metadata-gated extraction, and URL blacklisting all need
    /// metadata.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.output_format == OutputFormat::Markdown {
            self.formatting = true;
        }
        let format_needs_metadata = matches!(
            self.output_format,
            OutputFormat::Json | OutputFormat::Xml | OutputFormat::XmlTei | OutputFormat::Csv
        );
        if self.only_with_metadata || format_needs_metadata || !self.url_blacklist.is_empty() {
            self.with_metadata = true;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds() {
        let opts = Options::default();
        assert_eq!(opts.focus, Focus::Balanced);
        assert!(opts.comments);
        assert!(opts.tables);
        assert!(!opts.formatting);
        assert!(!opts.dedup);
        assert_eq!(opts.min_extracted_size, 250);
        assert_eq!(opts.min_output_size, 200);
        assert_eq!(opts.min_extracted_comm_size, 100);
        assert_eq!(opts.min_output_comm_size, 100);
        assert_eq!(opts.min_duplcheck_size, 100);
        assert_eq!(opts.max_repetitions, 2);
        assert_eq!(opts.max_file_size, 20_000_000);
        assert_eq!(opts.min_file_size, 200);
    }

    #[test]
    fn markdown_implies_formatting() {
        let opts = Options {
            output_format: OutputFormat::Markdown,
            ..Options::default()
        }
        .normalized();
        assert!(opts.formatting);
    }

    #[test]
    fn tei_and_blacklist_imply_metadata() {
        let opts = Options {
            output_format: OutputFormat::XmlTei,
            ..Options::default()
        }
        .normalized();
        assert!(opts.with_metadata);

        let opts = Options {
            url_blacklist: ["https://example.org/x".to_string()].into_iter().collect(),
            ..Options::default()
        }
        .normalized();
        assert!(opts.with_metadata);

        let opts = Options {
            only_with_metadata: true,
            ..Options::default()
        }
        .normalized();
        assert!(opts.with_metadata);
    }

    #[test]
    fn format_parsing_rejects_unknown() {
        assert!(OutputFormat::from_str("markdown").is_ok());
        assert!(OutputFormat::from_str("xmltei").is_ok());
        assert!(OutputFormat::from_str("yaml").is_err());
        assert!(Focus::from_str("precision").is_ok());
        assert!(Focus::from_str("fuzzy").is_err());
    }
}
