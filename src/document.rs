//! Extraction result.

use chrono::Utc;

use crate::dedup;
use crate::metadata::Metadata;
use crate::tree::Node;

/// The result of a successful extraction: metadata fields plus the internal
/// markup trees and their serialized text.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Page title.
    pub title: Option<String>,
    /// Author name(s).
    pub author: Option<String>,
    /// Canonical URL.
    pub url: Option<String>,
    /// Hostname derived from the URL.
    pub hostname: Option<String>,
    /// Page description.
    pub description: Option<String>,
    /// Site name.
    pub sitename: Option<String>,
    /// Publication date (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// Content categories.
    pub categories: Vec<String>,
    /// Content tags.
    pub tags: Vec<String>,
    /// Simhash fingerprint of title and raw text, hex-encoded.
    pub fingerprint: Option<String>,
    /// Caller-assigned document identifier.
    pub id: Option<String>,
    /// License string.
    pub license: Option<String>,
    /// Declared document language.
    pub language: Option<String>,
    /// Main image URL.
    pub image: Option<String>,
    /// Page type.
    pub pagetype: Option<String>,
    /// Date this document was processed (`YYYY-MM-DD`).
    pub filedate: String,
    /// Main content tree. Always present, possibly empty.
    pub body: Node,
    /// Comments tree, when extracted.
    pub commentsbody: Option<Node>,
    /// Serialized main content.
    pub text: String,
    /// Serialized comments.
    pub comments: String,
    /// Pre-serialization text used for fingerprinting and gating.
    pub raw_text: String,
}

impl Document {
    /// Assemble a document from metadata and the extracted trees.
    #[must_use]
    pub fn assemble(
        metadata: Metadata,
        body: Node,
        raw_text: String,
        commentsbody: Option<Node>,
        comments_text: String,
    ) -> Self {
        let fingerprint = dedup::content_fingerprint(
            metadata.title.as_deref().unwrap_or_default(),
            &raw_text,
        );
        Self {
            title: metadata.title,
            author: metadata.author,
            url: metadata.url,
            hostname: metadata.hostname,
            description: metadata.description,
            sitename: metadata.sitename,
            date: metadata.date,
            categories: metadata.categories,
            tags: metadata.tags,
            fingerprint: Some(fingerprint),
            id: None,
            license: metadata.license,
            language: metadata.language,
            image: metadata.image,
            pagetype: metadata.pagetype,
            filedate: Utc::now().format("%Y-%m-%d").to_string(),
            body,
            commentsbody,
            text: String::new(),
            comments: comments_text,
            raw_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_fills_fingerprint_and_filedate() {
        let metadata = Metadata {
            title: Some("Title".to_string()),
            ..Metadata::default()
        };
        let doc = Document::assemble(
            metadata,
            Node::new("body"),
            "raw text".to_string(),
            None,
            String::new(),
        );
        assert!(doc.fingerprint.is_some());
        assert_eq!(doc.filedate.len(), 10);
        assert_eq!(doc.title.as_deref(), Some("Title"));
    }
}
