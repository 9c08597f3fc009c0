//! JSON writer.

use serde::Serialize;

use crate::document::Document;

/// Serializable view of a document with the wire field names.
#[derive(Serialize)]
struct JsonDocument<'a> {
    source: Option<&'a str>,
    #[serde(rename = "source-hostname")]
    source_hostname: Option<&'a str>,
    title: Option<&'a str>,
    author: Option<&'a str>,
    date: Option<&'a str>,
    description: Option<&'a str>,
    categories: &'a [String],
    tags: &'a [String],
    fingerprint: Option<&'a str>,
    id: Option<&'a str>,
    license: Option<&'a str>,
    language: Option<&'a str>,
    image: Option<&'a str>,
    pagetype: Option<&'a str>,
    text: &'a str,
    comments: &'a str,
}

/// Serialize a document as a JSON object.
#[must_use]
pub fn to_json(doc: &Document) -> String {
    let view = JsonDocument {
        source: doc.url.as_deref(),
        source_hostname: doc.hostname.as_deref(),
        title: doc.title.as_deref(),
        author: doc.author.as_deref(),
        date: doc.date.as_deref(),
        description: doc.description.as_deref(),
        categories: &doc.categories,
        tags: &doc.tags,
        fingerprint: doc.fingerprint.as_deref(),
        id: doc.id.as_deref(),
        license: doc.license.as_deref(),
        language: doc.language.as_deref(),
        image: doc.image.as_deref(),
        pagetype: doc.pagetype.as_deref(),
        text: &doc.text,
        comments: &doc.comments,
    };
    serde_json::to_string(&view).unwrap_or_else(|_| "{}".to_string())
}
