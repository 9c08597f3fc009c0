//! CSV writer (tab-separated).

use crate::document::Document;

/// Field delimiter.
const DELIMITER: char = '\t';

/// Column order of the CSV output.
pub const COLUMNS: &[&str] = &[
    "url", "id", "fingerprint", "hostname", "title", "image", "date", "text", "comments",
    "license", "pagetype",
];

/// Quote-escape a field when it contains the delimiter, a quote, or a
/// newline; inner quotes are doubled.
fn escape_field(raw: &str) -> String {
    if raw.contains(DELIMITER) || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

/// Serialize a document as one header line plus one record line.
#[must_use]
pub fn to_csv(doc: &Document) -> String {
    let fields = [
        doc.url.as_deref().unwrap_or_default(),
        doc.id.as_deref().unwrap_or_default(),
        doc.fingerprint.as_deref().unwrap_or_default(),
        doc.hostname.as_deref().unwrap_or_default(),
        doc.title.as_deref().unwrap_or_default(),
        doc.image.as_deref().unwrap_or_default(),
        doc.date.as_deref().unwrap_or_default(),
        doc.text.as_str(),
        doc.comments.as_str(),
        doc.license.as_deref().unwrap_or_default(),
        doc.pagetype.as_deref().unwrap_or_default(),
    ];
    let header = COLUMNS.join(&DELIMITER.to_string());
    let record = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string());
    format!("{header}\n{record}\n")
}
