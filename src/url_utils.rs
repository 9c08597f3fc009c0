//! URL utilities: validation, resolution, canonical link handling.

use url::Url;

use crate::dom::{self, Document, Selection};

/// True for well-formed absolute http(s) URLs.
#[must_use]
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Hostname of a URL, with any leading `@` stripped.
#[must_use]
pub fn extract_hostname(candidate: &str) -> Option<String> {
    let url = Url::parse(candidate).ok()?;
    let host = url.host_str()?;
    Some(host.trim_start_matches('@').to_string())
}

/// Resolve a possibly-relative link against a base URL, keeping only
/// http(s) results.
#[must_use]
pub fn resolve(href: &str, base: Option<&str>) -> Option<String> {
    if is_valid_url(href) {
        return Some(href.to_string());
    }
    let base = Url::parse(base?).ok()?;
    let joined = base.join(href).ok()?;
    if matches!(joined.scheme(), "http" | "https") {
        Some(joined.to_string())
    } else {
        None
    }
}

/// Scheme and host of the first valid og:/twitter: URL meta, used to
/// resolve root-relative canonical links on pages without a usable base.
fn meta_url_root(doc: &Document) -> Option<String> {
    for selector in [
        r#"meta[property="og:url"]"#,
        r#"meta[name="twitter:url"]"#,
    ] {
        for node in doc.select(selector).nodes() {
            let content = dom::get_attribute(&Selection::from(*node), "content").unwrap_or_default();
            if let Ok(url) = Url::parse(&content) {
                if matches!(url.scheme(), "http" | "https") {
                    if let Some(host) = url.host_str() {
                        return Some(format!("{}://{host}", url.scheme()));
                    }
                }
            }
        }
    }
    None
}

/// Canonical URL of the document.
///
/// Checked in order: `<link rel="canonical">`, `<base href>`,
/// `<link rel="alternate" hreflang="x-default">`. Relative candidates are
/// resolved against the og:/twitter: host, then against the default URL.
/// Anything that does not come out as http(s) is rejected.
#[must_use]
pub fn canonical_url(doc: &Document, default_url: Option<&str>) -> Option<String> {
    let candidates = [
        doc.select(r#"link[rel="canonical"]"#).attr("href"),
        doc.select("base").attr("href"),
        doc.select(r#"link[rel="alternate"][hreflang="x-default"]"#).attr("href"),
    ];

    for candidate in candidates.into_iter().flatten() {
        let candidate = candidate.to_string();
        if is_valid_url(&candidate) {
            return Some(candidate);
        }
        if candidate.starts_with('/') {
            if let Some(root) = meta_url_root(doc) {
                let absolute = format!("{root}{candidate}");
                if is_valid_url(&absolute) {
                    return Some(absolute);
                }
            }
        }
        if let Some(resolved) = resolve(&candidate, default_url) {
            return Some(resolved);
        }
    }

    default_url.filter(|u| is_valid_url(u)).map(ToString::to_string)
}
