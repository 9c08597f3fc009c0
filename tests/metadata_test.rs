use textdistill::{extract, extract_metadata, extract_with_metadata, Options};

#[test]
fn open_graph_fields_are_extracted() {
    let html = r#"<html><head><meta property="og:title" content="OG Title"><meta property="og:site_name" content="Example Site"><meta property="og:image" content="https://example.org/i.jpg"></head><body></body></html>"#;

    let doc = extract_metadata(html, None);
    match doc {
        Some(doc) => {
            assert_eq!(doc.title.as_deref(), Some("OG Title"));
            assert_eq!(doc.sitename.as_deref(), Some("Example Site"));
            assert_eq!(doc.image.as_deref(), Some("https://example.org/i.jpg"));
        }
        None => panic!("expected Some(_), got None"),
    }
}

#[test]
fn canonical_url_beats_the_default_url() {
    let html = r#"<html><head><link rel="canonical" href="https://example.org/page"></head><body></body></html>"#;

    let doc = extract_metadata(html, Some("https://example.org/page?ref=1")).unwrap_or_default();
    assert_eq!(doc.url.as_deref(), Some("https://example.org/page"));
    assert_eq!(doc.hostname.as_deref(), Some("example.org"));
}

#[test]
fn json_ld_person_author_is_assembled() {
    let html = r#"<html><head><script type="application/ld+json">{"@context":"https://schema.org","@type":"NewsArticle","author":{"@type":"Person","givenName":"Jane","familyName":"Doe"}}</script></head><body></body></html>"#;

    let doc = extract_metadata(html, None).unwrap_or_default();
    assert_eq!(doc.author.as_deref(), Some("Jane Doe"));
}

#[test]
fn author_blacklist_is_applied() {
    let html = r#"
        <html><head><meta name="author" content="Staff Writer"></head><body>
        <article class="post-content">
        <p>Long enough article body text to be extracted without complaint,
        containing ordinary sentences and the usual punctuation marks.</p>
        <p>A further paragraph of body text keeps the output above the length
        gates so a document is actually produced for this test.</p>
        </article></body></html>
    "#;

    let options = Options {
        author_blacklist: ["staff writer".to_string()].into_iter().collect(),
        with_metadata: true,
        ..Options::default()
    };
    let doc = extract_with_metadata(html, &options).unwrap_or_default();
    assert_eq!(doc.author, None);
}

#[test]
fn byline_author_is_normalized() {
    let html = r#"
        <html><head><meta name="author" content="By jane doe"></head><body>
        <article class="post-content">
        <p>Long enough article body text to be extracted without complaint,
        containing ordinary sentences and the usual punctuation marks.</p>
        <p>A further paragraph of body text keeps the output above the length
        gates so a document is actually produced for this test.</p>
        </article></body></html>
    "#;

    let doc = extract_with_metadata(html, &Options::default()).unwrap_or_default();
    assert_eq!(doc.author.as_deref(), Some("Jane Doe"));
}

#[test]
fn date_is_normalized_from_meta() {
    let html = r#"
        <html><head><meta property="article:published_time" content="2024-03-17T09:30:00Z"></head><body>
        <article class="post-content">
        <p>Long enough article body text to be extracted without complaint,
        containing ordinary sentences and the usual punctuation marks.</p>
        <p>A further paragraph of body text keeps the output above the length
        gates so a document is actually produced for this test.</p>
        </article></body></html>
    "#;

    let doc = extract_with_metadata(html, &Options::default()).unwrap_or_default();
    assert_eq!(doc.date.as_deref(), Some("2024-03-17"));
}

#[test]
fn language_gate_rejects_declared_mismatch() {
    let html = r#"
        <html lang="fr"><body>
        <article class="post-content">
        <p>Le corps de cet article est suffisamment long pour franchir toutes
        les barrieres de taille imposees par le pipeline d'extraction.</p>
        <p>Un deuxieme paragraphe complete le texte et garantit un resultat
        au-dessus des seuils minimaux de sortie.</p>
        </article></body></html>
    "#;

    let reject = Options {
        target_language: Some("en".to_string()),
        ..Options::default()
    };
    assert!(extract(html, &reject).is_none());

    let accept = Options {
        target_language: Some("fr".to_string()),
        ..Options::default()
    };
    assert!(extract(html, &accept).is_some());
}

#[test]
fn url_blacklist_rejects_the_document() {
    let html = r#"
        <html><head><link rel="canonical" href="https://example.org/blocked"></head><body>
        <article class="post-content">
        <p>Long enough article body text to be extracted without complaint,
        containing ordinary sentences and the usual punctuation marks.</p>
        <p>A further paragraph of body text keeps the output above the length
        gates so a document is actually produced for this test.</p>
        </article></body></html>
    "#;

    let options = Options {
        url_blacklist: ["https://example.org/blocked".to_string()].into_iter().collect(),
        ..Options::default()
    };
    assert!(extract(html, &options).is_none());
    assert!(extract(html, &Options::default()).is_some());
}

#[test]
fn license_is_read_from_rel_anchor() {
    let html = r#"
        <html><body>
        <article class="post-content">
        <p>Long enough article body text to be extracted without complaint,
        containing ordinary sentences and the usual punctuation marks.</p>
        <p>A further paragraph of body text keeps the output above the length
        gates so a document is actually produced for this test.</p>
        </article>
        <a rel="license" href="https://creativecommons.org/licenses/by-nc-sa/4.0/">license</a>
        </body></html>
    "#;

    let doc = extract_with_metadata(html, &Options::default()).unwrap_or_default();
    assert_eq!(doc.license.as_deref(), Some("CC BY-NC-SA 4.0"));
}
