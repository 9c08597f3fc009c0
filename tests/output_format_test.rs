use textdistill::{extract, extract_with_metadata, Options, OutputFormat};

const PAGE: &str = r#"
    <html lang="en"><head>
    <title>Format Test - Example</title>
    <meta property="og:title" content="Format Test">
    <link rel="canonical" href="https://example.org/format-test">
    </head><body>
    <article class="article-body">
    <h2>First Section</h2>
    <p>Opening paragraph with <b>bold words</b> and a <a href="/next">link to more</a>,
    written out at a length that clears every extraction threshold easily.</p>
    <p>Second paragraph of ordinary prose so the output stays well above the
    minimum size gates regardless of the serialization format chosen.</p>
    <ul><li>first item</li><li>second item</li></ul>
    </article></body></html>
"#;

fn options_for(format: OutputFormat) -> Options {
    Options {
        output_format: format,
        links: true,
        ..Options::default()
    }
}

#[test]
fn txt_output_is_plain() {
    let text = extract(PAGE, &options_for(OutputFormat::Txt)).unwrap_or_default();
    assert!(text.contains("First Section"));
    assert!(text.contains("Opening paragraph"));
    assert!(text.contains("- first item"));
    assert!(!text.contains("**"));
    assert!(!text.contains("]("));
}

#[test]
fn markdown_output_carries_structure() {
    let md = extract(PAGE, &options_for(OutputFormat::Markdown)).unwrap_or_default();
    assert!(md.contains("## First Section"));
    assert!(md.contains("**bold words**"));
    assert!(md.contains("[link to more](https://example.org/next)"));
    assert!(md.contains("- first item"));
}

#[test]
fn txt_paragraphs_are_a_subset_of_markdown() {
    let txt = extract(PAGE, &options_for(OutputFormat::Txt)).unwrap_or_default();
    let md = extract(PAGE, &options_for(OutputFormat::Markdown)).unwrap_or_default();

    // Compare after stripping the markdown-only decoration
    let stripped_md: String = md
        .replace("**", "")
        .replace("##", "")
        .replace('[', "")
        .replace("](https://example.org/next)", "")
        .replace('`', "");
    for line in txt.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let bare = line.trim_start_matches("- ");
        assert!(
            stripped_md.contains(bare),
            "txt line missing from markdown: {line}"
        );
    }
}

#[test]
fn json_output_uses_wire_field_names() {
    let json = extract(PAGE, &options_for(OutputFormat::Json)).unwrap_or_default();
    let value: serde_json::Value = match serde_json::from_str(&json) {
        Ok(value) => value,
        Err(err) => panic!("expected valid JSON, got {err}"),
    };
    assert_eq!(value["source"], "https://example.org/format-test");
    assert_eq!(value["source-hostname"], "example.org");
    assert_eq!(value["title"], "Format Test");
    assert!(value["text"].as_str().unwrap_or_default().contains("Opening paragraph"));
    assert!(value["fingerprint"].as_str().is_some());
}

#[test]
fn xml_output_nests_main_under_doc() {
    let xml = extract(PAGE, &options_for(OutputFormat::Xml)).unwrap_or_default();
    assert!(xml.starts_with("<doc"));
    assert!(xml.contains("title=\"Format Test\""));
    assert!(xml.contains("<main>"));
    assert!(xml.contains("<p>"));
    assert!(xml.contains("</doc>"));
}

#[test]
fn tei_output_has_header_and_entry_div() {
    let tei = extract(PAGE, &options_for(OutputFormat::XmlTei)).unwrap_or_default();
    assert!(tei.contains("<TEI xmlns=\"http://www.tei-c.org/ns/1.0\">"));
    assert!(tei.contains("<teiHeader>"));
    assert!(tei.contains("<title type=\"main\">Format Test</title>"));
    assert!(tei.contains("<div type=\"entry\">"));
    assert!(tei.contains("<ab type=\"header\">"));
    assert!(tei.contains("application ident=\"Trafilatura\""));
}

#[test]
fn tei_body_passes_the_schema_check() {
    let doc = extract_with_metadata(PAGE, &options_for(OutputFormat::XmlTei)).unwrap_or_default();
    let converted = textdistill::output::xml::tei_body(&doc.body);
    assert!(textdistill::output::xml::validate_tei(&converted).is_ok());
}

#[test]
fn csv_output_is_tab_separated() {
    let csv = extract(PAGE, &options_for(OutputFormat::Csv)).unwrap_or_default();
    let mut lines = csv.lines();
    let header = lines.next().unwrap_or_default();
    assert_eq!(header.split('\t').count(), 11);
    assert!(header.starts_with("url\tid\tfingerprint"));
}

#[test]
fn html_output_renders_markup() {
    let html = extract(PAGE, &options_for(OutputFormat::Html)).unwrap_or_default();
    assert!(html.contains("<h2>First Section</h2>"));
    assert!(html.contains("<p>"));
    assert!(html.contains("<ul><li>first item</li>"));
}

#[test]
fn closed_vocabulary_holds_for_body_and_comments() {
    let doc = extract_with_metadata(PAGE, &Options::default()).unwrap_or_default();
    assert!(doc.body.obeys_vocabulary());
    if let Some(comments) = &doc.commentsbody {
        assert!(comments.obeys_vocabulary());
    }
}
