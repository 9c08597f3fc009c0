//! XML and TEI-XML writers.

use crate::document::Document;
use crate::tree::Node;

/// Tags allowed in TEI output.
const TEI_TAGS: &[&str] = &[
    "ab", "body", "cell", "code", "del", "div", "graphic", "head", "hi", "item", "lb", "list",
    "p", "quote", "ref", "row", "table",
];

/// Attributes allowed in TEI output.
const TEI_ATTRIBUTES: &[&str] = &["rend", "rendition", "role", "target", "type"];

/// Escape a string for use in XML text content.
#[must_use]
pub fn escape_text(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a string for use in an XML attribute value.
#[must_use]
pub fn escape_attr(raw: &str) -> String {
    escape_text(raw).replace('"', "&quot;")
}

fn write_node(node: &Node, out: &mut String, indent: usize) {
    let pad = "  ".repeat(indent);
    out.push_str(&pad);
    out.push('<');
    out.push_str(&node.tag);
    for (key, value) in &node.attrs {
        out.push_str(&format!(" {key}=\"{}\"", escape_attr(value)));
    }
    if node.text.is_empty() && node.children.is_empty() {
        out.push_str("/>\n");
    } else {
        out.push('>');
        out.push_str(&escape_text(&node.text));
        if node.children.is_empty() {
            out.push_str(&format!("</{}>\n", node.tag));
        } else {
            out.push('\n');
            for child in &node.children {
                write_node(child, out, indent + 1);
                if !child.tail.is_empty() {
                    out.push_str(&"  ".repeat(indent + 1));
                    out.push_str(&escape_text(&child.tail));
                    out.push('\n');
                }
            }
            out.push_str(&format!("{pad}</{}>\n", node.tag));
        }
    }
}

fn push_meta_attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            out.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
        }
    }
}

/// Serialize as `<doc>` XML with metadata attributes.
#[must_use]
pub fn to_xml(doc: &Document) -> String {
    let mut out = String::from("<doc");
    push_meta_attr(&mut out, "sitename", doc.sitename.as_deref());
    push_meta_attr(&mut out, "title", doc.title.as_deref());
    push_meta_attr(&mut out, "author", doc.author.as_deref());
    push_meta_attr(&mut out, "date", doc.date.as_deref());
    push_meta_attr(&mut out, "url", doc.url.as_deref());
    push_meta_attr(&mut out, "hostname", doc.hostname.as_deref());
    push_meta_attr(&mut out, "description", doc.description.as_deref());
    if !doc.categories.is_empty() {
        push_meta_attr(&mut out, "categories", Some(&doc.categories.join(",")));
    }
    if !doc.tags.is_empty() {
        push_meta_attr(&mut out, "tags", Some(&doc.tags.join(",")));
    }
    push_meta_attr(&mut out, "license", doc.license.as_deref());
    push_meta_attr(&mut out, "fingerprint", doc.fingerprint.as_deref());
    push_meta_attr(&mut out, "language", doc.language.as_deref());
    push_meta_attr(&mut out, "image", doc.image.as_deref());
    push_meta_attr(&mut out, "pagetype", doc.pagetype.as_deref());
    out.push_str(">\n");

    out.push_str("  <main>\n");
    for child in &doc.body.children {
        write_node(child, &mut out, 2);
    }
    out.push_str("  </main>\n");

    if let Some(comments) = &doc.commentsbody {
        out.push_str("  <comments>\n");
        for child in &comments.children {
            write_node(child, &mut out, 2);
        }
        out.push_str("  </comments>\n");
    }

    out.push_str("</doc>\n");
    out
}

/// Transform a body tree into its TEI shape: `head` becomes
/// `ab type="header"`, tags outside the TEI set are merged into the flow,
/// foreign attributes dropped.
#[must_use]
pub fn tei_body(node: &Node) -> Node {
    let mut out = node.clone();
    if out.tag == "head" {
        out.tag = "ab".to_string();
        out.attrs.retain(|(k, _)| k != "rend");
        out.set_attr("type", "header");
    }
    out.attrs.retain(|(k, _)| TEI_ATTRIBUTES.contains(&k.as_str()));

    let children = std::mem::take(&mut out.children);
    for child in children {
        let converted = tei_body(&child);
        if TEI_TAGS.contains(&converted.tag.as_str()) {
            out.children.push(converted);
        } else {
            // Merge the violating element into the parent flow
            if !converted.text.is_empty() {
                if out.text.is_empty() && out.children.is_empty() {
                    out.text = converted.text.clone();
                } else if let Some(last) = out.children.last_mut() {
                    last.tail.push(' ');
                    last.tail.push_str(&converted.text);
                } else {
                    out.text.push(' ');
                    out.text.push_str(&converted.text);
                }
            }
            out.children.extend(converted.children);
        }
    }
    out
}

/// Check that a tree satisfies the TEI subset used by this writer.
#[must_use]
pub fn validate_tei(node: &Node) -> Result<(), String> {
    if !TEI_TAGS.contains(&node.tag.as_str()) {
        return Err(format!("tag not allowed in TEI output: {}", node.tag));
    }
    for (key, _) in &node.attrs {
        if !TEI_ATTRIBUTES.contains(&key.as_str()) {
            return Err(format!("attribute not allowed in TEI output: {key}"));
        }
    }
    for child in &node.children {
        validate_tei(child)?;
    }
    Ok(())
}

fn header_field(value: Option<&str>) -> String {
    escape_text(value.unwrap_or_default())
}

/// Serialize as TEI-XML with a full teiHeader.
#[must_use]
pub fn to_tei(doc: &Document) -> String {
    let title = header_field(doc.title.as_deref());
    let author = header_field(doc.author.as_deref());
    let sitename = header_field(doc.sitename.as_deref());
    let url = header_field(doc.url.as_deref());
    let hostname = header_field(doc.hostname.as_deref());
    let date = header_field(doc.date.as_deref());
    let description = header_field(doc.description.as_deref());
    let license = header_field(doc.license.as_deref());
    let fingerprint = header_field(doc.fingerprint.as_deref());
    let id = header_field(doc.id.as_deref());
    let filedate = escape_text(&doc.filedate);

    let mut out = String::new();
    out.push_str("<TEI xmlns=\"http://www.tei-c.org/ns/1.0\">\n");
    out.push_str("  <teiHeader>\n");
    out.push_str("    <fileDesc>\n");
    out.push_str("      <titleStmt>\n");
    out.push_str(&format!("        <title type=\"main\">{title}</title>\n"));
    if !author.is_empty() {
        out.push_str(&format!("        <author>{author}</author>\n"));
    }
    out.push_str("      </titleStmt>\n");
    out.push_str("      <publicationStmt>\n");
    if !sitename.is_empty() {
        out.push_str(&format!("        <publisher>{sitename}</publisher>\n"));
    }
    if license.is_empty() {
        out.push_str("        <availability><p/></availability>\n");
    } else {
        out.push_str(&format!(
            "        <availability><licence>{license}</licence></availability>\n"
        ));
    }
    out.push_str("      </publicationStmt>\n");
    out.push_str("      <notesStmt>\n");
    if !id.is_empty() {
        out.push_str(&format!("        <note type=\"id\">{id}</note>\n"));
    }
    out.push_str(&format!(
        "        <note type=\"fingerprint\">{fingerprint}</note>\n"
    ));
    out.push_str("      </notesStmt>\n");
    out.push_str("      <sourceDesc>\n");
    out.push_str("        <bibl>");
    let mut bibl_parts: Vec<&str> = Vec::new();
    if !title.is_empty() {
        bibl_parts.push(&title);
    }
    if !author.is_empty() {
        bibl_parts.push(&author);
    }
    if !sitename.is_empty() {
        bibl_parts.push(&sitename);
    }
    if !date.is_empty() {
        bibl_parts.push(&date);
    }
    out.push_str(&bibl_parts.join(", "));
    out.push_str("</bibl>\n");
    out.push_str("        <biblFull>\n");
    out.push_str("          <titleStmt>\n");
    out.push_str(&format!("            <title type=\"main\">{title}</title>\n"));
    if !author.is_empty() {
        out.push_str(&format!("            <author>{author}</author>\n"));
    }
    out.push_str("          </titleStmt>\n");
    out.push_str("          <publicationStmt>\n");
    if !sitename.is_empty() {
        out.push_str(&format!("            <publisher>{sitename}</publisher>\n"));
    }
    if !hostname.is_empty() {
        out.push_str(&format!("            <idno type=\"hostname\">{hostname}</idno>\n"));
    }
    if !url.is_empty() {
        out.push_str(&format!("            <ptr target=\"{}\"/>\n", escape_attr(&url)));
    }
    if !date.is_empty() {
        out.push_str(&format!("            <date>{date}</date>\n"));
    }
    out.push_str("          </publicationStmt>\n");
    out.push_str("        </biblFull>\n");
    out.push_str("      </sourceDesc>\n");
    out.push_str("    </fileDesc>\n");
    out.push_str("    <profileDesc>\n");
    if !description.is_empty() {
        out.push_str(&format!(
            "      <abstract><p>{description}</p></abstract>\n"
        ));
    }
    if !doc.categories.is_empty() || !doc.tags.is_empty() {
        out.push_str("      <textClass>\n");
        out.push_str("        <keywords>\n");
        for category in &doc.categories {
            out.push_str(&format!(
                "          <term type=\"category\">{}</term>\n",
                escape_text(category)
            ));
        }
        for tag in &doc.tags {
            out.push_str(&format!(
                "          <term type=\"tag\">{}</term>\n",
                escape_text(tag)
            ));
        }
        out.push_str("        </keywords>\n");
        out.push_str("      </textClass>\n");
    }
    out.push_str("      <creation>\n");
    out.push_str(&format!(
        "        <date type=\"download\">{filedate}</date>\n"
    ));
    out.push_str("      </creation>\n");
    out.push_str("    </profileDesc>\n");
    out.push_str("    <encodingDesc>\n");
    out.push_str("      <appInfo>\n");
    out.push_str(&format!(
        "        <application ident=\"Trafilatura\" version=\"{}\">\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str("          <label>Web text extraction</label>\n");
    out.push_str("        </application>\n");
    out.push_str("      </appInfo>\n");
    out.push_str("    </encodingDesc>\n");
    out.push_str("  </teiHeader>\n");
    out.push_str("  <text>\n");
    out.push_str("    <body>\n");
    out.push_str("      <div type=\"entry\">\n");
    let body = tei_body(&doc.body);
    for child in &body.children {
        write_node(child, &mut out, 4);
    }
    out.push_str("      </div>\n");
    if let Some(comments) = &doc.commentsbody {
        out.push_str("      <div type=\"comments\">\n");
        let comments = tei_body(comments);
        for child in &comments.children {
            write_node(child, &mut out, 4);
        }
        out.push_str("      </div>\n");
    }
    out.push_str("    </body>\n");
    out.push_str("  </text>\n");
    out.push_str("</TEI>\n");
    out
}
