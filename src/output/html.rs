//! Filtered HTML writer.
//!
//! Renders the internal tree back into minimal display HTML: the closed
//! vocabulary mapped onto its nearest HTML equivalents, nothing else.

use crate::output::xml::{escape_attr, escape_text};
use crate::tree::Node;

/// Serialize the tree as minimal HTML.
#[must_use]
pub fn to_html(body: &Node) -> String {
    let mut out = String::new();
    for child in &body.children {
        write_html(child, &mut out);
        if !child.tail.trim().is_empty() {
            out.push_str(&escape_text(child.tail.trim()));
        }
    }
    out
}

fn write_html(node: &Node, out: &mut String) {
    match node.tag.as_str() {
        "p" => wrap(node, "p", out),
        "head" => {
            let level = node
                .attr("rend")
                .and_then(|r| r.strip_prefix('h'))
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=6).contains(n))
                .unwrap_or(2);
            wrap(node, &format!("h{level}"), out);
        }
        "list" => {
            let tag = match node.attr("rend") {
                Some("ol") => "ol",
                _ => "ul",
            };
            out.push_str(&format!("<{tag}>"));
            for item in node.children.iter().filter(|c| c.tag == "item") {
                wrap(item, "li", out);
            }
            out.push_str(&format!("</{tag}>"));
        }
        "quote" => wrap(node, "blockquote", out),
        "code" => {
            out.push_str("<pre><code>");
            out.push_str(&escape_text(&node.text_content()));
            out.push_str("</code></pre>");
        }
        "table" => {
            out.push_str("<table>");
            for row in node.children.iter().filter(|c| c.tag == "row") {
                out.push_str("<tr>");
                for cell in row.children.iter().filter(|c| c.tag == "cell") {
                    let tag = if cell.attr("role") == Some("head") { "th" } else { "td" };
                    wrap(cell, tag, out);
                }
                out.push_str("</tr>");
            }
            out.push_str("</table>");
        }
        "graphic" => {
            let src = node.attr("src").unwrap_or_default();
            let alt = node.attr("alt").unwrap_or_default();
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                escape_attr(src),
                escape_attr(alt)
            ));
        }
        "ref" => match node.attr("target") {
            Some(target) => {
                out.push_str(&format!("<a href=\"{}\">", escape_attr(target)));
                write_flow(node, out);
                out.push_str("</a>");
            }
            None => write_flow(node, out),
        },
        "hi" => {
            let tag = match node.attr("rend") {
                Some("#b") => "b",
                Some("#i") => "i",
                Some("#u") => "u",
                Some("#t") => "code",
                Some("#sub") => "sub",
                Some("#sup") => "sup",
                _ => "span",
            };
            wrap(node, tag, out);
        }
        "del" => wrap(node, "del", out),
        "lb" => out.push_str("<br>"),
        "div" => wrap(node, "div", out),
        // Foreign tags are unwrapped into the flow
        _ => write_flow(node, out),
    }
}

fn wrap(node: &Node, tag: &str, out: &mut String) {
    out.push_str(&format!("<{tag}>"));
    write_flow(node, out);
    out.push_str(&format!("</{tag}>"));
}

fn write_flow(node: &Node, out: &mut String) {
    out.push_str(&escape_text(&node.text));
    for child in &node.children {
        write_html(child, out);
        if !child.tail.is_empty() {
            out.push(' ');
            out.push_str(&escape_text(&child.tail));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_blocks_render() {
        let mut body = Node::new("body");
        let mut head = Node::with_text("head", "Title");
        head.set_attr("rend", "h3");
        body.push(head);
        body.push(Node::with_text("p", "Text with <markup> & such."));

        let html = to_html(&body);
        assert!(html.contains("<h3>Title</h3>"));
        assert!(html.contains("<p>Text with &lt;markup&gt; &amp; such.</p>"));
    }

    #[test]
    fn lists_and_links() {
        let mut body = Node::new("body");
        let mut list = Node::new("list");
        list.set_attr("rend", "ol");
        list.push(Node::with_text("item", "one"));
        body.push(list);
        let mut p = Node::new("p");
        let mut link = Node::with_text("ref", "here");
        link.set_attr("target", "https://example.org");
        p.push(link);
        body.push(p);

        let html = to_html(&body);
        assert!(html.contains("<ol><li>one</li></ol>"));
        assert!(html.contains("<a href=\"https://example.org\">here</a>"));
    }
}
