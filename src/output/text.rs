//! Plain text and Markdown writers.
//!
//! Both walk the internal tree the same way: blocks separated by newlines,
//! inline content space-joined. Markdown adds heading markers, list
//! bullets, emphasis delimiters, links, and fenced code.

use crate::tree::Node;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Txt,
    Markdown,
}

/// Serialize the tree as plain text.
#[must_use]
pub fn to_text(body: &Node) -> String {
    render(body, Mode::Txt)
}

/// Serialize the tree as Markdown.
#[must_use]
pub fn to_markdown(body: &Node) -> String {
    render(body, Mode::Markdown)
}

fn render(body: &Node, mode: Mode) -> String {
    let mut out = String::new();
    for child in &body.children {
        render_block(child, mode, &mut out);
        if !child.tail.trim().is_empty() {
            push_line(&mut out, child.tail.trim());
        }
    }
    // At most one blank line between blocks
    let mut cleaned = String::with_capacity(out.len());
    let mut blank_run = 0;
    for line in out.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        cleaned.push_str(line.trim_end());
        cleaned.push('\n');
    }
    cleaned.trim().to_string()
}

fn push_line(out: &mut String, line: &str) {
    if !line.is_empty() {
        out.push_str(line);
    }
    out.push('\n');
}

fn render_block(node: &Node, mode: Mode, out: &mut String) {
    match node.tag.as_str() {
        "head" => {
            let flow = inline_flow(node, mode);
            if mode == Mode::Markdown {
                let level = heading_level(node);
                push_line(out, &format!("{} {}", "#".repeat(level), flow));
            } else {
                push_line(out, &flow);
            }
            out.push('\n');
        }
        "p" | "quote" => {
            let flow = inline_flow(node, mode);
            if !flow.trim().is_empty() {
                push_line(out, flow.trim());
                out.push('\n');
            }
        }
        "code" => {
            render_code_block(node, mode, out);
            out.push('\n');
        }
        "list" => {
            for item in node.children.iter().filter(|c| c.tag == "item") {
                let flow = inline_flow(item, mode);
                if !flow.trim().is_empty() {
                    push_line(out, &format!("- {}", flow.trim()));
                }
            }
            out.push('\n');
        }
        "table" => {
            render_table(node, mode, out);
            out.push('\n');
        }
        "graphic" => {
            push_line(out, &graphic_inline(node));
            out.push('\n');
        }
        "lb" => out.push('\n'),
        "div" => {
            for child in &node.children {
                render_block(child, mode, out);
            }
            if !node.text.trim().is_empty() {
                push_line(out, node.text.trim());
                out.push('\n');
            }
        }
        // Anything else is flattened into a paragraph-like line
        _ => {
            let flow = inline_flow(node, mode);
            if !flow.trim().is_empty() {
                push_line(out, flow.trim());
                out.push('\n');
            }
        }
    }
}

fn heading_level(node: &Node) -> usize {
    node.attr("rend")
        .and_then(|r| r.strip_prefix('h'))
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| (1..=6).contains(n))
        .unwrap_or(1)
}

fn render_code_block(node: &Node, mode: Mode, out: &mut String) {
    let raw = node.text_content();
    let code = raw.trim_matches('\n');
    if mode == Mode::Markdown {
        if code.contains('\n') || node.has_tag("lb") {
            let lang = node.attr("lang").unwrap_or_default();
            push_line(out, &format!("```{lang}"));
            push_line(out, code);
            push_line(out, "```");
        } else {
            push_line(out, &format!("`{code}`"));
        }
    } else {
        push_line(out, code);
    }
}

fn render_table(table: &Node, mode: Mode, out: &mut String) {
    for row in table.children.iter().filter(|c| c.tag == "row") {
        let cells: Vec<String> = row
            .children
            .iter()
            .filter(|c| c.tag == "cell")
            .map(|cell| {
                let flow = inline_flow(cell, mode);
                if flow.is_empty() {
                    "|".to_string()
                } else {
                    flow
                }
            })
            .collect();
        if cells.is_empty() {
            continue;
        }
        push_line(out, &format!("| {}", cells.join(" | ")));

        let is_head_row = row
            .children
            .iter()
            .all(|cell| cell.attr("role") == Some("head"));
        if is_head_row {
            push_line(out, &format!("|{}", "---|".repeat(cells.len())));
        }
    }
}

fn graphic_inline(node: &Node) -> String {
    let text = node.text.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    let src = node.attr("src").unwrap_or_default();
    let title = node.attr("title").unwrap_or_default();
    let alt = node.attr("alt").unwrap_or_default();
    let label = [title, alt]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    format!("![{label}]({src})")
}

/// Render a node's inline content: own text, inline children with their
/// tails, space-joined.
fn inline_flow(node: &Node, mode: Mode) -> String {
    let mut pieces: Vec<String> = Vec::new();
    if !node.text.is_empty() {
        pieces.push(node.text.clone());
    }
    for child in &node.children {
        let rendered = render_inline(child, mode);
        if !rendered.is_empty() {
            pieces.push(rendered);
        }
        if !child.tail.is_empty() {
            pieces.push(child.tail.clone());
        }
    }
    join_flow(&pieces)
}

fn render_inline(node: &Node, mode: Mode) -> String {
    let inner = inline_flow(node, mode);
    if mode == Mode::Txt {
        return match node.tag.as_str() {
            "lb" => "\n".to_string(),
            "graphic" => graphic_inline(node),
            _ => inner,
        };
    }
    match node.tag.as_str() {
        "hi" => {
            let delim = match node.attr("rend") {
                Some("#b") => "**",
                Some("#i") => "*",
                Some("#u") => "__",
                Some("#t") => "`",
                _ => "",
            };
            format!("{delim}{inner}{delim}")
        }
        "del" => format!("~~{inner}~~"),
        "ref" => match node.attr("target") {
            Some(target) => format!("[{inner}]({target})"),
            None => format!("[{inner}]"),
        },
        "code" => format!("`{inner}`"),
        "lb" => "\n".to_string(),
        "graphic" => graphic_inline(node),
        _ => inner,
    }
}

fn join_flow(pieces: &[String]) -> String {
    let mut out = String::new();
    for piece in pieces {
        if piece.is_empty() {
            continue;
        }
        if !out.is_empty() && !out.ends_with('\n') && !piece.starts_with('\n') {
            out.push(' ');
        }
        out.push_str(piece);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_body() -> Node {
        let mut body = Node::new("body");
        let mut head = Node::with_text("head", "Section Title");
        head.set_attr("rend", "h2");
        body.push(head);
        body.push(Node::with_text("p", "First paragraph."));
        let mut p = Node::with_text("p", "Emphasis on");
        let mut hi = Node::with_text("hi", "this");
        hi.set_attr("rend", "#b");
        hi.tail = "word.".to_string();
        p.push(hi);
        body.push(p);
        let mut list = Node::new("list");
        list.set_attr("rend", "ul");
        list.push(Node::with_text("item", "alpha"));
        list.push(Node::with_text("item", "beta"));
        body.push(list);
        body
    }

    #[test]
    fn txt_renders_blocks_on_lines() {
        let text = to_text(&sample_body());
        assert!(text.contains("Section Title"));
        assert!(text.contains("First paragraph."));
        assert!(text.contains("Emphasis on this word."));
        assert!(text.contains("- alpha"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn markdown_adds_structure() {
        let md = to_markdown(&sample_body());
        assert!(md.contains("## Section Title"));
        assert!(md.contains("**this**"));
        assert!(md.contains("- alpha"));
    }

    #[test]
    fn txt_paragraphs_are_subset_of_markdown() {
        let body = sample_body();
        let txt_lines: Vec<String> = to_text(&body)
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        let md = to_markdown(&body);
        for line in txt_lines {
            let bare = line.trim_start_matches("- ");
            assert!(
                md.contains(bare) || md.contains(&line.replace("this", "**this**")),
                "missing from markdown: {line}"
            );
        }
    }

    #[test]
    fn table_rows_join_cells() {
        let mut body = Node::new("body");
        let mut table = Node::new("table");
        let mut head_row = Node::new("row");
        let mut name = Node::with_text("cell", "Name");
        name.set_attr("role", "head");
        let mut score = Node::with_text("cell", "Score");
        score.set_attr("role", "head");
        head_row.push(name);
        head_row.push(score);
        table.push(head_row);
        let mut row = Node::new("row");
        row.push(Node::with_text("cell", "Ada"));
        row.push(Node::with_text("cell", "10"));
        table.push(row);
        body.push(table);

        let text = to_text(&body);
        assert!(text.contains("| Name | Score"));
        assert!(text.contains("|---|---|"));
        assert!(text.contains("| Ada | 10"));
    }

    #[test]
    fn markdown_links_and_code() {
        let mut body = Node::new("body");
        let mut p = Node::with_text("p", "see");
        let mut link = Node::with_text("ref", "the docs");
        link.set_attr("target", "https://example.org/docs");
        p.push(link);
        body.push(p);
        body.push(Node::with_text("code", "let x = 1;\nlet y = 2;"));

        let md = to_markdown(&body);
        assert!(md.contains("[the docs](https://example.org/docs)"));
        assert!(md.contains("```"));

        let txt = to_text(&body);
        assert!(txt.contains("the docs"));
        assert!(!txt.contains('['));
    }

    #[test]
    fn graphic_without_text_renders_image_syntax() {
        let mut body = Node::new("body");
        let mut graphic = Node::new("graphic");
        graphic.set_attr("src", "https://example.org/i.jpg");
        graphic.set_attr("alt", "a picture");
        body.push(graphic);

        let text = to_text(&body);
        assert_eq!(text, "![a picture](https://example.org/i.jpg)");
    }
}
