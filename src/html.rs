use crate::block::{ContentNode, Span};
use crate::config::Config;
use crate::table::row_cells;

/// Convert content nodes to an HTML fragment, one block per line
pub fn nodes_to_html(nodes: &[ContentNode], config: &Config) -> String {
    let mut out = String::new();
    for node in nodes {
        emit_node(node, config, &mut out);
    }
    out
}

fn emit_node(node: &ContentNode, config: &Config, out: &mut String) {
    match node {
        ContentNode::Paragraph { spans } => {
            out.push_str("<p>");
            spans_to_html(spans, config, out);
            out.push_str("</p>\n");
        }
        ContentNode::Header { level, spans } => {
            out.push_str(&format!("<h{level}>"));
            spans_to_html(spans, config, out);
            out.push_str(&format!("</h{level}>\n"));
        }
        ContentNode::ListItem {
            depth,
            ordinal,
            spans,
        } => {
            out.push_str("<div class=\"list-item\"");
            if *depth > 0 {
                let margin = *depth as f32 * config.list.indent_rem;
                out.push_str(&format!(" style=\"margin-left: {margin}rem\""));
            }
            out.push_str("><span class=\"list-marker\">");
            match ordinal {
                Some(ordinal) => escape_into(ordinal, out),
                None => out.push('•'),
            }
            out.push_str("</span><span>");
            spans_to_html(spans, config, out);
            out.push_str("</span></div>\n");
        }
        ContentNode::CodeBlock {
            language,
            raw_lines,
        } => {
            out.push_str("<div class=\"code-block\">");
            if let Some(lang) = language.as_deref().filter(|_| config.code.show_language) {
                out.push_str("<div class=\"code-language\">");
                escape_into(lang, out);
                out.push_str("</div>");
            }
            out.push_str("<pre><code>");
            escape_into(&raw_lines.join("\n"), out);
            out.push_str("</code></pre></div>\n");
        }
        ContentNode::Blockquote { spans } => {
            out.push_str("<blockquote><p>");
            spans_to_html(spans, config, out);
            out.push_str("</p></blockquote>\n");
        }
        ContentNode::Table { header, rows } => {
            table_to_html(header, rows, config, out);
        }
        ContentNode::Rule => {
            out.push_str("<hr>\n");
        }
        ContentNode::Spacer => {
            if config.blocks.render_spacers {
                out.push_str("<div class=\"spacer\"></div>\n");
            }
        }
    }
}

fn spans_to_html(spans: &[Span], config: &Config, out: &mut String) {
    for span in spans {
        span_to_html(span, config, out);
    }
}

fn span_to_html(span: &Span, config: &Config, out: &mut String) {
    let (open, close) = match span {
        Span::Text(text) => {
            escape_into(text, out);
            return;
        }
        Span::Link { text, url } => {
            out.push_str("<a href=\"");
            escape_into(url, out);
            out.push('"');
            if config.links.new_tab {
                out.push_str(" target=\"_blank\"");
                if !config.links.rel.is_empty() {
                    out.push_str(" rel=\"");
                    escape_into(&config.links.rel, out);
                    out.push('"');
                }
            }
            out.push('>');
            escape_into(text, out);
            out.push_str("</a>");
            return;
        }
        Span::Bold(_) => ("<strong>", "</strong>"),
        Span::Italic(_) => ("<em>", "</em>"),
        Span::Strikethrough(_) => ("<del>", "</del>"),
        Span::Code(_) => ("<code>", "</code>"),
    };
    out.push_str(open);
    escape_into(span.text(), out);
    out.push_str(close);
}

fn table_to_html(header: &[Vec<Span>], rows: &[Vec<Vec<Span>>], config: &Config, out: &mut String) {
    let col_count = header.len();

    out.push_str("<table>\n<thead><tr>");
    for cell in header {
        out.push_str("<th>");
        spans_to_html(cell, config, out);
        out.push_str("</th>");
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for row in rows {
        out.push_str("<tr>");
        for cell in row_cells(row, col_count, config.table.ragged_rows) {
            out.push_str("<td>");
            spans_to_html(cell, config, out);
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
}

/// Append `text` with HTML special characters replaced by entities.
fn escape_into(text: &str, out: &mut String) {
    let mut start = 0;
    for (index, byte) in text.bytes().enumerate() {
        let replacement = match byte {
            b'&' => "&amp;",
            b'"' => "&quot;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[start..index]);
        out.push_str(replacement);
        start = index + 1;
    }
    out.push_str(&text[start..]);
}
