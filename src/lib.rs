mod block;
mod cache;
mod config;
mod error;
mod html;
mod inline;
mod parser;
mod sanitize;
mod table;

pub use block::{ContentNode, Span, plain_text};
pub use cache::MemoRenderer;
pub use config::{BlocksConfig, CodeConfig, Config, LinksConfig, ListConfig, TableConfig};
pub use error::{Error, Result};
pub use inline::resolve_spans;
pub use sanitize::sanitize;
pub use table::{RaggedRows, parse_table, row_cells};

/// Render message content into content nodes.
///
/// Dangerous markup is stripped first. Every input is accepted: anything the
/// parser does not recognise degrades to literal paragraph text.
pub fn render(content: &str) -> Vec<ContentNode> {
    if content.is_empty() {
        return Vec::new();
    }
    let sanitized = sanitize(content);
    let nodes = parser::parse(&sanitized);
    tracing::debug!(bytes = content.len(), nodes = nodes.len(), "rendered content");
    nodes
}

/// Render content that may be absent; `None` renders as empty content.
pub fn render_optional(content: Option<&str>) -> Vec<ContentNode> {
    content.map(render).unwrap_or_default()
}

/// Parse text that has already been through [`sanitize`].
pub fn parse_blocks(sanitized: &str) -> Vec<ContentNode> {
    parser::parse(sanitized)
}

/// Convert markdown to an HTML fragment using default config.
pub fn markdown_to_html(content: &str) -> String {
    markdown_to_html_with_config(content, &Config::compiled_default())
}

/// Convert markdown to an HTML fragment with custom config.
pub fn markdown_to_html_with_config(content: &str, config: &Config) -> String {
    let nodes = render(content);
    html::nodes_to_html(&nodes, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Vec<Span> {
        vec![Span::Text(s.to_string())]
    }

    #[test]
    fn literal_text_is_one_paragraph() {
        for input in ["hello world", "  spaced out, twice.  ", "Numbers 42 and (parens)?"] {
            let nodes = render(input);
            assert_eq!(nodes.len(), 1, "{input:?}");
            let ContentNode::Paragraph { spans } = &nodes[0] else {
                panic!("expected paragraph for {input:?}");
            };
            assert_eq!(plain_text(spans), input);
        }
    }

    #[test]
    fn empty_and_missing_input() {
        assert!(render("").is_empty());
        assert!(render_optional(None).is_empty());
        assert_eq!(
            render_optional(Some("hi")),
            vec![ContentNode::Paragraph { spans: text("hi") }]
        );
    }

    #[test]
    fn marker_lookalikes_stay_literal() {
        assert_eq!(
            render("~~__CODE_0__~~"),
            vec![ContentNode::Paragraph {
                spans: vec![Span::Strikethrough("__CODE_0__".to_string())],
            }]
        );
        assert_eq!(
            render("||BOLD_0|| stays literal"),
            vec![ContentNode::Paragraph {
                spans: text("||BOLD_0|| stays literal"),
            }]
        );
    }

    #[test]
    fn claimed_code_splits_later_constructs() {
        assert_eq!(
            render("**a `x` b**"),
            vec![ContentNode::Paragraph {
                spans: vec![
                    Span::Text("**a ".to_string()),
                    Span::Code("x".to_string()),
                    Span::Text(" b**".to_string()),
                ],
            }]
        );
        assert_eq!(
            render("[l `c`](u)"),
            vec![ContentNode::Paragraph {
                spans: vec![
                    Span::Text("[l ".to_string()),
                    Span::Code("c".to_string()),
                    Span::Text("](u)".to_string()),
                ],
            }]
        );
        assert_eq!(
            render("**[x](y)** _`z`_"),
            vec![ContentNode::Paragraph {
                spans: vec![
                    Span::Text("**".to_string()),
                    Span::Link {
                        text: "x".to_string(),
                        url: "y".to_string(),
                    },
                    Span::Text("** _".to_string()),
                    Span::Code("z".to_string()),
                    Span::Text("_".to_string()),
                ],
            }]
        );
    }

    #[test]
    fn code_span_immunity() {
        assert_eq!(
            render("`**not bold**`"),
            vec![ContentNode::Paragraph {
                spans: vec![Span::Code("**not bold**".to_string())],
            }]
        );
    }

    #[test]
    fn bold_precedence_over_italic() {
        assert_eq!(
            render("**a*b*c**"),
            vec![ContentNode::Paragraph {
                spans: vec![Span::Bold("a*b*c".to_string())],
            }]
        );
    }

    #[test]
    fn sanitization_removes_scripts() {
        assert_eq!(
            render("<script>alert(1)</script>hello"),
            vec![ContentNode::Paragraph { spans: text("hello") }]
        );
    }

    #[test]
    fn header_level_mapping() {
        assert_eq!(
            render("### Title"),
            vec![ContentNode::Header {
                level: 3,
                spans: text("Title"),
            }]
        );
    }

    #[test]
    fn list_depth_by_indentation() {
        assert_eq!(
            render("  - nested"),
            vec![ContentNode::ListItem {
                depth: 2,
                ordinal: None,
                spans: text("nested"),
            }]
        );
        assert_eq!(
            render("- top"),
            vec![ContentNode::ListItem {
                depth: 0,
                ordinal: None,
                spans: text("top"),
            }]
        );
    }

    #[test]
    fn table_round_trip() {
        assert_eq!(
            render("| A | B |\n|---|---|\n| 1 | 2 |"),
            vec![ContentNode::Table {
                header: vec![text("A"), text("B")],
                rows: vec![vec![text("1"), text("2")]],
            }]
        );
    }

    #[test]
    fn ragged_table_never_fails() {
        let nodes = render("| A | B | C |\n| 1 |\n| 1 | 2 | 3 | 4 | 5 |\n|  |");
        let ContentNode::Table { header, rows } = &nodes[0] else {
            panic!("expected table");
        };
        assert_eq!(header.len(), 3);
        assert_eq!(rows.len(), 2);
        assert!(!markdown_to_html("| A | B | C |\n| 1 |\n| 1 | 2 | 3 | 4 | 5 |").is_empty());
    }

    #[test]
    fn unclosed_code_fence() {
        assert_eq!(
            render("```python\nprint('hi')\n\n# comment\n**x**"),
            vec![ContentNode::CodeBlock {
                language: Some("python".to_string()),
                raw_lines: vec![
                    "print('hi')".to_string(),
                    String::new(),
                    "# comment".to_string(),
                    "**x**".to_string(),
                ],
            }]
        );
    }

    #[test]
    fn link_extraction() {
        assert_eq!(
            render("[click](http://x.test)"),
            vec![ContentNode::Paragraph {
                spans: vec![Span::Link {
                    text: "click".to_string(),
                    url: "http://x.test".to_string(),
                }],
            }]
        );
    }

    #[test]
    fn assistant_reply() {
        let reply = "## Findings\n\
                     \n\
                     > Patch **now**.\n\
                     \n\
                     1. Rotate `ssh` keys\n\
                     2. Review [CVE list](https://cve.test)\n\
                     ---\n\
                     | Host | Risk |\n\
                     |------|:----:|\n\
                     | web | ~~low~~ high |";
        let nodes = render(reply);
        assert_eq!(
            nodes,
            vec![
                ContentNode::Header {
                    level: 2,
                    spans: text("Findings"),
                },
                ContentNode::Spacer,
                ContentNode::Blockquote {
                    spans: vec![
                        Span::Text("Patch ".to_string()),
                        Span::Bold("now".to_string()),
                        Span::Text(".".to_string()),
                    ],
                },
                ContentNode::Spacer,
                ContentNode::ListItem {
                    depth: 0,
                    ordinal: Some("1.".to_string()),
                    spans: vec![
                        Span::Text("Rotate ".to_string()),
                        Span::Code("ssh".to_string()),
                        Span::Text(" keys".to_string()),
                    ],
                },
                ContentNode::ListItem {
                    depth: 0,
                    ordinal: Some("2.".to_string()),
                    spans: vec![
                        Span::Text("Review ".to_string()),
                        Span::Link {
                            text: "CVE list".to_string(),
                            url: "https://cve.test".to_string(),
                        },
                    ],
                },
                ContentNode::Rule,
                ContentNode::Table {
                    header: vec![text("Host"), text("Risk")],
                    rows: vec![vec![
                        text("web"),
                        vec![
                            Span::Strikethrough("low".to_string()),
                            Span::Text(" high".to_string()),
                        ],
                    ]],
                },
            ]
        );
    }
}
