use serde::Serialize;

/// Inline text spans with formatting.
///
/// Emphasis variants carry flat text: emphasis inside emphasis is not resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Strikethrough(String),
    Code(String),
    Link { text: String, url: String },
}

impl Span {
    /// The literal text this span displays.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text)
            | Span::Bold(text)
            | Span::Italic(text)
            | Span::Strikethrough(text)
            | Span::Code(text) => text,
            Span::Link { text, .. } => text,
        }
    }
}

/// Concatenate the displayed text of a span sequence.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}

/// Block-level elements produced by the renderer, in source line order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentNode {
    Paragraph {
        spans: Vec<Span>,
    },
    Header {
        level: u8,
        spans: Vec<Span>,
    },
    ListItem {
        /// Leading whitespace characters before the marker
        depth: usize,
        /// Literal numbering token (`3.`) for ordered items
        ordinal: Option<String>,
        spans: Vec<Span>,
    },
    CodeBlock {
        language: Option<String>,
        raw_lines: Vec<String>,
    },
    Blockquote {
        spans: Vec<Span>,
    },
    Table {
        header: Vec<Vec<Span>>,
        rows: Vec<Vec<Vec<Span>>>,
    },
    Rule,
    Spacer,
}

impl ContentNode {
    /// Inline spans of nodes that carry a single run of them.
    pub fn spans(&self) -> Option<&[Span]> {
        match self {
            ContentNode::Paragraph { spans }
            | ContentNode::Header { spans, .. }
            | ContentNode::ListItem { spans, .. }
            | ContentNode::Blockquote { spans } => Some(spans),
            ContentNode::CodeBlock { .. }
            | ContentNode::Table { .. }
            | ContentNode::Rule
            | ContentNode::Spacer => None,
        }
    }
}
