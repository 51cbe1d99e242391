use std::sync::LazyLock;

use regex::Regex;

use crate::block::ContentNode;
use crate::inline::resolve_spans;
use crate::table;

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("header pattern"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*+])\s+(.+)$").expect("bullet pattern"));
static ORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([0-9]+\.)\s+(.+)$").expect("ordered pattern"));

const FENCE: &str = "```";

/// Split text into lines on `\n`, dropping a trailing `\r` from each.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Parse already-sanitized text into content nodes, one forward pass over lines.
pub fn parse(text: &str) -> Vec<ContentNode> {
    if text.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = split_lines(text).collect();
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        cursor = process_line(&lines, cursor, &mut blocks);
    }

    blocks
}

/// Emit the node starting at `lines[cursor]` and return the next unread line.
fn process_line(lines: &[&str], cursor: usize, blocks: &mut Vec<ContentNode>) -> usize {
    let line = lines[cursor];
    let trimmed = line.trim();

    if trimmed.is_empty() {
        blocks.push(ContentNode::Spacer);
        return cursor + 1;
    }

    // Code fences
    if trimmed.starts_with(FENCE) {
        let tag = trimmed.trim_start_matches('`').trim();
        return consume_code_block(lines, cursor, tag, blocks);
    }

    // Blockquotes
    if let Some(rest) = line.trim_start().strip_prefix('>') {
        let content = rest
            .strip_prefix(|c: char| c.is_whitespace())
            .unwrap_or(rest);
        blocks.push(ContentNode::Blockquote {
            spans: resolve_spans(content),
        });
        return cursor + 1;
    }

    // Headings
    if let Some(caps) = HEADER.captures(trimmed) {
        blocks.push(ContentNode::Header {
            level: caps[1].len() as u8,
            spans: resolve_spans(&caps[2]),
        });
        return cursor + 1;
    }

    // Lists
    if let Some(caps) = BULLET.captures(line) {
        blocks.push(ContentNode::ListItem {
            depth: caps[1].chars().count(),
            ordinal: None,
            spans: resolve_spans(&caps[3]),
        });
        return cursor + 1;
    }
    if let Some(caps) = ORDERED.captures(line) {
        blocks.push(ContentNode::ListItem {
            depth: caps[1].chars().count(),
            ordinal: Some(caps[2].to_string()),
            spans: resolve_spans(&caps[3]),
        });
        return cursor + 1;
    }

    if is_rule(trimmed) {
        blocks.push(ContentNode::Rule);
        return cursor + 1;
    }

    // Tables
    if table::starts_table(trimmed) {
        let end = cursor
            + 1
            + lines[cursor + 1..]
                .iter()
                .take_while(|line| table::continues_table(line))
                .count();
        if let Some(node) = table::parse_table(&lines[cursor..end]) {
            blocks.push(node);
            return end;
        }
    }

    blocks.push(ContentNode::Paragraph {
        spans: resolve_spans(line),
    });
    cursor + 1
}

/// Capture lines verbatim up to the closing fence, which is consumed.
///
/// A fence that is never closed runs to the end of the input.
fn consume_code_block(
    lines: &[&str],
    cursor: usize,
    tag: &str,
    blocks: &mut Vec<ContentNode>,
) -> usize {
    let language = if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    };

    let body = &lines[cursor + 1..];
    let close = body.iter().position(|line| is_closing_fence(line));
    let raw_lines = body[..close.unwrap_or(body.len())]
        .iter()
        .map(|line| line.to_string())
        .collect();

    blocks.push(ContentNode::CodeBlock {
        language,
        raw_lines,
    });

    match close {
        Some(offset) => cursor + 1 + offset + 1,
        None => {
            tracing::debug!(line = cursor + 1, "unterminated code fence runs to end of input");
            lines.len()
        }
    }
}

fn is_closing_fence(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= FENCE.len() && trimmed.chars().all(|c| c == '`')
}

/// Three or more of the same rule character.
fn is_rule(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first @ ('-' | '*' | '_')) => trimmed.len() >= 3 && chars.all(|c| c == first),
        _ => false,
    }
}
