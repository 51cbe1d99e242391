//! Inline span resolution.
//!
//! Spans are found in a fixed precedence order: code, links, bold,
//! strikethrough, asterisk italic, underscore italic. Every pass only looks at
//! bytes no earlier pass has claimed, so the leftover markers of one construct
//! are never read as part of another. Resolved spans are kept as structured
//! claims over the source text and stitched back together at the end, with
//! unclaimed text in between becoming [`Span::Text`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::block::Span;

static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("code pattern"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern"));
// Inner single asterisks are allowed, the content may not start or end with one.
static BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^*\n](?:[^\n]*?[^*\n])?)\*\*").expect("bold pattern")
});
static STRIKETHROUGH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^~\n]+?)~~").expect("strikethrough pattern"));

/// Resolve the inline spans of a single line of text.
pub fn resolve_spans(text: &str) -> Vec<Span> {
    let mut buffer = SpanBuffer::new(text);

    buffer.claim_pattern(&CODE, |caps| Some(Span::Code(caps[1].to_string())));
    buffer.claim_pattern(&LINK, |caps| {
        Some(Span::Link {
            text: caps[1].to_string(),
            url: caps[2].to_string(),
        })
    });
    buffer.claim_pattern(&BOLD, |caps| {
        non_blank(&caps[1]).map(|content| Span::Bold(content.to_string()))
    });
    buffer.claim_pattern(&STRIKETHROUGH, |caps| {
        non_blank(&caps[1]).map(|content| Span::Strikethrough(content.to_string()))
    });
    buffer.claim_italic('*');
    buffer.claim_italic('_');

    buffer.into_spans()
}

fn non_blank(content: &str) -> Option<&str> {
    if content.trim().is_empty() {
        None
    } else {
        Some(content)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A resolved span covering `start..end` of the source text.
#[derive(Debug)]
struct Claim {
    start: usize,
    end: usize,
    span: Span,
}

struct SpanBuffer<'a> {
    text: &'a str,
    // One flag per byte of `text`
    claimed: Vec<bool>,
    claims: Vec<Claim>,
}

impl<'a> SpanBuffer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            claimed: vec![false; text.len()],
            claims: Vec::new(),
        }
    }

    /// Maximal byte ranges that no pass has claimed yet.
    fn unclaimed_runs(&self) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start = None;
        for (i, &claimed) in self.claimed.iter().enumerate() {
            match (claimed, start) {
                (false, None) => start = Some(i),
                (true, Some(s)) => {
                    runs.push((s, i));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, self.claimed.len()));
        }
        runs
    }

    fn claim(&mut self, start: usize, end: usize, span: Span) {
        for flag in &mut self.claimed[start..end] {
            *flag = true;
        }
        self.claims.push(Claim { start, end, span });
    }

    /// Claim every non-overlapping match of `re` inside unclaimed text.
    ///
    /// `build` may reject a match, in which case scanning resumes one
    /// character after where that match started.
    fn claim_pattern(&mut self, re: &Regex, build: impl Fn(&Captures) -> Option<Span>) {
        let text = self.text;
        let mut found = Vec::new();

        for (run_start, run_end) in self.unclaimed_runs() {
            let segment = &text[run_start..run_end];
            let mut pos = 0;
            while pos < segment.len() {
                let Some(caps) = re.captures_at(segment, pos) else {
                    break;
                };
                let Some(whole) = caps.get(0) else {
                    break;
                };
                match build(&caps) {
                    Some(span) => {
                        found.push((run_start + whole.start(), run_start + whole.end(), span));
                        pos = whole.end();
                    }
                    None => {
                        pos = whole.start()
                            + segment[whole.start()..]
                                .chars()
                                .next()
                                .map_or(1, char::len_utf8);
                    }
                }
            }
        }

        for (start, end, span) in found {
            self.claim(start, end, span);
        }
    }

    /// Claim single-marker emphasis such as `*word*` or `_word_`.
    ///
    /// The opening marker must sit at the start of the text or follow a
    /// non-word character, and the closing marker must sit at the end of the
    /// text or precede one. A neighbour claimed by an earlier pass counts as a
    /// word character, and so does a character already used by a match of
    /// this pass.
    fn claim_italic(&mut self, marker: char) {
        let text = self.text;
        let mut found = Vec::new();

        for (run_start, run_end) in self.unclaimed_runs() {
            // Nothing at or before `floor` may serve as a boundary for a new match
            let mut floor = run_start;
            let mut pos = run_start;
            while let Some(offset) = text[pos..run_end].find(marker) {
                let open = pos + offset;
                pos = open + marker.len_utf8();

                if !self.opens_at(open, floor) {
                    continue;
                }
                let body_start = open + marker.len_utf8();
                let Some(close_offset) = text[body_start..run_end].find([marker, '\n']) else {
                    break;
                };
                let close = body_start + close_offset;
                if text[close..].starts_with('\n') {
                    continue;
                }
                let content = &text[body_start..close];
                let after = close + marker.len_utf8();
                if content.trim().is_empty() || !self.closes_at(after) {
                    continue;
                }

                found.push((open, after, Span::Italic(content.to_string())));
                floor = after;
                pos = after;
            }
        }

        for (start, end, span) in found {
            self.claim(start, end, span);
        }
    }

    fn opens_at(&self, open: usize, floor: usize) -> bool {
        if open == 0 {
            return true;
        }
        match self.text[..open].char_indices().next_back() {
            Some((i, c)) => i >= floor && !self.claimed[i] && !is_word_char(c),
            None => true,
        }
    }

    fn closes_at(&self, after: usize) -> bool {
        match self.text[after..].chars().next() {
            Some(c) => !self.claimed[after] && !is_word_char(c),
            None => true,
        }
    }

    fn into_spans(mut self) -> Vec<Span> {
        self.claims.sort_by_key(|claim| claim.start);

        let mut spans = Vec::with_capacity(self.claims.len() * 2 + 1);
        let mut cursor = 0;
        for claim in self.claims {
            if claim.start > cursor {
                spans.push(Span::Text(self.text[cursor..claim.start].to_string()));
            }
            spans.push(claim.span);
            cursor = claim.end;
        }
        if cursor < self.text.len() {
            spans.push(Span::Text(self.text[cursor..].to_string()));
        }
        spans
    }
}
