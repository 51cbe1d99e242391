use serde::Deserialize;

use crate::block::{ContentNode, Span};
use crate::inline::resolve_spans;

/// How emitters treat data rows whose length differs from the header's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaggedRows {
    /// Pad short rows with empty cells and drop cells past the last column.
    #[default]
    Pad,
    /// Emit every row exactly as parsed.
    AsIs,
}

/// Whether a trimmed line can open a table: at least three pipe-delimited segments.
pub fn starts_table(trimmed: &str) -> bool {
    trimmed.split('|').count() >= 3
}

/// Whether a line may continue a table that is already open.
pub fn continues_table(line: &str) -> bool {
    line.trim().contains('|')
}

/// Parse a run of pipe-delimited lines into a table.
///
/// Divider rows (`|---|:--|`) are dropped. The first surviving row becomes the
/// header. Returns `None` when fewer than two rows survive, leaving the caller
/// to treat the opening line as ordinary text.
pub fn parse_table(lines: &[&str]) -> Option<ContentNode> {
    let mut rows = lines
        .iter()
        .map(|line| line.trim())
        .filter(|row| !row.is_empty() && !is_divider(row))
        .map(|row| split_cells(row).into_iter().map(resolve_spans).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    if rows.len() < 2 {
        tracing::trace!(rows = rows.len(), "too few table rows, not a table");
        return None;
    }

    let header = rows.remove(0);
    Some(ContentNode::Table { header, rows })
}

fn is_divider(row: &str) -> bool {
    row.chars()
        .all(|c| c == '-' || c == ':' || c == '|' || c.is_whitespace())
}

fn split_cells(row: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = row.split('|').map(str::trim).collect();
    // Outer pipes leave an empty cell on each side
    if cells.first().is_some_and(|cell| cell.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}

/// Cells of a data row laid out for a table with `columns` columns.
pub fn row_cells<'r>(row: &'r [Vec<Span>], columns: usize, policy: RaggedRows) -> Vec<&'r [Span]> {
    match policy {
        RaggedRows::Pad => (0..columns)
            .map(|i| row.get(i).map_or(&[][..], Vec::as_slice))
            .collect(),
        RaggedRows::AsIs => row.iter().map(Vec::as_slice).collect(),
    }
}
