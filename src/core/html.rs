//! Minimal HTML table extraction, no HTML crate: case-insensitive tag-block
//! scanning over the raw document, good enough for the source's static
//! standings tables.
//!
//! Quirks handled here so the normalizer sees clean positional rows:
//! - prefers the first `wikitable`-classed table, falls back to the first
//!   table in the document;
//! - header rows (no `<td>`) and merged label rows (`colspan`, e.g. the
//!   totals footer) are dropped;
//! - a `rowspan` on a tie group's rank cell swallows the rank cell from the
//!   following rows; those rows get an empty rank cell re-inserted, which
//!   the row parser reads as a continuation signal.

use crate::domain::model::RawRow;
use crate::utils::error::{DraftError, Result};

/// Extract the medal table's rows as positional cell text.
///
/// Fails only when the document contains no table at all; an empty table
/// body yields an empty row list.
pub fn extract_table_rows(html: &str) -> Result<Vec<RawRow>> {
    let lc = html.to_ascii_lowercase();
    let (inner_start, inner_end) = find_preferred_table(&lc)
        .ok_or_else(|| DraftError::table("no table found in document"))?;

    let table_lc = &lc[inner_start..inner_end];
    let table_html = &html[inner_start..inner_end];

    let mut rows = Vec::new();
    let mut expected_width = 0usize;
    let mut pos = 0;

    while let Some(tr) = find_tag_block(table_lc, "tr", pos) {
        pos = tr.end;
        let row_lc = &table_lc[tr.inner_start..tr.inner_end];
        let row_html = &table_html[tr.inner_start..tr.inner_end];

        let mut cells = Vec::new();
        let mut has_td = false;
        let mut merged = false;
        let mut cell_pos = 0;

        while let Some((cell, is_td)) = next_cell(row_lc, cell_pos) {
            cell_pos = cell.end;
            has_td |= is_td;
            if row_lc[cell.start..cell.inner_start].contains("colspan") {
                merged = true;
            }
            cells.push(cell_text(&row_html[cell.inner_start..cell.inner_end]));
        }

        // Header rows carry only <th> cells; colspan rows are merged labels
        // (totals footer), not country rows.
        if cells.is_empty() || !has_td || merged {
            continue;
        }

        if expected_width == 0 {
            expected_width = cells.len();
        }
        // Rank cell consumed by a rowspan above: restore the blank rank.
        if cells.len() + 1 == expected_width {
            cells.insert(0, String::new());
        }

        rows.push(RawRow::new(cells));
    }

    Ok(rows)
}

#[derive(Debug)]
struct TagBlock {
    /// Offset of `<tag`.
    start: usize,
    /// Offset just past the opening tag's `>`.
    inner_start: usize,
    /// Offset of the matching `</tag`.
    inner_end: usize,
    /// Offset just past the closing tag's `>`.
    end: usize,
}

/// Next `<tag ...>...</tag>` block at or after `from`. `lc` must be
/// lowercase; offsets are valid for any same-length original string.
fn find_tag_block(lc: &str, tag: &str, from: usize) -> Option<TagBlock> {
    let open_pat = format!("<{}", tag);
    let close_pat = format!("</{}", tag);
    let mut pos = from;

    loop {
        let start = lc.get(pos..)?.find(&open_pat)? + pos;
        let after = start + open_pat.len();
        // Boundary check so "<th" does not match "<thead".
        if !matches!(lc.as_bytes().get(after), Some(b' ' | b'\t' | b'\n' | b'\r' | b'>')) {
            pos = after;
            continue;
        }

        let inner_start = lc[after..].find('>')? + after + 1;

        let mut search = inner_start;
        let inner_end = loop {
            let close = lc.get(search..)?.find(&close_pat)? + search;
            let boundary = lc.as_bytes().get(close + close_pat.len());
            if matches!(boundary, Some(b' ' | b'\t' | b'\n' | b'\r' | b'>')) {
                break close;
            }
            search = close + close_pat.len();
        };

        let end = lc[inner_end..].find('>')? + inner_end + 1;
        return Some(TagBlock {
            start,
            inner_start,
            inner_end,
            end,
        });
    }
}

/// Inner range of the first `wikitable`-classed table, else the first table.
fn find_preferred_table(lc: &str) -> Option<(usize, usize)> {
    let mut fallback = None;
    let mut pos = 0;

    while let Some(block) = find_tag_block(lc, "table", pos) {
        pos = block.end;
        if lc[block.start..block.inner_start].contains("wikitable") {
            return Some((block.inner_start, block.inner_end));
        }
        if fallback.is_none() {
            fallback = Some((block.inner_start, block.inner_end));
        }
    }

    fallback
}

/// Next `<td>` or `<th>` cell in document order.
fn next_cell(row_lc: &str, from: usize) -> Option<(TagBlock, bool)> {
    let td = find_tag_block(row_lc, "td", from);
    let th = find_tag_block(row_lc, "th", from);
    match (td, th) {
        (Some(td), Some(th)) => {
            if td.start < th.start {
                Some((td, true))
            } else {
                Some((th, false))
            }
        }
        (Some(td), None) => Some((td, true)),
        (None, Some(th)) => Some((th, false)),
        (None, None) => None,
    }
}

fn cell_text(inner_html: &str) -> String {
    normalize_ws(&decode_entities(&strip_tags(inner_html)))
}

pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn decode_entities(s: &str) -> String {
    // &amp; last, so "&amp;lt;" decodes to "&lt;" and stops there.
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
