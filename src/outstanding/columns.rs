//! Fixed-width column layout.
//!
//! Widths are fixed up front so rows can be written as soon as they are produced.
//! All width math is unicode-aware: a CJK character counts as two columns, a
//! combining mark as zero.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ELLIPSIS: char = '…';

/// One column of a fixed-width table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub width: usize,
}

impl Column {
    pub const fn new(header: &'static str, width: usize) -> Self {
        Self { header, width }
    }
}

/// A row layout: columns separated by a fixed gap. The last column is never padded.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    columns: Vec<Column>,
    gap: usize,
}

impl ColumnLayout {
    pub fn new(columns: Vec<Column>, gap: usize) -> Self {
        Self { columns, gap }
    }

    /// The header row, unstyled.
    pub fn header(&self) -> String {
        let cells: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        self.row(&cells)
    }

    /// Lays out one row. Missing trailing cells render empty; extra cells are ignored.
    pub fn row<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let gap = " ".repeat(self.gap);
        let last = self.columns.len().saturating_sub(1);
        let mut line = String::new();
        for (i, column) in self.columns.iter().enumerate() {
            let cell = cells.get(i).map(AsRef::as_ref).unwrap_or("");
            if i > 0 {
                line.push_str(&gap);
            }
            if i == last {
                line.push_str(&truncate_to_width(cell, column.width));
            } else {
                line.push_str(&fit_to_width(cell, column.width));
            }
        }
        line.trim_end().to_string()
    }
}

/// Truncates `s` to at most `max_width` columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    if max_width > 0 {
        result.push(ELLIPSIS);
    }
    result
}

/// Truncates and right-pads `s` to exactly `width` columns.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let cut = truncate_to_width(s, width);
    let padding = width.saturating_sub(cut.width());
    format!("{cut}{}", " ".repeat(padding))
}
