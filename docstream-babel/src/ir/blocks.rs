//! Flat block sequence produced by extraction and consumed by generation.
//!
//! All offsets are UTF-16 code units, the unit the target editing API uses to
//! address its character stream. For ASCII text this equals the char count.

use crate::ir::style::{NamedStyle, TextStyle};
use serde::Serialize;

/// Length of `text` in stream units (UTF-16 code units).
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// One paragraph, heading, list item or table cell worth of flat text.
///
/// `text` never ends with the block separator; the generator appends it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub text: String,
    pub paragraph_style: NamedStyle,
    pub inline_styles: Vec<StyleInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<ListMembership>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<CellGeometry>,
}

impl Block {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            paragraph_style: NamedStyle::NormalText,
            inline_styles: Vec::new(),
            list: None,
            table: None,
        }
    }

    pub fn with_paragraph_style(mut self, style: NamedStyle) -> Self {
        self.paragraph_style = style;
        self
    }

    pub fn with_style(mut self, start: usize, end: usize, style: TextStyle) -> Self {
        self.inline_styles.push(StyleInterval::new(start, end, style));
        self
    }

    pub fn with_list(mut self, list: ListMembership) -> Self {
        self.list = Some(list);
        self
    }

    pub fn with_table(mut self, cell: CellGeometry) -> Self {
        self.table = Some(cell);
        self
    }

    /// Length of the block text in stream units.
    pub fn len(&self) -> usize {
        text_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_list_item(&self) -> bool {
        self.list.is_some()
    }

    pub fn is_table_cell(&self) -> bool {
        self.table.is_some()
    }
}

/// A half-open `[start, end)` range carrying a style, local to a block's text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleInterval {
    pub start: usize,
    pub end: usize,
    pub style: TextStyle,
}

impl StyleInterval {
    pub fn new(start: usize, end: usize, style: TextStyle) -> Self {
        Self { start, end, style }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Clamps both ends to `len`, so the interval never reaches past the text.
    pub fn clamped(&self, len: usize) -> StyleInterval {
        let end = self.end.min(len);
        StyleInterval {
            start: self.start.min(end),
            end,
            style: self.style.clone(),
        }
    }

    pub fn overlaps(&self, other: &StyleInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// List membership of a block.
///
/// `position` is the 1-based ordinal within the list element the item belongs
/// to; sibling lists restart at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMembership {
    pub ordered: bool,
    pub nesting_level: usize,
    pub position: usize,
}

impl ListMembership {
    pub fn new(ordered: bool, nesting_level: usize, position: usize) -> Self {
        Self {
            ordered,
            nesting_level,
            position,
        }
    }
}

/// Nominal table cell geometry.
///
/// Row and column indexes are plain sequential counters in document order and
/// are not adjusted for spans of earlier cells. `table` is the per-compile
/// ordinal of the owning table, which keeps adjacent tables apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellGeometry {
    pub table: usize,
    pub row_index: usize,
    pub column_index: usize,
    pub row_span: usize,
    pub column_span: usize,
}

impl CellGeometry {
    pub fn new(row_index: usize, column_index: usize) -> Self {
        Self {
            table: 0,
            row_index,
            column_index,
            row_span: 1,
            column_span: 1,
        }
    }

    pub fn in_table(mut self, table: usize) -> Self {
        self.table = table;
        self
    }

    pub fn with_spans(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span.max(1);
        self.column_span = column_span.max(1);
        self
    }
}
