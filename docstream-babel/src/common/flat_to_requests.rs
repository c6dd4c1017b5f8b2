//! Replays a block sequence against a cursor to produce edit requests.
//!
//! # The High-Level Concept
//!
//! The target document is one character stream that starts at index 1. Each
//! block is inserted as `text + "\n"` at the cursor; every style is applied
//! afterwards through a range into text that is already there. Because the
//! requests are applied in order, the generator only needs to simulate the
//! cursor locally: it never looks at the remote document.
//!
//! # The Algorithm
//!
//! For every block, with `start` the cursor and `len` the block length:
//!
//! 1. If the block opens a table region, emit `CreateTable` at `start` first.
//!    Table sizes come from a pre-pass over the whole sequence ([`table_regions`]).
//! 2. Emit `InsertText { at: start, text: text + "\n" }`.
//! 3. Emit `SetParagraphStyle` over `[start, start + len + 1)`, separator
//!    included.
//! 4. Emit one `SetTextStyle` per inline interval over
//!    `[start + s, start + min(e, len))`, never reaching the separator.
//!    Intervals covering exactly the same range are folded together first.
//! 5. List items extend the open list group (or open a new one when the
//!    ordered flag changes) and get an indentation `SetParagraphStyle`. The
//!    group is closed with one `SetListBullet` as soon as a block of another
//!    kind arrives, and at the end of the sequence.
//! 6. Advance the cursor by `len + 1`.
//!
//! With [`GenerateOptions::coalesce_inserts`], runs of plain blocks go
//! through the [`Aggregator`] instead and come out as a single insertion
//! followed by their style requests. The cursor arithmetic is the same.

use crate::common::aggregator::{Aggregator, Cursor};
use crate::common::intervals::coalesce_identical;
use crate::ir::blocks::{text_len, Block, StyleInterval};
use crate::ir::requests::{Range, Request};
use crate::ir::style::{NamedStyle, ParagraphStyle};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Default list indentation per nesting level, in points.
pub const DEFAULT_INDENT_PER_LEVEL: f64 = 36.0;

/// Tunables for request generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    /// Start indentation added per list nesting level, in points.
    pub indent_per_level: f64,
    /// Merge runs of plain blocks into a single insertion.
    pub coalesce_inserts: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            indent_per_level: DEFAULT_INDENT_PER_LEVEL,
            coalesce_inserts: false,
        }
    }
}

/// Size of one contiguous run of table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRegion {
    /// Index of the region's first block in the sequence.
    pub first_block: usize,
    pub rows: usize,
    pub columns: usize,
}

/// Finds every table region and computes its size.
///
/// A region is a maximal run of consecutive cell blocks belonging to the same
/// table. `rows` counts the distinct row indexes, `columns` is the largest
/// `column_index + column_span`.
pub fn table_regions(blocks: &[Block]) -> Vec<TableRegion> {
    let mut regions = Vec::new();
    let mut index = 0;
    while index < blocks.len() {
        let Some(first) = blocks[index].table else {
            index += 1;
            continue;
        };

        let mut rows = BTreeSet::new();
        let mut columns = 0;
        let first_block = index;
        while let Some(cell) = blocks.get(index).and_then(|block| block.table) {
            if cell.table != first.table {
                break;
            }
            rows.insert(cell.row_index);
            columns = columns.max(cell.column_index.saturating_add(cell.column_span));
            index += 1;
        }

        let region = TableRegion {
            first_block,
            rows: rows.len(),
            columns,
        };
        trace!(?region, "table pre-pass");
        regions.push(region);
    }
    regions
}

/// Converts a block sequence into ordered edit requests.
pub fn generate_requests(blocks: &[Block], options: &GenerateOptions) -> Vec<Request> {
    let mut generator = Generator::new(options, table_regions(blocks));
    for (index, block) in blocks.iter().enumerate() {
        generator.emit_block(index, block);
    }
    let requests = generator.finish();
    debug!(
        blocks = blocks.len(),
        requests = requests.len(),
        "generated requests"
    );
    requests
}

#[derive(Debug, Clone, Copy)]
struct ListGroup {
    start: usize,
    end: usize,
    ordered: bool,
}

/// A plain block buffered in a coalesced run.
struct DeferredParagraph {
    local_start: usize,
    len: usize,
    style: NamedStyle,
}

/// Per-compile generation state.
struct Generator<'o> {
    options: &'o GenerateOptions,
    cursor: Cursor,
    requests: Vec<Request>,
    regions: Vec<TableRegion>,
    list_group: Option<ListGroup>,
    aggregator: Aggregator,
    deferred: Vec<DeferredParagraph>,
}

impl<'o> Generator<'o> {
    fn new(options: &'o GenerateOptions, regions: Vec<TableRegion>) -> Self {
        Self {
            options,
            cursor: Cursor::new(),
            requests: Vec::new(),
            regions,
            list_group: None,
            aggregator: Aggregator::new(),
            deferred: Vec::new(),
        }
    }

    fn emit_block(&mut self, index: usize, block: &Block) {
        if !block.is_list_item() {
            self.close_list_group();
        }

        if self.options.coalesce_inserts && !block.is_list_item() && !block.is_table_cell() {
            self.buffer_block(block);
            return;
        }
        self.flush_coalesced();

        let start = self.cursor.position();
        if let Some(region) = self.regions.iter().find(|r| r.first_block == index) {
            self.requests.push(Request::CreateTable {
                at: start,
                rows: region.rows,
                columns: region.columns,
            });
        }

        let len = block.len();
        self.requests.push(Request::InsertText {
            at: start,
            text: format!("{}\n", block.text),
        });
        self.requests.push(Request::SetParagraphStyle {
            range: Range::new(start, start + len + 1),
            style: ParagraphStyle::named(block.paragraph_style),
        });
        self.emit_text_styles(start, len, &block.inline_styles);

        if let Some(list) = block.list {
            self.extend_list_group(start, start + len, list.ordered);
            self.requests.push(Request::SetParagraphStyle {
                range: Range::new(start, start + len + 1),
                style: ParagraphStyle::indent(
                    list.nesting_level as f64 * self.options.indent_per_level,
                ),
            });
        }

        self.cursor.advance(len + 1);
    }

    fn emit_text_styles(&mut self, start: usize, len: usize, intervals: &[StyleInterval]) {
        for interval in coalesce_identical(intervals) {
            let clamped = interval.clamped(len);
            if clamped.end != interval.end {
                trace!(
                    start = interval.start,
                    end = interval.end,
                    len,
                    "clamped style interval"
                );
            }
            if clamped.is_empty() {
                continue;
            }
            self.requests.push(Request::SetTextStyle {
                range: Range::new(start + clamped.start, start + clamped.end),
                style: clamped.style,
            });
        }
    }

    fn extend_list_group(&mut self, start: usize, end: usize, ordered: bool) {
        match self.list_group.as_mut() {
            Some(group) if group.ordered == ordered => group.end = end,
            _ => {
                self.close_list_group();
                self.list_group = Some(ListGroup {
                    start,
                    end,
                    ordered,
                });
            }
        }
    }

    fn close_list_group(&mut self) {
        let Some(group) = self.list_group.take() else {
            return;
        };
        let range = Range::new(group.start, group.end);
        if range.is_empty() {
            trace!(%range, "dropping empty list group");
            return;
        }
        self.requests.push(Request::SetListBullet {
            range,
            ordered: group.ordered,
        });
    }

    fn buffer_block(&mut self, block: &Block) {
        let local_start = self.aggregator.push_glued(&format!("{}\n", block.text));
        let len = block.len();
        for interval in &block.inline_styles {
            let clamped = interval.clamped(len);
            self.aggregator.register_style(
                local_start + clamped.start,
                local_start + clamped.end,
                clamped.style,
            );
        }
        self.deferred.push(DeferredParagraph {
            local_start,
            len,
            style: block.paragraph_style,
        });
    }

    /// Emits the buffered run: one insertion, then paragraph and text styles.
    fn flush_coalesced(&mut self) {
        // Offsets must be translated before the flush resets the aggregator.
        let deferred: Vec<_> = self
            .deferred
            .drain(..)
            .map(|paragraph| {
                let start = self.aggregator.buffer_offset(paragraph.local_start);
                (start, paragraph.len, paragraph.style)
            })
            .collect();
        let Some(insert) = self.aggregator.flush(&mut self.cursor) else {
            return;
        };
        let paragraphs: Vec<_> = deferred
            .into_iter()
            .map(|(start, len, style)| Request::SetParagraphStyle {
                range: insert.range(start, start + len + 1),
                style: ParagraphStyle::named(style),
            })
            .collect();
        trace!(
            at = insert.at,
            units = text_len(&insert.text),
            paragraphs = paragraphs.len(),
            "flushed coalesced run"
        );

        let mut requests = insert.into_requests().into_iter();
        self.requests.extend(requests.next());
        self.requests.extend(paragraphs);
        self.requests.extend(requests);
    }

    fn finish(mut self) -> Vec<Request> {
        self.flush_coalesced();
        self.close_list_group();
        self.requests
    }
}
