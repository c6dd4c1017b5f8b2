//! Converts a nested markup tree into the flat block sequence.
//!
//! # The High-Level Concept
//!
//! The editing API has no nesting: a document is a run of paragraphs. Each
//! paragraph-worth of markup (a paragraph, heading, list item or table cell)
//! becomes one [`Block`] whose text is collected by the
//! [`TextCollector`](crate::common::text_collector::TextCollector). Structure
//! that cannot be expressed as text (list nesting and numbering, table
//! geometry) is carried alongside as metadata.
//!
//! # The Algorithm
//!
//! 1. **Containers:** children are walked in order. Consecutive text and
//!    inline elements form an anonymous run; a run that yields visible text
//!    becomes a normal block. Block, list and table elements end the run.
//!
//! 2. **Blocks:** a block element holding only inline content is collected as
//!    one block. One that also holds blocks, lists or tables is walked as a
//!    container instead.
//!
//! 3. **Lists:** every `ul`/`ol` pushes a list context (`ordered`, nesting
//!    level) with its own position counter, so sibling lists restart at 1.
//!    A list item's text excludes its nested lists; those are walked after the
//!    item and produce deeper blocks.
//!
//! 4. **Tables:** rows are walked in document order, then cells. Each cell
//!    becomes a block with nominal row/column counters and the spans read
//!    from `rowspan`/`colspan` (1 when absent or not a positive number).
//!
//! 5. **Line breaks** outside any block append `\n` to the previous block.
//!
//! 6. **Everything else** is tolerated: unknown elements are walked as if
//!    their children belonged to the parent, skipped elements are dropped.
//!
//! All state (list stack, table ordinal) lives in one [`Extractor`] that is
//! created per call, so concurrent or interleaved compiles never share
//! counters.

use crate::common::style_map::StyleMapper;
use crate::common::tags::{self, TagKind};
use crate::common::text_collector::{CollectedText, TextCollector};
use crate::ir::blocks::{Block, CellGeometry, ListMembership};
use crate::ir::nodes::{Document, Element, MarkupNode};
use crate::ir::style::NamedStyle;
use tracing::{debug, trace};

/// Converts a markup document into its ordered block sequence.
pub fn extract_blocks(document: &Document, styles: &StyleMapper) -> Vec<Block> {
    let mut extractor = Extractor::new(styles);
    extractor.walk_children(&document.children);
    let blocks = extractor.finish();
    debug!(blocks = blocks.len(), "extracted blocks");
    blocks
}

struct ListContext {
    ordered: bool,
    nesting_level: usize,
    position: usize,
}

/// Per-compile extraction state.
struct Extractor<'a> {
    styles: &'a StyleMapper,
    blocks: Vec<Block>,
    lists: Vec<ListContext>,
    next_table: usize,
}

impl<'a> Extractor<'a> {
    fn new(styles: &'a StyleMapper) -> Self {
        Self {
            styles,
            blocks: Vec::new(),
            lists: Vec::new(),
            next_table: 0,
        }
    }

    fn finish(self) -> Vec<Block> {
        self.blocks
    }

    fn collector(&self) -> TextCollector<'a> {
        TextCollector::new(self.styles)
    }

    fn walk_children(&mut self, children: &[MarkupNode]) {
        let mut run: Vec<&MarkupNode> = Vec::new();

        for child in children {
            let element = match child {
                MarkupNode::Text(_) => {
                    run.push(child);
                    continue;
                }
                MarkupNode::Element(element) => element,
            };

            match tags::classify(&element.tag) {
                TagKind::Inline | TagKind::Transparent if !has_structural_children(element) => {
                    run.push(child);
                }
                TagKind::Inline | TagKind::Transparent => {
                    self.flush_run(&mut run);
                    self.walk_children(&element.children);
                }
                TagKind::LineBreak => {
                    self.flush_run(&mut run);
                    self.append_line_break();
                }
                TagKind::Skipped => {
                    trace!(tag = %element.tag, "skipping element");
                }
                TagKind::Block => {
                    self.flush_run(&mut run);
                    self.walk_block(element);
                }
                TagKind::List => {
                    self.flush_run(&mut run);
                    self.walk_list(element);
                }
                TagKind::Table => {
                    self.flush_run(&mut run);
                    self.walk_table(element);
                }
            }
        }

        self.flush_run(&mut run);
    }

    /// Turns pending bare text and inline elements into a normal block.
    fn flush_run(&mut self, run: &mut Vec<&MarkupNode>) {
        if run.is_empty() {
            return;
        }
        let collected = self.collector().collect_nodes(run.drain(..));
        self.push_block(collected, NamedStyle::NormalText);
    }

    fn append_line_break(&mut self) {
        match self.blocks.last_mut() {
            Some(block) => block.text.push('\n'),
            None => trace!("dropping line break before first block"),
        }
    }

    fn walk_block(&mut self, element: &Element) {
        if has_structural_children(element) {
            self.walk_children(&element.children);
            return;
        }
        let collected = self.collector().collect(element);
        self.push_block(collected, self.styles.paragraph_style(element));
    }

    fn push_block(&mut self, collected: CollectedText, style: NamedStyle) {
        if collected.text.is_empty() {
            return;
        }
        let mut block = Block::new(collected.text).with_paragraph_style(style);
        block.inline_styles = collected.intervals;
        self.blocks.push(block);
    }

    fn walk_list(&mut self, list: &Element) {
        self.lists.push(ListContext {
            ordered: list.tag == "ol",
            nesting_level: self.lists.len(),
            position: 0,
        });

        for child in &list.children {
            match child {
                MarkupNode::Text(_) if child.is_blank_text() => {}
                MarkupNode::Text(_) => {
                    let collected = self.collector().collect_nodes([child]);
                    self.push_list_item(collected);
                }
                MarkupNode::Element(element) => match tags::classify(&element.tag) {
                    TagKind::List => self.walk_list(element),
                    TagKind::Skipped => {}
                    _ => self.walk_list_item(element),
                },
            }
        }

        self.lists.pop();
    }

    fn walk_list_item(&mut self, item: &Element) {
        let collected = self.collector().skipping_nested_lists().collect(item);
        self.push_list_item(collected);
        self.walk_nested_lists(item);
    }

    fn push_list_item(&mut self, collected: CollectedText) {
        if collected.text.is_empty() {
            return;
        }
        let Some(context) = self.lists.last_mut() else {
            self.push_block(collected, NamedStyle::NormalText);
            return;
        };
        context.position += 1;
        let membership =
            ListMembership::new(context.ordered, context.nesting_level, context.position);

        let mut block = Block::new(collected.text).with_list(membership);
        block.inline_styles = collected.intervals;
        self.blocks.push(block);
    }

    /// Walks the lists nested somewhere inside a list item, in document order.
    fn walk_nested_lists(&mut self, element: &Element) {
        for child in element.child_elements() {
            match tags::classify(&child.tag) {
                TagKind::List => self.walk_list(child),
                TagKind::Skipped => {}
                _ => self.walk_nested_lists(child),
            }
        }
    }

    fn walk_table(&mut self, table: &Element) {
        let table_id = self.next_table;
        self.next_table += 1;

        for caption in table.child_elements().filter(|e| e.tag == "caption") {
            let collected = self.collector().collect(caption);
            self.push_block(collected, NamedStyle::NormalText);
        }

        let mut row_index = 0;
        for row in table_rows(table) {
            let mut column_index = 0;
            for cell in row
                .child_elements()
                .filter(|cell| matches!(cell.tag.as_str(), "td" | "th"))
            {
                let collected = self.collector().collect(cell);
                let geometry = CellGeometry::new(row_index, column_index)
                    .in_table(table_id)
                    .with_spans(
                        span_attribute(cell, "rowspan", MAX_ROW_SPAN),
                        span_attribute(cell, "colspan", MAX_COLUMN_SPAN),
                    );

                let mut block = Block::new(collected.text).with_table(geometry);
                block.inline_styles = collected.intervals;
                self.blocks.push(block);
                column_index += 1;
            }
            if column_index > 0 {
                row_index += 1;
            }
        }
        trace!(table = table_id, rows = row_index, "extracted table");
    }
}

/// Rows directly under the table or inside its row groups, in document order.
fn table_rows(table: &Element) -> Vec<&Element> {
    let mut rows = Vec::new();
    for child in table.child_elements() {
        match child.tag.as_str() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => {
                rows.extend(child.child_elements().filter(|row| row.tag == "tr"))
            }
            _ => {}
        }
    }
    rows
}

/// Largest accepted `colspan`, as in HTML table processing.
const MAX_COLUMN_SPAN: usize = 1000;
/// Largest accepted `rowspan`.
const MAX_ROW_SPAN: usize = 65534;

/// Reads a span attribute, defaulting to 1 when absent or not a positive
/// number, and capping it at `max`.
fn span_attribute(cell: &Element, name: &str, max: usize) -> usize {
    cell.attribute(name)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|span| *span >= 1)
        .map_or(1, |span| span.min(max))
}

/// True if a direct child is (or hides) a block, list or table.
fn has_structural_children(element: &Element) -> bool {
    element.child_elements().any(|child| match tags::classify(&child.tag) {
        TagKind::Block | TagKind::List | TagKind::Table => true,
        TagKind::Inline | TagKind::Transparent => has_structural_children(child),
        TagKind::LineBreak | TagKind::Skipped => false,
    })
}
