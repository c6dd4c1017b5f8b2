//! Flattens one block-level subtree into text plus style intervals.
//!
//! # The Problem
//!
//! Markup text is whitespace-rich and nested, while a block's text is flat
//! and normalized. A style interval must address the *normalized* text, so
//! offsets cannot be computed from the raw source and then patched; they have
//! to be taken from the normalized output as it is produced.
//!
//! # The Algorithm
//!
//! 1. Walk the subtree depth-first, appending to one output buffer.
//!    - Text nodes contribute their characters. Outside whitespace-preserving
//!      elements, runs of ASCII whitespace collapse into a single space. The
//!      space is only materialized once visible text follows it, so the
//!      buffer never starts with, nor ends on, a collapsed space.
//!    - `<br>` contributes `\n` and drops any pending space.
//!    - Nested flow elements (paragraphs inside a list item, cells of a nested
//!      table) behave like whitespace between their neighbours.
//! 2. On entering an element, remember the buffer position (in bytes and in
//!    stream units). On leaving it, the element's own text is the buffer
//!    slice from that position.
//! 3. Leading and trailing whitespace is trimmed off that slice for style
//!    attribution, so an interval never starts or ends on whitespace. Styled
//!    elements with no visible content produce no interval.
//! 4. Finally the buffer is trimmed. Trailing whitespace always goes; leading
//!    whitespace only when it was produced outside a whitespace-preserving
//!    element, so preformatted indentation survives. Dropping a prefix shifts
//!    every interval left. Intervals are clamped to the final length and
//!    sorted by start.
//!    Intervals of enclosing elements precede those of nested ones when they
//!    share a start; overlap resolution is left to the caller.

use crate::common::style_map::StyleMapper;
use crate::common::tags::{self, TagKind};
use crate::ir::blocks::{text_len, StyleInterval};
use crate::ir::nodes::{Element, MarkupNode};

/// Normalized text of a subtree and its block-local style intervals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectedText {
    pub text: String,
    pub intervals: Vec<StyleInterval>,
}

/// Collects text and style intervals from markup.
pub struct TextCollector<'a> {
    styles: &'a StyleMapper,
    skip_nested_lists: bool,
    out: String,
    units: usize,
    pending_space: bool,
    preserve_depth: usize,
    // Leading whitespace bytes pushed outside preserving elements.
    droppable_prefix: usize,
    in_prefix: bool,
    // Slots are reserved on element entry so enclosing elements come first.
    slots: Vec<Option<StyleInterval>>,
}

impl<'a> TextCollector<'a> {
    pub fn new(styles: &'a StyleMapper) -> Self {
        Self {
            styles,
            skip_nested_lists: false,
            out: String::new(),
            units: 0,
            pending_space: false,
            preserve_depth: 0,
            droppable_prefix: 0,
            in_prefix: true,
            slots: Vec::new(),
        }
    }

    /// Leaves nested `ul`/`ol` out of the text (used for list items, whose
    /// nested lists become blocks of their own).
    pub fn skipping_nested_lists(mut self) -> Self {
        self.skip_nested_lists = true;
        self
    }

    /// Collects `element` including its own style.
    pub fn collect(mut self, element: &Element) -> CollectedText {
        self.walk_element(element, true);
        self.finish()
    }

    /// Collects a run of sibling nodes that have no block element of their own.
    pub fn collect_nodes<'n>(
        mut self,
        nodes: impl IntoIterator<Item = &'n MarkupNode>,
    ) -> CollectedText {
        for node in nodes {
            self.walk_node(node);
        }
        self.finish()
    }

    fn walk_node(&mut self, node: &MarkupNode) {
        match node {
            MarkupNode::Text(text) => self.push_text(text),
            MarkupNode::Element(element) => self.walk_element(element, false),
        }
    }

    fn walk_element(&mut self, element: &Element, is_root: bool) {
        let tag = element.tag.as_str();
        match tags::classify(tag) {
            TagKind::Skipped => return,
            TagKind::LineBreak => {
                self.push_break();
                return;
            }
            TagKind::List if self.skip_nested_lists && !is_root => return,
            _ => {}
        }

        let flow = !is_root && tags::breaks_flow(tag);
        if flow {
            self.soft_separator();
        }

        let preserve = tags::preserves_whitespace(tag, element.attribute("style"));
        if preserve {
            self.preserve_depth += 1;
        }

        let style = self.styles.text_style(element);
        let slot = if style.is_empty() {
            None
        } else {
            self.slots.push(None);
            Some((self.slots.len() - 1, self.out.len(), self.units))
        };

        for child in &element.children {
            self.walk_node(child);
        }

        if let Some((slot, start_byte, start_units)) = slot {
            let interval = self
                .interval_since(start_byte, start_units)
                .map(|(start, end)| StyleInterval::new(start, end, style));
            self.slots[slot] = interval;
        }

        if preserve {
            self.preserve_depth -= 1;
        }
        if flow {
            self.soft_separator();
        }
    }

    /// Content interval of the buffer slice starting at the given position,
    /// with surrounding whitespace trimmed off.
    fn interval_since(&self, start_byte: usize, start_units: usize) -> Option<(usize, usize)> {
        let slice = &self.out[start_byte..];
        let without_leading = slice.trim_start();
        let content = without_leading.trim_end();
        if content.is_empty() {
            return None;
        }
        let leading = &slice[..slice.len() - without_leading.len()];
        let start = start_units + text_len(leading);
        Some((start, start + text_len(content)))
    }

    fn push_text(&mut self, text: &str) {
        if self.preserve_depth > 0 {
            self.materialize_space();
            for c in text.chars() {
                // Normalize CRLF into a single newline.
                if c != '\r' {
                    self.push_char(c);
                }
            }
            return;
        }

        for c in text.chars() {
            if c.is_ascii_whitespace() {
                self.soft_separator();
            } else {
                self.materialize_space();
                self.push_char(c);
            }
        }
    }

    fn push_break(&mut self) {
        self.pending_space = false;
        self.push_char('\n');
    }

    /// Requests a single space before the next visible character.
    fn soft_separator(&mut self) {
        if self.preserve_depth > 0 {
            return;
        }
        let ends_open = self
            .out
            .chars()
            .next_back()
            .is_some_and(|last| !last.is_whitespace());
        if ends_open {
            self.pending_space = true;
        }
    }

    fn materialize_space(&mut self) {
        if self.pending_space {
            self.pending_space = false;
            self.push_char(' ');
        }
    }

    fn push_char(&mut self, c: char) {
        if self.in_prefix {
            if c.is_whitespace() && self.preserve_depth == 0 {
                self.droppable_prefix += c.len_utf8();
            } else {
                self.in_prefix = false;
            }
        }
        self.out.push(c);
        self.units += c.len_utf16();
    }

    fn finish(self) -> CollectedText {
        let mut text = self.out;

        let trimmed_len = text.trim_end().len();
        text.truncate(trimmed_len);

        let leading_bytes = self.droppable_prefix.min(text.len());
        let leading_units = text_len(&text[..leading_bytes]);
        text.drain(..leading_bytes);

        let len = text_len(&text);
        let mut intervals: Vec<StyleInterval> = self
            .slots
            .into_iter()
            .flatten()
            .map(|interval| {
                StyleInterval::new(
                    interval.start.saturating_sub(leading_units),
                    interval.end.saturating_sub(leading_units),
                    interval.style,
                )
                .clamped(len)
            })
            .filter(|interval| !interval.is_empty())
            .collect();
        intervals.sort_by_key(|interval| interval.start);

        CollectedText { text, intervals }
    }
}
