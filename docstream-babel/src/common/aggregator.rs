//! Coalesces several text fragments into a single insertion.
//!
//! Fragments are appended to one buffer. When two fragments would otherwise
//! run together, a single separating space is inserted between them. Callers
//! keep addressing styles in *local* coordinates (offsets into the plain
//! concatenation of their fragments); the aggregator shifts them past every
//! separator it inserted so registered styles stay aligned with the buffer.
//!
//! Overlapping registrations are union-merged (see
//! [`insert_merged`](crate::common::intervals::insert_merged)), so the
//! buffer never carries two entries for the same characters.

use crate::common::intervals::insert_merged;
use crate::ir::blocks::{text_len, StyleInterval};
use crate::ir::requests::{Range, Request};
use crate::ir::style::TextStyle;

/// Stream position of the next insertion.
///
/// Starts at 1: index 0 of the target document is not addressable. Only ever
/// moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    pub const START: usize = 1;

    pub fn new() -> Self {
        Self {
            position: Self::START,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor past `units` inserted units, returning where they start.
    pub fn advance(&mut self, units: usize) -> usize {
        let start = self.position;
        self.position += units;
        start
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of [`Aggregator::flush`]: one insertion and its styles.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedInsert {
    pub at: usize,
    pub text: String,
    /// Buffer-relative, merged and sorted by start.
    pub styles: Vec<StyleInterval>,
}

impl AggregatedInsert {
    pub fn len(&self) -> usize {
        text_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Stream range of a buffer-relative span.
    pub fn range(&self, start: usize, end: usize) -> Range {
        Range::new(self.at + start, self.at + end)
    }

    /// `InsertText` followed by one `SetTextStyle` per merged style.
    pub fn into_requests(self) -> Vec<Request> {
        let mut requests = Vec::with_capacity(self.styles.len() + 1);
        let ranges: Vec<_> = self
            .styles
            .iter()
            .map(|interval| (self.range(interval.start, interval.end), interval.style.clone()))
            .collect();
        requests.push(Request::InsertText {
            at: self.at,
            text: self.text,
        });
        requests.extend(
            ranges
                .into_iter()
                .map(|(range, style)| Request::SetTextStyle { range, style }),
        );
        requests
    }
}

/// Buffer plus offset bookkeeping for one coalesced insertion.
#[derive(Debug, Default)]
pub struct Aggregator {
    buffer: String,
    buffer_units: usize,
    local_units: usize,
    pending_separator: bool,
    // Local offsets at which a separator was inserted, ascending.
    separators: Vec<usize>,
    styles: Vec<StyleInterval>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Length of the buffer in stream units, separators included.
    pub fn len(&self) -> usize {
        self.buffer_units
    }

    /// Appends a fragment with its whitespace collapsed.
    ///
    /// Returns the local offset at which the normalized fragment starts.
    pub fn push(&mut self, fragment: &str) -> usize {
        let normalized = collapse_whitespace(fragment);
        let start = self.append(&normalized);
        if !normalized.is_empty() {
            self.pending_separator = !ends_with_whitespace(&normalized);
        }
        start
    }

    /// Appends a fragment verbatim; it declares its own trailing spacing, so
    /// no separator is requested after it.
    pub fn push_glued(&mut self, fragment: &str) -> usize {
        let start = self.append(fragment);
        if !fragment.is_empty() {
            self.pending_separator = false;
        }
        start
    }

    fn append(&mut self, fragment: &str) -> usize {
        let start = self.local_units;
        if fragment.is_empty() {
            return start;
        }

        let buffer_open = !ends_with_whitespace(&self.buffer);
        let fragment_open = fragment.chars().next().is_some_and(|c| !c.is_whitespace());
        if self.pending_separator && buffer_open && fragment_open {
            self.buffer.push(' ');
            self.buffer_units += 1;
            self.separators.push(start);
        }

        let units = text_len(fragment);
        self.buffer.push_str(fragment);
        self.buffer_units += units;
        self.local_units += units;
        start
    }

    /// Translates a local offset into a buffer offset.
    ///
    /// A separator inserted at local offset `p` sits in front of the character
    /// at `p`, so both the start and the end of a span beginning at `p` move.
    pub fn buffer_offset(&self, local: usize) -> usize {
        local + self.separators.iter().take_while(|&&p| p <= local).count()
    }

    /// Registers a style over the local range `[local_start, local_end)`.
    ///
    /// A range ending exactly where a separator was inserted does not grow to
    /// cover it. The range is clamped to the buffer and merged with any
    /// overlapping registration.
    pub fn register_style(&mut self, local_start: usize, local_end: usize, style: TextStyle) {
        let start = self.buffer_offset(local_start);
        let end = local_end + self.separators.iter().take_while(|&&p| p < local_end).count();
        let interval = StyleInterval::new(start, end, style).clamped(self.buffer_units);
        insert_merged(&mut self.styles, interval);
    }

    /// Drains the buffer into one insertion at the cursor and advances it.
    ///
    /// Returns `None` without touching the cursor when nothing was appended.
    pub fn flush(&mut self, cursor: &mut Cursor) -> Option<AggregatedInsert> {
        let state = std::mem::take(self);
        if state.buffer.is_empty() {
            return None;
        }
        let at = cursor.advance(state.buffer_units);
        Some(AggregatedInsert {
            at,
            text: state.buffer,
            styles: state.styles,
        })
    }
}

fn ends_with_whitespace(text: &str) -> bool {
    text.chars().next_back().is_some_and(char::is_whitespace)
}

/// Collapses every run of ASCII whitespace into one space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
