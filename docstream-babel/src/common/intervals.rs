//! Pure operations over lists of style intervals.
//!
//! Nested markup yields overlapping and duplicated intervals. Two merge
//! policies live here:
//!
//! - [`insert_merged`] folds any overlapping entry into one entry spanning the
//!   union of the ranges, with the styles merged key-wise (later wins). The
//!   streaming aggregator registers styles this way.
//! - [`coalesce_identical`] only folds entries that cover exactly the same
//!   range. The generator uses it so nested emphasis keeps its own extent.
//!
//! Both keep the list sorted by `start` and never produce empty intervals.

use crate::ir::blocks::StyleInterval;

/// Inserts `interval` into a sorted list, merging every overlapping entry.
///
/// Overlapping entries are replaced by a single entry covering the union of
/// all merged ranges. Styles are merged in registration order, so the newly
/// inserted style wins on conflicting slots.
pub fn insert_merged(intervals: &mut Vec<StyleInterval>, interval: StyleInterval) {
    if interval.is_empty() || interval.style.is_empty() {
        return;
    }

    let mut merged = interval;
    let mut index = 0;
    while index < intervals.len() {
        if intervals[index].overlaps(&merged) {
            let existing = intervals.remove(index);
            merged = StyleInterval {
                start: existing.start.min(merged.start),
                end: existing.end.max(merged.end),
                style: existing.style.merged_with(&merged.style),
            };
            // The grown range may now reach entries already walked past.
            index = 0;
        } else {
            index += 1;
        }
    }

    let position = intervals
        .iter()
        .position(|existing| existing.start > merged.start)
        .unwrap_or(intervals.len());
    intervals.insert(position, merged);
}

/// Folds intervals with identical ranges together and sorts the result.
///
/// Entries are processed in the given order, so a later entry wins on
/// conflicting style slots. Empty intervals and empty styles are dropped.
pub fn coalesce_identical(intervals: &[StyleInterval]) -> Vec<StyleInterval> {
    let mut result: Vec<StyleInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if interval.is_empty() || interval.style.is_empty() {
            continue;
        }
        match result
            .iter_mut()
            .find(|existing| existing.start == interval.start && existing.end == interval.end)
        {
            Some(existing) => existing.style = existing.style.merged_with(&interval.style),
            None => result.push(interval.clone()),
        }
    }
    // Stable: entries sharing a start keep their registration order.
    result.sort_by_key(|interval| interval.start);
    result
}
