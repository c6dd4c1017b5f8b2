//! Range-addressed edit operations.
//!
//! Requests are produced in emission order and that order is meaningful: every
//! range refers to text inserted by an earlier `InsertText`, and a
//! `CreateTable` precedes the insertion of its first cell.

use crate::ir::style::{ParagraphStyle, TextStyle};
use serde::Serialize;
use std::fmt;

/// A half-open `[start, end)` range into the document stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: usize,
    pub end_index: usize,
}

impl Range {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.end_index <= self.start_index
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_index, self.end_index)
    }
}

/// A single edit operation against the flat document stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Request {
    InsertText {
        at: usize,
        text: String,
    },
    SetParagraphStyle {
        range: Range,
        style: ParagraphStyle,
    },
    SetTextStyle {
        range: Range,
        style: TextStyle,
    },
    SetListBullet {
        range: Range,
        ordered: bool,
    },
    CreateTable {
        at: usize,
        rows: usize,
        columns: usize,
    },
}

impl Request {
    /// Short variant name, used by listings and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::InsertText { .. } => "InsertText",
            Request::SetParagraphStyle { .. } => "SetParagraphStyle",
            Request::SetTextStyle { .. } => "SetTextStyle",
            Request::SetListBullet { .. } => "SetListBullet",
            Request::CreateTable { .. } => "CreateTable",
        }
    }

    /// The range this request addresses, if it is range-based.
    pub fn range(&self) -> Option<Range> {
        match self {
            Request::SetParagraphStyle { range, .. }
            | Request::SetTextStyle { range, .. }
            | Request::SetListBullet { range, .. } => Some(*range),
            Request::InsertText { .. } | Request::CreateTable { .. } => None,
        }
    }
}

/// Concatenates the text of every `InsertText`, in emission order.
pub fn inserted_text(requests: &[Request]) -> String {
    requests
        .iter()
        .filter_map(|request| match request {
            Request::InsertText { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
