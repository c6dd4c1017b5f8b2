//! Plain request listing
//!
//! One request per line, in emission order. Meant for reading and for tests:
//!
//! ```text
//! InsertText at=1 "Hello World\n"
//! SetParagraphStyle [1, 13) NORMAL_TEXT
//! SetTextStyle [7, 12) bold
//! ```

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::requests::Request;
use crate::ir::style::{ParagraphStyle, RgbColor, TextStyle};

#[derive(Debug, Default, Clone, Copy)]
pub struct RequestsFormat;

impl Format for RequestsFormat {
    fn name(&self) -> &str {
        "requests"
    }

    fn description(&self) -> &str {
        "One request per line, for inspection"
    }

    fn file_extensions(&self) -> &[&str] {
        &["requests"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, requests: &[Request]) -> Result<String, ConvertError> {
        Ok(to_listing(requests))
    }
}

pub fn to_listing(requests: &[Request]) -> String {
    requests
        .iter()
        .map(|request| describe(request) + "\n")
        .collect()
}

/// Single-line description of a request.
pub fn describe(request: &Request) -> String {
    match request {
        Request::InsertText { at, text } => format!("InsertText at={at} {text:?}"),
        Request::SetParagraphStyle { range, style } => {
            format!("SetParagraphStyle {range} {}", describe_paragraph(style))
        }
        Request::SetTextStyle { range, style } => {
            format!("SetTextStyle {range} {}", describe_text(style))
        }
        Request::SetListBullet { range, ordered } => format!(
            "SetListBullet {range} {}",
            if *ordered { "ordered" } else { "unordered" }
        ),
        Request::CreateTable { at, rows, columns } => {
            format!("CreateTable at={at} rows={rows} columns={columns}")
        }
    }
}

fn describe_paragraph(style: &ParagraphStyle) -> String {
    let mut parts = Vec::new();
    if let Some(named) = style.named {
        parts.push(named.as_str().to_string());
    }
    if let Some(indent) = style.indent_start {
        parts.push(format!("indent={indent}pt"));
    }
    parts.join(" ")
}

fn describe_text(style: &TextStyle) -> String {
    let mut parts = Vec::new();
    let flags = [
        ("bold", style.bold),
        ("italic", style.italic),
        ("underline", style.underline),
        ("strikethrough", style.strikethrough),
    ];
    for (name, value) in flags {
        match value {
            Some(true) => parts.push(name.to_string()),
            Some(false) => parts.push(format!("!{name}")),
            None => {}
        }
    }
    if let Some(url) = &style.link {
        parts.push(format!("link={url}"));
    }
    if let Some(color) = style.foreground {
        parts.push(format!("color={}", hex(color)));
    }
    parts.join(" ")
}

fn hex(color: RgbColor) -> String {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(color.red),
        channel(color.green),
        channel(color.blue)
    )
}
