//! Requests → editing-API batch body
//!
//! Every request becomes one single-key object named after the API call it
//! stands for. Style updates carry an explicit `fields` mask listing exactly
//! the slots that are set, so untouched attributes are left alone remotely.

use crate::ir::requests::{Range, Request};
use crate::ir::style::{ParagraphStyle, RgbColor, TextStyle};
use serde_json::{json, Map, Value};

const ORDERED_PRESET: &str = "NUMBERED_DECIMAL_ALPHA_ROMAN";
const UNORDERED_PRESET: &str = "BULLET_DISC_CIRCLE_SQUARE";

/// Builds the batch body `{"requests": [...]}`, tagged with the target
/// document when one is given.
pub fn to_batch(requests: &[Request], document_id: Option<&str>) -> Value {
    let mut body = Map::new();
    if let Some(id) = document_id {
        body.insert("documentId".to_string(), json!(id));
    }
    body.insert(
        "requests".to_string(),
        Value::Array(requests.iter().map(request_to_json).collect()),
    );
    Value::Object(body)
}

pub fn request_to_json(request: &Request) -> Value {
    match request {
        Request::InsertText { at, text } => json!({
            "insertText": { "location": { "index": at }, "text": text }
        }),
        Request::SetParagraphStyle { range, style } => json!({
            "updateParagraphStyle": {
                "range": range_to_json(range),
                "paragraphStyle": paragraph_style_to_json(style),
                "fields": style.field_names().join(","),
            }
        }),
        Request::SetTextStyle { range, style } => json!({
            "updateTextStyle": {
                "range": range_to_json(range),
                "textStyle": text_style_to_json(style),
                "fields": style.field_names().join(","),
            }
        }),
        Request::SetListBullet { range, ordered } => json!({
            "createParagraphBullets": {
                "range": range_to_json(range),
                "bulletPreset": if *ordered { ORDERED_PRESET } else { UNORDERED_PRESET },
            }
        }),
        Request::CreateTable { at, rows, columns } => json!({
            "insertTable": { "location": { "index": at }, "rows": rows, "columns": columns }
        }),
    }
}

fn range_to_json(range: &Range) -> Value {
    json!({ "startIndex": range.start_index, "endIndex": range.end_index })
}

fn paragraph_style_to_json(style: &ParagraphStyle) -> Value {
    let mut object = Map::new();
    if let Some(named) = style.named {
        object.insert("namedStyleType".to_string(), json!(named.as_str()));
    }
    if let Some(indent) = style.indent_start {
        object.insert(
            "indentStart".to_string(),
            json!({ "magnitude": indent, "unit": "PT" }),
        );
    }
    Value::Object(object)
}

fn text_style_to_json(style: &TextStyle) -> Value {
    let mut object = Map::new();
    let flags = [
        ("bold", style.bold),
        ("italic", style.italic),
        ("underline", style.underline),
        ("strikethrough", style.strikethrough),
    ];
    for (key, value) in flags {
        if let Some(value) = value {
            object.insert(key.to_string(), json!(value));
        }
    }
    if let Some(url) = &style.link {
        object.insert("link".to_string(), json!({ "url": url }));
    }
    if let Some(color) = style.foreground {
        object.insert("foregroundColor".to_string(), color_to_json(color));
    }
    Value::Object(object)
}

fn color_to_json(color: RgbColor) -> Value {
    json!({
        "color": {
            "rgbColor": { "red": color.red, "green": color.green, "blue": color.blue }
        }
    })
}
